//! # Graphics Module
//!
//! Camera, picking, geometry and the scene graph are plain CPU-side types;
//! only [`rendering`] and [`resources`] touch the GPU.
//!
//! - **Camera System** ([`camera`]) - orbit camera with damped controls
//! - **Picking** ([`picking`]) - pointer rays, planes and bounding boxes
//! - **Geometry** ([`geometry`]) - procedural cube, plane and edge meshes
//! - **Scene Management** ([`scene`]) - objects, overlay links and lights
//! - **Resource Management** ([`resources`]) - materials and uniform bindings
//! - **Rendering Pipeline** ([`rendering`]) - surface, pipelines and draw calls

pub mod camera;
pub mod geometry;
pub mod picking;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use camera::orbit_camera::OrbitCamera;
pub use rendering::render_engine::RenderEngine;
