//! # Scene Management Module
//!
//! CPU-side scene graph: objects with geometry, material and transform,
//! addressed by [`ObjectId`], plus the light rig. Nothing here touches the
//! GPU; the render engine mirrors the scene into buffers on its own.
//!
//! ## Key Components
//!
//! - [`Scene`] - object storage, overlay links and lights
//! - [`SceneObject`] - one renderable with its [`Transform`]
//! - [`Stage`] - the ids of the demo scene's objects, built by [`build_stage`]
//! - [`Vertex3D`] - GPU vertex format

pub mod light;
pub mod object;
pub mod scene;
pub mod stage;
pub mod vertex;

// Re-export main types
pub use light::{AmbientLight, Lights, PointLight};
pub use object::{ObjectId, SceneObject, Transform};
pub use scene::{Scene, SceneStatistics};
pub use stage::{build_stage, Stage};
pub use vertex::Vertex3D;
