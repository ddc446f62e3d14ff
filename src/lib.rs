//! Interactive 3D cube demo
//!
//! A floor, a wall and a spinning cube with an edge overlay, viewed through
//! a damped orbit camera. Pressing on the cube drags it across the floor
//! plane; pressing anywhere else orbits the camera.
//!
//! The scene logic ([`controller::SceneController`]) is independent of the
//! window and GPU; [`app::DragCubeApp`] wires it to winit and wgpu.

pub mod animation;
pub mod app;
pub mod config;
pub mod controller;
pub mod error;
pub mod gfx;
pub mod input;
pub mod interaction;
pub mod wgpu_utils;

pub use app::DragCubeApp;
pub use config::SceneConfig;
pub use error::SceneError;
