// src/gfx/resources/mod.rs
//! GPU resource management
//!
//! Materials, global uniform bindings and the depth buffer.

pub mod global_bindings;
pub mod material;
pub mod texture_resource;

// Re-export main types
pub use global_bindings::{update_global_ubo, GlobalBindings, GlobalUBO};
pub use material::{Material, MaterialUniform};
pub use texture_resource::TextureResource;
