//! Core rendering functionality
//!
//! Handles render pipelines, GPU resource management, and frame rendering.

pub mod gpu_object;
pub mod pipeline_manager;
pub mod render_engine;

pub use gpu_object::{DrawObject, GpuObject, TransformUniform};
pub use pipeline_manager::{PipelineConfig, PipelineManager, PipelineStats};
pub use render_engine::RenderEngine;
