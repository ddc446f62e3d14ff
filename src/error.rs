//! Error types for window, surface and GPU setup.
//!
//! Picking misses and parallel drag rays are ordinary outcomes and are
//! expressed as `Option`, never as errors.

use thiserror::Error;

/// Errors raised while acquiring or driving the rendering surface
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to create rendering surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible graphics adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to open graphics device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported texture formats")]
    NoSurfaceFormat,

    #[error("render pipeline '{0}' is not available")]
    MissingPipeline(String),
}

pub type Result<T> = std::result::Result<T, SceneError>;
