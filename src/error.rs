// src/error.rs
//
// Startup failure taxonomy. Everything here is fatal: a missing adapter,
// a refused device or a broken shader cannot self-heal at runtime, so these
// abort init with a diagnostic instead of being retried.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InitError {
    #[error("failed to create window surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible GPU adapter found")]
    AdapterUnavailable,

    #[error("failed to acquire GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("shader build failed: {0}")]
    ShaderBuild(String),

    #[error("render resource allocation failed: {0}")]
    ResourceAllocation(String),
}
