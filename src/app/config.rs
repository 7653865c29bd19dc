// src/app/config.rs
// -----------------
// Global config knobs for the voxel raytracer.

pub const WINDOW_WIDTH: u32 = 800;
pub const WINDOW_HEIGHT: u32 = 800;

// Camera.
pub const FOV_Y_DEG: f32 = 70.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 100.0;
pub const CAMERA_SPEED_MPS: f32 = 5.0;
pub const MOUSE_SENS_DEG_PER_PX: f32 = 0.1;

// Voxel map dimensions and palette size.
// NOTE: These must match the shader-side constants in `shaders/trace.wgsl`
// (palette array length) and the storage buffer layout in gpu_types.rs.
pub const MAP_W: u32 = 15;
pub const MAP_H: u32 = 15;
pub const MAP_D: u32 = 15;
pub const PALETTE_SIZE: usize = 10;

// Path tracing.
pub const BOUNCE_LIMIT: u32 = 30;

// Adaptive sample rate. Smoothing factor and FPS tolerance band are empirical
// constants; they flow through SampleRateParams so they stay tunable.
pub const MIN_SPP: i32 = 1;
pub const MAX_SPP: i32 = 500;
pub const TARGET_FPS: f32 = 60.0;
pub const SPP_SMOOTHING: f32 = 0.1;
pub const FPS_TOLERANCE: f32 = 2.0;
