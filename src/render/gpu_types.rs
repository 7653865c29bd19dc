// src/render/gpu_types.rs
//
// CPU-side mirrors of the WGSL uniform/storage structs. Field order, padding
// and alignment must match `shaders/trace.wgsl` / `shaders/present.wgsl`.

use bytemuck::{Pod, Zeroable};

use crate::app::config;

/// Per-frame parameters for the raytrace pass (uniform, 160 bytes).
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub struct FrameGpu {
    pub resolution: [f32; 2],
    pub time: f32,
    pub spp: u32,

    pub view_inv: [[f32; 4]; 4],
    pub proj_inv: [[f32; 4]; 4],

    pub bounce_limit: u32,
    pub frames_since_reset: u32,
    pub use_fresnel: u32,
    pub _pad0: u32,
}

/// Tone-mapping parameters for the present pass (uniform, 16 bytes).
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub struct TonemapGpu {
    pub use_srgb: u32,
    pub use_aces: u32,
    pub _pad0: [u32; 2],
}

/// Fixed-size head of the scene storage buffer; the voxel material array
/// follows it immediately at offset `size_of::<SceneHeaderGpu>()`.
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub struct SceneHeaderGpu {
    pub dims: [u32; 4],
    pub palette: [[f32; 4]; config::PALETTE_SIZE],
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    // The WGSL side assumes these exact sizes; a field added or dropped on
    // one side only shows up here before it shows up as a validation error.
    #[test]
    fn uniform_sizes_match_wgsl() {
        assert_eq!(size_of::<FrameGpu>(), 160);
        assert_eq!(size_of::<TonemapGpu>(), 16);
        assert_eq!(size_of::<SceneHeaderGpu>(), 176);
    }
}
