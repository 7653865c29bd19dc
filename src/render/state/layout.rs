// src/render/state/layout.rs
//
// Bind group layouts and small "entry constructors" to reduce repetition.
//
// This module encodes the contract between WGSL `@group(n) @binding(m)`
// declarations and the Rust-side wgpu setup. If bindings or types mismatch,
// pipeline creation or bind group creation will fail (or validation will trip).

pub struct Layouts {
    /// group(0) of the raytrace pass: frame uniform + scene storage +
    /// previous frame's color/bloom history textures.
    pub trace: wgpu::BindGroupLayout,

    /// group(0) of the present pass: this frame's color/bloom + tonemap uniform.
    pub present: wgpu::BindGroupLayout,
}

/// Convenience for a uniform-buffer entry.
fn bgl_uniform(binding: u32, visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

/// Convenience for a read-only storage-buffer entry.
fn bgl_storage_ro(binding: u32, visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Storage { read_only: true },
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

/// Convenience for a sampled 2D texture entry.
///
/// All targets are RGBA32F read back with textureLoad, hence filterable:false.
fn bgl_tex_sample(binding: u32, visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Texture {
            sample_type: wgpu::TextureSampleType::Float { filterable: false },
            view_dimension: wgpu::TextureViewDimension::D2,
            multisampled: false,
        },
        count: None,
    }
}

/// Create all bind group layouts used by the renderer.
///
/// Binding indices here must match the WGSL shader code.
pub fn create_layouts(device: &wgpu::Device) -> Layouts {
    let fs_vis = wgpu::ShaderStages::FRAGMENT;

    // Raytrace pass, group(0):
    //   binding(0) frame uniform
    //   binding(1) scene storage (dims + palette + voxels)
    //   binding(2) previous color (accumulation history)
    //   binding(3) previous bloom
    let trace = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("trace_bgl"),
        entries: &[
            bgl_uniform(0, fs_vis),
            bgl_storage_ro(1, fs_vis),
            bgl_tex_sample(2, fs_vis),
            bgl_tex_sample(3, fs_vis),
        ],
    });

    // Present pass, group(0):
    //   binding(0) current color
    //   binding(1) current bloom
    //   binding(2) tonemap uniform
    let present = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("present_bgl"),
        entries: &[
            bgl_tex_sample(0, fs_vis),
            bgl_tex_sample(1, fs_vis),
            bgl_uniform(2, fs_vis),
        ],
    });

    Layouts { trace, present }
}
