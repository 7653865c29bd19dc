// src/render/state/buffers.rs
//
// Persistent GPU buffers.

use crate::render::gpu_types::{FrameGpu, SceneHeaderGpu, TonemapGpu};

pub struct Buffers {
    // --- Uniforms ---
    pub frame: wgpu::Buffer,
    pub tonemap: wgpu::Buffer,

    // --- Storage ---
    /// SceneHeaderGpu followed by the voxel material array.
    pub scene: wgpu::Buffer,
    pub scene_voxel_capacity: usize,
}

fn make_uniform_buffer<T: Sized>(device: &wgpu::Device, label: &str) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: std::mem::size_of::<T>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

pub fn create_persistent_buffers(device: &wgpu::Device, voxel_capacity: usize) -> Buffers {
    let frame = make_uniform_buffer::<FrameGpu>(device, "frame_buf");
    let tonemap = make_uniform_buffer::<TonemapGpu>(device, "tonemap_buf");

    let scene_size = std::mem::size_of::<SceneHeaderGpu>() as u64
        + (voxel_capacity * std::mem::size_of::<u32>()) as u64;

    let scene = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("scene_buf"),
        size: scene_size,
        usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    Buffers {
        frame,
        tonemap,
        scene,
        scene_voxel_capacity: voxel_capacity,
    }
}
