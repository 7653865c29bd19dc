// src/render/state/bindgroups.rs
//
// Bind group creation. Both passes get one bind group per ping-pong parity,
// prebuilt at target-creation time: trace[i] writes target i while reading
// target 1-i as history; present[i] reads target i.

use super::{buffers::Buffers, layout::Layouts, textures::TargetPair};

pub struct BindGroups {
    pub trace: [wgpu::BindGroup; 2],
    pub present: [wgpu::BindGroup; 2],
}

fn make_trace_bg(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    buffers: &Buffers,
    history_color: &wgpu::TextureView,
    history_bloom: &wgpu::TextureView,
    label: &str,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: buffers.frame.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: buffers.scene.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::TextureView(history_color),
            },
            wgpu::BindGroupEntry {
                binding: 3,
                resource: wgpu::BindingResource::TextureView(history_bloom),
            },
        ],
    })
}

fn make_present_bg(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    buffers: &Buffers,
    color: &wgpu::TextureView,
    bloom: &wgpu::TextureView,
    label: &str,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(color),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(bloom),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: buffers.tonemap.as_entire_binding(),
            },
        ],
    })
}

pub fn create_bind_groups(
    device: &wgpu::Device,
    layouts: &Layouts,
    buffers: &Buffers,
    pair: &TargetPair,
) -> BindGroups {
    let [a, b] = &pair.targets;

    let trace = [
        // write a, read b
        make_trace_bg(device, &layouts.trace, buffers, &b.color, &b.bloom, "trace_bg_write_a"),
        // write b, read a
        make_trace_bg(device, &layouts.trace, buffers, &a.color, &a.bloom, "trace_bg_write_b"),
    ];

    let present = [
        make_present_bg(device, &layouts.present, buffers, &a.color, &a.bloom, "present_bg_read_a"),
        make_present_bg(device, &layouts.present, buffers, &b.color, &b.bloom, "present_bg_read_b"),
    ];

    BindGroups { trace, present }
}
