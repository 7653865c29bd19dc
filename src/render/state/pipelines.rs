// src/render/state/pipelines.rs
//
// Pipeline creation. Both passes draw the same full-screen quad (two
// triangles, vertices generated in the vertex shader): the raytrace pass into
// the offscreen target pair, the present pass into the swapchain.

use super::layout::Layouts;

pub struct Pipelines {
    pub trace: wgpu::RenderPipeline,
    pub present: wgpu::RenderPipeline,
}

fn make_fullscreen_pipeline(
    device: &wgpu::Device,
    label: &str,
    module: &wgpu::ShaderModule,
    bgl: &wgpu::BindGroupLayout,
    targets: &[Option<wgpu::ColorTargetState>],
) -> wgpu::RenderPipeline {
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(&format!("{label}_pl")),
        bind_group_layouts: &[bgl],
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(&pl),
        vertex: wgpu::VertexState {
            module,
            entry_point: "vs_main",
            // Quad corners come from the vertex index; no vertex buffers.
            buffers: &[],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module,
            entry_point: "fs_main",
            targets,
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
    })
}

fn offscreen_target() -> Option<wgpu::ColorTargetState> {
    Some(wgpu::ColorTargetState {
        format: wgpu::TextureFormat::Rgba32Float,
        blend: None,
        write_mask: wgpu::ColorWrites::ALL,
    })
}

pub fn create_pipelines(
    device: &wgpu::Device,
    layouts: &Layouts,
    trace_module: &wgpu::ShaderModule,
    present_module: &wgpu::ShaderModule,
    surface_format: wgpu::TextureFormat,
) -> Pipelines {
    // MRT: location(0) accumulated color, location(1) bloom.
    let trace = make_fullscreen_pipeline(
        device,
        "trace_pipeline",
        trace_module,
        &layouts.trace,
        &[offscreen_target(), offscreen_target()],
    );

    let present = make_fullscreen_pipeline(
        device,
        "present_pipeline",
        present_module,
        &layouts.present,
        &[Some(wgpu::ColorTargetState {
            format: surface_format,
            blend: Some(wgpu::BlendState::REPLACE),
            write_mask: wgpu::ColorWrites::ALL,
        })],
    );

    Pipelines { trace, present }
}
