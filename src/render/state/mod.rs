// src/render/state/mod.rs
// -----------------------
mod bindgroups;
mod buffers;
mod layout;
mod pipelines;
pub mod textures;

use crate::error::InitError;
use crate::render::gpu_types::{FrameGpu, SceneHeaderGpu, TonemapGpu};
use crate::render::shaders;

use bindgroups::{create_bind_groups, BindGroups};
use buffers::{create_persistent_buffers, Buffers};
use layout::{create_layouts, Layouts};
use pipelines::{create_pipelines, Pipelines};
use textures::{create_target_pair, PingPong, TargetPair};

pub struct Renderer {
    device: wgpu::Device,
    queue: wgpu::Queue,

    layouts: Layouts,
    pipelines: Pipelines,
    buffers: Buffers,
    targets: TargetPair,
    bind_groups: BindGroups,

    ping: PingPong,
}

impl Renderer {
    pub async fn new(
        adapter: &wgpu::Adapter,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        voxel_capacity: usize,
    ) -> Result<Self, InitError> {
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await?;

        // Shader compile/link problems are fatal startup conditions; capture
        // them here instead of letting them surface as later pipeline panics.
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let trace_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("trace"),
            source: wgpu::ShaderSource::Wgsl(shaders::trace_wgsl().into()),
        });

        let present_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("present"),
            source: wgpu::ShaderSource::Wgsl(shaders::present_wgsl().into()),
        });

        let layouts = create_layouts(&device);
        let pipelines =
            create_pipelines(&device, &layouts, &trace_module, &present_module, surface_format);

        if let Some(err) = device.pop_error_scope().await {
            return Err(InitError::ShaderBuild(err.to_string()));
        }

        // The target pair is two full-resolution Rgba32Float pairs plus the
        // scene buffer; allocation can genuinely fail on small GPUs, so it
        // gets the same treatment under an out-of-memory scope.
        device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);

        let buffers = create_persistent_buffers(&device, voxel_capacity);
        let targets = create_target_pair(&device, width, height);
        let bind_groups = create_bind_groups(&device, &layouts, &buffers, &targets);

        if let Some(err) = device.pop_error_scope().await {
            return Err(InitError::ResourceAllocation(err.to_string()));
        }

        Ok(Self {
            device,
            queue,
            layouts,
            pipelines,
            buffers,
            targets,
            bind_groups,
            ping: PingPong::default(),
        })
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Recreate the target pair at the new size. Accumulated history is lost;
    /// the caller must reset the accumulation counter to match.
    pub fn resize_output(&mut self, width: u32, height: u32) {
        self.targets = create_target_pair(&self.device, width, height);
        self.bind_groups =
            create_bind_groups(&self.device, &self.layouts, &self.buffers, &self.targets);
        self.ping = PingPong::default();
    }

    pub fn write_frame(&self, frame: &FrameGpu) {
        self.queue
            .write_buffer(&self.buffers.frame, 0, bytemuck::bytes_of(frame));
    }

    pub fn write_tonemap(&self, tonemap: &TonemapGpu) {
        self.queue
            .write_buffer(&self.buffers.tonemap, 0, bytemuck::bytes_of(tonemap));
    }

    /// Upload the whole scene: header at offset 0, voxel materials right after.
    pub fn write_scene(&self, header: &SceneHeaderGpu, voxels: &[u32]) {
        self.queue
            .write_buffer(&self.buffers.scene, 0, bytemuck::bytes_of(header));

        let n = voxels.len().min(self.buffers.scene_voxel_capacity);
        self.queue.write_buffer(
            &self.buffers.scene,
            std::mem::size_of::<SceneHeaderGpu>() as u64,
            bytemuck::cast_slice(&voxels[..n]),
        );
    }

    /// Raytrace pass: full-screen quad into the current write target (color +
    /// bloom), reading the other target's accumulated image as history.
    pub fn encode_trace(&self, encoder: &mut wgpu::CommandEncoder) {
        let write = &self.targets.targets[self.ping.write_index()];

        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("trace_pass"),
            color_attachments: &[
                Some(wgpu::RenderPassColorAttachment {
                    view: &write.color,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                }),
                Some(wgpu::RenderPassColorAttachment {
                    view: &write.bloom,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                }),
            ],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        rpass.set_pipeline(&self.pipelines.trace);
        rpass.set_bind_group(0, &self.bind_groups.trace[self.ping.write_index()], &[]);
        rpass.draw(0..6, 0..1);
    }

    /// Present pass: tone-map this frame's write target to the swapchain.
    pub fn encode_present(&self, encoder: &mut wgpu::CommandEncoder, frame_view: &wgpu::TextureView) {
        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("present_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: frame_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        rpass.set_pipeline(&self.pipelines.present);
        rpass.set_bind_group(0, &self.bind_groups.present[self.ping.write_index()], &[]);
        rpass.draw(0..6, 0..1);
    }

    /// Swap write/read roles. Exactly once per completed frame, after both
    /// passes are issued (GPU execution need not have finished; command order
    /// on the queue guarantees frame N's writes land before frame N+1's reads).
    pub fn advance_frame(&mut self) {
        self.ping.advance_frame();
    }
}
