// src/render/state/textures.rs
// ----------------------------
//
// The ping-pong render target pair. Frame N's raytrace pass writes one target
// while reading the other (frame N-1's accumulated image); a single surface
// could not serve both roles without a read-after-write hazard. Exactly two
// targets bound memory to 2x one frame's footprint.

/// Which of the two targets is written this frame. Pure state, no GPU side;
/// kept separate from the textures so the alternation is testable on its own.
#[derive(Default, Clone, Copy)]
pub struct PingPong {
    frame_parity: u32,
}

impl PingPong {
    pub fn write_index(&self) -> usize {
        (self.frame_parity & 1) as usize
    }

    pub fn read_index(&self) -> usize {
        1 - self.write_index()
    }

    /// Toggle roles. Must be called exactly once per completed frame.
    pub fn advance_frame(&mut self) {
        self.frame_parity = self.frame_parity.wrapping_add(1);
    }
}

/// One offscreen target: HDR color plus a bloom (bright-pass) side channel,
/// both written by the raytrace pass and read by the next frame / present pass.
pub struct RenderTarget {
    pub color: wgpu::TextureView,
    pub bloom: wgpu::TextureView,
}

pub struct TargetPair {
    pub targets: [RenderTarget; 2],
}

fn make_target_tex(device: &wgpu::Device, label: &str, w: u32, h: u32) -> wgpu::TextureView {
    let tex = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width: w,
            height: h,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        // RGBA32F: accumulation needs the precision; sampled with textureLoad
        // so filterability does not matter.
        format: wgpu::TextureFormat::Rgba32Float,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        view_formats: &[],
    });

    tex.create_view(&Default::default())
}

/// Allocate both targets at identical dimensions. wgpu forbids zero-sized
/// textures (minimized window), so dimensions are clamped to at least 1.
pub fn create_target_pair(device: &wgpu::Device, w: u32, h: u32) -> TargetPair {
    let w = w.max(1);
    let h = h.max(1);

    let targets = [
        RenderTarget {
            color: make_target_tex(device, "accum_color_a", w, h),
            bloom: make_target_tex(device, "accum_bloom_a", w, h),
        },
        RenderTarget {
            color: make_target_tex(device, "accum_color_b", w, h),
            bloom: make_target_tex(device, "accum_bloom_b", w, h),
        },
    ];

    TargetPair { targets }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_and_read_never_alias() {
        let mut ping = PingPong::default();
        for _ in 0..64 {
            assert_ne!(ping.write_index(), ping.read_index());
            ping.advance_frame();
        }
    }

    #[test]
    fn roles_alternate_with_period_two() {
        let mut ping = PingPong::default();
        let first = ping.write_index();

        ping.advance_frame();
        assert_eq!(ping.write_index(), 1 - first);

        ping.advance_frame();
        assert_eq!(ping.write_index(), first);
    }

    #[test]
    fn read_index_is_previous_write_index() {
        let mut ping = PingPong::default();
        for _ in 0..10 {
            let written = ping.write_index();
            ping.advance_frame();
            assert_eq!(ping.read_index(), written);
        }
    }
}
