// src/scene.rs
//
// CPU-side voxel scene: a dense material grid plus a small color palette.
// The GPU sees it as a single read-only storage buffer; any mutation sets the
// dirty flag so the renderer re-uploads it and the driver resets accumulation.

use glam::Vec3;
use rand::Rng;

use crate::app::config;
use crate::render::SceneHeaderGpu;

pub struct VoxelScene {
    width: u32,
    height: u32,
    depth: u32,
    /// 0 = empty, 1..=9 = palette material index. x-major, then y, then z.
    voxels: Vec<u32>,
    palette: [Vec3; config::PALETTE_SIZE],
    dirty: bool,
}

impl VoxelScene {
    /// Generate the demo scene: a closed shell around the map with random
    /// materials, plus sparse random voxels in the interior.
    pub fn generate(rng: &mut impl Rng) -> Self {
        let (w, h, d) = (config::MAP_W, config::MAP_H, config::MAP_D);
        let mut voxels = vec![0u32; (w * h * d) as usize];

        for z in 0..d {
            for y in 0..h {
                for x in 0..w {
                    let on_shell = x == 0
                        || x == w - 1
                        || y == 0
                        || y == h - 1
                        || z == 0
                        || z == d - 1;
                    let solid = on_shell || rng.gen_range(0..10) == 0;

                    if solid {
                        let idx = (x + w * y + w * h * z) as usize;
                        voxels[idx] = rng.gen_range(1..=9);
                    }
                }
            }
        }

        let mut palette = [Vec3::ZERO; config::PALETTE_SIZE];
        for color in palette.iter_mut() {
            *color = Vec3::new(rng.gen(), rng.gen(), rng.gen());
        }

        Self {
            width: w,
            height: h,
            depth: d,
            voxels,
            palette,
            dirty: true,
        }
    }

    /// Replace the scene contents with a fresh random generation.
    pub fn regenerate(&mut self, rng: &mut impl Rng) {
        *self = Self::generate(rng);
    }

    pub fn voxel_count(&self) -> usize {
        self.voxels.len()
    }

    pub fn voxels(&self) -> &[u32] {
        &self.voxels
    }

    pub fn header_gpu(&self) -> SceneHeaderGpu {
        let mut palette = [[0.0f32; 4]; config::PALETTE_SIZE];
        for (dst, src) in palette.iter_mut().zip(self.palette.iter()) {
            *dst = [src.x, src.y, src.z, 1.0];
        }

        SceneHeaderGpu {
            dims: [self.width, self.height, self.depth, 0],
            palette,
        }
    }

    /// True if the GPU copy is stale. Cleared by `mark_uploaded`.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_uploaded(&mut self) {
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn generated_scene_has_expected_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let scene = VoxelScene::generate(&mut rng);

        assert_eq!(
            scene.voxel_count(),
            (config::MAP_W * config::MAP_H * config::MAP_D) as usize
        );
        assert!(scene.is_dirty());
    }

    #[test]
    fn shell_is_solid_and_materials_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let scene = VoxelScene::generate(&mut rng);
        let (w, h) = (config::MAP_W, config::MAP_H);

        for (i, &v) in scene.voxels().iter().enumerate() {
            assert!(v <= 9, "material {v} out of palette range");

            let i = i as u32;
            let x = i % w;
            let y = (i / w) % h;
            let z = i / (w * h);
            let on_shell = x == 0
                || x == w - 1
                || y == 0
                || y == h - 1
                || z == 0
                || z == config::MAP_D - 1;
            if on_shell {
                assert!(v >= 1, "shell voxel ({x},{y},{z}) must be solid");
            }
        }
    }

    #[test]
    fn regenerate_marks_dirty() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut scene = VoxelScene::generate(&mut rng);
        scene.mark_uploaded();
        assert!(!scene.is_dirty());

        scene.regenerate(&mut rng);
        assert!(scene.is_dirty());
    }
}
