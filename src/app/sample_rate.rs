// src/app/sample_rate.rs
//
// Adaptive samples-per-pixel feedback loop.
//
// Raytracing cost scales linearly with SPP, so holding the frame rate near a
// target under varying load is a simple controller problem: estimate the cost
// of one sample from the last frame, infer the SPP that would hit the target,
// and move toward it with an exponential moving average to ride out
// single-frame noise (OS scheduling jitter, window drags).

use crate::app::config;

#[derive(Clone, Copy, Debug)]
pub struct SampleRateParams {
    pub min_spp: i32,
    pub max_spp: i32,
    pub target_fps: f32,
    /// EMA blend factor per frame, in (0, 1].
    pub smoothing: f32,
    /// Skip adjustment when measured FPS is within this band of the target.
    pub tolerance_fps: f32,
}

impl Default for SampleRateParams {
    fn default() -> Self {
        Self {
            min_spp: config::MIN_SPP,
            max_spp: config::MAX_SPP,
            target_fps: config::TARGET_FPS,
            smoothing: config::SPP_SMOOTHING,
            tolerance_fps: config::FPS_TOLERANCE,
        }
    }
}

pub struct SampleRateController {
    params: SampleRateParams,
    current_spp: i32,
}

impl SampleRateController {
    pub fn new(params: SampleRateParams) -> Self {
        let current_spp = params.min_spp;
        Self { params, current_spp }
    }

    pub fn current_spp(&self) -> i32 {
        self.current_spp
    }

    /// Feed the wall-clock duration of the previous frame; returns the SPP to
    /// request this frame. Cannot fail: pathological inputs (zero, negative,
    /// non-finite dt) leave the value unchanged, and the result is always
    /// clamped to [min_spp, max_spp].
    pub fn update(&mut self, delta_seconds: f32) -> i32 {
        if !delta_seconds.is_finite() || delta_seconds <= 0.0 {
            return self.current_spp;
        }

        let measured_fps = 1.0 / delta_seconds;
        if (measured_fps - self.params.target_fps).abs() <= self.params.tolerance_fps {
            return self.current_spp;
        }

        let per_sample_cost = delta_seconds / self.current_spp as f32;
        let desired_spp = 1.0 / (per_sample_cost * self.params.target_fps);

        let next = self.current_spp as f32
            + (desired_spp - self.current_spp as f32) * self.params.smoothing;

        self.current_spp = (next as i32).clamp(self.params.min_spp, self.params.max_spp);
        self.current_spp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller_at(spp: i32) -> SampleRateController {
        let mut c = SampleRateController::new(SampleRateParams::default());
        c.current_spp = spp;
        c
    }

    #[test]
    fn slow_frame_lowers_spp() {
        // 1/30 s at 10 spp: per-sample cost 1/300 s, desired 5.0 spp.
        let mut c = controller_at(10);
        let spp = c.update(1.0 / 30.0);
        assert!(spp < 10, "spp should move down, got {spp}");
        assert_eq!(spp, 9); // 10 + (5.0 - 10) * 0.1 = 9.5, truncated
    }

    #[test]
    fn fast_frame_raises_spp() {
        let mut c = controller_at(10);
        let spp = c.update(1.0 / 240.0);
        assert!(spp > 10, "spp should move up, got {spp}");
    }

    #[test]
    fn zero_dt_is_skipped() {
        let mut c = controller_at(42);
        assert_eq!(c.update(0.0), 42);
        assert_eq!(c.update(-1.0), 42);
        assert_eq!(c.update(f32::NAN), 42);
        assert_eq!(c.update(f32::INFINITY), 42);
    }

    #[test]
    fn within_tolerance_is_skipped() {
        // 61 fps is inside the default +/- 2 fps band around 60.
        let mut c = controller_at(37);
        assert_eq!(c.update(1.0 / 61.0), 37);
    }

    #[test]
    fn output_stays_in_bounds() {
        let mut c = controller_at(1);
        // Huge frame time pushes desired spp below 1; clamp holds the floor.
        assert_eq!(c.update(10.0), 1);

        let mut c = controller_at(500);
        // Tiny frame time pushes desired spp way up; clamp holds the cap.
        for _ in 0..200 {
            let spp = c.update(1e-4);
            assert!((1..=500).contains(&spp));
        }
        assert_eq!(c.current_spp(), 500);
    }
}
