// src/app/accum.rs
//
// Temporal accumulation counter.
//
// The raytrace shader blends each new frame's samples into the previous
// frame's image with weight 1/(frames_since_reset + 1). This counter is the
// only signal it gets: a missed reset shows up as ghosting (stale samples
// blended into a moved view), a spurious reset as flicker.

/// Tracks how many frames have accumulated since the view or scene last changed.
#[derive(Default)]
pub struct AccumulationController {
    frames_since_reset: u32,
}

impl AccumulationController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invalidate the accumulated history. Called when the camera moves, a
    /// trace toggle flips or the voxel data changes. Safe to call any number
    /// of times per frame; only the next frame's snapshot observes it.
    pub fn reset(&mut self) {
        self.frames_since_reset = 0;
    }

    /// Must be called exactly once per completed frame, after all reset
    /// checks for that frame are finalized.
    pub fn on_frame_completed(&mut self) {
        // Wrap is a non-issue at practical runtimes (> 2^31 frames) but keeps
        // multi-hour runs well-defined.
        self.frames_since_reset = self.frames_since_reset.wrapping_add(1);
    }

    /// Counter value handed to the raytrace pass for the current frame.
    pub fn snapshot(&self) -> u32 {
        self.frames_since_reset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_up_from_zero() {
        let mut accum = AccumulationController::new();
        assert_eq!(accum.snapshot(), 0);

        let mut seen = vec![accum.snapshot()];
        for _ in 0..3 {
            accum.on_frame_completed();
            seen.push(accum.snapshot());
        }
        assert_eq!(seen, vec![0, 1, 2, 3]);
    }

    #[test]
    fn reset_returns_to_zero() {
        let mut accum = AccumulationController::new();
        accum.on_frame_completed();
        accum.on_frame_completed();
        assert_eq!(accum.snapshot(), 2);

        accum.reset();
        assert_eq!(accum.snapshot(), 0);

        accum.on_frame_completed();
        assert_eq!(accum.snapshot(), 1);
    }

    #[test]
    fn repeated_resets_are_idempotent() {
        let mut accum = AccumulationController::new();
        accum.on_frame_completed();

        accum.reset();
        accum.reset();
        accum.reset();
        assert_eq!(accum.snapshot(), 0);
    }
}
