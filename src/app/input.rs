// src/app/input.rs
use winit::{
    event::{DeviceEvent, ElementState, KeyEvent, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorGrabMode, Window},
};

#[derive(Default, Clone, Copy)]
pub struct KeyState {
    pub w: bool,
    pub a: bool,
    pub s: bool,
    pub d: bool,
    pub space: bool,
    pub ctrl: bool,
    pub f: bool,
    pub p: bool,
    pub o: bool,
    pub r: bool,
}

impl KeyState {
    pub fn set(&mut self, code: KeyCode, down: bool) {
        match code {
            KeyCode::KeyW => self.w = down,
            KeyCode::KeyA => self.a = down,
            KeyCode::KeyS => self.s = down,
            KeyCode::KeyD => self.d = down,
            KeyCode::Space => self.space = down,
            KeyCode::ControlLeft | KeyCode::ControlRight => self.ctrl = down,
            KeyCode::KeyF => self.f = down,
            KeyCode::KeyP => self.p = down,
            KeyCode::KeyO => self.o = down,
            KeyCode::KeyR => self.r = down,
            _ => {}
        }
    }
}

#[derive(Default)]
pub struct InputState {
    pub keys: KeyState,
    pub focused: bool,
    /// Escape toggles this: camera control is suspended and the cursor is
    /// released, but rendering (and convergence) continues.
    pub paused: bool,
    pub mouse_dx: f32,
    pub mouse_dy: f32,
    // Rising edges, consumed once per frame.
    fresnel_toggled: bool,
    srgb_toggled: bool,
    aces_toggled: bool,
    regen_pressed: bool,
}

impl InputState {
    /// True while mouse look, movement and trace toggles are live.
    pub fn control_active(&self) -> bool {
        self.focused && !self.paused
    }

    pub fn on_device_event(&mut self, event: &DeviceEvent) {
        if !self.control_active() {
            return;
        }
        if let DeviceEvent::MouseMotion { delta } = event {
            self.mouse_dx += delta.0 as f32;
            self.mouse_dy += delta.1 as f32;
        }
    }

    /// Returns true if event is fully handled/consumed.
    pub fn on_window_event(&mut self, event: &WindowEvent, window: &Window) -> bool {
        match event {
            WindowEvent::Focused(f) => {
                self.focused = *f;
                self.apply_cursor_mode(window);
                true
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let KeyEvent {
                    physical_key: PhysicalKey::Code(code),
                    state,
                    ..
                } = event
                {
                    let down = *state == ElementState::Pressed;
                    if self.record_key(*code, down) {
                        // Pause state flipped; re-grab or release the cursor.
                        self.apply_cursor_mode(window);
                        return true;
                    }
                }
                false
            }

            _ => false,
        }
    }

    /// Key bookkeeping: held-key state, rising-edge latches, Escape pause
    /// toggle. Pure state transition so the pause/latch rules are testable;
    /// returns true when the pause state flipped.
    ///
    /// Tone-map latches (P/O) keep working while paused since they only
    /// affect the present pass. Trace-affecting keys (F/R) are live only
    /// under active control, like camera movement.
    fn record_key(&mut self, code: KeyCode, down: bool) -> bool {
        if down {
            match code {
                KeyCode::KeyP if !self.keys.p => self.srgb_toggled = true,
                KeyCode::KeyO if !self.keys.o => self.aces_toggled = true,
                KeyCode::KeyF if !self.keys.f && self.control_active() => {
                    self.fresnel_toggled = true;
                }
                KeyCode::KeyR if !self.keys.r && self.control_active() => {
                    self.regen_pressed = true;
                }
                _ => {}
            }
        }

        self.keys.set(code, down);

        if down && code == KeyCode::Escape {
            self.paused = !self.paused;
            return true;
        }
        false
    }

    fn apply_cursor_mode(&self, window: &Window) {
        if self.control_active() {
            let _ = window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
            window.set_cursor_visible(false);
        } else {
            let _ = window.set_cursor_grab(CursorGrabMode::None);
            window.set_cursor_visible(true);
        }
    }

    pub fn take_mouse_delta(&mut self) -> (f32, f32) {
        let dx = self.mouse_dx;
        let dy = self.mouse_dy;
        self.mouse_dx = 0.0;
        self.mouse_dy = 0.0;
        (dx, dy)
    }

    pub fn take_fresnel_toggled(&mut self) -> bool {
        std::mem::take(&mut self.fresnel_toggled)
    }

    pub fn take_srgb_toggled(&mut self) -> bool {
        std::mem::take(&mut self.srgb_toggled)
    }

    pub fn take_aces_toggled(&mut self) -> bool {
        std::mem::take(&mut self.aces_toggled)
    }

    pub fn take_regen_pressed(&mut self) -> bool {
        std::mem::take(&mut self.regen_pressed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn focused_input() -> InputState {
        let mut input = InputState::default();
        input.focused = true;
        input
    }

    #[test]
    fn escape_toggles_pause_both_ways() {
        let mut input = focused_input();
        assert!(input.control_active());

        assert!(input.record_key(KeyCode::Escape, true));
        assert!(input.paused);
        assert!(!input.control_active());

        input.record_key(KeyCode::Escape, false);
        assert!(input.paused, "release must not toggle");

        assert!(input.record_key(KeyCode::Escape, true));
        assert!(!input.paused);
        assert!(input.control_active());
    }

    #[test]
    fn tonemap_toggles_fire_while_paused() {
        let mut input = focused_input();
        input.record_key(KeyCode::Escape, true);
        assert!(input.paused);

        input.record_key(KeyCode::KeyP, true);
        input.record_key(KeyCode::KeyO, true);
        assert!(input.take_srgb_toggled());
        assert!(input.take_aces_toggled());
    }

    #[test]
    fn trace_toggles_are_dead_while_paused() {
        let mut input = focused_input();
        input.record_key(KeyCode::Escape, true);

        input.record_key(KeyCode::KeyF, true);
        input.record_key(KeyCode::KeyR, true);
        assert!(!input.take_fresnel_toggled());
        assert!(!input.take_regen_pressed());

        // Resume; rising edges need a fresh press.
        input.record_key(KeyCode::Escape, true);
        input.record_key(KeyCode::KeyF, false);
        input.record_key(KeyCode::KeyF, true);
        assert!(input.take_fresnel_toggled());
    }

    #[test]
    fn latches_are_edge_triggered() {
        let mut input = focused_input();

        input.record_key(KeyCode::KeyP, true);
        input.record_key(KeyCode::KeyP, true); // key repeat
        assert!(input.take_srgb_toggled());
        assert!(!input.take_srgb_toggled(), "one edge, one latch");
    }
}
