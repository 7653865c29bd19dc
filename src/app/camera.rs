// src/app/camera.rs
use glam::{Mat4, Vec3};

use crate::app::config;
use crate::app::input::InputState;

pub struct Camera {
    pos: Vec3,
    yaw: f32,
    pitch: f32,
    fovy_rad: f32,
    z_near: f32,
    z_far: f32,
    // movement tuning
    speed_mps: f32,
    mouse_sens_rad: f32,
}

pub struct CameraFrame {
    pub view_inv: Mat4,
    pub proj_inv: Mat4,
}

impl Camera {
    pub fn new() -> Self {
        Self {
            pos: Vec3::new(0.0, 0.5, -5.0),
            yaw: 0.0,
            pitch: 0.0,
            fovy_rad: config::FOV_Y_DEG.to_radians(),
            z_near: config::Z_NEAR,
            z_far: config::Z_FAR,
            speed_mps: config::CAMERA_SPEED_MPS,
            mouse_sens_rad: config::MOUSE_SENS_DEG_PER_PX.to_radians(),
        }
    }

    fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.cos() * self.pitch.cos(),
        )
        .normalize()
    }

    /// Apply one frame of mouse look + movement. Returns true if the pose
    /// changed, so the caller can reset temporal accumulation.
    pub fn integrate_input(&mut self, input: &mut InputState, dt: f32) -> bool {
        let mut changed = false;

        // mouse look
        if input.control_active() {
            let (dx, dy) = input.take_mouse_delta();
            if dx != 0.0 || dy != 0.0 {
                self.yaw -= dx * self.mouse_sens_rad;
                // Keep pitch short of straight up/down so the view basis stays valid.
                let pitch_limit = 89.0_f32.to_radians();
                self.pitch = (self.pitch - dy * self.mouse_sens_rad)
                    .clamp(-pitch_limit, pitch_limit);
                changed = true;
            }
        } else {
            let _ = input.take_mouse_delta();
            return false;
        }

        // basis
        let forward = self.forward();
        let right = forward.cross(Vec3::Y).normalize();

        // movement intent
        let k = input.keys;
        let mut vel = Vec3::ZERO;
        if k.w { vel += forward; }
        if k.s { vel -= forward; }
        if k.d { vel += right; }
        if k.a { vel -= right; }
        if k.space { vel += Vec3::Y; }
        if k.ctrl { vel -= Vec3::Y; }

        if vel.length_squared() > 0.0 {
            self.pos += vel.normalize() * (self.speed_mps * dt);
            changed = true;
        }

        changed
    }

    pub fn frame_matrices(&self, aspect: f32) -> CameraFrame {
        let forward = self.forward();

        let view = Mat4::look_at_rh(self.pos, self.pos + forward, Vec3::Y);
        let proj = Mat4::perspective_rh(self.fovy_rad, aspect, self.z_near, self.z_far);

        CameraFrame {
            view_inv: view.inverse(),
            proj_inv: proj.inverse(),
        }
    }
}
