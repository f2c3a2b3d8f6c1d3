use glam::Vec3;

use crate::input::{InputFrame, InputState, Key, MouseButton};

use super::camera::PerspectiveCamera;

/// Mouse camera controls orbiting a target point.
///
/// Left drag rotates, the wheel zooms, `R` returns to the starting view.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OrbitControls {
    pub target: Vec3,
    /// Radians per dragged pixel.
    pub rotate_speed: f32,
    /// Fractional distance change per wheel line.
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,

    yaw: f32,
    pitch: f32,
    distance: f32,
    home: (f32, f32, f32),
}

impl OrbitControls {
    const PITCH_LIMIT: f32 = 89.0 * std::f32::consts::PI / 180.0;

    /// Starts from the camera's current position around its target.
    pub fn new(camera: &PerspectiveCamera) -> Self {
        let offset = camera.position - camera.target;
        let distance = offset.length().max(f32::EPSILON);
        let yaw = offset.x.atan2(offset.z);
        let pitch = (offset.y / distance).clamp(-1.0, 1.0).asin();

        Self {
            target: camera.target,
            rotate_speed: 0.005,
            zoom_speed: 0.1,
            min_distance: 10.0,
            max_distance: 20000.0,
            yaw,
            pitch,
            distance,
            home: (yaw, pitch, distance),
        }
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Reads this frame's input and moves `camera`.
    pub fn update(&mut self, input: &InputState, frame: &InputFrame, camera: &mut PerspectiveCamera) {
        let drag = input
            .button_down(MouseButton::Left)
            .then_some(frame.pointer_delta);
        self.apply(drag, frame.wheel_lines, frame.key_pressed(Key::R));
        self.place(camera);
    }

    /// Applies one frame of drag (pixels), wheel (lines, positive zooms in) and reset.
    pub fn apply(&mut self, drag: Option<(f32, f32)>, wheel_lines: f32, reset: bool) {
        if reset {
            (self.yaw, self.pitch, self.distance) = self.home;
            return;
        }

        if let Some((dx, dy)) = drag {
            self.yaw -= dx * self.rotate_speed;
            self.pitch =
                (self.pitch + dy * self.rotate_speed).clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT);
        }

        if wheel_lines != 0.0 {
            let factor = (1.0 - self.zoom_speed).powf(wheel_lines);
            self.distance = (self.distance * factor).clamp(self.min_distance, self.max_distance);
        }
    }

    /// Camera position for the current orbit state.
    pub fn eye(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        self.target + self.distance * Vec3::new(cp * sy, sp, cp * cy)
    }

    pub fn place(&self, camera: &mut PerspectiveCamera) {
        camera.position = self.eye();
        camera.target = self.target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> PerspectiveCamera {
        PerspectiveCamera::new(75.0, 1.0, 1.0, 10000.0).with_position(Vec3::new(0.0, 0.0, 800.0))
    }

    #[test]
    fn starts_at_camera_position() {
        let controls = OrbitControls::new(&camera());
        assert!((controls.eye() - Vec3::new(0.0, 0.0, 800.0)).length() < 1e-3);
        assert!((controls.distance() - 800.0).abs() < 1e-3);
    }

    #[test]
    fn drag_keeps_distance() {
        let mut controls = OrbitControls::new(&camera());
        controls.apply(Some((120.0, -40.0)), 0.0, false);
        assert!((controls.eye().length() - 800.0).abs() < 1e-2);
        assert!(controls.eye().x < 0.0);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut controls = OrbitControls::new(&camera());
        controls.apply(Some((0.0, 1.0e6)), 0.0, false);
        let eye = controls.eye();
        assert!(eye.y > 0.0);
        assert!(eye.y < 800.0);
    }

    #[test]
    fn wheel_zooms_within_limits() {
        let mut controls = OrbitControls::new(&camera());
        controls.apply(None, 1.0, false);
        assert!((controls.distance() - 720.0).abs() < 1e-2);

        controls.apply(None, 1000.0, false);
        assert_eq!(controls.distance(), controls.min_distance);
    }

    #[test]
    fn reset_returns_home() {
        let mut controls = OrbitControls::new(&camera());
        controls.apply(Some((300.0, 200.0)), -3.0, false);
        controls.apply(None, 0.0, true);
        assert!((controls.eye() - Vec3::new(0.0, 0.0, 800.0)).length() < 1e-3);
    }

    #[test]
    fn place_moves_camera() {
        let mut cam = camera();
        let mut controls = OrbitControls::new(&cam);
        controls.apply(None, 2.0, false);
        controls.place(&mut cam);
        assert!(cam.position.z < 800.0);
        assert_eq!(cam.target, Vec3::ZERO);
    }
}
