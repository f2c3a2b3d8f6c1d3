use glam::{Mat4, Vec3};

/// Right-handed perspective camera (depth range 0..1).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl PerspectiveCamera {
    pub fn new(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov_y,
            aspect,
            near,
            far,
            position: Vec3::ZERO,
            target: Vec3::ZERO,
            up: Vec3::Y,
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Updates the aspect ratio from a pixel size; zero sizes are ignored.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y.to_radians(), self.aspect.max(f32::EPSILON), self.near, self.far)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection() * self.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> PerspectiveCamera {
        PerspectiveCamera::new(75.0, 16.0 / 9.0, 1.0, 10000.0).with_position(Vec3::new(0.0, 0.0, 800.0))
    }

    #[test]
    fn target_projects_to_screen_centre() {
        let ndc = camera().view_proj().project_point3(Vec3::ZERO);
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn near_and_far_map_to_depth_range() {
        let cam = camera();
        let near = cam.view_proj().project_point3(Vec3::new(0.0, 0.0, 799.0));
        let far = cam.view_proj().project_point3(Vec3::new(0.0, 0.0, 800.0 - 10000.0));
        assert!(near.z.abs() < 1e-4);
        assert!((far.z - 1.0).abs() < 1e-4);
    }

    #[test]
    fn up_is_up_on_screen() {
        let ndc = camera().view_proj().project_point3(Vec3::new(0.0, 100.0, 0.0));
        assert!(ndc.y > 0.0);
    }

    #[test]
    fn zero_viewport_keeps_aspect() {
        let mut cam = camera();
        cam.set_viewport(0, 720);
        assert_eq!(cam.aspect, 16.0 / 9.0);
        cam.set_viewport(800, 800);
        assert_eq!(cam.aspect, 1.0);
    }
}
