use std::f32::consts::PI;

use glam::{Mat4, Vec3};

use crate::paint::Color;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Color,
    pub intensity: f32,
}

impl PointLight {
    pub fn new(color: Color) -> Self {
        Self {
            position: Vec3::ZERO,
            color,
            intensity: 1.0,
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = intensity;
        self
    }

    /// Colour scaled by intensity, as fed to the shader.
    pub fn radiance(&self) -> [f32; 3] {
        scaled(self.color, self.intensity)
    }
}

/// Cone light aimed at `target`, casting shadows.
///
/// Light is full strength inside the inner cone, fades to zero at `angle`
/// (half-angle, radians). `penumbra` is the faded fraction of the cone.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SpotLight {
    pub position: Vec3,
    pub target: Vec3,
    pub color: Color,
    pub intensity: f32,
    pub angle: f32,
    pub penumbra: f32,
}

impl SpotLight {
    pub const SHADOW_NEAR: f32 = 1.0;
    pub const SHADOW_FAR: f32 = 5000.0;

    pub fn new(color: Color) -> Self {
        Self {
            position: Vec3::ZERO,
            target: Vec3::ZERO,
            color,
            intensity: 1.0,
            angle: PI / 3.0,
            penumbra: 0.0,
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = intensity;
        self
    }

    pub fn with_cone(mut self, angle: f32, penumbra: f32) -> Self {
        self.angle = angle.clamp(0.0, PI / 2.0);
        self.penumbra = penumbra.clamp(0.0, 1.0);
        self
    }

    pub fn radiance(&self) -> [f32; 3] {
        scaled(self.color, self.intensity)
    }

    /// Unit axis of the cone; `-Z` when the target sits on the light.
    pub fn direction(&self) -> Vec3 {
        (self.target - self.position).try_normalize().unwrap_or(Vec3::NEG_Z)
    }

    /// Cosines of the outer and inner cone edges.
    pub fn cone_cos(&self) -> (f32, f32) {
        (self.angle.cos(), (self.angle * (1.0 - self.penumbra)).cos())
    }

    /// Cone falloff at `point`: 1 inside the inner cone, 0 outside the outer one.
    pub fn cone_attenuation(&self, point: Vec3) -> f32 {
        let Some(to_point) = (point - self.position).try_normalize() else {
            return 1.0;
        };
        let (outer, inner) = self.cone_cos();
        smoothstep(outer, inner, self.direction().dot(to_point))
    }

    /// View-projection of the shadow camera: square, covering the whole cone.
    pub fn shadow_view_proj(&self) -> Mat4 {
        let direction = self.direction();
        let up = if direction.cross(Vec3::Y).length_squared() < 1e-6 {
            Vec3::Z
        } else {
            Vec3::Y
        };
        let fov = (2.0 * self.angle).clamp(0.01, PI - 0.01);
        let view = Mat4::look_at_rh(self.position, self.position + direction, up);
        Mat4::perspective_rh(fov, 1.0, Self::SHADOW_NEAR, Self::SHADOW_FAR) * view
    }
}

fn scaled(color: Color, intensity: f32) -> [f32; 3] {
    let [r, g, b] = color.rgb();
    [r * intensity, g * intensity, b * intensity]
}

fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge1 - edge0 <= f32::EPSILON {
        return if x >= edge0 { 1.0 } else { 0.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Path followed by an orbiting light in the XY plane.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum OrbitPath {
    /// Constant radius.
    Circle,
    /// Radius swells and shrinks with `sin(angle / 10)`.
    Spiral,
}

/// Light animation in the XY plane: two degrees per frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LightOrbit {
    pub angle: f32,
    pub radius: f32,
    pub step: f32,
    pub path: OrbitPath,
}

impl LightOrbit {
    pub const DEFAULT_STEP: f32 = 2.0 * PI / 180.0;

    pub fn new(radius: f32) -> Self {
        Self {
            angle: Self::DEFAULT_STEP,
            radius,
            step: Self::DEFAULT_STEP,
            path: OrbitPath::Circle,
        }
    }

    pub fn spiral(radius: f32) -> Self {
        Self {
            path: OrbitPath::Spiral,
            ..Self::new(radius)
        }
    }

    /// Advances one frame and moves `position`; its z is left untouched.
    pub fn advance(&mut self, position: &mut Vec3) {
        self.angle += self.step;
        let radius = match self.path {
            OrbitPath::Circle => self.radius,
            OrbitPath::Spiral => self.radius * (self.angle / 10.0).sin(),
        };
        position.x = radius * self.angle.sin();
        position.y = radius * self.angle.cos();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spot() -> SpotLight {
        SpotLight::new(Color::WHITE)
            .with_position(Vec3::new(0.0, 0.0, 250.0))
            .with_cone(0.5, 1.0)
    }

    #[test]
    fn radiance_scales_color() {
        let l = PointLight::new(Color::new(0.5, 0.25, 1.0, 1.0)).with_intensity(2.0);
        assert_eq!(l.radiance(), [1.0, 0.5, 2.0]);
        let s = SpotLight::new(Color::WHITE).with_intensity(1.25);
        assert_eq!(s.radiance(), [1.25, 1.25, 1.25]);
    }

    #[test]
    fn orbit_keeps_radius_and_depth() {
        let mut position = Vec3::new(0.0, 0.0, 100.0);
        let mut orbit = LightOrbit::new(250.0);
        for _ in 0..90 {
            orbit.advance(&mut position);
            assert!((position.truncate().length() - 250.0).abs() < 1e-3);
            assert_eq!(position.z, 100.0);
        }
    }

    #[test]
    fn first_advance_lands_at_four_degrees() {
        let mut position = Vec3::ZERO;
        let mut orbit = LightOrbit::new(250.0);
        orbit.advance(&mut position);
        let a = 4.0f32.to_radians();
        assert!((position.x - 250.0 * a.sin()).abs() < 1e-3);
        assert!((position.y - 250.0 * a.cos()).abs() < 1e-3);
    }

    #[test]
    fn spiral_radius_follows_slow_sine() {
        let mut position = Vec3::new(0.0, 0.0, 250.0);
        let mut orbit = LightOrbit::spiral(100.0);
        for _ in 0..200 {
            orbit.advance(&mut position);
            let expected = (100.0 * (orbit.angle / 10.0).sin()).abs();
            assert!((position.truncate().length() - expected).abs() < 1e-3);
            assert_eq!(position.z, 250.0);
        }
    }

    #[test]
    fn cone_is_full_on_axis_and_dark_outside() {
        let s = spot();
        assert_eq!(s.direction(), Vec3::NEG_Z);
        assert!((s.cone_attenuation(Vec3::ZERO) - 1.0).abs() < 1e-6);

        // 0.6 rad off axis is outside a 0.5 rad cone.
        let off = Vec3::new(250.0 * 0.6f32.tan(), 0.0, 0.0);
        assert_eq!(s.cone_attenuation(off), 0.0);

        // Full penumbra fades across the whole cone.
        let inside = Vec3::new(250.0 * 0.25f32.tan(), 0.0, 0.0);
        let a = s.cone_attenuation(inside);
        assert!(a > 0.0 && a < 1.0, "{a}");
    }

    #[test]
    fn hard_cone_without_penumbra() {
        let s = spot().with_cone(0.5, 0.0);
        let (outer, inner) = s.cone_cos();
        assert_eq!(outer, inner);
        let inside = Vec3::new(250.0 * 0.45f32.tan(), 0.0, 0.0);
        assert_eq!(s.cone_attenuation(inside), 1.0);
    }

    #[test]
    fn shadow_camera_sees_the_target_at_the_centre() {
        let s = spot();
        let clip = s.shadow_view_proj() * Vec3::ZERO.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn shadow_camera_handles_vertical_lights() {
        let s = SpotLight::new(Color::WHITE).with_position(Vec3::new(0.0, 300.0, 0.0));
        let m = s.shadow_view_proj();
        assert!(m.to_cols_array().iter().all(|v| v.is_finite()));
    }
}
