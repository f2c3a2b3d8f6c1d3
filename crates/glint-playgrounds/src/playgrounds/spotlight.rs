//! 02: a cube over a wide floor, lit and shadowed by a circling spotlight.

use glam::Vec3;

use glint_engine::core::{AppControl, FrameCtx};
use glint_engine::paint::Color;
use glint_engine::render::scene::{
    LightOrbit, Mesh, ObjectId, OrbitControls, PerspectiveCamera, SpotLight, SpotMaterial,
    SpotScenePass, Transform,
};
use glint_engine::render::RenderCtx;

use super::Playground;

const SURFACE: u32 = 0xbe8010;
const SPIN: f32 = 0.001;

pub struct Spotlight {
    scene: SpotScenePass,
    cube: ObjectId,
    camera: PerspectiveCamera,
    controls: OrbitControls,
    light: SpotLight,
    orbit: LightOrbit,
}

impl Spotlight {
    pub fn new(ctx: &RenderCtx<'_>) -> Self {
        let camera = PerspectiveCamera::new(75.0, ctx.viewport.aspect(), 1.0, 10000.0)
            .with_position(Vec3::new(0.0, 0.0, 500.0));

        let material = SpotMaterial::Phong {
            color: Color::from_hex(SURFACE),
        };
        let mut scene = SpotScenePass::new(ctx);
        let cube = scene.add(
            ctx,
            &Mesh::cuboid(100.0, 100.0, 100.0),
            material.clone(),
            Transform::IDENTITY,
        );
        let floor = scene.add(
            ctx,
            &Mesh::cuboid(5000.0, 5000.0, 5.0),
            material,
            Transform::from_position(Vec3::new(0.0, 0.0, -100.0)),
        );
        scene.set_casts_shadow(floor, false);

        let light = SpotLight::new(Color::WHITE)
            .with_position(Vec3::new(0.0, 0.0, 250.0))
            .with_intensity(1.25)
            .with_cone(0.5, 1.0);

        Self {
            scene,
            cube,
            controls: OrbitControls::new(&camera),
            camera,
            light,
            orbit: LightOrbit::new(100.0),
        }
    }
}

impl Playground for Spotlight {
    fn frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if let Some(t) = self.scene.transform_mut(self.cube) {
            t.rotation += Vec3::splat(SPIN);
        }
        self.orbit.advance(&mut self.light.position);

        let (width, height) = ctx.viewport().pixel_size();
        self.camera.set_viewport(width, height);
        self.controls.update(ctx.input, ctx.input_frame, &mut self.camera);

        let Self {
            scene,
            camera,
            light,
            ..
        } = self;
        ctx.render(Color::BLACK, |rctx, target| {
            scene.render(rctx, target, camera, light);
        })
    }
}
