//! 07: a wobbling wall textured with the frame source, lit and shadowed by a
//! spiralling spotlight, seen from off to the side.

use anyhow::Result;
use glam::Vec3;

use glint_engine::coords::texture_factor;
use glint_engine::core::{AppControl, FrameCtx};
use glint_engine::paint::Color;
use glint_engine::render::scene::{
    LightOrbit, Mesh, ObjectId, OrbitControls, PerspectiveCamera, SpotLight, SpotMaterial,
    SpotScenePass, Transform,
};
use glint_engine::render::{BoxedSource, RenderCtx, SourceTexture};

use super::Playground;

const PINK: u32 = 0xff5ca6;
const WALL_WIDTH: f32 = 1200.0;
const WALL_HEIGHT: f32 = 900.0;
const WOBBLE: f32 = 15.0;
const SPIN: f32 = 0.001;

pub struct SpotLighting {
    source: SourceTexture<BoxedSource>,
    scene: SpotScenePass,
    cube: ObjectId,
    camera: PerspectiveCamera,
    controls: OrbitControls,
    light: SpotLight,
    orbit: LightOrbit,
}

impl SpotLighting {
    pub fn new(ctx: &RenderCtx<'_>, source: BoxedSource) -> Result<Self> {
        let camera = PerspectiveCamera::new(75.0, ctx.viewport.aspect(), 1.0, 10000.0)
            .with_position(Vec3::new(-500.0, 0.0, 1000.0));

        let source = super::upload_source(ctx, source)?;
        let mut scene = SpotScenePass::new(ctx);
        let cube = scene.add(
            ctx,
            &Mesh::cuboid(100.0, 100.0, 100.0),
            SpotMaterial::Phong {
                color: Color::from_hex(PINK),
            },
            Transform::IDENTITY,
        );
        scene.add(
            ctx,
            &Mesh::cuboid(WALL_WIDTH, WALL_HEIGHT, 5.0),
            SpotMaterial::Wobble {
                color: Color::WHITE,
                texture: source.binding(),
                texture_factor: texture_factor(source.aspect(), WALL_WIDTH / WALL_HEIGHT),
                influence: WOBBLE,
            },
            Transform::from_position(Vec3::new(0.0, 0.0, -100.0)),
        );

        let light = SpotLight::new(Color::WHITE)
            .with_position(Vec3::new(0.0, 0.0, 250.0))
            .with_cone(0.5, 1.0);

        Ok(Self {
            source,
            scene,
            cube,
            controls: OrbitControls::new(&camera),
            camera,
            light,
            orbit: LightOrbit::spiral(100.0),
        })
    }
}

impl Playground for SpotLighting {
    fn frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if let Some(t) = self.scene.transform_mut(self.cube) {
            t.rotation += Vec3::splat(SPIN);
        }
        self.orbit.advance(&mut self.light.position);

        let (width, height) = ctx.viewport().pixel_size();
        self.camera.set_viewport(width, height);
        self.controls.update(ctx.input, ctx.input_frame, &mut self.camera);

        let Self {
            source,
            scene,
            camera,
            light,
            ..
        } = self;
        ctx.render(Color::from_hex(PINK), |rctx, target| {
            source.update(rctx.queue);
            scene.render(rctx, target, camera, light);
        })
    }
}
