//! 03: the frame source glitched onto a wall behind a cube, with a
//! spotlight spiralling over both.

use anyhow::Result;
use glam::Vec3;

use glint_engine::coords::texture_factor;
use glint_engine::core::{AppControl, FrameCtx};
use glint_engine::paint::Color;
use glint_engine::render::effect::GlitchEffect;
use glint_engine::render::scene::{
    LightOrbit, Mesh, ObjectId, OrbitControls, PerspectiveCamera, SpotLight, SpotMaterial,
    SpotScenePass, Transform,
};
use glint_engine::render::{BoxedSource, QuadPlacement, RenderCtx, ShaderPass, SourceTexture};

use super::Playground;

const PINK: u32 = 0xff5ca6;
const WALL_WIDTH: u32 = 1200;
const WALL_HEIGHT: u32 = 900;
const SPIN: f32 = 0.001;

pub struct Glitch {
    source: SourceTexture<BoxedSource>,
    glitch: ShaderPass,
    scene: SpotScenePass,
    cube: ObjectId,
    camera: PerspectiveCamera,
    controls: OrbitControls,
    light: SpotLight,
    orbit: LightOrbit,
}

impl Glitch {
    pub fn new(ctx: &RenderCtx<'_>, source: BoxedSource) -> Result<Self> {
        let camera = PerspectiveCamera::new(75.0, ctx.viewport.aspect(), 1.0, 10000.0)
            .with_position(Vec3::new(0.0, 0.0, 500.0));

        let source = super::upload_source(ctx, source)?;
        let wall_aspect = WALL_WIDTH as f32 / WALL_HEIGHT as f32;
        let placement = QuadPlacement::fullscreen()
            .with_texture_factor(texture_factor(source.aspect(), wall_aspect));
        let glitch = ShaderPass::new(
            ctx,
            GlitchEffect::new(),
            &source.binding(),
            (WALL_WIDTH, WALL_HEIGHT),
            placement,
        );

        let mut scene = SpotScenePass::new(ctx);
        let cube = scene.add(
            ctx,
            &Mesh::cuboid(100.0, 100.0, 100.0),
            SpotMaterial::Phong {
                color: Color::from_hex(PINK),
            },
            Transform::IDENTITY,
        );
        let wall = scene.add(
            ctx,
            &Mesh::cuboid(WALL_WIDTH as f32, WALL_HEIGHT as f32, 5.0),
            SpotMaterial::Unlit {
                texture: glitch.output(),
                texture_factor: [1.0, 1.0],
            },
            Transform::from_position(Vec3::new(0.0, 0.0, -100.0)),
        );
        scene.set_casts_shadow(wall, false);

        let light = SpotLight::new(Color::WHITE)
            .with_position(Vec3::new(0.0, 0.0, 250.0))
            .with_cone(0.5, 1.0);

        Ok(Self {
            source,
            glitch,
            scene,
            cube,
            controls: OrbitControls::new(&camera),
            camera,
            light,
            orbit: LightOrbit::spiral(100.0),
        })
    }
}

impl Playground for Glitch {
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
            glitch,
            scene,
            camera,
            light,
            ..
        } = self;
        ctx.render(Color::from_hex(PINK), |rctx, target| {
            source.update(rctx.queue);
            glitch.render(rctx, target.encoder);
            scene.render(rctx, target, camera, light);
        })
    }
}
