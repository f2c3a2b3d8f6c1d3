//! 11: a box textured with the frame source, lit by an orbiting point light,
//! through a slow tv pass.

use anyhow::Result;
use glam::Vec3;

use glint_engine::coords::texture_factor;
use glint_engine::core::{AppControl, FrameCtx};
use glint_engine::paint::Color;
use glint_engine::render::effect::{TextureEffect, TvEffect};
use glint_engine::render::scene::{
    LightOrbit, LitMaterial, LitScenePass, Mesh, OrbitControls, PerspectiveCamera, PointLight,
    Transform,
};
use glint_engine::render::{
    BoxedSource, QuadPlacement, RenderCtx, ScreenPass, ShaderChain, SourceTexture,
};

use super::Playground;

const CLEAR: u32 = 0xffad17;
const LIGHT: u32 = 0xba7f10;
const PLANE_WIDTH: f32 = 1200.0;
const PLANE_HEIGHT: f32 = 900.0;
const PLANE_DEPTH: f32 = 50.0;

pub struct Lighting {
    source: SourceTexture<BoxedSource>,
    scene: LitScenePass,
    chain: ShaderChain,
    screen: ScreenPass,
    camera: PerspectiveCamera,
    controls: OrbitControls,
    light: PointLight,
    orbit: LightOrbit,
}

impl Lighting {
    pub fn new(ctx: &RenderCtx<'_>, source: BoxedSource) -> Result<Self> {
        let size = ctx.viewport.pixel_size();
        let camera = PerspectiveCamera::new(75.0, ctx.viewport.aspect(), 1.0, 10000.0)
            .with_position(Vec3::new(0.0, 0.0, 800.0));

        let source = super::upload_source(ctx, source)?;
        let material = LitMaterial {
            texture: Some(source.binding()),
            texture_factor: texture_factor(source.aspect(), PLANE_WIDTH / PLANE_HEIGHT),
            ..Default::default()
        };
        let scene = LitScenePass::new(
            ctx,
            &Mesh::cuboid(PLANE_WIDTH, PLANE_HEIGHT, PLANE_DEPTH),
            material,
            size,
            Color::from_hex(CLEAR),
        )
        .with_transform(Transform::from_position(Vec3::new(0.0, 0.0, -100.0)));

        let mut chain = ShaderChain::new(scene.output(), size, QuadPlacement::fullscreen());
        chain.add(ctx, TvEffect::default().with_time_step(0.01));
        let screen = ScreenPass::new(ctx, TextureEffect, &chain.texture(), QuadPlacement::fullscreen());

        let light = PointLight::new(Color::from_hex(LIGHT))
            .with_position(Vec3::new(0.0, 0.0, 100.0))
            .with_intensity(2.0);

        Ok(Self {
            source,
            scene,
            chain,
            screen,
            controls: OrbitControls::new(&camera),
            camera,
            light,
            orbit: LightOrbit::new(250.0),
        })
    }
}

impl Playground for Lighting {
    fn frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.orbit.advance(&mut self.light.position);

        let (width, height) = ctx.viewport().pixel_size();
        self.camera.set_viewport(width, height);
        self.controls.update(ctx.input, ctx.input_frame, &mut self.camera);

        let Self {
            source,
            scene,
            chain,
            screen,
            camera,
            light,
            ..
        } = self;

        ctx.render(Color::from_hex(CLEAR), |rctx, target| {
            source.update(rctx.queue);
            scene.render(rctx, target.encoder, camera, light);
            chain.render(rctx, target.encoder);
            screen.render(rctx, target);
        })
    }
}
