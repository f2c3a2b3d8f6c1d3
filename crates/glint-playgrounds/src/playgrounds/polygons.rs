//! 10: a wobbling icosahedron lit by an orbiting point light, then mirror and
//! dots as post effects.

use glam::Vec3;

use glint_engine::core::{AppControl, FrameCtx};
use glint_engine::paint::Color;
use glint_engine::render::effect::{DotsEffect, MirrorEffect, TextureEffect};
use glint_engine::render::scene::{
    LightOrbit, LitMaterial, LitScenePass, Mesh, OrbitControls, PerspectiveCamera, PointLight,
};
use glint_engine::render::{QuadPlacement, RenderCtx, ScreenPass, ShaderChain};

use super::Playground;

const CLEAR: u32 = 0xffad17;
const LIGHT: u32 = 0xba7f10;

pub struct Polygons {
    scene: LitScenePass,
    chain: ShaderChain,
    screen: ScreenPass,
    camera: PerspectiveCamera,
    controls: OrbitControls,
    light: PointLight,
    orbit: LightOrbit,
}

impl Polygons {
    pub fn new(ctx: &RenderCtx<'_>) -> Self {
        let size = ctx.viewport.pixel_size();
        let camera = PerspectiveCamera::new(75.0, ctx.viewport.aspect(), 1.0, 10000.0)
            .with_position(Vec3::new(0.0, 0.0, 800.0));

        let scene = LitScenePass::new(
            ctx,
            &Mesh::icosahedron(150.0),
            LitMaterial::default(),
            size,
            Color::from_hex(CLEAR),
        );

        let mut chain = ShaderChain::new(scene.output(), size, QuadPlacement::fullscreen());
        chain.add(ctx, MirrorEffect);
        chain.add(ctx, DotsEffect::default());
        let screen = ScreenPass::new(ctx, TextureEffect, &chain.texture(), QuadPlacement::fullscreen());

        Self {
            scene,
            chain,
            screen,
            controls: OrbitControls::new(&camera),
            camera,
            light: PointLight::new(Color::from_hex(LIGHT)).with_position(Vec3::new(0.0, 0.0, 100.0)),
            orbit: LightOrbit::new(250.0),
        }
    }
}

impl Playground for Polygons {
    fn frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.scene.transform.rotation.x += 0.01;
        self.orbit.advance(&mut self.light.position);

        let (width, height) = ctx.viewport().pixel_size();
        self.camera.set_viewport(width, height);
        self.controls.update(ctx.input, ctx.input_frame, &mut self.camera);

        let Self {
            scene,
            chain,
            screen,
            camera,
            light,
            ..
        } = self;

        ctx.render(Color::from_hex(CLEAR), |rctx, target| {
            scene.render(rctx, target.encoder, camera, light);
            chain.render(rctx, target.encoder);
            screen.render(rctx, target);
        })
    }
}
