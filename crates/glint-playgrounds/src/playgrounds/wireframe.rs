//! 01: a white wireframe cube turning slowly under orbit controls.

use glam::Vec3;

use glint_engine::core::{AppControl, FrameCtx};
use glint_engine::paint::Color;
use glint_engine::render::scene::{Mesh, OrbitControls, PerspectiveCamera, WireframePass};
use glint_engine::render::RenderCtx;

use super::Playground;

const CLEAR: u32 = 0x00e8d5;
const SPIN: f32 = 0.001;

pub struct Wireframe {
    cube: WireframePass,
    camera: PerspectiveCamera,
    controls: OrbitControls,
}

impl Wireframe {
    pub fn new(ctx: &RenderCtx<'_>) -> Self {
        let camera = PerspectiveCamera::new(75.0, ctx.viewport.aspect(), 1.0, 10000.0)
            .with_position(Vec3::new(0.0, 0.0, 250.0));

        Self {
            cube: WireframePass::new(ctx, &Mesh::cuboid(100.0, 100.0, 100.0), Color::WHITE),
            controls: OrbitControls::new(&camera),
            camera,
        }
    }
}

impl Playground for Wireframe {
    fn frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.cube.transform.rotation += Vec3::splat(SPIN);

        let (width, height) = ctx.viewport().pixel_size();
        self.camera.set_viewport(width, height);
        self.controls.update(ctx.input, ctx.input_frame, &mut self.camera);

        let Self { cube, camera, .. } = self;
        ctx.render(Color::from_hex(CLEAR), |rctx, target| {
            cube.render(rctx, target, camera);
        })
    }
}
