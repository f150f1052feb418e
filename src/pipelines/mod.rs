//! Render pipelines: the lit/unlit scene pipeline in an opaque and a
//! transparent flavour, plus the light rig and the shadow map they read.

pub mod basic;
pub mod light;
pub mod shadow;
pub mod transparent;

use basic::{SceneLayouts, mk_basic_pipeline};
use transparent::mk_transparent_pipeline;

#[derive(Debug)]
pub struct Pipelines {
    pub basic: wgpu::RenderPipeline,
    pub transparent: wgpu::RenderPipeline,
}

impl Pipelines {
    pub fn new(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        layouts: &SceneLayouts,
        sample_count: u32,
    ) -> Self {
        Self {
            basic: mk_basic_pipeline(device, config, layouts, sample_count),
            transparent: mk_transparent_pipeline(device, config, layouts, sample_count),
        }
    }
}
