use crate::{
    data_structures::{
        instance::InstanceRaw,
        model::{ModelVertex, Vertex},
        texture::Texture,
    },
    pipelines::basic::{SceneLayouts, mk_render_pipeline, mk_scene_pipeline_layout, scene_shader},
};

/// Alpha-blended variant of the scene pipeline.
///
/// Shares the shader and layout with the opaque pipeline; the material's
/// opacity ends up in the output alpha. Depth is tested but not written so
/// translucent shells don't hide what is behind them.
pub fn mk_transparent_pipeline(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    layouts: &SceneLayouts,
    sample_count: u32,
) -> wgpu::RenderPipeline {
    let render_pipeline_layout = mk_scene_pipeline_layout(device, layouts);
    mk_render_pipeline(
        device,
        &render_pipeline_layout,
        config.format,
        Some(wgpu::BlendState::ALPHA_BLENDING),
        Some(Texture::DEPTH_FORMAT),
        false,
        sample_count,
        &[ModelVertex::desc(), InstanceRaw::desc()],
        scene_shader(),
    )
}
