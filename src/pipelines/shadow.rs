//! Shadow map for the directional light.
//!
//! Casters are drawn depth-only from the light's point of view into a square
//! depth texture before the main pass. The scene shader then compares each
//! fragment's light-space depth against that map through a comparison
//! sampler.

use anyhow::anyhow;
use cgmath::{EuclideanSpace, Point3, Vector3};
use wgpu::util::DeviceExt;

use crate::{
    camera::OPENGL_TO_WGPU_MATRIX,
    config::ShadowConfig,
    data_structures::{
        instance::InstanceRaw,
        model::{ModelVertex, Vertex},
        texture::Texture,
    },
};

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ShadowUniform {
    light_view_proj: [[f32; 4]; 4],
}

/// Orthographic view-projection of a directional light placed at
/// `light_position` and aimed at the origin.
pub fn light_view_projection(
    config: &ShadowConfig,
    light_position: [f32; 3],
) -> cgmath::Matrix4<f32> {
    let e = config.extent;
    let view = cgmath::Matrix4::look_at_rh(
        Point3::from(light_position),
        Point3::origin(),
        Vector3::unit_y(),
    );
    let proj = cgmath::ortho(-e, e, -e, e, config.near, config.far);
    OPENGL_TO_WGPU_MATRIX * proj * view
}

#[derive(Debug)]
pub struct ShadowResources {
    pub map: Texture,
    pub uniform: ShadowUniform,
    pub buffer: wgpu::Buffer,
    /// Group 0 of the depth-only pass.
    pub pass_bind_group: wgpu::BindGroup,
    /// Group 3 of the scene pipelines: map, comparison sampler, light matrix.
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
    pub pipeline: wgpu::RenderPipeline,
}

impl ShadowResources {
    pub fn new(
        device: &wgpu::Device,
        config: &ShadowConfig,
        light_position: [f32; 3],
    ) -> anyhow::Result<Self> {
        let map = Texture::create_depth_texture(
            device,
            [config.map_size, config.map_size],
            "shadow_map",
        );
        let sampler = map
            .sampler
            .as_ref()
            .ok_or_else(|| anyhow!("the shadow map was created without a comparison sampler"))?;

        let uniform = ShadowUniform {
            light_view_proj: light_view_projection(config, light_position).into(),
        };
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Shadow Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let pass_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[uniform_entry(0, wgpu::ShaderStages::VERTEX)],
                label: Some("shadow_pass_bind_group_layout"),
            });
        let pass_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &pass_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("shadow_pass_bind_group"),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Depth,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Comparison),
                    count: None,
                },
                uniform_entry(2, wgpu::ShaderStages::FRAGMENT),
            ],
            label: Some("shadow_bind_group_layout"),
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&map.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: buffer.as_entire_binding(),
                },
            ],
            label: Some("shadow_bind_group"),
        });

        let pipeline = mk_shadow_pipeline(device, &pass_bind_group_layout);

        Ok(Self {
            map,
            uniform,
            buffer,
            pass_bind_group,
            bind_group,
            bind_group_layout,
            pipeline,
        })
    }
}

fn uniform_entry(binding: u32, visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

fn mk_shadow_pipeline(
    device: &wgpu::Device,
    pass_bind_group_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Shadow Pipeline Layout"),
        bind_group_layouts: &[pass_bind_group_layout],
        push_constant_ranges: &[],
    });
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Shadow Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("shadow.wgsl").into()),
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        cache: None,
        label: Some("Shadow Pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[ModelVertex::desc(), InstanceRaw::desc()],
            compilation_options: Default::default(),
        },
        // depth only
        fragment: None,
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: Some(wgpu::Face::Back),
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: Texture::DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            // acne
            bias: wgpu::DepthBiasState {
                constant: 2,
                slope_scale: 2.0,
                clamp: 0.0,
            },
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
    })
}
