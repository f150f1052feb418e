use cgmath::InnerSpace;
use wgpu::util::DeviceExt;

use crate::{
    config::{FogConfig, LightingConfig},
    data_structures::material::srgb_hex_to_linear,
};

/// The light rig and fog as the scene shader sees them.
#[derive(Debug)]
pub struct LightResources {
    pub uniform: LightUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

/// Colours are linear and pre-multiplied by their intensity. Every field is a
/// vec4 to satisfy uniform alignment; unused lanes are zero.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    pub ambient: [f32; 4],
    /// Unit vector pointing from the scene toward the directional light.
    pub directional_dir: [f32; 4],
    pub directional_color: [f32; 4],
    /// xyz position, w cutoff distance.
    pub point_position: [f32; 4],
    pub point_color: [f32; 4],
    pub fog_color: [f32; 4],
    /// x near, y far.
    pub fog_range: [f32; 4],
}

fn scaled(hex: u32, intensity: f32) -> [f32; 4] {
    let [r, g, b] = srgb_hex_to_linear(hex);
    [r * intensity, g * intensity, b * intensity, 0.0]
}

impl LightUniform {
    pub fn new(lighting: &LightingConfig, fog: &FogConfig) -> Self {
        let dir = cgmath::Vector3::from(lighting.directional_position);
        let dir = if dir.magnitude2() > 0.0 {
            dir.normalize()
        } else {
            cgmath::Vector3::unit_y()
        };
        let [px, py, pz] = lighting.point_position;
        let [fr, fg, fb] = srgb_hex_to_linear(fog.color);
        Self {
            ambient: scaled(lighting.ambient_color, lighting.ambient_intensity),
            directional_dir: [dir.x, dir.y, dir.z, 0.0],
            directional_color: scaled(lighting.directional_color, lighting.directional_intensity),
            point_position: [px, py, pz, lighting.point_distance],
            point_color: scaled(lighting.point_color, lighting.point_intensity),
            fog_color: [fr, fg, fb, 1.0],
            fog_range: [fog.near, fog.far, 0.0, 0.0],
        }
    }
}

impl LightResources {
    pub fn new(device: &wgpu::Device, lighting: &LightingConfig, fog: &FogConfig) -> Self {
        let uniform = LightUniform::new(lighting, fog);
        let buffer = mk_buffer(device, uniform);
        let bind_group_layout = mk_bind_group_layout(device);
        let bind_group = mk_bind_group(device, &bind_group_layout, &buffer);
        Self {
            uniform,
            buffer,
            bind_group,
            bind_group_layout,
        }
    }
}

pub fn mk_buffer(device: &wgpu::Device, light_uniform: LightUniform) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Light Buffer"),
        contents: bytemuck::cast_slice(&[light_uniform]),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    })
}

pub fn mk_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some("light_bind_group_layout"),
    })
}

pub fn mk_bind_group(
    device: &wgpu::Device,
    bind_group_layout: &wgpu::BindGroupLayout,
    light_buffer: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout: bind_group_layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: light_buffer.as_entire_binding(),
        }],
        label: Some("light_bind_group"),
    })
}
