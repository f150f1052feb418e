//! The industrial engine part: block, pistons, rods, fins, exhaust pipes and
//! a translucent glow shell, grouped under one spinning root.
//!
//! [`EnginePartBlueprint`] is plain data and can be inspected without a GPU.
//! [`EnginePartFlow`] uploads it (one instanced [`ModelNode`] per kind of
//! part) and animates the group every frame.

use std::f32::consts::{FRAC_PI_2, PI};

use cgmath::{Quaternion, Rad, Rotation3};
use instant::Duration;

use crate::{
    context::{Context, InitContext},
    data_structures::{
        geometry::Geometry,
        instance::Instance,
        material::MaterialDesc,
        model::{Material, Mesh, Model},
        scene_graph::{ContainerNode, ModelNode, SceneNode},
    },
    flow::{FlowConstructor, FlowFuture, GraphicsFlow},
    lifecycle::{ChildToken, LoopToken},
    render::Render,
    scene::motion::MotionState,
};

/// One kind of part, drawn once per placement.
#[derive(Clone, Debug, PartialEq)]
pub struct PartSpec {
    pub name: &'static str,
    pub geometry: Geometry,
    pub material: MaterialDesc,
    /// Transforms relative to the group origin.
    pub placements: Vec<Instance>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnginePartBlueprint {
    pub parts: Vec<PartSpec>,
}

fn around_block(radius: f32, y: f32) -> Vec<Instance> {
    (0..4)
        .map(|i| {
            let angle = i as f32 * PI / 2.0;
            Instance::at(angle.cos() * radius, y, angle.sin() * radius)
        })
        .collect()
}

impl EnginePartBlueprint {
    pub fn standard() -> Self {
        let block = PartSpec {
            name: "engine block",
            geometry: Geometry::cylinder(8.0, 10.0, 20.0, 8),
            material: MaterialDesc::phong(0x2c3e50)
                .shininess(100.0)
                .specular(0x00d4ff)
                .casts_shadow()
                .receives_shadow(),
            placements: vec![Instance::new()],
        };
        let pistons = PartSpec {
            name: "piston",
            geometry: Geometry::cylinder(2.0, 2.0, 12.0, 16),
            material: MaterialDesc::phong(0x34495e).shininess(150.0).casts_shadow(),
            placements: around_block(6.0, 5.0),
        };
        let rods = PartSpec {
            name: "piston rod",
            geometry: Geometry::cylinder(0.5, 0.5, 8.0, 8),
            material: MaterialDesc::phong(0x95a5a6).shininess(200.0).casts_shadow(),
            placements: around_block(6.0, -2.0),
        };
        let fins = PartSpec {
            name: "cooling fin",
            geometry: Geometry::cuboid(12.0, 1.0, 0.5),
            material: MaterialDesc::phong(0x7f8c8d).shininess(80.0).casts_shadow(),
            placements: (0..8)
                .map(|i| Instance::at(0.0, -8.0 + i as f32 * 2.0, 0.0))
                .collect(),
        };
        let pipes = PartSpec {
            name: "exhaust pipe",
            geometry: Geometry::cylinder(1.5, 1.5, 15.0, 8),
            material: MaterialDesc::phong(0xe74c3c).shininess(120.0).casts_shadow(),
            placements: [-12.0, 12.0]
                .into_iter()
                .map(|x| {
                    Instance::at(x, 0.0, 0.0).with_rotation(Quaternion::from_angle_z(Rad(FRAC_PI_2)))
                })
                .collect(),
        };
        let glow = PartSpec {
            name: "glow",
            geometry: Geometry::sphere(15.0, 32, 32),
            material: MaterialDesc::unlit(0x00d4ff).translucent(0.1),
            placements: vec![Instance::new()],
        };
        Self {
            parts: vec![block, pistons, rods, fins, pipes, glow],
        }
    }

    /// Total number of meshes drawn, counting every placement.
    pub fn mesh_count(&self) -> usize {
        self.parts.iter().map(|part| part.placements.len()).sum()
    }

    pub fn part(&self, name: &str) -> Option<&PartSpec> {
        self.parts.iter().find(|part| part.name == name)
    }

    /// Uploads every part and groups them under a single-instance root.
    pub fn build(&self, device: &wgpu::Device, material_layout: &wgpu::BindGroupLayout) -> ContainerNode {
        let mut root = ContainerNode::new(1);
        for part in &self.parts {
            let mesh = Mesh::from_data(device, part.name, &part.geometry.build());
            let material = Material::new(device, part.name, part.material.clone(), material_layout);
            let node = ModelNode::new(device, Model { mesh, material }, part.placements.clone());
            root.add_child(Box::new(node));
        }
        root.update_world_transform_all();
        log::info!("engine part built from {} meshes", root.mesh_count());
        root
    }
}

impl Default for EnginePartBlueprint {
    fn default() -> Self {
        Self::standard()
    }
}

pub struct EnginePartFlow {
    root: ContainerNode,
    motion: MotionState,
    token: ChildToken,
}

impl EnginePartFlow {
    pub fn new(ctx: &InitContext, blueprint: &EnginePartBlueprint) -> Self {
        Self {
            root: blueprint.build(&ctx.device, &ctx.material_layout),
            motion: MotionState::new(&ctx.settings.motion),
            token: LoopToken::child_of(&ctx.shutdown),
        }
    }

    pub fn constructor<S: 'static>() -> FlowConstructor<S> {
        Box::new(|ctx: InitContext| -> FlowFuture<S> {
            Box::pin(async move {
                let flow: Box<dyn GraphicsFlow<S>> =
                    Box::new(EnginePartFlow::new(&ctx, &EnginePartBlueprint::standard()));
                anyhow::Ok(flow)
            })
        })
    }

    pub fn motion(&self) -> &MotionState {
        &self.motion
    }
}

impl<S> GraphicsFlow<S> for EnginePartFlow {
    fn on_update(&mut self, ctx: &Context, _state: &mut S, _dt: Duration) {
        let cursor = ctx.camera.controller.cursor();
        if !self.token.run_frame(|| self.motion.advance(cursor)) {
            return;
        }
        self.root
            .set_local_transform(0, self.motion.to_instance(ctx.started.elapsed()));
        self.root.update_world_transform_all();
        self.root.write_to_buffers(&ctx.queue, &ctx.device);
    }

    fn on_render(&self) -> Render<'_> {
        Render::from(&self.root as &dyn SceneNode)
    }

    fn is_running(&self) -> bool {
        !self.token.is_cancelled()
    }
}
