//! Scene graph and hierarchical scene organization.
//!
//! Nodes hold `(local, world)` transform pairs, one per instance. A group
//! ([`ContainerNode`]) carries no geometry and usually a single instance; a
//! [`ModelNode`] draws one model once per instance from a GPU instance
//! buffer. World transforms flow top-down: a child's instance `i` is placed by
//! its parent's instance `i`, or by the parent's only instance when the parent
//! has exactly one (a group spinning all of its parts).
//!
//! The graph's shape is fixed once built; only transforms change per frame.

use log::warn;
use wgpu::util::DeviceExt;

use crate::{
    data_structures::{
        instance::{Instance, InstanceRaw},
        model::Model,
    },
    render::Instanced,
};

pub trait SceneNode {
    fn get_world_transforms(&self) -> Vec<Instance>;

    fn get_local_transform(&self, idx: usize) -> Option<Instance>;

    fn set_local_transform(&mut self, idx: usize, instance: Instance);

    fn instance_count(&self) -> usize;

    fn get_children(&self) -> &[Box<dyn SceneNode>];

    /// Recomputes world transforms from the parent's world transforms.
    fn update_world_transforms(&mut self, parents_world_transform: &[Instance]);

    /// Recomputes world transforms treating `self` as a root.
    fn update_world_transform_all(&mut self) {
        self.update_world_transforms(&[Instance::default()]);
    }

    fn write_to_buffers(&mut self, queue: &wgpu::Queue, device: &wgpu::Device);

    fn get_render(&self) -> Vec<Instanced<'_>>;

    /// Number of meshes drawn by this node and its descendants.
    fn mesh_count(&self) -> usize {
        self.get_children()
            .iter()
            .map(|child| child.mesh_count())
            .sum()
    }
}

/// Applies the parent transforms to `instances` and returns the new world
/// transforms, or `None` when the parent can't place every instance.
fn compose(
    instances: &mut [(Instance, Instance)],
    parents_world_transform: &[Instance],
) -> Option<Vec<Instance>> {
    let broadcast = parents_world_transform.len() == 1;
    if !broadcast && parents_world_transform.len() < instances.len() {
        warn!(
            "You tried to transform {} instances with only {} parent transforms.",
            instances.len(),
            parents_world_transform.len(),
        );
        return None;
    }
    let world_transforms = instances
        .iter_mut()
        .enumerate()
        .map(|(i, (local, world))| {
            let parent = if broadcast {
                &parents_world_transform[0]
            } else {
                &parents_world_transform[i]
            };
            *world = parent * &*local;
            world.clone()
        })
        .collect();
    Some(world_transforms)
}

pub struct ContainerNode {
    pub children: Vec<Box<dyn SceneNode>>,
    pub instances: Vec<(Instance, Instance)>,
}

impl ContainerNode {
    pub fn new(amount: usize) -> Self {
        let instances = (0..amount)
            .map(|_| (Instance::default(), Instance::default()))
            .collect();
        Self {
            instances,
            children: vec![],
        }
    }

    pub fn add_child(&mut self, child: Box<dyn SceneNode>) {
        self.children.push(child);
    }
}

impl SceneNode for ContainerNode {
    fn set_local_transform(&mut self, idx: usize, instance: Instance) {
        if let Some((local, _)) = self.instances.get_mut(idx) {
            *local = instance;
        }
    }

    fn get_world_transforms(&self) -> Vec<Instance> {
        self.instances
            .iter()
            .map(|(_, world)| world)
            .cloned()
            .collect()
    }

    fn update_world_transforms(&mut self, parents_world_transform: &[Instance]) {
        let Some(world_transforms) = compose(&mut self.instances, parents_world_transform) else {
            return;
        };
        for child in self.children.iter_mut() {
            child.update_world_transforms(&world_transforms);
        }
    }

    fn get_local_transform(&self, idx: usize) -> Option<Instance> {
        self.instances.get(idx).map(|(local, _)| local).cloned()
    }

    fn instance_count(&self) -> usize {
        self.instances.len()
    }

    fn write_to_buffers(&mut self, queue: &wgpu::Queue, device: &wgpu::Device) {
        self.children
            .iter_mut()
            .for_each(|child| child.write_to_buffers(queue, device));
    }

    fn get_children(&self) -> &[Box<dyn SceneNode>] {
        &self.children
    }

    fn get_render(&self) -> Vec<Instanced<'_>> {
        self.children
            .iter()
            .flat_map(|child| child.get_render())
            .collect()
    }
}

/// A leaf drawing one model per instance.
pub struct ModelNode {
    instance_buffer: wgpu::Buffer,
    instances: Vec<(Instance, Instance)>,
    model: Model,
}

impl ModelNode {
    /// Creates a node drawing `model` once per entry of `locals`.
    pub fn new(device: &wgpu::Device, model: Model, locals: Vec<Instance>) -> Self {
        let instances = locals
            .into_iter()
            .map(|local| (local.clone(), local))
            .collect::<Vec<_>>();

        let instance_data = instances
            .iter()
            .map(|(_, world)| world.to_raw())
            .collect::<Vec<_>>();

        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Instance Buffer", model.mesh.name)),
            contents: bytemuck::cast_slice(&instance_data),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        Self {
            instance_buffer,
            instances,
            model,
        }
    }
}

impl SceneNode for ModelNode {
    fn set_local_transform(&mut self, idx: usize, instance: Instance) {
        if let Some((local, _)) = self.instances.get_mut(idx) {
            *local = instance;
        }
    }

    fn get_world_transforms(&self) -> Vec<Instance> {
        self.instances
            .iter()
            .map(|(_, world)| world)
            .cloned()
            .collect()
    }

    fn update_world_transforms(&mut self, parents_world_transform: &[Instance]) {
        compose(&mut self.instances, parents_world_transform);
    }

    fn get_local_transform(&self, idx: usize) -> Option<Instance> {
        self.instances.get(idx).map(|(local, _)| local).cloned()
    }

    fn instance_count(&self) -> usize {
        self.instances.len()
    }

    fn write_to_buffers(&mut self, queue: &wgpu::Queue, device: &wgpu::Device) {
        let raw_instances: Vec<InstanceRaw> = self
            .instances
            .iter()
            .map(|(_, world)| world.to_raw())
            .collect();
        queue.write_buffer(
            &self.instance_buffer,
            0,
            bytemuck::cast_slice(&raw_instances),
        );
    }

    fn get_children(&self) -> &[Box<dyn SceneNode>] {
        &[]
    }

    fn get_render(&self) -> Vec<Instanced<'_>> {
        vec![Instanced {
            instance: &self.instance_buffer,
            model: &self.model,
            amount: self.instances.len(),
        }]
    }

    fn mesh_count(&self) -> usize {
        self.instances.len()
    }
}
