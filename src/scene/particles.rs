//! Ambient particle field drifting around the engine part.
//!
//! Positions live in a dense vector indexed by [`ParticleId`]; velocities
//! live in a map owned by the field, keyed by the same id. A particle that
//! drifts past the respawn distance is put back near the centre with its
//! velocity unchanged.

use std::collections::HashMap;

use cgmath::{InnerSpace, Vector3};
use instant::Duration;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    config::ParticleConfig,
    context::{Context, InitContext},
    data_structures::{
        geometry::Geometry,
        instance::Instance,
        material::MaterialDesc,
        model::{Material, Mesh, Model},
        scene_graph::{ModelNode, SceneNode},
    },
    flow::{FlowConstructor, FlowFuture, GraphicsFlow},
    lifecycle::{ChildToken, LoopToken},
    render::Render,
};

pub type ParticleId = usize;

/// A point drawn uniformly from the open cube `(-extent, extent)³`.
fn random_in_cube<R: Rng + ?Sized>(rng: &mut R, extent: f32) -> Vector3<f32> {
    if extent <= 0.0 {
        return Vector3::new(0.0, 0.0, 0.0);
    }
    Vector3::new(
        rng.gen_range(-extent..extent),
        rng.gen_range(-extent..extent),
        rng.gen_range(-extent..extent),
    )
}

#[derive(Clone, Debug)]
pub struct ParticleField {
    positions: Vec<Vector3<f32>>,
    velocities: HashMap<ParticleId, Vector3<f32>>,
    respawn_distance: f32,
    respawn_extent: f32,
}

impl ParticleField {
    /// Spawns `config.count` particles. The count never changes afterwards.
    pub fn spawn<R: Rng + ?Sized>(config: &ParticleConfig, rng: &mut R) -> Self {
        let positions: Vec<_> = (0..config.count)
            .map(|_| random_in_cube(rng, config.spawn_extent))
            .collect();
        let velocities = (0..config.count)
            .map(|id| (id, random_in_cube(rng, config.velocity_extent)))
            .collect();
        Self {
            positions,
            velocities,
            respawn_distance: config.respawn_distance,
            respawn_extent: config.respawn_extent,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vector3<f32>] {
        &self.positions
    }

    pub fn position(&self, id: ParticleId) -> Option<Vector3<f32>> {
        self.positions.get(id).copied()
    }

    pub fn velocity(&self, id: ParticleId) -> Option<Vector3<f32>> {
        self.velocities.get(&id).copied()
    }

    /// Teleports a particle. Returns `false` for an unknown id.
    pub fn force_position(&mut self, id: ParticleId, position: Vector3<f32>) -> bool {
        match self.positions.get_mut(id) {
            Some(slot) => {
                *slot = position;
                true
            }
            None => false,
        }
    }

    /// Moves every particle by its velocity and respawns the ones that drifted
    /// too far. Returns how many were respawned.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        let mut respawned = 0;
        for (id, position) in self.positions.iter_mut().enumerate() {
            if let Some(velocity) = self.velocities.get(&id) {
                *position += *velocity;
            }
            if position.magnitude() > self.respawn_distance {
                *position = random_in_cube(rng, self.respawn_extent);
                respawned += 1;
            }
        }
        respawned
    }
}

pub struct ParticleFlow<R: Rng = StdRng> {
    field: ParticleField,
    node: ModelNode,
    rng: R,
    token: ChildToken,
}

impl<R: Rng> ParticleFlow<R> {
    pub fn new(ctx: &InitContext, mut rng: R) -> Self {
        let config = &ctx.settings.particles;
        let field = ParticleField::spawn(config, &mut rng);

        let mesh = Mesh::from_data(
            &ctx.device,
            "particle",
            &Geometry::sphere(config.radius, 4, 4).build(),
        );
        let material = Material::new(
            &ctx.device,
            "particle",
            MaterialDesc::unlit(config.color).translucent(config.opacity),
            &ctx.material_layout,
        );
        let locals = field.positions().iter().map(|p| Instance::from(*p)).collect();
        let node = ModelNode::new(&ctx.device, Model { mesh, material }, locals);
        log::info!("spawned {} particles", field.len());

        Self {
            field,
            node,
            rng,
            token: LoopToken::child_of(&ctx.shutdown),
        }
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }
}

impl ParticleFlow<StdRng> {
    pub fn constructor<S: 'static>() -> FlowConstructor<S> {
        Box::new(|ctx: InitContext| -> FlowFuture<S> {
            Box::pin(async move {
                let flow: Box<dyn GraphicsFlow<S>> =
                    Box::new(ParticleFlow::new(&ctx, StdRng::from_entropy()));
                anyhow::Ok(flow)
            })
        })
    }
}

impl<S, R: Rng + 'static> GraphicsFlow<S> for ParticleFlow<R> {
    fn on_update(&mut self, ctx: &Context, _state: &mut S, _dt: Duration) {
        if !self.token.run_frame(|| {
            self.field.step(&mut self.rng);
        }) {
            return;
        }
        for (id, position) in self.field.positions().iter().enumerate() {
            self.node.set_local_transform(id, Instance::from(*position));
        }
        self.node.update_world_transform_all();
        self.node.write_to_buffers(&ctx.queue, &ctx.device);
    }

    fn on_render(&self) -> Render<'_> {
        Render::from(&self.node as &dyn SceneNode)
    }

    fn is_running(&self) -> bool {
        !self.token.is_cancelled()
    }
}
