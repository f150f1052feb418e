//! Render composition and pipeline batching.
//!
//! Flows describe what they want drawn with a [`Render`] value each frame.
//! The frame driver walks those values and sorts every instanced draw into
//! the shadow, opaque and transparent batches, so each pipeline is bound once
//! per frame no matter how many flows contribute.
//!
//! # Key types
//!
//! - [`Render<'a>`] is the primary enum describing render operations
//! - [`Instanced<'a>`] contains data for instanced rendering (model + instance buffer)
//! - [`Batches<'a>`] is the sorted result the frame driver draws from

use crate::data_structures::{model::Model, scene_graph::SceneNode};

/// Data for instanced object rendering: a model and its instance buffer.
#[derive(Clone)]
pub struct Instanced<'a> {
    pub instance: &'a wgpu::Buffer,
    pub model: &'a Model,
    pub amount: usize,
}

/// Specifies how a flow's objects should be rendered.
///
/// # Variants
///
/// - `None` renders nothing
/// - `Defaults(Vec<Instanced>)` renders a batch of instanced objects, each
///   with the pipeline its material asks for
pub enum Render<'a> {
    None,
    Defaults(Vec<Instanced<'a>>),
}

/// Draws sorted by the pass and pipeline that render them.
#[derive(Default)]
pub struct Batches<'a> {
    /// Opaque or transparent draws whose material casts a shadow.
    pub shadow_casters: Vec<Instanced<'a>>,
    pub opaque: Vec<Instanced<'a>>,
    pub transparent: Vec<Instanced<'a>>,
}

impl<'a> Batches<'a> {
    fn push(&mut self, instanced: Instanced<'a>) {
        if instanced.amount == 0 {
            log::warn!("you attempted to render something with zero instances");
            return;
        }
        if instanced.model.casts_shadow() {
            self.shadow_casters.push(instanced.clone());
        }
        if instanced.model.is_transparent() {
            self.transparent.push(instanced);
        } else {
            self.opaque.push(instanced);
        }
    }
}

impl<'a> Render<'a> {
    /// Sorts this render into `batches`.
    pub(crate) fn collect(self, batches: &mut Batches<'a>) {
        match self {
            Render::Defaults(vec) => vec.into_iter().for_each(|instanced| batches.push(instanced)),
            Render::None => (),
        }
    }
}

impl<'a> From<&'a dyn SceneNode> for Render<'a> {
    fn from(sn: &'a dyn SceneNode) -> Self {
        Render::Defaults(sn.get_render())
    }
}
