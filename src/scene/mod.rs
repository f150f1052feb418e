//! The showcase scene: the engine part, its motion and the particle field.

pub mod engine_part;
pub mod motion;
pub mod particles;
