//! Engine data structures: geometry, materials, models, instances and the
//! scene graph.
//!
//! - `geometry` generates the primitive meshes (cylinder, box, sphere)
//! - `material` describes how a surface is shaded
//! - `model` contains the GPU meshes and materials and the draw calls
//! - `texture` contains the depth texture wrapper
//! - `instance` holds per-instance transformation data
//! - `scene_graph` enables hierarchical scene organization

pub mod geometry;
pub mod instance;
pub mod material;
pub mod model;
pub mod scene_graph;
pub mod texture;
