//! engine-showcase
//!
//! The hero scene of an industrial landing page: a stylised engine part that
//! spins, breathes and follows the cursor, lit by a cyan rig and surrounded
//! by drifting particles. It renders with wgpu into a WebGL2 canvas on the
//! web and into a desktop window natively. On the web it also drives the
//! page chrome around the scene (smooth anchors, stat counters, the mobile
//! menu).
//!
//! High-level modules
//! - `camera`: camera, projection, viewport and the cursor parallax
//! - `chrome`: page behaviours around the scene
//! - `config`: every tunable of the scene
//! - `context`: central GPU and window context that owns device/queue/pipelines
//! - `data_structures`: meshes, materials, instances and the scene graph
//! - `flow`: the frame loop and the flow abstraction
//! - `lifecycle`: cancellation tokens for frame loops
//! - `pipelines`: render pipelines, the light rig and the shadow map
//! - `render`: render composition for efficient pipeline reuse
//! - `scene`: the engine part, its motion and the particle field
//!

pub mod camera;
pub mod chrome;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod flow;
pub mod lifecycle;
pub mod pipelines;
pub mod render;
pub mod scene;

pub use config::ShowcaseConfig;
pub use flow::{FlowConstructor, GraphicsFlow, run, run_with};
pub use lifecycle::LoopToken;

use scene::{engine_part::EnginePartFlow, particles::ParticleFlow};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// The flows that make up the showcase scene.
pub fn showcase_flows<S: 'static>() -> Vec<FlowConstructor<S>> {
    vec![
        EnginePartFlow::constructor(),
        ParticleFlow::<rand::rngs::StdRng>::constructor(),
    ]
}

/// Runs the showcase in a native window until it is closed.
pub fn run_showcase() -> anyhow::Result<()> {
    run::<()>(showcase_flows())
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let to_js = |e: anyhow::Error| JsValue::from_str(&format!("{:#}", e));

    flow::init_logging();
    let settings = ShowcaseConfig::default();
    let shutdown = LoopToken::new();
    let pointer = camera::PointerFeed::new();
    chrome::web::install(&settings, &shutdown, &pointer).map_err(to_js)?;
    run_with::<()>(settings, shutdown, Some(pointer), showcase_flows()).map_err(to_js)
}
