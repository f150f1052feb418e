use std::collections::HashSet;

use engine_showcase::{
    GraphicsFlow,
    chrome::scroll::ScrollHost,
    context::Context,
    lifecycle::{ChildToken, LoopToken},
    render::Render,
};
use instant::Duration;
use rand::{SeedableRng, rngs::StdRng};

/// Page stand-in that knows a fixed set of element ids and records every
/// scroll it performed.
pub(crate) struct FakePage {
    ids: HashSet<String>,
    pub scrolled_to: Vec<String>,
}

impl FakePage {
    pub fn with_ids(ids: &[&str]) -> Self {
        Self {
            ids: ids.iter().map(|id| id.to_string()).collect(),
            scrolled_to: Vec::new(),
        }
    }
}

impl ScrollHost for FakePage {
    fn scroll_to_element(&mut self, id: &str) -> bool {
        if self.ids.contains(id) {
            self.scrolled_to.push(id.to_string());
            true
        } else {
            false
        }
    }
}

pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Flow without GPU resources that counts its frames and runs until its
/// token is cancelled.
pub(crate) struct IdleFlow {
    token: ChildToken,
    pub frames: usize,
}

impl IdleFlow {
    pub fn new(shutdown: &LoopToken) -> Self {
        Self {
            token: LoopToken::child_of(shutdown),
            frames: 0,
        }
    }

    pub fn token(&self) -> &ChildToken {
        &self.token
    }
}

impl<S> GraphicsFlow<S> for IdleFlow {
    fn on_update(&mut self, _ctx: &Context, _state: &mut S, _dt: Duration) {
        let frames = &mut self.frames;
        self.token.run_frame(|| *frames += 1);
    }

    fn on_render(&self) -> Render<'_> {
        Render::None
    }

    fn is_running(&self) -> bool {
        !self.token.is_cancelled()
    }
}
