use engine_showcase::{
    GraphicsFlow, LoopToken,
    camera::CursorOffset,
    config::{MotionConfig, ParticleConfig},
    flow::should_exit,
    lifecycle::page_hide_ends_loops,
    scene::{motion::MotionState, particles::ParticleField},
};

use crate::common::test_utils::{IdleFlow, seeded};

mod common;

#[test]
fn should_share_cancellation_between_clones() {
    let token = LoopToken::new();
    let clone = token.clone();
    assert!(!clone.is_cancelled());

    token.cancel();

    assert!(clone.is_cancelled());
    assert!(token.is_cancelled());
}

#[test]
fn should_cancel_children_with_their_parent() {
    let shutdown = LoopToken::new();
    let spin = LoopToken::child_of(&shutdown);
    let drift = LoopToken::child_of(&shutdown);

    shutdown.cancel();

    assert!(spin.is_cancelled());
    assert!(drift.is_cancelled());
}

#[test]
fn should_cancel_a_child_without_touching_the_parent() {
    let shutdown = LoopToken::new();
    let spin = LoopToken::child_of(&shutdown);
    let drift = LoopToken::child_of(&shutdown);

    spin.cancel();

    assert!(spin.is_cancelled());
    assert!(!drift.is_cancelled());
    assert!(!shutdown.is_cancelled());
}

#[test]
fn should_stay_cancelled() {
    let token = LoopToken::new();
    token.cancel();
    token.cancel();
    assert!(token.is_cancelled());
}

#[test]
fn should_observe_cancellation_from_another_thread() {
    let token = LoopToken::new();
    let remote = token.clone();
    std::thread::spawn(move || remote.cancel())
        .join()
        .unwrap();
    assert!(token.is_cancelled());
}

#[test]
fn should_run_frames_only_until_cancelled() {
    let shutdown = LoopToken::new();
    let token = LoopToken::child_of(&shutdown);
    let mut frames = 0;

    assert!(token.run_frame(|| frames += 1));
    shutdown.cancel();
    assert!(!token.run_frame(|| frames += 1));

    assert_eq!(frames, 1);
}

#[test]
fn should_stop_spinning_once_the_page_shuts_down() {
    let shutdown = LoopToken::new();
    let token = LoopToken::child_of(&shutdown);
    let mut motion = MotionState::new(&MotionConfig::default());

    for _ in 0..10 {
        token.run_frame(|| motion.advance(CursorOffset::default()));
    }
    let spun = motion.rotation();
    assert!(spun.1 > 0.0);

    shutdown.cancel();
    for _ in 0..10 {
        token.run_frame(|| motion.advance(CursorOffset { x: 0.1, y: 0.1 }));
    }

    assert_eq!(motion.rotation(), spun);
}

#[test]
fn should_freeze_the_particles_once_their_loop_is_cancelled() {
    let shutdown = LoopToken::new();
    let token = LoopToken::child_of(&shutdown);
    let mut rng = seeded(3);
    let mut field = ParticleField::spawn(&ParticleConfig::default(), &mut rng);

    token.cancel();
    let frozen = field.positions().to_vec();
    for _ in 0..10 {
        token.run_frame(|| {
            field.step(&mut rng);
        });
    }

    assert_eq!(field.positions(), frozen.as_slice());
    assert!(!shutdown.is_cancelled());
}

#[test]
fn should_exit_once_every_flow_has_stopped() {
    let shutdown = LoopToken::new();
    let first = IdleFlow::new(&shutdown);
    first.token().cancel();
    let flows: Vec<Box<dyn GraphicsFlow<()>>> =
        vec![Box::new(first), Box::new(IdleFlow::new(&shutdown))];

    assert!(!should_exit(&flows));

    shutdown.cancel();

    assert!(should_exit(&flows));
    assert!(flows.iter().all(|flow| !flow.is_running()));
}

#[test]
fn should_keep_loops_alive_for_the_back_forward_cache() {
    assert!(!page_hide_ends_loops(true));
    assert!(page_hide_ends_loops(false));
}
