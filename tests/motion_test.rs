use approx::assert_abs_diff_eq;
use cgmath::Vector3;
use engine_showcase::{camera::CursorOffset, config::MotionConfig, scene::motion::MotionState};
use instant::Duration;

#[test]
fn should_spin_slowly_without_a_cursor() {
    let mut motion = MotionState::new(&MotionConfig::default());
    for _ in 0..100 {
        motion.advance(CursorOffset::default());
    }
    let (x, y) = motion.rotation();
    assert_abs_diff_eq!(x, 0.5, epsilon = 1e-4);
    assert_abs_diff_eq!(y, 1.0, epsilon = 1e-4);
}

#[test]
fn should_add_the_cursor_offset_to_the_spin() {
    let mut motion = MotionState::new(&MotionConfig::default());
    motion.advance(CursorOffset { x: 0.1, y: -0.1 });
    let (x, y) = motion.rotation();
    assert_abs_diff_eq!(y, 0.11, epsilon = 1e-6);
    assert_abs_diff_eq!(x, -0.095, epsilon = 1e-6);
}

#[test]
fn should_breathe_within_five_percent() {
    let motion = MotionState::new(&MotionConfig::default());
    for step in 0..1000 {
        let scale = motion.pulse_scale(Duration::from_millis(step * 100));
        assert!((0.95..=1.05).contains(&scale), "scale {} out of range", scale);
    }
    assert_abs_diff_eq!(motion.pulse_scale(Duration::ZERO), 1.0);
    assert_abs_diff_eq!(
        motion.pulse_scale(Duration::from_secs_f32(std::f32::consts::FRAC_PI_2)),
        1.05,
        epsilon = 1e-5
    );
}

#[test]
fn should_scale_uniformly_around_the_origin() {
    let mut motion = MotionState::new(&MotionConfig::default());
    motion.advance(CursorOffset::default());
    let instance = motion.to_instance(Duration::from_secs(2));

    assert_eq!(instance.position, Vector3::new(0.0, 0.0, 0.0));
    assert_eq!(instance.scale.x, instance.scale.y);
    assert_eq!(instance.scale.y, instance.scale.z);
}

#[test]
fn should_start_unrotated() {
    let motion = MotionState::new(&MotionConfig::default());
    let instance = motion.to_instance(Duration::ZERO);
    assert_eq!(instance.rotation, cgmath::Quaternion::new(1.0, 0.0, 0.0, 0.0));
    assert_eq!(instance.scale, Vector3::new(1.0, 1.0, 1.0));
}
