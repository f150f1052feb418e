use cgmath::{InnerSpace, Vector3};
use engine_showcase::{config::ParticleConfig, scene::particles::ParticleField};

use crate::common::test_utils::seeded;

mod common;

#[test]
fn should_spawn_the_configured_number_of_particles() {
    let config = ParticleConfig::default();
    let field = ParticleField::spawn(&config, &mut seeded(7));

    assert_eq!(field.len(), 50);
    for id in 0..field.len() {
        let position = field.position(id).unwrap();
        let velocity = field.velocity(id).unwrap();
        for axis in [position.x, position.y, position.z] {
            assert!(axis.abs() <= 50.0, "{:?} spawned out of range", position);
        }
        for axis in [velocity.x, velocity.y, velocity.z] {
            assert!(axis.abs() <= 0.05, "{:?} is too fast", velocity);
        }
    }
}

#[test]
fn should_keep_particles_within_bounds_over_many_frames() {
    let config = ParticleConfig::default();
    let mut rng = seeded(42);
    let mut field = ParticleField::spawn(&config, &mut rng);

    for _ in 0..10_000 {
        field.step(&mut rng);
        for position in field.positions() {
            assert!(position.magnitude() <= 50.0, "{:?} escaped", position);
        }
    }
    assert_eq!(field.len(), 50);
}

#[test]
fn should_respawn_a_particle_forced_out_of_range() {
    let config = ParticleConfig::default();
    let mut rng = seeded(3);
    let mut field = ParticleField::spawn(&config, &mut rng);
    let velocity = field.velocity(0).unwrap();

    assert!(field.force_position(0, Vector3::new(60.0, 60.0, 60.0)));
    let respawned = field.step(&mut rng);

    let position = field.position(0).unwrap();
    assert!(respawned >= 1);
    for axis in [position.x, position.y, position.z] {
        assert!(axis.abs() <= 10.0, "{:?} respawned outside the centre box", position);
    }
    assert_eq!(field.velocity(0), Some(velocity));
}

#[test]
fn should_move_particles_by_their_velocity() {
    let config = ParticleConfig {
        spawn_extent: 1.0,
        ..ParticleConfig::default()
    };
    let mut rng = seeded(11);
    let mut field = ParticleField::spawn(&config, &mut rng);
    let before = field.position(5).unwrap();
    let velocity = field.velocity(5).unwrap();

    field.step(&mut rng);

    let after = field.position(5).unwrap();
    assert!((after - (before + velocity)).magnitude() < 1e-6);
}

#[test]
fn should_reject_forcing_an_unknown_particle() {
    let mut field = ParticleField::spawn(&ParticleConfig::default(), &mut seeded(1));
    assert!(!field.force_position(50, Vector3::new(0.0, 0.0, 0.0)));
    assert_eq!(field.position(50), None);
}

#[test]
fn should_be_deterministic_for_a_seed() {
    let config = ParticleConfig::default();
    let (mut rng_a, mut rng_b) = (seeded(99), seeded(99));
    let mut a = ParticleField::spawn(&config, &mut rng_a);
    let mut b = ParticleField::spawn(&config, &mut rng_b);
    for _ in 0..500 {
        a.step(&mut rng_a);
        b.step(&mut rng_b);
    }
    assert_eq!(a.positions(), b.positions());
}
