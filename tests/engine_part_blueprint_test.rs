use approx::assert_abs_diff_eq;
use cgmath::Vector3;
use engine_showcase::{
    data_structures::material::{DEFAULT_SPECULAR, Shading, srgb_hex_to_linear},
    scene::engine_part::EnginePartBlueprint,
};

#[test]
fn should_be_made_of_twenty_meshes() {
    let blueprint = EnginePartBlueprint::standard();
    assert_eq!(blueprint.mesh_count(), 20);

    let counts: Vec<(&str, usize)> = blueprint
        .parts
        .iter()
        .map(|part| (part.name, part.placements.len()))
        .collect();
    assert_eq!(
        counts,
        vec![
            ("engine block", 1),
            ("piston", 4),
            ("piston rod", 4),
            ("cooling fin", 8),
            ("exhaust pipe", 2),
            ("glow", 1),
        ]
    );
}

#[test]
fn should_place_pistons_around_the_block() {
    let blueprint = EnginePartBlueprint::default();
    let pistons = blueprint.part("piston").unwrap();
    let expected = [(6.0, 0.0), (0.0, 6.0), (-6.0, 0.0), (0.0, -6.0)];

    for (placement, (x, z)) in pistons.placements.iter().zip(expected) {
        assert_abs_diff_eq!(placement.position.x, x, epsilon = 1e-5);
        assert_abs_diff_eq!(placement.position.y, 5.0);
        assert_abs_diff_eq!(placement.position.z, z, epsilon = 1e-5);
    }

    let rods = blueprint.part("piston rod").unwrap();
    for (rod, piston) in rods.placements.iter().zip(&pistons.placements) {
        assert_abs_diff_eq!(rod.position.x, piston.position.x);
        assert_abs_diff_eq!(rod.position.y, -2.0);
        assert_abs_diff_eq!(rod.position.z, piston.position.z);
    }
}

#[test]
fn should_stack_the_cooling_fins() {
    let blueprint = EnginePartBlueprint::standard();
    let heights: Vec<f32> = blueprint
        .part("cooling fin")
        .unwrap()
        .placements
        .iter()
        .map(|fin| fin.position.y)
        .collect();
    assert_eq!(heights, vec![-8.0, -6.0, -4.0, -2.0, 0.0, 2.0, 4.0, 6.0]);
}

#[test]
fn should_lay_the_exhaust_pipes_sideways() {
    let blueprint = EnginePartBlueprint::standard();
    let pipes = &blueprint.part("exhaust pipe").unwrap().placements;

    assert_eq!(pipes[0].position, Vector3::new(-12.0, 0.0, 0.0));
    assert_eq!(pipes[1].position, Vector3::new(12.0, 0.0, 0.0));
    for pipe in pipes {
        let axis = pipe.rotation * Vector3::unit_y();
        assert_abs_diff_eq!(axis.x, -1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(axis.y, 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(axis.z, 0.0, epsilon = 1e-5);
    }
}

#[test]
fn should_only_let_the_block_receive_shadows() {
    let blueprint = EnginePartBlueprint::standard();
    for part in &blueprint.parts {
        let is_block = part.name == "engine block";
        let is_glow = part.name == "glow";
        assert_eq!(part.material.receive_shadow, is_block, "{}", part.name);
        assert_eq!(part.material.cast_shadow, !is_glow, "{}", part.name);
    }

    let block = &blueprint.part("engine block").unwrap().material;
    assert_eq!(block.specular, 0x00d4ff);
    assert_eq!(block.shininess, 100.0);
    assert_eq!(
        blueprint.part("piston").unwrap().material.specular,
        DEFAULT_SPECULAR
    );
}

#[test]
fn should_make_the_glow_a_faint_unlit_shell() {
    let blueprint = EnginePartBlueprint::standard();
    let glow = &blueprint.part("glow").unwrap().material;

    assert_eq!(glow.shading, Shading::Unlit);
    assert!(glow.transparent);
    assert_abs_diff_eq!(glow.opacity, 0.1);

    let uniform = glow.to_uniform();
    assert_eq!(uniform.flags[0], 0.0);
    assert_abs_diff_eq!(uniform.color[3], 0.1);
}

#[test]
fn should_convert_colours_to_linear() {
    assert_eq!(srgb_hex_to_linear(0xffffff), [1.0, 1.0, 1.0]);
    assert_eq!(srgb_hex_to_linear(0x000000), [0.0, 0.0, 0.0]);
    let [r, g, b] = srgb_hex_to_linear(0x808080);
    assert_abs_diff_eq!(r, 0.2158605, epsilon = 1e-4);
    assert_eq!(r, g);
    assert_eq!(g, b);
}

#[test]
fn should_mark_phong_parts_as_lit() {
    let blueprint = EnginePartBlueprint::standard();
    let block = blueprint.part("engine block").unwrap().material.to_uniform();
    assert_eq!(block.flags[0], 1.0);
    assert_eq!(block.flags[1], 1.0);
    assert_eq!(block.color[3], 1.0);
    assert_eq!(block.specular[3], 100.0);
}
