use approx::assert_abs_diff_eq;
use cgmath::{Deg, Quaternion, Rotation3, Vector3};
use engine_showcase::data_structures::{
    instance::Instance,
    scene_graph::{ContainerNode, SceneNode},
};

fn assert_position(instance: &Instance, x: f32, y: f32, z: f32) {
    assert_abs_diff_eq!(instance.position.x, x, epsilon = 1e-5);
    assert_abs_diff_eq!(instance.position.y, y, epsilon = 1e-5);
    assert_abs_diff_eq!(instance.position.z, z, epsilon = 1e-5);
}

/// A single-instance root with one three-instance child placed along x.
fn group() -> ContainerNode {
    let mut parts = ContainerNode::new(3);
    for i in 0..3 {
        parts.set_local_transform(i, Instance::at(i as f32 + 1.0, 0.0, 0.0));
    }
    let mut root = ContainerNode::new(1);
    root.add_child(Box::new(parts));
    root
}

#[test]
fn should_move_every_child_instance_with_a_single_parent() {
    let mut root = group();
    root.set_local_transform(
        0,
        Instance {
            position: Vector3::new(0.0, 10.0, 0.0),
            scale: Vector3::new(2.0, 2.0, 2.0),
            ..Instance::default()
        },
    );

    root.update_world_transform_all();

    let world = root.get_children()[0].get_world_transforms();
    assert_eq!(world.len(), 3);
    assert_position(&world[0], 2.0, 10.0, 0.0);
    assert_position(&world[1], 4.0, 10.0, 0.0);
    assert_position(&world[2], 6.0, 10.0, 0.0);
    assert_eq!(world[2].scale, Vector3::new(2.0, 2.0, 2.0));
}

#[test]
fn should_rotate_children_around_the_group_origin() {
    let mut root = group();
    root.set_local_transform(0, Instance::new().with_rotation(Quaternion::from_angle_y(Deg(90.0))));

    root.update_world_transform_all();

    let world = root.get_children()[0].get_world_transforms();
    assert_position(&world[0], 0.0, 0.0, -1.0);
    assert_position(&world[2], 0.0, 0.0, -3.0);
}

#[test]
fn should_keep_local_transforms_untouched() {
    let mut root = group();
    root.set_local_transform(0, Instance::at(5.0, 5.0, 5.0));
    root.update_world_transform_all();
    root.update_world_transform_all();

    let child = &root.get_children()[0];
    assert_eq!(child.get_local_transform(1), Some(Instance::at(2.0, 0.0, 0.0)));
    assert_position(&child.get_world_transforms()[1], 7.0, 5.0, 5.0);
}

#[test]
fn should_skip_children_the_parent_cannot_place() {
    let mut parts = ContainerNode::new(3);
    parts.set_local_transform(0, Instance::at(1.0, 0.0, 0.0));
    let mut root = ContainerNode::new(2);
    root.add_child(Box::new(parts));

    root.update_world_transform_all();

    let world = root.get_children()[0].get_world_transforms();
    assert_eq!(world[0], Instance::default());
}

#[test]
fn should_pair_instances_when_counts_match() {
    let mut parts = ContainerNode::new(2);
    parts.set_local_transform(0, Instance::at(1.0, 0.0, 0.0));
    parts.set_local_transform(1, Instance::at(1.0, 0.0, 0.0));
    let mut rows = ContainerNode::new(2);
    rows.set_local_transform(0, Instance::at(0.0, 0.0, 0.0));
    rows.set_local_transform(1, Instance::at(0.0, 3.0, 0.0));
    rows.add_child(Box::new(parts));

    rows.update_world_transform_all();

    let world = rows.get_children()[0].get_world_transforms();
    assert_position(&world[0], 1.0, 0.0, 0.0);
    assert_position(&world[1], 1.0, 3.0, 0.0);
}

#[test]
fn should_not_count_groups_as_meshes() {
    let root = group();
    assert_eq!(root.mesh_count(), 0);
    assert_eq!(root.instance_count(), 1);
    assert_eq!(root.get_local_transform(1), None);
}
