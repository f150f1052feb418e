use cgmath::{InnerSpace, Vector3};
use engine_showcase::data_structures::geometry::{Geometry, MeshData};

/// Every non-degenerate triangle of a convex mesh centred on the origin must
/// face away from the origin.
fn assert_outward(mesh: &MeshData) {
    for [a, b, c] in mesh.triangles() {
        let face = (b - a).cross(c - a);
        if face.magnitude2() < 1e-12 {
            continue;
        }
        let centroid = (a + b + c) / 3.0;
        assert!(
            face.dot(centroid) > 0.0,
            "triangle {:?} {:?} {:?} faces inward",
            a,
            b,
            c
        );
    }
}

fn assert_unit_normals(mesh: &MeshData) {
    for vertex in &mesh.vertices {
        let normal = Vector3::from(vertex.normal);
        assert!((normal.magnitude() - 1.0).abs() < 1e-4, "{:?}", vertex.normal);
    }
}

#[test]
fn should_build_the_engine_block_frustum() {
    let mesh = Geometry::cylinder(8.0, 10.0, 20.0, 8).build();

    assert_eq!(mesh.vertices.len(), 38);
    assert_eq!(mesh.indices.len(), 96);
    assert_eq!(mesh.triangle_count(), 32);
    assert_outward(&mesh);
    assert_unit_normals(&mesh);

    let top_y = mesh
        .vertices
        .iter()
        .map(|v| v.position[1])
        .fold(f32::MIN, f32::max);
    assert_eq!(top_y, 10.0);
}

#[test]
fn should_tilt_frustum_side_normals_outward() {
    let mesh = Geometry::cylinder(8.0, 10.0, 20.0, 8).build();
    // The first side vertex sits on the +z axis at the top rim
    let normal = Vector3::from(mesh.vertices[0].normal);
    assert!(normal.z > 0.9);
    assert!(normal.y > 0.0);
}

#[test]
fn should_skip_caps_without_radius() {
    let cone = Geometry::cylinder(0.0, 1.0, 2.0, 6).build();
    assert_eq!(cone.vertices.len(), 2 * 7 + 8);
    assert_eq!(cone.indices.len(), 6 * 6 + 3 * 6);
}

#[test]
fn should_clamp_tiny_segment_counts() {
    let mesh = Geometry::cylinder(1.0, 1.0, 1.0, 1).build();
    assert_eq!(mesh.triangle_count(), 12);
}

#[test]
fn should_build_a_closed_box() {
    let mesh = Geometry::cuboid(12.0, 1.0, 0.5).build();

    assert_eq!(mesh.vertices.len(), 24);
    assert_eq!(mesh.indices.len(), 36);
    assert_outward(&mesh);
    for vertex in &mesh.vertices {
        assert_eq!(vertex.position[0].abs(), 6.0);
        assert_eq!(vertex.position[1].abs(), 0.5);
        assert_eq!(vertex.position[2].abs(), 0.25);
    }
}

#[test]
fn should_build_the_glow_sphere() {
    let mesh = Geometry::sphere(15.0, 32, 32).build();

    assert_eq!(mesh.vertices.len(), 33 * 33);
    assert_eq!(mesh.indices.len(), 6 * 32 * 31);
    assert_outward(&mesh);
    assert_unit_normals(&mesh);
    for vertex in &mesh.vertices {
        let radius = Vector3::from(vertex.position).magnitude();
        assert!((radius - 15.0).abs() < 1e-3);
    }
}

#[test]
fn should_build_the_particle_sphere() {
    let mesh = Geometry::sphere(0.1, 4, 4).build();
    assert_eq!(mesh.vertices.len(), 25);
    assert_eq!(mesh.indices.len(), 72);
    assert_outward(&mesh);
}
