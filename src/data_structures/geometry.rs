//! Procedural primitive meshes.
//!
//! The engine part is assembled from three primitives only: cylinders (the
//! block, pistons, rods and pipes), boxes (the cooling fins) and UV spheres
//! (the glow shell and the particles). Every generator returns CPU-side
//! [`MeshData`] with outward normals and counter-clockwise front faces; the
//! GPU upload happens in [`crate::data_structures::model::Mesh::from_data`].

use std::f32::consts::PI;

use cgmath::{InnerSpace, Vector3};

use crate::data_structures::model::ModelVertex;

/// Shape parameters of a primitive. All shapes are centred on the origin.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    /// Axis along y. Radii may differ to form a frustum.
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        radial_segments: u32,
    },
    Cuboid {
        width: f32,
        height: f32,
        depth: f32,
    },
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
}

impl Geometry {
    pub fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, radial_segments: u32) -> Self {
        Self::Cylinder {
            radius_top,
            radius_bottom,
            height,
            radial_segments: radial_segments.max(3),
        }
    }

    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        Self::Cuboid {
            width,
            height,
            depth,
        }
    }

    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        Self::Sphere {
            radius,
            width_segments: width_segments.max(3),
            height_segments: height_segments.max(2),
        }
    }

    pub fn build(&self) -> MeshData {
        match *self {
            Geometry::Cylinder {
                radius_top,
                radius_bottom,
                height,
                radial_segments,
            } => cylinder(radius_top, radius_bottom, height, radial_segments),
            Geometry::Cuboid {
                width,
                height,
                depth,
            } => cuboid(width, height, depth),
            Geometry::Sphere {
                radius,
                width_segments,
                height_segments,
            } => sphere(radius, width_segments, height_segments),
        }
    }
}

/// Triangle list geometry ready for upload.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<ModelVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterates over the corner positions of every triangle.
    pub fn triangles(&self) -> impl Iterator<Item = [Vector3<f32>; 3]> + '_ {
        self.indices.chunks(3).map(|tri| {
            [
                self.vertices[tri[0] as usize].position.into(),
                self.vertices[tri[1] as usize].position.into(),
                self.vertices[tri[2] as usize].position.into(),
            ]
        })
    }

    fn push(&mut self, position: Vector3<f32>, normal: Vector3<f32>) -> u32 {
        self.vertices.push(ModelVertex {
            position: position.into(),
            normal: normal.into(),
        });
        (self.vertices.len() - 1) as u32
    }
}

fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, radial_segments: u32) -> MeshData {
    let mut mesh = MeshData::default();
    let half = height / 2.0;
    // Tilt of the side normals when the radii differ
    let slope = (radius_bottom - radius_top) / height;

    let mut rows = [Vec::new(), Vec::new()];
    for (row, (radius, y)) in [(radius_top, half), (radius_bottom, -half)]
        .into_iter()
        .enumerate()
    {
        for x in 0..=radial_segments {
            let theta = x as f32 / radial_segments as f32 * 2.0 * PI;
            let (sin, cos) = theta.sin_cos();
            let position = Vector3::new(radius * sin, y, radius * cos);
            let normal = Vector3::new(sin, slope, cos).normalize();
            rows[row].push(mesh.push(position, normal));
        }
    }
    for x in 0..radial_segments as usize {
        let a = rows[0][x];
        let b = rows[1][x];
        let c = rows[1][x + 1];
        let d = rows[0][x + 1];
        mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
    }

    cap(&mut mesh, radius_top, half, radial_segments, true);
    cap(&mut mesh, radius_bottom, -half, radial_segments, false);
    mesh
}

fn cap(mesh: &mut MeshData, radius: f32, y: f32, radial_segments: u32, top: bool) {
    if radius <= 0.0 {
        return;
    }
    let normal = Vector3::new(0.0, if top { 1.0 } else { -1.0 }, 0.0);
    let center = mesh.push(Vector3::new(0.0, y, 0.0), normal);
    let ring: Vec<u32> = (0..=radial_segments)
        .map(|x| {
            let theta = x as f32 / radial_segments as f32 * 2.0 * PI;
            let (sin, cos) = theta.sin_cos();
            mesh.push(Vector3::new(radius * sin, y, radius * cos), normal)
        })
        .collect();
    for x in 0..radial_segments as usize {
        if top {
            mesh.indices.extend_from_slice(&[ring[x], ring[x + 1], center]);
        } else {
            mesh.indices.extend_from_slice(&[ring[x + 1], ring[x], center]);
        }
    }
}

fn cuboid(width: f32, height: f32, depth: f32) -> MeshData {
    let mut mesh = MeshData::default();
    let half = Vector3::new(width / 2.0, height / 2.0, depth / 2.0);
    // (normal, u, v) with u x v == normal so the quads wind counter-clockwise
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ];
    let extent = |axis: Vector3<f32>| axis.x.abs() * half.x + axis.y.abs() * half.y + axis.z.abs() * half.z;

    for (n, u, v) in faces {
        let (n, u, v): (Vector3<f32>, Vector3<f32>, Vector3<f32>) = (n.into(), u.into(), v.into());
        let center = n * extent(n);
        let (du, dv) = (u * extent(u), v * extent(v));
        let base = mesh.push(center - du - dv, n);
        mesh.push(center + du - dv, n);
        mesh.push(center + du + dv, n);
        mesh.push(center - du + dv, n);
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    mesh
}

fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let mut mesh = MeshData::default();

    for ring in 0..=height_segments {
        let phi = PI * ring as f32 / height_segments as f32;
        let (ring_radius, y) = phi.sin_cos();
        for seg in 0..=width_segments {
            let theta = 2.0 * PI * seg as f32 / width_segments as f32;
            let normal = Vector3::new(-theta.cos() * ring_radius, y, theta.sin() * ring_radius);
            mesh.push(normal * radius, normal);
        }
    }

    let stride = width_segments + 1;
    for ring in 0..height_segments {
        for seg in 0..width_segments {
            let current = ring * stride + seg;
            let next = current + stride;
            // Skip the zero-area triangles that collapse onto the poles
            if ring != 0 {
                mesh.indices.extend_from_slice(&[current, next, current + 1]);
            }
            if ring != height_segments - 1 {
                mesh.indices.extend_from_slice(&[current + 1, next, next + 1]);
            }
        }
    }
    mesh
}
