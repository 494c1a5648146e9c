use glam::Vec3;
use serde::Deserialize;
use std::f32::consts::{PI, TAU};

use crate::math::AABB;
use crate::types::MeshVertex;

/// Indexed triangle mesh ready for upload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new(vertices: Vec<MeshVertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.indices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn bounds(&self) -> Option<AABB> {
        AABB::from_points(self.vertices.iter().map(|v| Vec3::from_array(v.position)))
    }

    /// Append another mesh, rebasing its indices
    pub fn append(&mut self, other: MeshData) {
        let base = self.vertices.len() as u32;
        self.vertices.extend(other.vertices);
        self.indices.extend(other.indices.into_iter().map(|i| i + base));
    }

    /// Replace vertex normals with the area-weighted average of adjacent face normals
    pub fn recompute_normals(&mut self) {
        let mut accum = vec![Vec3::ZERO; self.vertices.len()];

        for tri in self.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            if a >= accum.len() || b >= accum.len() || c >= accum.len() {
                continue;
            }
            let p0 = Vec3::from_array(self.vertices[a].position);
            let p1 = Vec3::from_array(self.vertices[b].position);
            let p2 = Vec3::from_array(self.vertices[c].position);
            // unnormalized cross product weights by triangle area
            let face = (p1 - p0).cross(p2 - p0);
            accum[a] += face;
            accum[b] += face;
            accum[c] += face;
        }

        for (vertex, n) in self.vertices.iter_mut().zip(accum) {
            vertex.normal = n.try_normalize().unwrap_or(Vec3::Y).to_array();
        }
    }
}

/// Built-in shapes used when no model file is given
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    Cube,
    Sphere,
    Torus,
    Plane,
}

impl Primitive {
    /// Primitive sized to sit comfortably inside the default 100-unit grid
    pub fn build(self) -> MeshData {
        match self {
            Primitive::Cube => cube(20.0),
            Primitive::Sphere => uv_sphere(12.0, 48, 32),
            Primitive::Torus => torus(12.0, 4.0, 24, 64),
            Primitive::Plane => plane(40.0),
        }
    }
}

/// Axis-aligned cube centered on the origin, flat shaded (4 vertices per face)
pub fn cube(size: f32) -> MeshData {
    let h = size * 0.5;
    let faces: [(Vec3, Vec3, Vec3); 6] = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];

    let mut mesh = MeshData::default();
    for (normal, u, v) in faces {
        let base = mesh.vertices.len() as u32;
        let center = normal * h;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let p = center + u * (su * h) + v * (sv * h);
            mesh.vertices.push(MeshVertex::new(p.to_array(), normal.to_array()));
        }
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    mesh
}

pub fn uv_sphere(radius: f32, segments: u32, rings: u32) -> MeshData {
    let segments = segments.max(3);
    let rings = rings.max(2);
    let mut mesh = MeshData::default();

    for r in 0..=rings {
        let phi = PI * r as f32 / rings as f32;
        for s in 0..=segments {
            let theta = TAU * s as f32 / segments as f32;
            let n = Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());
            mesh.vertices
                .push(MeshVertex::new((n * radius).to_array(), n.to_array()));
        }
    }

    let stride = segments + 1;
    for r in 0..rings {
        for s in 0..segments {
            let a = r * stride + s;
            let b = a + stride;
            mesh.indices.extend_from_slice(&[a, a + 1, b, a + 1, b + 1, b]);
        }
    }
    mesh
}

/// Torus lying in the XZ plane
pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> MeshData {
    let radial = radial_segments.max(3);
    let tubular = tubular_segments.max(3);
    let mut mesh = MeshData::default();

    for j in 0..=radial {
        let v = TAU * j as f32 / radial as f32;
        for i in 0..=tubular {
            let u = TAU * i as f32 / tubular as f32;
            let ring_center = Vec3::new(radius * u.cos(), 0.0, radius * u.sin());
            let p = Vec3::new(
                (radius + tube * v.cos()) * u.cos(),
                tube * v.sin(),
                (radius + tube * v.cos()) * u.sin(),
            );
            let n = (p - ring_center).normalize();
            mesh.vertices.push(MeshVertex::new(p.to_array(), n.to_array()));
        }
    }

    let stride = tubular + 1;
    for j in 0..radial {
        for i in 0..tubular {
            let a = j * stride + i;
            let b = a + stride;
            mesh.indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
        }
    }
    mesh
}

/// Square in the XZ plane facing +Y
pub fn plane(size: f32) -> MeshData {
    let h = size * 0.5;
    let n = [0.0, 1.0, 0.0];
    MeshData::new(
        vec![
            MeshVertex::new([-h, 0.0, -h], n),
            MeshVertex::new([-h, 0.0, h], n),
            MeshVertex::new([h, 0.0, h], n),
            MeshVertex::new([h, 0.0, -h], n),
        ],
        vec![0, 1, 2, 0, 2, 3],
    )
}
