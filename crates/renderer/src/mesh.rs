//! Mesh data structures and parametric geometry generation.

use crate::vertex::Vertex;
use std::f32::consts::{FRAC_PI_2, PI, TAU};
use wgpu::util::DeviceExt;

/// A GPU mesh with vertex and index buffers.
pub struct Mesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_indices: u32,
}

impl Mesh {
    /// Create a mesh from vertex and index data.
    pub fn new(device: &wgpu::Device, vertices: &[Vertex], indices: &[u32]) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Vertex Buffer"),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Index Buffer"),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            num_indices: indices.len() as u32,
        }
    }

    /// Create a mesh from CPU-side mesh data.
    pub fn from_data(device: &wgpu::Device, data: &MeshData) -> Self {
        Self::new(device, &data.vertices, &data.indices)
    }
}

/// Mesh data before GPU upload. Generated once at startup, immutable after.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upload(&self, device: &wgpu::Device) -> Mesh {
        Mesh::from_data(device, self)
    }
}

/// Generate a UV sphere from spherical coordinates.
///
/// The stack angle runs from +90° (north pole) down to −90° in `stack_count`
/// steps, the sector angle 0..360° in `sector_count` steps, giving a grid of
/// `(stack_count + 1) × (sector_count + 1)` vertices. The generated poles lie
/// on the mesh's Z axis; the scene transform lifts them onto the world
/// vertical. The seam column is duplicated on purpose (u = 0.0 and u = 1.0
/// occupy the same position) so the texture wraps without a visible stripe.
///
/// Each grid quad emits two triangles, `stack_count · sector_count · 6`
/// indices total; the quads touching a pole collapse one edge to a point and
/// rasterize to a single triangle there.
///
/// Deterministic: the same inputs always produce bit-identical output.
pub fn generate_sphere(radius: f32, sector_count: u32, stack_count: u32) -> MeshData {
    debug_assert!(radius > 0.0);
    debug_assert!(sector_count >= 3);
    debug_assert!(stack_count >= 2);

    let mut vertices = Vec::with_capacity(((sector_count + 1) * (stack_count + 1)) as usize);
    let sector_step = TAU / sector_count as f32;
    let stack_step = PI / stack_count as f32;
    let length_inv = 1.0 / radius;

    for i in 0..=stack_count {
        let stack_angle = FRAC_PI_2 - i as f32 * stack_step;
        let xy = radius * stack_angle.cos();
        let z = radius * stack_angle.sin();

        for j in 0..=sector_count {
            let sector_angle = j as f32 * sector_step;
            let x = xy * sector_angle.cos();
            let y = xy * sector_angle.sin();
            vertices.push(Vertex::new(
                [x, y, z],
                [x * length_inv, y * length_inv, z * length_inv],
                [
                    j as f32 / sector_count as f32,
                    i as f32 / stack_count as f32,
                ],
            ));
        }
    }

    let mut indices = Vec::with_capacity((stack_count * sector_count * 6) as usize);
    for i in 0..stack_count {
        // k1: current stack row start, k2: next row start.
        let mut k1 = i * (sector_count + 1);
        let mut k2 = k1 + sector_count + 1;
        for _ in 0..sector_count {
            indices.extend_from_slice(&[k1, k2, k1 + 1]);
            indices.extend_from_slice(&[k1 + 1, k2, k2 + 1]);
            k1 += 1;
            k2 += 1;
        }
    }

    MeshData { vertices, indices }
}

/// Generate a flat annulus in the X-Z plane for planetary rings.
///
/// Every vertex sits at y = 0 with normal +Y; the ring pipeline renders with
/// face culling off so both sides are visible from this single normal. Each
/// angular step emits an outer vertex (u = 1) then an inner vertex (u = 0),
/// with v following the angular fraction; the index band wraps the final
/// segment back to the first. `segments` below 3 is clamped up.
pub fn generate_ring(inner_radius: f32, outer_radius: f32, segments: u32) -> MeshData {
    debug_assert!(inner_radius > 0.0);
    debug_assert!(inner_radius < outer_radius);
    let segments = segments.max(3);

    let step = TAU / segments as f32;
    let mut vertices = Vec::with_capacity((segments * 2) as usize);
    for s in 0..segments {
        let angle = s as f32 * step;
        let (sin, cos) = angle.sin_cos();
        let v = s as f32 / segments as f32;
        vertices.push(Vertex::new(
            [cos * outer_radius, 0.0, sin * outer_radius],
            [0.0, 1.0, 0.0],
            [1.0, v],
        ));
        vertices.push(Vertex::new(
            [cos * inner_radius, 0.0, sin * inner_radius],
            [0.0, 1.0, 0.0],
            [0.0, v],
        ));
    }

    let mut indices = Vec::with_capacity((segments * 6) as usize);
    for s in 0..segments {
        let outer0 = 2 * s;
        let inner0 = outer0 + 1;
        let outer1 = 2 * ((s + 1) % segments);
        let inner1 = outer1 + 1;
        indices.extend_from_slice(&[outer0, inner0, outer1]);
        indices.extend_from_slice(&[inner0, inner1, outer1]);
    }

    MeshData { vertices, indices }
}
