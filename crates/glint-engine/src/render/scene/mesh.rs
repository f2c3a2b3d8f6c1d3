use std::collections::BTreeSet;

use bytemuck::{Pod, Zeroable};
use glam::{EulerRot, Mat4, Vec3};
use wgpu::util::DeviceExt;

/// Mesh vertex: object-space position + uv (origin bottom-left).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x2  // uv
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Indexed triangle list. Front faces wind counter-clockwise.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Flat square in the XZ plane centred on the origin, `segments` cells per side.
    ///
    /// `u` runs along +X and `v` along +Z.
    pub fn plane_xz(size: f32, segments: u32) -> Self {
        let segments = segments.max(1);
        let row = segments + 1;
        let half = size / 2.0;

        let mut vertices = Vec::with_capacity((row * row) as usize);
        for j in 0..row {
            let v = j as f32 / segments as f32;
            for i in 0..row {
                let u = i as f32 / segments as f32;
                vertices.push(MeshVertex {
                    position: [u * size - half, 0.0, v * size - half],
                    uv: [u, v],
                });
            }
        }

        let mut indices = Vec::with_capacity((segments * segments * 6) as usize);
        for j in 0..segments {
            for i in 0..segments {
                let a = j * row + i;
                let b = a + 1;
                let c = a + row;
                let d = c + 1;
                // Upward-facing (+Y) when wound a, c, b.
                indices.extend_from_slice(&[a, c, b, b, c, d]);
            }
        }

        Self { vertices, indices }
    }

    /// Axis-aligned box centred on the origin; each face maps the full uv square.
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        let (w, h, d) = (width / 2.0, height / 2.0, depth / 2.0);
        let mut mesh = Self::default();

        // origin, u axis, v axis; u x v points outward.
        let faces = [
            (Vec3::new(-w, -h, d), Vec3::new(width, 0.0, 0.0), Vec3::new(0.0, height, 0.0)),
            (Vec3::new(w, -h, -d), Vec3::new(-width, 0.0, 0.0), Vec3::new(0.0, height, 0.0)),
            (Vec3::new(w, -h, d), Vec3::new(0.0, 0.0, -depth), Vec3::new(0.0, height, 0.0)),
            (Vec3::new(-w, -h, -d), Vec3::new(0.0, 0.0, depth), Vec3::new(0.0, height, 0.0)),
            (Vec3::new(-w, h, d), Vec3::new(width, 0.0, 0.0), Vec3::new(0.0, 0.0, -depth)),
            (Vec3::new(-w, -h, -d), Vec3::new(width, 0.0, 0.0), Vec3::new(0.0, 0.0, depth)),
        ];

        for (origin, du, dv) in faces {
            let base = mesh.vertices.len() as u32;
            let corners = [
                (origin, [0.0, 0.0]),
                (origin + du, [1.0, 0.0]),
                (origin + du + dv, [1.0, 1.0]),
                (origin + dv, [0.0, 1.0]),
            ];
            for (p, uv) in corners {
                mesh.vertices.push(MeshVertex {
                    position: p.to_array(),
                    uv,
                });
            }
            mesh.indices
                .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        mesh
    }

    /// Regular icosahedron (20 faces) with every vertex at `radius`.
    pub fn icosahedron(radius: f32) -> Self {
        let t = (1.0 + 5.0f32.sqrt()) / 2.0;
        let raw = [
            [-1.0, t, 0.0],
            [1.0, t, 0.0],
            [-1.0, -t, 0.0],
            [1.0, -t, 0.0],
            [0.0, -1.0, t],
            [0.0, 1.0, t],
            [0.0, -1.0, -t],
            [0.0, 1.0, -t],
            [t, 0.0, -1.0],
            [t, 0.0, 1.0],
            [-t, 0.0, -1.0],
            [-t, 0.0, 1.0],
        ];

        let vertices = raw
            .iter()
            .map(|p| {
                let n = Vec3::from_array(*p).normalize();
                // Spherical mapping.
                let u = n.z.atan2(-n.x) / std::f32::consts::TAU + 0.5;
                let v = n.y.asin() / std::f32::consts::PI + 0.5;
                MeshVertex {
                    position: (n * radius).to_array(),
                    uv: [u, v],
                }
            })
            .collect();

        #[rustfmt::skip]
        let indices = vec![
            0, 11, 5,   0, 5, 1,    0, 1, 7,    0, 7, 10,   0, 10, 11,
            1, 5, 9,    5, 11, 4,   11, 10, 2,  10, 7, 6,   7, 1, 8,
            3, 9, 4,    3, 4, 2,    3, 2, 6,    3, 6, 8,    3, 8, 9,
            4, 9, 5,    2, 4, 11,   6, 2, 10,   8, 6, 7,    9, 8, 1,
        ];

        Self { vertices, indices }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Line-list indices for every distinct triangle edge, diagonals included.
    pub fn edge_indices(&self) -> Vec<u32> {
        let mut seen = BTreeSet::new();
        let mut lines = Vec::new();
        for tri in self.indices.chunks_exact(3) {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                if seen.insert((a.min(b), a.max(b))) {
                    lines.extend_from_slice(&[a, b]);
                }
            }
        }
        lines
    }
}

/// Object placement: translation + XYZ Euler rotation (radians).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Mesh uploaded to GPU buffers.
pub struct GpuMesh {
    pub vbo: wgpu::Buffer,
    pub ibo: wgpu::Buffer,
    pub index_count: u32,
}

impl GpuMesh {
    pub fn upload(device: &wgpu::Device, mesh: &Mesh) -> Self {
        Self::with_indices(device, mesh, &mesh.indices)
    }

    /// Uploads the mesh's edges for drawing with a line-list pipeline.
    pub fn upload_edges(device: &wgpu::Device, mesh: &Mesh) -> Self {
        Self::with_indices(device, mesh, &mesh.edge_indices())
    }

    fn with_indices(device: &wgpu::Device, mesh: &Mesh, indices: &[u32]) -> Self {
        let vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("glint mesh vbo"),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let ibo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("glint mesh ibo"),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        log::debug!(
            "uploaded mesh: {} vertices, {} indices",
            mesh.vertices.len(),
            indices.len()
        );

        Self {
            vbo,
            ibo,
            index_count: indices.len() as u32,
        }
    }

    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_vertex_buffer(0, self.vbo.slice(..));
        rpass.set_index_buffer(self.ibo.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face_normal(mesh: &Mesh, tri: usize) -> Vec3 {
        let p = |k: usize| Vec3::from_array(mesh.vertices[mesh.indices[tri * 3 + k] as usize].position);
        (p(1) - p(0)).cross(p(2) - p(0))
    }

    fn centroid(mesh: &Mesh, tri: usize) -> Vec3 {
        (0..3)
            .map(|k| Vec3::from_array(mesh.vertices[mesh.indices[tri * 3 + k] as usize].position))
            .sum::<Vec3>()
            / 3.0
    }

    #[test]
    fn plane_counts_and_extent() {
        let m = Mesh::plane_xz(512.0, 4);
        assert_eq!(m.vertices.len(), 25);
        assert_eq!(m.triangle_count(), 32);

        let first = m.vertices[0];
        let last = m.vertices[24];
        assert_eq!(first.position, [-256.0, 0.0, -256.0]);
        assert_eq!(first.uv, [0.0, 0.0]);
        assert_eq!(last.position, [256.0, 0.0, 256.0]);
        assert_eq!(last.uv, [1.0, 1.0]);
    }

    #[test]
    fn plane_faces_up() {
        let m = Mesh::plane_xz(10.0, 3);
        for tri in 0..m.triangle_count() {
            assert!(face_normal(&m, tri).y > 0.0);
        }
    }

    #[test]
    fn plane_indices_in_bounds() {
        let m = Mesh::plane_xz(1.0, 7);
        assert!(m.indices.iter().all(|&i| (i as usize) < m.vertices.len()));
    }

    #[test]
    fn cuboid_faces_point_outward() {
        let m = Mesh::cuboid(1200.0, 900.0, 50.0);
        assert_eq!(m.vertices.len(), 24);
        assert_eq!(m.triangle_count(), 12);
        for tri in 0..m.triangle_count() {
            assert!(face_normal(&m, tri).dot(centroid(&m, tri)) > 0.0, "triangle {tri}");
        }
    }

    #[test]
    fn icosahedron_is_regular_and_outward() {
        let m = Mesh::icosahedron(150.0);
        assert_eq!(m.vertices.len(), 12);
        assert_eq!(m.triangle_count(), 20);
        for v in &m.vertices {
            assert!((Vec3::from_array(v.position).length() - 150.0).abs() < 1e-3);
        }
        for tri in 0..m.triangle_count() {
            assert!(face_normal(&m, tri).dot(centroid(&m, tri)) > 0.0, "triangle {tri}");
        }
    }

    #[test]
    fn cuboid_edges_include_face_diagonals_once() {
        let m = Mesh::cuboid(100.0, 100.0, 100.0);
        let lines = m.edge_indices();
        // 4 sides + 1 diagonal per face; faces do not share vertices.
        assert_eq!(lines.len(), 6 * 5 * 2);

        let mut pairs: Vec<_> = lines.chunks_exact(2).map(|l| (l[0].min(l[1]), l[0].max(l[1]))).collect();
        pairs.sort_unstable();
        pairs.dedup();
        assert_eq!(pairs.len(), 30);
        assert!(lines.iter().all(|&i| (i as usize) < m.vertices.len()));
    }

    #[test]
    fn icosahedron_has_thirty_edges() {
        assert_eq!(Mesh::icosahedron(1.0).edge_indices().len(), 60);
    }

    #[test]
    fn transform_applies_rotation_then_translation() {
        let t = Transform {
            position: Vec3::new(0.0, 0.0, -100.0),
            rotation: Vec3::new(std::f32::consts::FRAC_PI_2, 0.0, 0.0),
        };
        let p = t.matrix().transform_point3(Vec3::new(0.0, 1.0, 0.0));
        assert!((p - Vec3::new(0.0, 0.0, -99.0)).length() < 1e-5);
    }
}
