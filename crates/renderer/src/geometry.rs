use bytemuck::{Pod, Zeroable};

/// Interleaved vertex fed to the lesson vertex shader
/// (`position` @ 0, `normal` @ 1, `uv` @ 2).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PlaneVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl PlaneVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PlaneVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Subdivided rectangle in the XY plane, centred on the origin and facing +Z.
///
/// Vertices run row by row from the top-left corner; UVs put `(0, 0)` at the
/// bottom-left. Each cell becomes two counter-clockwise triangles.
///
/// Indices are `u32`: with at most `u16::MAX` segments per side the largest
/// index is `u32::MAX`.
#[derive(Debug, Clone)]
pub struct PlaneGeometry {
    pub vertices: Vec<PlaneVertex>,
    pub indices: Vec<u32>,
}

impl PlaneGeometry {
    pub fn new(width: f32, height: f32, width_segments: u16, height_segments: u16) -> Self {
        let grid_x = width_segments.max(1);
        let grid_y = height_segments.max(1);
        let segment_width = width / f32::from(grid_x);
        let segment_height = height / f32::from(grid_y);
        let half_width = width * 0.5;
        let half_height = height * 0.5;

        let mut vertices = Vec::with_capacity((usize::from(grid_x) + 1) * (usize::from(grid_y) + 1));
        for iy in 0..=grid_y {
            let y = f32::from(iy) * segment_height - half_height;
            for ix in 0..=grid_x {
                let x = f32::from(ix) * segment_width - half_width;
                vertices.push(PlaneVertex {
                    position: [x, -y, 0.0],
                    normal: [0.0, 0.0, 1.0],
                    uv: [
                        f32::from(ix) / f32::from(grid_x),
                        1.0 - f32::from(iy) / f32::from(grid_y),
                    ],
                });
            }
        }

        let (columns, rows) = (u32::from(grid_x), u32::from(grid_y));
        let row = columns + 1;
        let mut indices = Vec::with_capacity(usize::from(grid_x) * usize::from(grid_y) * 6);
        for iy in 0..rows {
            for ix in 0..columns {
                let a = ix + row * iy;
                let b = ix + row * (iy + 1);
                let c = ix + 1 + row * (iy + 1);
                let d = ix + 1 + row * iy;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        Self { vertices, indices }
    }

    /// The 2×2 single-cell plane every lesson draws on.
    pub fn lesson_plane() -> Self {
        Self::new(2.0, 2.0, 1, 1)
    }
}
