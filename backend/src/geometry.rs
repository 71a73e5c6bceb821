use super::error::MeshError;
use super::glutils::{BufferTarget, GlApi};
use super::math::Vec3;

/// Corners of the quad, in normalized device coordinates.
pub const QUAD_VERTICES: [Vec3; 4] = [
    Vec3::new(0.5, 0.5, 0.0),   // top right
    Vec3::new(0.5, -0.5, 0.0),  // bottom right
    Vec3::new(-0.5, -0.5, 0.0), // bottom left
    Vec3::new(-0.5, 0.5, 0.0),  // top left
];

pub const QUAD_INDICES: [u32; 6] = [
    0, 1, 3, // first triangle
    1, 2, 3, // second triangle
];

/// Layout of one float vertex attribute inside the vertex buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    pub index: u32,
    pub components: i32,
    pub normalized: bool,
    /// Bytes between consecutive vertices.
    pub stride: i32,
    /// Byte offset of the first component.
    pub offset: usize,
}

impl VertexAttribute {
    /// Slot 0: a tightly packed `vec3` position.
    pub const fn position() -> VertexAttribute {
        VertexAttribute {
            index: 0,
            components: 3,
            normalized: false,
            stride: std::mem::size_of::<Vec3>() as i32,
            offset: 0,
        }
    }

    pub fn byte_len(&self) -> usize {
        self.components as usize * std::mem::size_of::<f32>()
    }
}

/// Positions plus a triangle list, checked so every index hits a vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh<'a> {
    vertices: &'a [Vec3],
    indices: &'a [u32],
}

impl<'a> Mesh<'a> {
    pub fn new(vertices: &'a [Vec3], indices: &'a [u32]) -> Result<Mesh<'a>, MeshError> {
        if indices.len() % 3 != 0 {
            return Err(MeshError::PartialTriangle(indices.len()));
        }
        if let Some((position, &index)) = indices
            .iter()
            .enumerate()
            .find(|(_, i)| **i as usize >= vertices.len())
        {
            return Err(MeshError::IndexOutOfRange {
                position,
                index,
                vertex_count: vertices.len(),
            });
        }
        Ok(Mesh { vertices, indices })
    }

    pub fn quad() -> Mesh<'static> {
        Mesh {
            vertices: &QUAD_VERTICES,
            indices: &QUAD_INDICES,
        }
    }

    pub fn vertex_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.vertices)
    }

    pub fn index_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.indices)
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }
}

/// VAO + VBO + EBO for one mesh. All three names are deleted on drop.
pub struct GeometryBuffers<G: GlApi> {
    gl: G,
    vao: u32,
    vbo: u32,
    ebo: u32,
    index_count: i32,
}

impl<G: GlApi + Clone> GeometryBuffers<G> {
    pub fn upload(gl: &G, mesh: &Mesh) -> GeometryBuffers<G> {
        let vao = gl.gen_vertex_array();
        let vbo = gl.gen_buffer();
        let ebo = gl.gen_buffer();

        // the VAO records the next binds
        gl.bind_vertex_array(vao);

        gl.bind_buffer(BufferTarget::Array, vbo);
        gl.buffer_data_static(BufferTarget::Array, mesh.vertex_bytes());

        // stays bound: unbinding it while the VAO is bound would detach it
        gl.bind_buffer(BufferTarget::ElementArray, ebo);
        gl.buffer_data_static(BufferTarget::ElementArray, mesh.index_bytes());

        let position = VertexAttribute::position();
        gl.vertex_attrib_pointer(&position);
        gl.enable_vertex_attrib_array(position.index);

        // the attribute already captured the VBO
        gl.bind_buffer(BufferTarget::Array, 0);
        gl.bind_vertex_array(0);

        log::debug!(
            "uploaded {} vertex bytes, {} indices (vao {vao}, vbo {vbo}, ebo {ebo})",
            mesh.vertex_bytes().len(),
            mesh.index_count()
        );

        GeometryBuffers {
            gl: gl.clone(),
            vao,
            vbo,
            ebo,
            index_count: mesh.index_count() as i32,
        }
    }
}

impl<G: GlApi> GeometryBuffers<G> {
    pub fn draw(&self) {
        self.gl.bind_vertex_array(self.vao);
        self.gl.draw_triangles(self.index_count);
    }

    pub fn vao(&self) -> u32 {
        self.vao
    }
}

impl<G: GlApi> Drop for GeometryBuffers<G> {
    fn drop(&mut self) {
        self.gl.delete_vertex_array(self.vao);
        self.gl.delete_buffer(self.vbo);
        self.gl.delete_buffer(self.ebo);
    }
}
