//! Vertex/index buffers and vertex array objects

use gl::types::{GLenum, GLint, GLsizei, GLsizeiptr, GLuint};

use crate::render::vertex::{VertexFormat, VertexLayout};

/// Primitive topology of a draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    /// Independent triangles
    Triangles,
    /// Triangle strip
    TriangleStrip,
    /// Independent line segments
    Lines,
}

impl Primitive {
    /// GL draw mode
    pub fn gl_mode(self) -> GLenum {
        match self {
            Self::Triangles => gl::TRIANGLES,
            Self::TriangleStrip => gl::TRIANGLE_STRIP,
            Self::Lines => gl::LINES,
        }
    }
}

/// Immutable `GL_ARRAY_BUFFER`
pub struct VertexBuffer {
    handle: GLuint,
    count: usize,
}

impl VertexBuffer {
    /// Upload `vertices` with `STATIC_DRAW` usage
    pub fn new<V: VertexFormat>(vertices: &[V]) -> Self {
        let handle = upload(gl::ARRAY_BUFFER, bytemuck::cast_slice(vertices));
        Self {
            handle,
            count: vertices.len(),
        }
    }

    /// Number of vertices
    pub fn count(&self) -> usize {
        self.count
    }

    /// GL buffer name
    pub fn handle(&self) -> GLuint {
        self.handle
    }
}

impl Drop for VertexBuffer {
    fn drop(&mut self) {
        unsafe { gl::DeleteBuffers(1, &self.handle) };
    }
}

/// Immutable `GL_ELEMENT_ARRAY_BUFFER` of `u32` indices
pub struct IndexBuffer {
    handle: GLuint,
    count: usize,
}

impl IndexBuffer {
    /// Upload indices
    ///
    /// The element binding is VAO state; bind the owning vertex array first.
    pub fn new(indices: &[u32]) -> Self {
        let handle = upload(gl::ELEMENT_ARRAY_BUFFER, bytemuck::cast_slice(indices));
        Self {
            handle,
            count: indices.len(),
        }
    }

    /// Number of indices
    pub fn count(&self) -> usize {
        self.count
    }
}

impl Drop for IndexBuffer {
    fn drop(&mut self) {
        unsafe { gl::DeleteBuffers(1, &self.handle) };
    }
}

fn upload(target: GLenum, bytes: &[u8]) -> GLuint {
    let mut handle: GLuint = 0;
    unsafe {
        gl::GenBuffers(1, &mut handle);
        gl::BindBuffer(target, handle);
        gl::BufferData(target, bytes.len() as GLsizeiptr, bytes.as_ptr().cast(), gl::STATIC_DRAW);
    }
    handle
}

/// Vertex array object
pub struct VertexArray {
    handle: GLuint,
}

impl VertexArray {
    /// Create and bind a new vertex array
    pub fn new() -> Self {
        let mut handle: GLuint = 0;
        unsafe {
            gl::GenVertexArrays(1, &mut handle);
            gl::BindVertexArray(handle);
        }
        Self { handle }
    }

    /// Bind
    pub fn bind(&self) {
        unsafe { gl::BindVertexArray(self.handle) };
    }

    /// Point the enabled attributes of `layout` at `buffer`
    ///
    /// The vertex array must be bound.
    pub fn configure(&self, buffer: &VertexBuffer, layout: &VertexLayout) {
        unsafe {
            gl::BindBuffer(gl::ARRAY_BUFFER, buffer.handle());
            for attribute in layout.attributes {
                gl::EnableVertexAttribArray(attribute.location);
                gl::VertexAttribPointer(
                    attribute.location,
                    attribute.components as GLint,
                    gl::FLOAT,
                    gl::FALSE,
                    layout.stride as GLsizei,
                    attribute.offset as *const _,
                );
            }
        }
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        unsafe { gl::DeleteVertexArrays(1, &self.handle) };
    }
}

/// Vertex array with its buffers and draw topology
pub struct Geometry {
    vao: VertexArray,
    vertices: VertexBuffer,
    indices: Option<IndexBuffer>,
    primitive: Primitive,
}

impl Geometry {
    /// Non-indexed geometry drawn with `glDrawArrays`
    pub fn from_vertices<V: VertexFormat>(vertices: &[V], primitive: Primitive) -> Self {
        let vao = VertexArray::new();
        let buffer = VertexBuffer::new(vertices);
        vao.configure(&buffer, &V::LAYOUT);
        unsafe { gl::BindVertexArray(0) };

        Self {
            vao,
            vertices: buffer,
            indices: None,
            primitive,
        }
    }

    /// Indexed triangle geometry drawn with `glDrawElements`
    pub fn indexed<V: VertexFormat>(vertices: &[V], indices: &[u32]) -> Self {
        let vao = VertexArray::new();
        let buffer = VertexBuffer::new(vertices);
        vao.configure(&buffer, &V::LAYOUT);
        let index_buffer = IndexBuffer::new(indices);
        unsafe { gl::BindVertexArray(0) };

        Self {
            vao,
            vertices: buffer,
            indices: Some(index_buffer),
            primitive: Primitive::Triangles,
        }
    }

    /// Bind the vertex array and issue the draw call
    pub fn draw(&self) {
        self.vao.bind();
        let mode = self.primitive.gl_mode();
        unsafe {
            match &self.indices {
                Some(indices) => {
                    gl::DrawElements(mode, indices.count() as GLsizei, gl::UNSIGNED_INT, std::ptr::null());
                }
                None => gl::DrawArrays(mode, 0, self.vertices.count() as GLsizei),
            }
        }
    }

    /// Topology used by [`draw`](Self::draw)
    pub fn primitive(&self) -> Primitive {
        self.primitive
    }

    /// Vertices uploaded
    pub fn vertex_count(&self) -> usize {
        self.vertices.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_modes() {
        assert_eq!(Primitive::TriangleStrip.gl_mode(), gl::TRIANGLE_STRIP);
        assert_eq!(Primitive::Lines.gl_mode(), gl::LINES);
        assert_eq!(Primitive::Triangles.gl_mode(), gl::TRIANGLES);
    }
}
