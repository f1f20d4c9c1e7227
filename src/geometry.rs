//! The one triangle and the GPU objects that hold it.

use crate::error::Error;

use gl::types::*;

use std::mem::{size_of, size_of_val};
use std::ptr::null;

/// Floats per vertex. Positions only.
pub const COMPONENTS_PER_VERTEX: usize = 3;

/// Three vertices in normalized device coordinates, counter-clockwise from bottom left.
pub const TRIANGLE_VERTICES: [f32; 9] = [
    -0.5, -0.5, 0.0, // bottom left
    0.5, -0.5, 0.0, // bottom right
    0.0, 0.5, 0.0, // top
];

/// Describes one vertex attribute as it is handed to `glVertexAttribPointer`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct VertexAttribute {
    pub index: GLuint,
    pub components: GLint,
    pub kind: GLenum,
    pub normalized: bool,
    /// Distance in bytes between consecutive vertices.
    pub stride: GLsizei,
}

impl VertexAttribute {
    unsafe fn declare(&self) {
        gl::VertexAttribPointer(
            self.index,
            self.components,
            self.kind,
            if self.normalized { gl::TRUE } else { gl::FALSE },
            self.stride,
            null(),
        );
        gl::EnableVertexAttribArray(self.index);
    }
}

/// `layout (location = 0) in vec3` in the vertex shader. Tightly packed floats.
pub const POSITION_ATTRIBUTE: VertexAttribute = VertexAttribute {
    index: 0,
    components: COMPONENTS_PER_VERTEX as GLint,
    kind: gl::FLOAT,
    normalized: false,
    stride: (COMPONENTS_PER_VERTEX * size_of::<f32>()) as GLsizei,
};

/// The complete attribute layout of [`TRIANGLE_VERTICES`].
pub const VERTEX_LAYOUT: &[VertexAttribute] = &[POSITION_ATTRIBUTE];

/// Vertex array plus the buffer it reads from. Both are deleted on drop.
pub struct TriangleMesh {
    vao: GLuint,
    vbo: GLuint,
    vertex_count: GLsizei,
}

impl TriangleMesh {
    /// Uploads [`TRIANGLE_VERTICES`] once and records [`VERTEX_LAYOUT`] in a new vertex array.
    pub fn upload() -> Result<TriangleMesh, Error> {
        let vao = create_vao().ok_or(Error::ResourceAllocation("vertex array"))?;
        let vbo = match create_gl_buffer() {
            Some(vbo) => vbo,
            None => {
                unsafe {
                    gl::DeleteVertexArrays(1, &vao);
                }
                return Err(Error::ResourceAllocation("vertex buffer"));
            }
        };

        unsafe {
            gl::BindVertexArray(vao);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                size_of_val(&TRIANGLE_VERTICES) as GLsizeiptr,
                TRIANGLE_VERTICES.as_ptr() as *const _,
                gl::STATIC_DRAW,
            );
            for attribute in VERTEX_LAYOUT {
                attribute.declare();
            }
            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
            gl::BindVertexArray(0);
        }

        let vertex_count = (TRIANGLE_VERTICES.len() / COMPONENTS_PER_VERTEX) as GLsizei;
        log::debug!("uploaded {} vertices into buffer {} (vertex array {})", vertex_count, vbo, vao);

        Ok(TriangleMesh { vao, vbo, vertex_count })
    }

    pub fn vertex_count(&self) -> GLsizei {
        self.vertex_count
    }

    /// Issues the draw call. The caller binds the program first.
    pub fn draw(&self) {
        unsafe {
            gl::BindVertexArray(self.vao);
            gl::DrawArrays(gl::TRIANGLES, 0, self.vertex_count);
            gl::BindVertexArray(0);
        }
    }
}

impl Drop for TriangleMesh {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteBuffers(1, &self.vbo);
            gl::DeleteVertexArrays(1, &self.vao);
        }
    }
}

fn create_vao() -> Option<GLuint> {
    unsafe {
        let mut vao = 0;
        gl::GenVertexArrays(1, &mut vao);
        if vao == 0 {
            return None;
        }
        Some(vao)
    }
}

fn create_gl_buffer() -> Option<GLuint> {
    unsafe {
        let mut b = 0;
        gl::GenBuffers(1, &mut b);
        if b == 0 {
            return None;
        }
        Some(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_has_exactly_three_vertices() {
        assert_eq!(TRIANGLE_VERTICES.len(), 9);
        assert_eq!(TRIANGLE_VERTICES.len() / COMPONENTS_PER_VERTEX, 3);
        assert_eq!(size_of_val(&TRIANGLE_VERTICES), 36);
    }

    #[test]
    fn triangle_lies_flat_inside_clip_space() {
        for vertex in TRIANGLE_VERTICES.chunks(COMPONENTS_PER_VERTEX) {
            assert!(vertex[0].abs() <= 1.0 && vertex[1].abs() <= 1.0);
            assert_eq!(vertex[2], 0.0);
        }
    }

    #[test]
    fn layout_is_a_single_position_attribute() {
        assert_eq!(VERTEX_LAYOUT.len(), 1);
        let position = VERTEX_LAYOUT[0];
        assert_eq!(position.index, 0);
        assert_eq!(position.components, 3);
        assert_eq!(position.kind, gl::FLOAT);
        assert!(!position.normalized);
    }

    #[test]
    fn position_stride_is_tightly_packed() {
        assert_eq!(POSITION_ATTRIBUTE.stride, 12);
        let total: GLsizei = VERTEX_LAYOUT.iter().map(|attribute| attribute.stride).sum();
        assert_eq!(total as usize * 3, size_of_val(&TRIANGLE_VERTICES));
    }

    #[test]
    fn stride_covers_every_component() {
        for attribute in VERTEX_LAYOUT {
            assert_eq!(attribute.kind, gl::FLOAT);
            assert_eq!(attribute.stride, attribute.components * size_of::<f32>() as GLsizei);
        }
    }
}
