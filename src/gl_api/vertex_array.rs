use super::error::GlResult;
use crate::gl_api::buffer::{ElementBuffer, VertexBuffer};
use crate::gl_api::layout::{Attribute, IndexType, VertexAttribute};
use gl::types::*;

#[derive(Debug)]
pub struct VertexArray {
    pub(crate) id: GLuint,
    _marker: ::std::marker::PhantomData<*mut ()>,
}

impl VertexArray {
    pub fn new() -> Self {
        let mut id = 0;
        // UNWRAP: Can only fail if count is negative
        unsafe {
            gl_call!(GenVertexArrays(1, &mut id)).unwrap();
        }
        VertexArray {
            id,
            _marker: ::std::marker::PhantomData,
        }
    }

    pub fn bind(&self) {
        // UNWRAP: our ID should always be valid
        unsafe {
            gl_call!(BindVertexArray(self.id)).unwrap();
        }
    }

    /// Feeds `attribute` from `buffer`. The attribute is read `offset` bytes
    /// into each `V`, so a buffer of plain `[f32; 3]` uses an offset of 0 and
    /// interleaved vertices pass the field's offset.
    pub fn add_attribute<V, T: VertexAttribute>(
        &mut self,
        buffer: &VertexBuffer<V>,
        attribute: &Attribute<T>,
        offset: usize,
    ) -> GlResult<()> {
        self.bind();
        buffer.bind();
        T::define_attrib(attribute.location, ::std::mem::size_of::<V>() as GLsizei, offset)
    }

    /// Records `buffer` as this array's element buffer.
    pub fn set_elements<I: IndexType>(&mut self, buffer: &ElementBuffer<I>) {
        self.bind();
        buffer.bind();
    }

    pub fn draw_arrays(&self, mode: GLenum, count: usize) -> GlResult<()> {
        self.bind();
        unsafe { gl_call!(DrawArrays(mode, 0, count as GLsizei)) }
    }

    /// Draws with the element buffer previously given to `set_elements`.
    pub fn draw_elements<I: IndexType>(&self, mode: GLenum, elements: &ElementBuffer<I>) -> GlResult<()> {
        self.bind();
        unsafe {
            gl_call!(DrawElements(
                mode,
                elements.len() as GLsizei,
                I::GL_TYPE,
                ::std::ptr::null()
            ))
        }
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        unsafe {
            let _ = gl_call!(DeleteVertexArrays(1, &self.id));
        }
    }
}
