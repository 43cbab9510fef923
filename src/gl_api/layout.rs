use crate::gl_api::error::GlResult;
use gl::types::*;
use std::marker::PhantomData;

pub unsafe trait VertexAttribute {
    /// Issue the appropriate calls to `glVertexAttribPointer` for an
    /// attribute of this type living at `slot`, `offset` bytes into each
    /// `stride` byte element of the currently bound array buffer.
    fn define_attrib(slot: GLuint, stride: GLsizei, offset: usize) -> GlResult<()>;
}

macro_rules! layout_simple {
    ($type:ty: $gl_type:ident $amount:expr) => {
        unsafe impl VertexAttribute for $type {
            fn define_attrib(slot: GLuint, stride: GLsizei, offset: usize) -> GlResult<()> {
                unsafe {
                    gl_call!(EnableVertexAttribArray(slot))?;
                    gl_call!(VertexAttribPointer(
                        slot,
                        $amount,
                        ::gl::$gl_type,
                        ::gl::FALSE,
                        stride,
                        offset as *const _
                    ))
                }
            }
        }
    };
}

layout_simple!([f32; 2]: FLOAT 2);
layout_simple!([f32; 3]: FLOAT 3);

/// A vertex input slot of a linked program, resolved by name.
#[derive(Debug, Eq, PartialEq, Hash)]
pub struct Attribute<T> {
    pub(crate) location: GLuint,
    _marker: PhantomData<*const T>,
}

impl<T> Attribute<T> {
    pub(crate) fn new(location: GLuint) -> Self {
        Attribute { location, _marker: PhantomData }
    }

    pub fn location(&self) -> GLuint {
        self.location
    }
}

/// Element types usable in an element array buffer.
pub unsafe trait IndexType {
    const GL_TYPE: GLenum;
}

unsafe impl IndexType for u16 {
    const GL_TYPE: GLenum = gl::UNSIGNED_SHORT;
}
