use cgmath::{Matrix, Matrix4};
use crate::gl_api::error::GlError;

pub type UniformLocation = ::gl::types::GLint;

/// A uniform slot of a linked program, resolved by name. Setting it affects
/// whichever program is currently bound, so bind the owning program first.
#[derive(Debug, Eq, PartialEq, Hash)]
pub struct Uniform<T: ?Sized> {
    pub(crate) location: UniformLocation,
    _marker: ::std::marker::PhantomData<*const T>,
}

impl<T: ?Sized> Uniform<T> {
    pub(crate) fn new(location: UniformLocation) -> Self {
        Uniform { location, _marker: ::std::marker::PhantomData }
    }

    pub fn location(&self) -> UniformLocation {
        self.location
    }

    pub fn set(&self, value: T) where T: BoundUniform + Sized {
        value.set(self);
    }
}

pub trait BoundUniform {
    fn set(&self, uniform: &Uniform<Self>);
}

macro_rules! uniform {
    // Macro cleanliness means that we can't use `self` in the macro invocation scope
    // without first introducing it into scope there (slightly unfortunate)
    ($self:ident, $type:ty => $func:ident($($expr:expr),*)) => (
        impl BoundUniform for $type {
            #[inline(always)]
            fn set(&$self, uniform: &Uniform<Self>) {
                // UNWRAP: the location came from the bound program and the
                // type matches the function, so this can't fail.
                unsafe { GlError::map_value(::gl::$func(uniform.location, $($expr,)*)).unwrap() }
            }
        }
    )
}

uniform!(self, f32 => Uniform1f(*self));
uniform!(self, Matrix4<f32> => UniformMatrix4fv(1, ::gl::FALSE, self.as_ptr()));

/// Texture unit index for `sampler*` uniforms.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct TextureUnit(pub u32);

uniform!(self, TextureUnit => Uniform1i(self.0 as i32));
