use gl::types::GLenum;

pub type GlResult<T> = Result<T, GlError>;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
#[error("OpenGL error {code:#06x} ({})", describe(.code))]
pub struct GlError {
    code: GLenum,
}

impl GlError {
    fn get_raw() -> GLenum {
        unsafe { gl::GetError() }
    }

    #[cfg(test)]
    pub(crate) fn from_code(code: GLenum) -> Self {
        GlError { code }
    }

    pub fn code(&self) -> GLenum {
        self.code
    }

    pub fn map_value<T>(val: T) -> GlResult<T> {
        match Self::get_raw() {
            gl::NO_ERROR => Ok(val),
            // GL specification states that it is undefined to issue any GL
            // calls after an out of memory error is received.
            gl::OUT_OF_MEMORY => ::std::process::abort(),
            code => Err(GlError { code }),
        }
    }
}

fn describe(code: &GLenum) -> &'static str {
    match *code {
        gl::INVALID_ENUM => "invalid enum",
        gl::INVALID_VALUE => "invalid value",
        gl::INVALID_OPERATION => "invalid operation",
        gl::INVALID_FRAMEBUFFER_OPERATION => "invalid framebuffer operation",
        gl::STACK_OVERFLOW => "stack overflow",
        gl::STACK_UNDERFLOW => "stack underflow",
        _ => "unknown",
    }
}

#[macro_export]
macro_rules! gl_call {
    ($name:ident($($args:expr),*)) => {{
        $crate::gl_api::error::GlError::map_value($crate::gl::$name($($args),*))
    }}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_error() {
        let err = GlError::from_code(gl::INVALID_OPERATION);
        assert_eq!(err.to_string(), "OpenGL error 0x0502 (invalid operation)");
    }
}
