//! The seam between shader/program handling and the GL implementation that
//! actually compiles and links things.

use crate::gl_api::error::{GlError, GlResult};
use crate::gl_api::shader::shader::ShaderType;
use gl::types::*;
use std::ffi::CStr;

pub type ObjectId = GLuint;

/// Shader and program object operations. Object ids of 0 mean the driver could
/// not create the object; locations of -1 mean the name is not an active input
/// of the program.
pub trait ShaderDriver {
    fn create_shader(&self, shader_type: ShaderType) -> GlResult<ObjectId>;
    fn shader_source(&self, shader: ObjectId, source: &CStr) -> GlResult<()>;
    /// Returns whether compilation succeeded.
    fn compile_shader(&self, shader: ObjectId) -> GlResult<bool>;
    fn shader_info_log(&self, shader: ObjectId) -> GlResult<String>;
    fn delete_shader(&self, shader: ObjectId);

    fn create_program(&self) -> GlResult<ObjectId>;
    fn attach_shader(&self, program: ObjectId, shader: ObjectId) -> GlResult<()>;
    fn detach_shader(&self, program: ObjectId, shader: ObjectId) -> GlResult<()>;
    /// Returns whether linking succeeded.
    fn link_program(&self, program: ObjectId) -> GlResult<bool>;
    fn program_info_log(&self, program: ObjectId) -> GlResult<String>;
    fn use_program(&self, program: ObjectId) -> GlResult<()>;
    fn delete_program(&self, program: ObjectId);

    fn attribute_location(&self, program: ObjectId, name: &CStr) -> GlResult<GLint>;
    fn uniform_location(&self, program: ObjectId, name: &CStr) -> GlResult<GLint>;
}

/// The real thing: forwards to the loaded GL function pointers of the current
/// context.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct GlDriver;

pub static GL: GlDriver = GlDriver;

impl ShaderDriver for GlDriver {
    fn create_shader(&self, shader_type: ShaderType) -> GlResult<ObjectId> {
        unsafe { gl_call!(CreateShader(shader_type.gl_enum())) }
    }

    fn shader_source(&self, shader: ObjectId, source: &CStr) -> GlResult<()> {
        let sources = [source.as_ptr()];
        unsafe { gl_call!(ShaderSource(shader, 1, sources.as_ptr(), ::std::ptr::null())) }
    }

    fn compile_shader(&self, shader: ObjectId) -> GlResult<bool> {
        let mut status = gl::FALSE as GLint;
        unsafe {
            gl_call!(CompileShader(shader))?;
            gl_call!(GetShaderiv(shader, gl::COMPILE_STATUS, &mut status))?;
        }
        Ok(status != gl::FALSE as GLint)
    }

    fn shader_info_log(&self, shader: ObjectId) -> GlResult<String> {
        unsafe { read_info_log(shader, gl::GetShaderiv, gl::GetShaderInfoLog) }
    }

    fn delete_shader(&self, shader: ObjectId) {
        unsafe {
            let _ = gl_call!(DeleteShader(shader));
        }
    }

    fn create_program(&self) -> GlResult<ObjectId> {
        unsafe { gl_call!(CreateProgram()) }
    }

    fn attach_shader(&self, program: ObjectId, shader: ObjectId) -> GlResult<()> {
        unsafe { gl_call!(AttachShader(program, shader)) }
    }

    fn detach_shader(&self, program: ObjectId, shader: ObjectId) -> GlResult<()> {
        unsafe { gl_call!(DetachShader(program, shader)) }
    }

    fn link_program(&self, program: ObjectId) -> GlResult<bool> {
        let mut status = gl::FALSE as GLint;
        unsafe {
            gl_call!(LinkProgram(program))?;
            gl_call!(GetProgramiv(program, gl::LINK_STATUS, &mut status))?;
        }
        Ok(status != gl::FALSE as GLint)
    }

    fn program_info_log(&self, program: ObjectId) -> GlResult<String> {
        unsafe { read_info_log(program, gl::GetProgramiv, gl::GetProgramInfoLog) }
    }

    fn use_program(&self, program: ObjectId) -> GlResult<()> {
        unsafe { gl_call!(UseProgram(program)) }
    }

    fn delete_program(&self, program: ObjectId) {
        unsafe {
            let _ = gl_call!(DeleteProgram(program));
        }
    }

    fn attribute_location(&self, program: ObjectId, name: &CStr) -> GlResult<GLint> {
        unsafe { gl_call!(GetAttribLocation(program, name.as_ptr())) }
    }

    fn uniform_location(&self, program: ObjectId, name: &CStr) -> GlResult<GLint> {
        unsafe { gl_call!(GetUniformLocation(program, name.as_ptr())) }
    }
}

unsafe fn read_info_log(
    id: GLuint,
    get_iv: unsafe fn(GLuint, GLenum, *mut GLint),
    get_log: unsafe fn(GLuint, GLsizei, *mut GLsizei, *mut GLchar),
) -> GlResult<String> {
    let mut length = 0;
    get_iv(id, gl::INFO_LOG_LENGTH, &mut length);
    GlError::map_value(())?;
    if length <= 0 {
        return Ok(String::new());
    }

    let mut buffer = vec![0u8; length as usize];
    let mut written = 0;
    get_log(id, length, &mut written, buffer.as_mut_ptr() as *mut GLchar);
    GlError::map_value(())?;
    // `written` excludes the terminator.
    buffer.truncate(written.max(0) as usize);
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
