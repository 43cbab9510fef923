use crate::file::{read_all_text, FileError};
use crate::gl_api::error::GlError;
use crate::gl_api::shader::driver::{ObjectId, ShaderDriver};
use gl::types::GLenum;
use std::ffi::CStr;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ShaderType {
    Vertex,
    Fragment,
}

impl ShaderType {
    pub fn gl_enum(&self) -> GLenum {
        match *self {
            ShaderType::Vertex => gl::VERTEX_SHADER,
            ShaderType::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ShaderType::Vertex => write!(f, "vertex"),
            ShaderType::Fragment => write!(f, "fragment"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("the driver could not create a {0} shader object")]
    Creation(ShaderType),
    #[error("could not read {stage} shader source from {}", .path.display())]
    Io {
        stage: ShaderType,
        path: PathBuf,
        #[source]
        source: FileError,
    },
    #[error("{stage} shader `{label}` failed to compile:\n{log}")]
    Compile {
        stage: ShaderType,
        label: String,
        log: String,
    },
    #[error(transparent)]
    Gl(#[from] GlError),
}

pub type ShaderResult<T> = Result<T, ShaderError>;

/// A shader object that has not been compiled yet. The object is deleted when
/// this is dropped, unless it was turned into a `CompiledShader`.
pub struct Shader<'d, D: ShaderDriver> {
    driver: &'d D,
    pub(crate) id: ObjectId,
    pub shader_type: ShaderType,
    label: String,
}

impl<'d, D: ShaderDriver> Shader<'d, D> {
    pub fn new(driver: &'d D, shader_type: ShaderType) -> ShaderResult<Self> {
        match driver.create_shader(shader_type)? {
            0 => Err(ShaderError::Creation(shader_type)),
            id => Ok(Shader {
                driver,
                id,
                shader_type,
                label: String::from("<inline>"),
            }),
        }
    }

    /// Hands `source` to the driver. `label` names the source in diagnostics.
    pub fn source<S: Into<String>>(&mut self, label: S, source: &CStr) -> ShaderResult<()> {
        self.label = label.into();
        self.driver.shader_source(self.id, source)?;
        Ok(())
    }

    pub fn source_from_file<P: AsRef<Path>>(&mut self, path: P) -> ShaderResult<()> {
        let path = path.as_ref();
        let text = read_all_text(path).map_err(|source| ShaderError::Io {
            stage: self.shader_type,
            path: path.to_owned(),
            source,
        })?;
        debug!(stage = %self.shader_type, path = %path.display(), bytes = text.as_bytes().len(), "read shader source");
        self.source(path.display().to_string(), &text)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Compiles the submitted source. On failure the driver's log is reported
    /// and returned, and the shader object is deleted.
    pub fn compile(self) -> ShaderResult<CompiledShader<'d, D>> {
        if self.driver.compile_shader(self.id)? {
            return Ok(CompiledShader { shader: self });
        }

        let log = self.driver.shader_info_log(self.id)?;
        error!(stage = %self.shader_type, label = %self.label, "{}", log.trim_end());
        Err(ShaderError::Compile {
            stage: self.shader_type,
            label: self.label.clone(),
            log,
        })
    }
}

impl<'d, D: ShaderDriver> Drop for Shader<'d, D> {
    fn drop(&mut self) {
        self.driver.delete_shader(self.id);
    }
}

impl<'d, D: ShaderDriver> fmt::Debug for Shader<'d, D> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Shader")
            .field("id", &self.id)
            .field("shader_type", &self.shader_type)
            .field("label", &self.label)
            .finish()
    }
}

/// A successfully compiled stage, ready to be attached to a program.
#[derive(Debug)]
pub struct CompiledShader<'d, D: ShaderDriver> {
    pub(crate) shader: Shader<'d, D>,
}

impl<'d, D: ShaderDriver> CompiledShader<'d, D> {
    pub fn id(&self) -> ObjectId {
        self.shader.id
    }

    pub fn shader_type(&self) -> ShaderType {
        self.shader.shader_type
    }

    pub fn label(&self) -> &str {
        self.shader.label()
    }
}

/// Reads the stage source at `path` and compiles it.
pub fn compile_stage<'d, D: ShaderDriver, P: AsRef<Path>>(
    driver: &'d D,
    path: P,
    stage: ShaderType,
) -> ShaderResult<CompiledShader<'d, D>> {
    let mut shader = Shader::new(driver, stage)?;
    shader.source_from_file(path)?;
    shader.compile()
}
