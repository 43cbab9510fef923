pub mod driver;
#[cfg(test)]
pub(crate) mod fake;
pub mod program;
pub mod shader;

pub use self::driver::{GlDriver, ObjectId, ShaderDriver, GL};
pub use self::program::{
    link, BindingError, BindingKind, Bindings, Program, ProgramBuilder, ProgramError, RawLinkedProgram, StageSource,
};
pub use self::shader::{compile_stage, CompiledShader, Shader, ShaderError, ShaderResult, ShaderType};
