use crate::gl_api::error::GlError;
use crate::gl_api::layout::{Attribute, VertexAttribute};
use crate::gl_api::shader::driver::{ObjectId, ShaderDriver};
use crate::gl_api::shader::shader::{compile_stage, CompiledShader, Shader, ShaderError, ShaderType};
use crate::gl_api::uniform::{BoundUniform, Uniform};
use gl::types::*;
use std::ffi::{CString, CStr};
use std::fmt;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum BindingKind {
    Attribute,
    Uniform,
}

impl fmt::Display for BindingKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            BindingKind::Attribute => write!(f, "attribute"),
            BindingKind::Uniform => write!(f, "uniform"),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum BindingError {
    #[error("could not bind {kind} `{name}`")]
    Missing { name: String, kind: BindingKind },
    #[error("{kind} name {name:?} contains a nul byte")]
    InvalidName { name: String, kind: BindingKind },
    #[error(transparent)]
    Gl(#[from] GlError),
}

#[derive(Debug, thiserror::Error)]
pub enum ProgramError {
    #[error(transparent)]
    Shader(#[from] ShaderError),
    #[error("the driver could not create a program object")]
    Creation,
    #[error("program failed to link:\n{log}")]
    Link { log: String },
    #[error(transparent)]
    Binding(#[from] BindingError),
    #[error(transparent)]
    Gl(#[from] GlError),
}

/// Where the source of one stage comes from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StageSource {
    File(PathBuf),
    Inline { label: String, source: CString },
}

impl StageSource {
    pub fn file<P: Into<PathBuf>>(path: P) -> Self {
        StageSource::File(path.into())
    }

    pub fn inline<S: Into<String>>(label: S, source: CString) -> Self {
        StageSource::Inline { label: label.into(), source }
    }

    fn compile<'d, D: ShaderDriver>(&self, driver: &'d D, stage: ShaderType) -> Result<CompiledShader<'d, D>, ShaderError> {
        match *self {
            StageSource::File(ref path) => compile_stage(driver, path, stage),
            StageSource::Inline { ref label, ref source } => {
                let mut shader = Shader::new(driver, stage)?;
                shader.source(label.clone(), source)?;
                shader.compile()
            }
        }
    }
}

/// Resolves named inputs of a freshly linked program. Handed to the closure
/// given to `ProgramBuilder::build`.
pub struct Bindings<'p, 'd, D: ShaderDriver> {
    program: &'p RawLinkedProgram<'d, D>,
}

impl<'p, 'd, D: ShaderDriver> Bindings<'p, 'd, D> {
    pub fn attribute<T: VertexAttribute>(&self, name: &str) -> Result<Attribute<T>, BindingError> {
        let location = self.program.resolve_binding(name, BindingKind::Attribute)?;
        Ok(Attribute::new(location as GLuint))
    }

    pub fn uniform<T: BoundUniform + ?Sized>(&self, name: &str) -> Result<Uniform<T>, BindingError> {
        let location = self.program.resolve_binding(name, BindingKind::Uniform)?;
        Ok(Uniform::new(location))
    }
}

pub struct ProgramBuilder<'d, D: ShaderDriver> {
    driver: &'d D,
    vertex: StageSource,
    fragment: StageSource,
}

impl<'d, D: ShaderDriver> ProgramBuilder<'d, D> {
    pub fn new(driver: &'d D, vertex: StageSource, fragment: StageSource) -> Self {
        ProgramBuilder { driver, vertex, fragment }
    }

    pub fn from_files<P1: Into<PathBuf>, P2: Into<PathBuf>>(driver: &'d D, vertex: P1, fragment: P2) -> Self {
        Self::new(driver, StageSource::file(vertex), StageSource::file(fragment))
    }

    pub fn build<E, F>(self, func: F) -> Result<Program<'d, D, E>, ProgramError>
    where
        F: FnOnce(&Bindings<'_, 'd, D>) -> Result<E, ProgramError>,
    {
        // Stages compile in order and the first failure ends the build, so
        // nothing gets linked unless both stages made it.
        let vertex = self.vertex.compile(self.driver, ShaderType::Vertex)?;
        let fragment = self.fragment.compile(self.driver, ShaderType::Fragment)?;
        let raw = link(self.driver, &vertex, &fragment)?;

        // The environment closure runs against the linked program; it's the
        // only point where names can be checked against what the stages
        // actually declare.
        let environment = func(&Bindings { program: &raw })?;
        info!(program = raw.id(), vertex = %vertex.label(), fragment = %fragment.label(), "linked program");
        Ok(Program { raw, environment })
    }
}

/// Creates a program from both stages and links it. The stages are detached
/// again afterwards, so dropping them releases the shader objects.
pub fn link<'d, D: ShaderDriver>(
    driver: &'d D,
    vertex: &CompiledShader<'d, D>,
    fragment: &CompiledShader<'d, D>,
) -> Result<RawLinkedProgram<'d, D>, ProgramError> {
    let program = RawProgram::new(driver)?;
    program.attach_shader(vertex)?;
    program.attach_shader(fragment)?;
    let linked = program.link()?;
    driver.detach_shader(linked.id(), vertex.id())?;
    driver.detach_shader(linked.id(), fragment.id())?;
    Ok(linked)
}

pub struct Program<'d, D: ShaderDriver, E> {
    raw: RawLinkedProgram<'d, D>,
    environment: E,
}

impl<'d, D: ShaderDriver, E> Program<'d, D, E> {
    pub fn env(&self) -> &E {
        &self.environment
    }

    pub fn bind(&self) -> Result<(), GlError> {
        self.raw.bind()
    }

    pub fn id(&self) -> ObjectId {
        self.raw.id()
    }

    pub fn resolve_binding(&self, name: &str, kind: BindingKind) -> Result<GLint, BindingError> {
        self.raw.resolve_binding(name, kind)
    }
}

struct RawProgram<'d, D: ShaderDriver> {
    driver: &'d D,
    id: ObjectId,
}

impl<'d, D: ShaderDriver> RawProgram<'d, D> {
    fn new(driver: &'d D) -> Result<Self, ProgramError> {
        match driver.create_program()? {
            0 => Err(ProgramError::Creation),
            id => Ok(RawProgram { driver, id }),
        }
    }

    fn attach_shader(&self, shader: &CompiledShader<'d, D>) -> Result<(), ProgramError> {
        self.driver.attach_shader(self.id, shader.id())?;
        Ok(())
    }

    fn link(self) -> Result<RawLinkedProgram<'d, D>, ProgramError> {
        if self.driver.link_program(self.id)? {
            return Ok(RawLinkedProgram(self));
        }

        let log = self.driver.program_info_log(self.id)?;
        error!(program = self.id, "glLinkProgram: {}", log.trim_end());
        Err(ProgramError::Link { log })
    }
}

impl<'d, D: ShaderDriver> Drop for RawProgram<'d, D> {
    fn drop(&mut self) {
        self.driver.delete_program(self.id);
    }
}

pub struct RawLinkedProgram<'d, D: ShaderDriver>(RawProgram<'d, D>);

impl<'d, D: ShaderDriver> RawLinkedProgram<'d, D> {
    pub fn id(&self) -> ObjectId {
        self.0.id
    }

    pub fn bind(&self) -> Result<(), GlError> {
        self.0.driver.use_program(self.0.id)
    }

    /// Looks up an active attribute or uniform. The same name always resolves
    /// to the same slot for the lifetime of the program.
    pub fn resolve_binding(&self, name: &str, kind: BindingKind) -> Result<GLint, BindingError> {
        let c_name = CString::new(name).map_err(|_| BindingError::InvalidName { name: name.to_owned(), kind })?;
        let location = self.lookup(&c_name, kind)?;
        if location == -1 {
            error!(name, %kind, "could not bind {} {}", kind, name);
            Err(BindingError::Missing { name: name.to_owned(), kind })
        } else {
            Ok(location)
        }
    }

    fn lookup(&self, name: &CStr, kind: BindingKind) -> Result<GLint, GlError> {
        match kind {
            BindingKind::Attribute => self.0.driver.attribute_location(self.0.id, name),
            BindingKind::Uniform => self.0.driver.uniform_location(self.0.id, name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gl_api::shader::fake::{Call, FakeDriver};
    use cgmath::Matrix4;

    const VERTEX: &str = "#version 330 core
in vec3 coord3d;
in vec2 texcoord;
out vec2 f_texcoord;
uniform mat4 mvp;
void main() {
    gl_Position = mvp * vec4(coord3d, 1.0);
    f_texcoord = texcoord;
}
";

    const FRAGMENT: &str = "#version 330 core
in vec2 f_texcoord;
out vec4 color;
uniform sampler2D mytexture;
uniform float fade;
void main() {
    color = vec4(texture(mytexture, f_texcoord).rgb, fade);
}
";

    const BROKEN: &str = "void main() { color = vec4(1.0);";

    fn inline(label: &str, source: &str) -> StageSource {
        StageSource::inline(label, CString::new(source).unwrap())
    }

    struct CubeBindings {
        coord3d: Attribute<[f32; 3]>,
        mvp: Uniform<Matrix4<f32>>,
        fade: Uniform<f32>,
    }

    #[test]
    fn builds_and_resolves_bindings() {
        let driver = FakeDriver::default();
        let program = ProgramBuilder::new(&driver, inline("vs", VERTEX), inline("fs", FRAGMENT))
            .build(|b| {
                Ok(CubeBindings {
                    coord3d: b.attribute("coord3d")?,
                    mvp: b.uniform("mvp")?,
                    fade: b.uniform("fade")?,
                })
            })
            .unwrap();

        let env = program.env();
        assert_eq!(env.coord3d.location(), 0);
        assert_eq!(env.mvp.location(), 0);
        assert_eq!(env.fade.location(), 2);
        assert_eq!(driver.count(&Call::Link(program.id())), 1);
    }

    #[test]
    fn stages_are_released_after_linking() {
        let driver = FakeDriver::default();
        let program = ProgramBuilder::new(&driver, inline("vs", VERTEX), inline("fs", FRAGMENT))
            .build(|_| Ok(()))
            .unwrap();

        assert_eq!(driver.live_shaders(), 0);
        assert_eq!(driver.count(&Call::Detach(program.id(), 1)), 1);
        assert_eq!(driver.count(&Call::Detach(program.id(), 2)), 1);
        assert_eq!(driver.deletions_of(1), 1);
        assert_eq!(driver.deletions_of(2), 1);

        let id = program.id();
        drop(program);
        assert_eq!(driver.count(&Call::DeleteProgram(id)), 1);
        assert_eq!(driver.live_programs(), 0);
    }

    #[test]
    fn vertex_compile_failure_skips_everything_after() {
        let driver = FakeDriver::default();
        let result = ProgramBuilder::new(&driver, inline("vs", BROKEN), inline("fs", FRAGMENT)).build(|_| Ok(()));

        match result {
            Err(ProgramError::Shader(ShaderError::Compile { stage: ShaderType::Vertex, ref log, .. })) => {
                assert!(!log.is_empty())
            }
            Err(other) => panic!("expected vertex compile error, got {:?}", other),
            Ok(_) => panic!("expected vertex compile error"),
        }
        assert_eq!(driver.count(&Call::CreateShader(ShaderType::Fragment)), 0);
        assert_eq!(driver.count(&Call::CreateProgram), 0);
        assert!(!driver.calls().iter().any(|call| matches!(call, Call::Link(_))));
    }

    #[test]
    fn fragment_compile_failure_never_links() {
        let driver = FakeDriver::default();
        let result = ProgramBuilder::new(&driver, inline("vs", VERTEX), inline("fs", BROKEN)).build(|_| Ok(()));

        match result {
            Err(ProgramError::Shader(ShaderError::Compile { stage: ShaderType::Fragment, .. })) => {}
            Err(other) => panic!("expected fragment compile error, got {:?}", other),
            Ok(_) => panic!("expected fragment compile error"),
        }
        assert!(!driver.calls().iter().any(|call| matches!(call, Call::Link(_))));
        assert_eq!(driver.live_shaders(), 0);
    }

    #[test]
    fn missing_shader_file_fails_before_linking() {
        let driver = FakeDriver::default();
        let dir = tempfile::tempdir().unwrap();
        let vs = dir.path().join("triangle.vs.glsl");
        std::fs::write(&vs, VERTEX).unwrap();

        let result = ProgramBuilder::from_files(&driver, &vs, dir.path().join("triangle.fs.glsl")).build(|_| Ok(()));
        match result {
            Err(ProgramError::Shader(ShaderError::Io { stage: ShaderType::Fragment, .. })) => {}
            Err(other) => panic!("expected io error, got {:?}", other),
            Ok(_) => panic!("expected io error"),
        }
        assert_eq!(driver.count(&Call::CreateProgram), 0);
    }

    #[test]
    fn link_failure_reports_log_and_deletes_program() {
        let driver = FakeDriver::default();
        driver.fail_link.set(true);
        let result = ProgramBuilder::new(&driver, inline("vs", VERTEX), inline("fs", FRAGMENT)).build(|_| Ok(()));

        match result {
            Err(ProgramError::Link { ref log }) => assert!(!log.is_empty()),
            Err(other) => panic!("expected link error, got {:?}", other),
            Ok(_) => panic!("expected link error"),
        }
        assert_eq!(driver.live_programs(), 0);
        assert_eq!(driver.live_shaders(), 0);
    }

    #[test]
    fn missing_uniform_is_fatal() {
        let driver = FakeDriver::default();
        let without_mvp = VERTEX.replace("uniform mat4 mvp;\n", "");
        let result = ProgramBuilder::new(&driver, inline("vs", &without_mvp), inline("fs", FRAGMENT)).build(|b| {
            let mvp: Uniform<Matrix4<f32>> = b.uniform("mvp")?;
            Ok(mvp)
        });

        match result {
            Err(ProgramError::Binding(BindingError::Missing { ref name, kind: BindingKind::Uniform })) => {
                assert_eq!(name, "mvp")
            }
            Err(other) => panic!("expected missing binding, got {:?}", other),
            Ok(_) => panic!("expected missing binding"),
        }
        // The half-built program does not outlive the failure.
        assert_eq!(driver.live_programs(), 0);
    }

    #[test]
    fn attributes_and_uniforms_are_separate_namespaces() {
        let driver = FakeDriver::default();
        let program = ProgramBuilder::new(&driver, inline("vs", VERTEX), inline("fs", FRAGMENT))
            .build(|_| Ok(()))
            .unwrap();

        assert_eq!(
            program.resolve_binding("mvp", BindingKind::Attribute),
            Err(BindingError::Missing { name: "mvp".to_string(), kind: BindingKind::Attribute })
        );
        assert_eq!(program.resolve_binding("texcoord", BindingKind::Attribute), Ok(1));
    }

    #[test]
    fn resolution_is_idempotent() {
        let driver = FakeDriver::default();
        let program = ProgramBuilder::new(&driver, inline("vs", VERTEX), inline("fs", FRAGMENT))
            .build(|_| Ok(()))
            .unwrap();

        for &(name, kind) in &[
            ("coord3d", BindingKind::Attribute),
            ("texcoord", BindingKind::Attribute),
            ("mytexture", BindingKind::Uniform),
            ("fade", BindingKind::Uniform),
        ] {
            let first = program.resolve_binding(name, kind).unwrap();
            for _ in 0..3 {
                assert_eq!(program.resolve_binding(name, kind), Ok(first));
            }
        }
    }

    #[test]
    fn nul_in_name_is_rejected() {
        let driver = FakeDriver::default();
        let program = ProgramBuilder::new(&driver, inline("vs", VERTEX), inline("fs", FRAGMENT))
            .build(|_| Ok(()))
            .unwrap();

        match program.resolve_binding("mv\0p", BindingKind::Uniform) {
            Err(BindingError::InvalidName { .. }) => {}
            other => panic!("expected invalid name, got {:?}", other),
        }
    }

    #[test]
    fn bind_uses_the_program() {
        let driver = FakeDriver::default();
        let program = ProgramBuilder::new(&driver, inline("vs", VERTEX), inline("fs", FRAGMENT))
            .build(|_| Ok(()))
            .unwrap();
        program.bind().unwrap();
        assert_eq!(driver.count(&Call::Use(program.id())), 1);
    }

    #[test]
    fn bundled_shaders_declare_demo_bindings() {
        let demos: &[(&str, &[&str], &[&str])] = &[
            ("triangle", &["coord2d"], &[]),
            ("colored_triangle", &["coord2d", "v_color"], &[]),
            ("fading_triangle", &["coord2d", "v_color"], &["fade"]),
            ("moving_triangle", &["coord2d", "v_color"], &["m_transform"]),
            ("cube", &["coord3d", "v_color"], &["mvp"]),
            ("textured_cube", &["coord3d", "texcoord"], &["mvp", "fade", "mytexture"]),
        ];

        let res = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("res");
        for &(demo, attributes, uniforms) in demos {
            let driver = FakeDriver::default();
            let dir = res.join(demo);
            let program = ProgramBuilder::from_files(&driver, dir.join("triangle.vs.glsl"), dir.join("triangle.fs.glsl"))
                .build(|b| {
                    for name in attributes {
                        b.attribute::<[f32; 2]>(name)?;
                    }
                    for name in uniforms {
                        b.uniform::<f32>(name)?;
                    }
                    Ok(())
                });
            assert!(program.is_ok(), "{} failed: {:?}", demo, program.err());
        }
    }
}
