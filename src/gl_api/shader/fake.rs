//! An in-memory `ShaderDriver` for tests. It "compiles" any source whose braces
//! balance and which has a `main`, and treats `in` declarations of the vertex
//! stage as attributes and `uniform` declarations of either stage as uniforms,
//! numbered in declaration order.

use crate::gl_api::error::GlResult;
use crate::gl_api::shader::driver::{ObjectId, ShaderDriver};
use crate::gl_api::shader::shader::ShaderType;
use gl::types::GLint;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::ffi::CStr;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Call {
    CreateShader(ShaderType),
    Compile(ObjectId),
    DeleteShader(ObjectId),
    CreateProgram,
    Attach(ObjectId, ObjectId),
    Detach(ObjectId, ObjectId),
    Link(ObjectId),
    Use(ObjectId),
    DeleteProgram(ObjectId),
}

#[derive(Debug)]
struct FakeShader {
    shader_type: ShaderType,
    source: String,
    compiled: bool,
}

#[derive(Debug, Default)]
struct FakeProgram {
    attached: Vec<ObjectId>,
    linked: bool,
    attributes: Vec<String>,
    uniforms: Vec<String>,
}

#[derive(Debug, Default)]
pub struct FakeDriver {
    next_id: Cell<ObjectId>,
    shaders: RefCell<HashMap<ObjectId, FakeShader>>,
    programs: RefCell<HashMap<ObjectId, FakeProgram>>,
    calls: RefCell<Vec<Call>>,
    /// Hand out 0 for every object creation.
    pub refuse_objects: Cell<bool>,
    /// Fail every link, even with valid stages.
    pub fail_link: Cell<bool>,
}

impl FakeDriver {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, call: &Call) -> usize {
        self.calls.borrow().iter().filter(|&c| c == call).count()
    }

    pub fn deletions_of(&self, shader: ObjectId) -> usize {
        self.count(&Call::DeleteShader(shader))
    }

    pub fn live_shaders(&self) -> usize {
        self.shaders.borrow().len()
    }

    pub fn live_programs(&self) -> usize {
        self.programs.borrow().len()
    }

    pub fn source_of(&self, shader: ObjectId) -> Option<String> {
        self.shaders.borrow().get(&shader).map(|s| s.source.clone())
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn allocate(&self) -> ObjectId {
        if self.refuse_objects.get() {
            return 0;
        }
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id
    }
}

fn syntax_error(source: &str) -> Option<String> {
    let mut depth = 0i32;
    for (number, line) in source.lines().enumerate() {
        for ch in line.chars() {
            match ch {
                '{' => depth += 1,
                '}' => depth -= 1,
                _ => (),
            }
            if depth < 0 {
                return Some(format!("0:{}(1): error: syntax error, unexpected '}}'", number + 1));
            }
        }
    }
    if depth != 0 {
        return Some("0:0(0): error: syntax error, unexpected end of file".to_string());
    }
    if !source.contains("main") {
        return Some("error: missing function `main'".to_string());
    }
    None
}

fn declarations(source: &str, qualifier: &str) -> Vec<String> {
    source
        .lines()
        .filter_map(|line| {
            let tokens = line.trim().trim_end_matches(';').split_whitespace().collect::<Vec<_>>();
            match tokens.as_slice() {
                [first, _ty, name] if *first == qualifier => Some(name.to_string()),
                _ => None,
            }
        })
        .collect()
}

fn position(names: &[String], name: &CStr) -> GLint {
    let name = name.to_string_lossy();
    names.iter().position(|n| *n == name).map(|i| i as GLint).unwrap_or(-1)
}

impl ShaderDriver for FakeDriver {
    fn create_shader(&self, shader_type: ShaderType) -> GlResult<ObjectId> {
        self.record(Call::CreateShader(shader_type));
        let id = self.allocate();
        if id != 0 {
            let shader = FakeShader { shader_type, source: String::new(), compiled: false };
            self.shaders.borrow_mut().insert(id, shader);
        }
        Ok(id)
    }

    fn shader_source(&self, shader: ObjectId, source: &CStr) -> GlResult<()> {
        let mut shaders = self.shaders.borrow_mut();
        let entry = shaders.get_mut(&shader).expect("source for unknown shader");
        entry.source = source.to_string_lossy().into_owned();
        Ok(())
    }

    fn compile_shader(&self, shader: ObjectId) -> GlResult<bool> {
        self.record(Call::Compile(shader));
        let mut shaders = self.shaders.borrow_mut();
        let entry = shaders.get_mut(&shader).expect("compile of unknown shader");
        entry.compiled = syntax_error(&entry.source).is_none();
        Ok(entry.compiled)
    }

    fn shader_info_log(&self, shader: ObjectId) -> GlResult<String> {
        let shaders = self.shaders.borrow();
        let entry = shaders.get(&shader).expect("log of unknown shader");
        Ok(syntax_error(&entry.source).unwrap_or_default())
    }

    fn delete_shader(&self, shader: ObjectId) {
        self.record(Call::DeleteShader(shader));
        self.shaders.borrow_mut().remove(&shader);
    }

    fn create_program(&self) -> GlResult<ObjectId> {
        self.record(Call::CreateProgram);
        let id = self.allocate();
        if id != 0 {
            self.programs.borrow_mut().insert(id, FakeProgram::default());
        }
        Ok(id)
    }

    fn attach_shader(&self, program: ObjectId, shader: ObjectId) -> GlResult<()> {
        self.record(Call::Attach(program, shader));
        let mut programs = self.programs.borrow_mut();
        programs.get_mut(&program).expect("attach to unknown program").attached.push(shader);
        Ok(())
    }

    fn detach_shader(&self, program: ObjectId, shader: ObjectId) -> GlResult<()> {
        self.record(Call::Detach(program, shader));
        let mut programs = self.programs.borrow_mut();
        let entry = programs.get_mut(&program).expect("detach from unknown program");
        entry.attached.retain(|&id| id != shader);
        Ok(())
    }

    fn link_program(&self, program: ObjectId) -> GlResult<bool> {
        self.record(Call::Link(program));
        let shaders = self.shaders.borrow();
        let mut programs = self.programs.borrow_mut();
        let entry = programs.get_mut(&program).expect("link of unknown program");

        let stage = |ty: ShaderType| {
            entry
                .attached
                .iter()
                .filter_map(|id| shaders.get(id))
                .find(|s| s.shader_type == ty && s.compiled)
        };
        let (vertex, fragment) = match (stage(ShaderType::Vertex), stage(ShaderType::Fragment)) {
            (Some(v), Some(f)) if !self.fail_link.get() => (v, f),
            _ => return Ok(false),
        };

        let attributes = declarations(&vertex.source, "in");
        let mut uniforms = declarations(&vertex.source, "uniform");
        for name in declarations(&fragment.source, "uniform") {
            if !uniforms.contains(&name) {
                uniforms.push(name);
            }
        }
        entry.attributes = attributes;
        entry.uniforms = uniforms;
        entry.linked = true;
        Ok(true)
    }

    fn program_info_log(&self, program: ObjectId) -> GlResult<String> {
        let programs = self.programs.borrow();
        let entry = programs.get(&program).expect("log of unknown program");
        Ok(if entry.linked {
            String::new()
        } else {
            "error: linking with uncompiled or mismatched shaders".to_string()
        })
    }

    fn use_program(&self, program: ObjectId) -> GlResult<()> {
        self.record(Call::Use(program));
        Ok(())
    }

    fn delete_program(&self, program: ObjectId) {
        self.record(Call::DeleteProgram(program));
        self.programs.borrow_mut().remove(&program);
    }

    fn attribute_location(&self, program: ObjectId, name: &CStr) -> GlResult<GLint> {
        let programs = self.programs.borrow();
        let entry = programs.get(&program).expect("lookup on unknown program");
        assert!(entry.linked, "lookup on unlinked program");
        Ok(position(&entry.attributes, name))
    }

    fn uniform_location(&self, program: ObjectId, name: &CStr) -> GlResult<GLint> {
        let programs = self.programs.borrow();
        let entry = programs.get(&program).expect("lookup on unknown program");
        assert!(entry.linked, "lookup on unlinked program");
        Ok(position(&entry.uniforms, name))
    }
}
