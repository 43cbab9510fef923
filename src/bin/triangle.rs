//! A flat, hard-coded triangle. One attribute, no uniforms.

use glutorial::config::DemoConfig;
use glutorial::demo::{self, Demo, Viewport};
use glutorial::geometry::TRIANGLE;
use glutorial::gl_api::buffer::{UsageType, VertexBuffer};
use glutorial::gl_api::error::GlResult;
use glutorial::gl_api::layout::Attribute;
use glutorial::gl_api::shader::{GlDriver, Program, ProgramBuilder, GL};
use glutorial::gl_api::vertex_array::VertexArray;
use glutorial::gl_call;
use std::time::Duration;

struct TriangleBindings {
    coord2d: Attribute<[f32; 2]>,
}

struct Triangle {
    program: Program<'static, GlDriver, TriangleBindings>,
    vao: VertexArray,
    vbo: VertexBuffer<[f32; 2]>,
}

impl Demo for Triangle {
    const NAME: &'static str = "triangle";
    const TITLE: &'static str = "My First Triangle";

    fn setup(config: &DemoConfig) -> anyhow::Result<Self> {
        let program = ProgramBuilder::from_files(&GL, config.asset("triangle.vs.glsl"), config.asset("triangle.fs.glsl"))
            .build(|b| Ok(TriangleBindings { coord2d: b.attribute("coord2d")? }))?;

        let vbo = VertexBuffer::with_data(&TRIANGLE, UsageType::StaticDraw)?;
        let mut vao = VertexArray::new();
        vao.add_attribute(&vbo, &program.env().coord2d, 0)?;

        Ok(Triangle { program, vao, vbo })
    }

    fn update(&mut self, _elapsed: Duration, _viewport: Viewport) -> GlResult<()> {
        Ok(())
    }

    fn render(&mut self) -> GlResult<()> {
        unsafe {
            gl_call!(ClearColor(1.0, 1.0, 1.0, 1.0))?;
            gl_call!(Clear(gl::COLOR_BUFFER_BIT))?;
        }
        self.program.bind()?;
        self.vao.draw_arrays(gl::TRIANGLES, self.vbo.len())
    }
}

fn main() {
    demo::run::<Triangle>()
}
