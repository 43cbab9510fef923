//! Per-vertex colors, interleaved with the positions in a single buffer.

use glutorial::config::DemoConfig;
use glutorial::demo::{self, Demo, Viewport};
use glutorial::geometry::{ColorVertex, COLORED_TRIANGLE};
use glutorial::gl_api::buffer::{UsageType, VertexBuffer};
use glutorial::gl_api::error::GlResult;
use glutorial::gl_api::layout::Attribute;
use glutorial::gl_api::shader::{GlDriver, Program, ProgramBuilder, GL};
use glutorial::gl_api::vertex_array::VertexArray;
use glutorial::gl_call;
use std::mem::offset_of;
use std::time::Duration;

struct ColoredBindings {
    coord2d: Attribute<[f32; 2]>,
    v_color: Attribute<[f32; 3]>,
}

struct ColoredTriangle {
    program: Program<'static, GlDriver, ColoredBindings>,
    vao: VertexArray,
    vbo: VertexBuffer<ColorVertex>,
}

impl Demo for ColoredTriangle {
    const NAME: &'static str = "colored_triangle";
    const TITLE: &'static str = "Colored Triangle";

    fn setup(config: &DemoConfig) -> anyhow::Result<Self> {
        let program = ProgramBuilder::from_files(&GL, config.asset("triangle.vs.glsl"), config.asset("triangle.fs.glsl"))
            .build(|b| {
                Ok(ColoredBindings {
                    coord2d: b.attribute("coord2d")?,
                    v_color: b.attribute("v_color")?,
                })
            })?;

        let vbo = VertexBuffer::with_data(&COLORED_TRIANGLE, UsageType::StaticDraw)?;
        let mut vao = VertexArray::new();
        let env = program.env();
        vao.add_attribute(&vbo, &env.coord2d, offset_of!(ColorVertex, coord2d))?;
        vao.add_attribute(&vbo, &env.v_color, offset_of!(ColorVertex, v_color))?;

        Ok(ColoredTriangle { program, vao, vbo })
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
    demo::run::<ColoredTriangle>()
}
