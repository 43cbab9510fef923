//! A spinning 3D cube with per-corner colors, drawn from an index buffer.

use cgmath::Matrix4;
use glutorial::config::DemoConfig;
use glutorial::demo::{self, Demo, Viewport};
use glutorial::geometry::{CUBE_CORNERS, CUBE_CORNER_COLORS, CUBE_CORNER_ELEMENTS};
use glutorial::gl_api::buffer::{ElementBuffer, UsageType, VertexBuffer};
use glutorial::gl_api::error::GlResult;
use glutorial::gl_api::layout::Attribute;
use glutorial::gl_api::shader::{GlDriver, Program, ProgramBuilder, GL};
use glutorial::gl_api::uniform::Uniform;
use glutorial::gl_api::vertex_array::VertexArray;
use glutorial::{gl_call, transform};
use std::time::Duration;

struct CubeBindings {
    coord3d: Attribute<[f32; 3]>,
    v_color: Attribute<[f32; 3]>,
    mvp: Uniform<Matrix4<f32>>,
}

struct Cube {
    program: Program<'static, GlDriver, CubeBindings>,
    vao: VertexArray,
    // Only read through the vertex array.
    _vertices: VertexBuffer<[f32; 3]>,
    _colors: VertexBuffer<[f32; 3]>,
    elements: ElementBuffer<u16>,
}

impl Demo for Cube {
    const NAME: &'static str = "cube";
    const TITLE: &'static str = "Cube";

    fn setup(config: &DemoConfig) -> anyhow::Result<Self> {
        let program = ProgramBuilder::from_files(&GL, config.asset("triangle.vs.glsl"), config.asset("triangle.fs.glsl"))
            .build(|b| {
                Ok(CubeBindings {
                    coord3d: b.attribute("coord3d")?,
                    v_color: b.attribute("v_color")?,
                    mvp: b.uniform("mvp")?,
                })
            })?;

        let vertices = VertexBuffer::with_data(&CUBE_CORNERS, UsageType::StaticDraw)?;
        let colors = VertexBuffer::with_data(&CUBE_CORNER_COLORS, UsageType::StaticDraw)?;
        let elements = ElementBuffer::with_data(&CUBE_CORNER_ELEMENTS, UsageType::StaticDraw)?;

        let mut vao = VertexArray::new();
        vao.add_attribute(&vertices, &program.env().coord3d, 0)?;
        vao.add_attribute(&colors, &program.env().v_color, 0)?;
        vao.set_elements(&elements);

        unsafe {
            gl_call!(Enable(gl::DEPTH_TEST))?;
        }

        Ok(Cube { program, vao, _vertices: vertices, _colors: colors, elements })
    }

    fn update(&mut self, elapsed: Duration, viewport: Viewport) -> GlResult<()> {
        self.program.bind()?;
        let mvp = transform::spin_mvp(elapsed.as_secs_f32(), viewport.aspect());
        self.program.env().mvp.set(mvp);
        Ok(())
    }

    fn render(&mut self) -> GlResult<()> {
        unsafe {
            gl_call!(ClearColor(1.0, 1.0, 1.0, 1.0))?;
            gl_call!(Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT))?;
        }
        self.program.bind()?;
        self.vao.draw_elements(gl::TRIANGLES, &self.elements)
    }
}

fn main() {
    demo::run::<Cube>()
}
