//! The spinning cube with a texture on every face, fading in and out.
//!
//! A texture that fails to load is not fatal: the cube is drawn with no
//! texture bound instead.

use cgmath::Matrix4;
use glutorial::config::DemoConfig;
use glutorial::demo::{self, Demo, Viewport};
use glutorial::geometry::{cube_face_texcoords, CUBE_FACE_ELEMENTS, CUBE_FACE_VERTICES};
use glutorial::gl_api::buffer::{ElementBuffer, UsageType, VertexBuffer};
use glutorial::gl_api::error::GlResult;
use glutorial::gl_api::layout::Attribute;
use glutorial::gl_api::shader::{GlDriver, Program, ProgramBuilder, GL};
use glutorial::gl_api::texture::Texture2d;
use glutorial::gl_api::uniform::{TextureUnit, Uniform};
use glutorial::gl_api::vertex_array::VertexArray;
use glutorial::{gl_call, transform};
use std::time::Duration;
use tracing::{info, warn};

const TEXTURE_UNIT: TextureUnit = TextureUnit(0);

struct TexturedBindings {
    coord3d: Attribute<[f32; 3]>,
    texcoord: Attribute<[f32; 2]>,
    mvp: Uniform<Matrix4<f32>>,
    fade: Uniform<f32>,
    mytexture: Uniform<TextureUnit>,
}

struct TexturedCube {
    program: Program<'static, GlDriver, TexturedBindings>,
    vao: VertexArray,
    // Only read through the vertex array.
    _vertices: VertexBuffer<[f32; 3]>,
    _texcoords: VertexBuffer<[f32; 2]>,
    elements: ElementBuffer<u16>,
    texture: Option<Texture2d>,
}

impl Demo for TexturedCube {
    const NAME: &'static str = "textured_cube";
    const TITLE: &'static str = "Textured Cube";

    fn setup(config: &DemoConfig) -> anyhow::Result<Self> {
        let program = ProgramBuilder::from_files(&GL, config.asset("triangle.vs.glsl"), config.asset("triangle.fs.glsl"))
            .build(|b| {
                Ok(TexturedBindings {
                    coord3d: b.attribute("coord3d")?,
                    texcoord: b.attribute("texcoord")?,
                    mvp: b.uniform("mvp")?,
                    fade: b.uniform("fade")?,
                    mytexture: b.uniform("mytexture")?,
                })
            })?;

        let vertices = VertexBuffer::with_data(&CUBE_FACE_VERTICES, UsageType::StaticDraw)?;
        let texcoords = VertexBuffer::with_data(&cube_face_texcoords(), UsageType::StaticDraw)?;
        let elements = ElementBuffer::with_data(&CUBE_FACE_ELEMENTS, UsageType::StaticDraw)?;

        let mut vao = VertexArray::new();
        vao.add_attribute(&vertices, &program.env().coord3d, 0)?;
        vao.add_attribute(&texcoords, &program.env().texcoord, 0)?;
        vao.set_elements(&elements);

        let path = config.texture_or("texture.png");
        let texture = match Texture2d::load(&path) {
            Ok(texture) => {
                info!(path = %path.display(), dimensions = ?texture.dimensions(), "loaded texture");
                Some(texture)
            }
            Err(err) => {
                warn!("could not load texture {}: {}", path.display(), err);
                None
            }
        };

        program.bind()?;
        program.env().mytexture.set(TEXTURE_UNIT);

        unsafe {
            gl_call!(Enable(gl::BLEND))?;
            gl_call!(Enable(gl::DEPTH_TEST))?;
            gl_call!(BlendFunc(gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA))?;
        }

        Ok(TexturedCube {
            program,
            vao,
            _vertices: vertices,
            _texcoords: texcoords,
            elements,
            texture,
        })
    }

    fn update(&mut self, elapsed: Duration, viewport: Viewport) -> GlResult<()> {
        let seconds = elapsed.as_secs_f32();
        self.program.bind()?;
        let env = self.program.env();
        env.mvp.set(transform::spin_mvp(seconds, viewport.aspect()));
        env.fade.set(transform::fade(seconds));
        Ok(())
    }

    fn render(&mut self) -> GlResult<()> {
        unsafe {
            gl_call!(ClearColor(1.0, 1.0, 1.0, 1.0))?;
            gl_call!(Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT))?;
        }
        self.program.bind()?;
        match self.texture {
            Some(ref texture) => texture.bind(TEXTURE_UNIT),
            None => unsafe {
                gl_call!(ActiveTexture(gl::TEXTURE0 + TEXTURE_UNIT.0))?;
                gl_call!(BindTexture(gl::TEXTURE_2D, 0))?;
            },
        }
        self.vao.draw_elements(gl::TRIANGLES, &self.elements)
    }
}

fn main() {
    demo::run::<TexturedCube>()
}
