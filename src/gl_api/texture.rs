use crate::gl_api::error::{GlError, GlResult};
use crate::gl_api::uniform::TextureUnit;
use crate::targa::{read_tga, TargaError, TargaFormat, TargaImage};
use gl::types::*;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("could not decode image: {0}")]
    Image(#[from] image::ImageError),
    #[error("could not decode targa image: {0}")]
    Targa(#[from] TargaError),
    #[error(transparent)]
    Gl(#[from] GlError),
}

#[derive(Debug)]
pub struct Texture2d {
    pub(crate) id: GLuint,
    width: u32,
    height: u32,
}

impl Texture2d {
    fn new(width: u32, height: u32) -> Self {
        let mut id = 0;
        // UNWRAP: Can only fail if count is negative
        unsafe {
            gl_call!(GenTextures(1, &mut id)).unwrap();
        }
        Texture2d { id, width, height }
    }

    /// Loads `path`, picking the targa decoder for `.tga` files and the
    /// `image` crate for everything else.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let path = path.as_ref();
        if is_targa(path) {
            Texture2d::from_targa(&read_tga(path)?)
        } else {
            Texture2d::from_path(path)
        }
    }

    /// Loads any image format the `image` crate understands. Rows are flipped
    /// so that the first row in memory is the bottom of the picture, matching
    /// GL's texture coordinate origin.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let image = image::open(path)?.flipv().to_rgba8();
        let (width, height) = image.dimensions();
        let texture = Texture2d::new(width, height);
        texture.upload(gl::RGBA, gl::RGBA, image.as_raw())?;
        Ok(texture)
    }

    /// Uploads a decoded targa image as is. Targa rows are stored bottom up
    /// already, so nothing is flipped.
    pub fn from_targa(image: &TargaImage) -> Result<Self, TextureError> {
        let texture = Texture2d::new(image.width(), image.height());
        texture.upload(image.format.gl_internal_format(), image.format.gl_format(), &image.data)?;
        if image.format == TargaFormat::Luminance {
            let swizzle = [gl::RED as GLint, gl::RED as GLint, gl::RED as GLint, gl::ONE as GLint];
            unsafe {
                gl_call!(TexParameteriv(gl::TEXTURE_2D, gl::TEXTURE_SWIZZLE_RGBA, swizzle.as_ptr()))?;
            }
        }
        Ok(texture)
    }

    fn upload(&self, internal_format: GLenum, format: GLenum, data: &[u8]) -> GlResult<()> {
        unsafe {
            gl_call!(BindTexture(gl::TEXTURE_2D, self.id))?;
            // Rows of 1 and 3 byte pixels aren't 4 byte aligned.
            gl_call!(PixelStorei(gl::UNPACK_ALIGNMENT, 1))?;
            gl_call!(TexImage2D(
                gl::TEXTURE_2D,
                0,
                internal_format as GLint,
                self.width as GLsizei,
                self.height as GLsizei,
                0,
                format,
                gl::UNSIGNED_BYTE,
                data.as_ptr() as *const _
            ))?;
            gl_call!(GenerateMipmap(gl::TEXTURE_2D))?;
            gl_call!(TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::LINEAR_MIPMAP_LINEAR as GLint))?;
            gl_call!(TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::LINEAR as GLint))?;
        }
        Ok(())
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn bind(&self, unit: TextureUnit) {
        // UNWRAP: the unit is below GL_MAX_COMBINED_TEXTURE_IMAGE_UNITS for
        // every caller, and our ID is always valid
        unsafe {
            gl_call!(ActiveTexture(gl::TEXTURE0 + unit.0)).unwrap();
            gl_call!(BindTexture(gl::TEXTURE_2D, self.id)).unwrap();
        }
    }
}

fn is_targa(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("tga"))
}

impl Drop for Texture2d {
    fn drop(&mut self) {
        unsafe {
            let _ = gl_call!(DeleteTextures(1, &self.id));
        }
    }
}
