//! Decoder for plain, uncompressed Targa images.
//!
//! Only 8, 24 and 32 bit images are understood. There is no support for color
//! maps or RLE; an RLE image usually fails with [`TargaError::Truncated`], but a
//! paletted or compressed image that happens to be long enough decodes into
//! garbage.

use gl::types::GLenum;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

pub const HEADER_LEN: usize = 18;

#[derive(Debug, thiserror::Error)]
pub enum TargaError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("unsupported pixel depth of {0} bits (expected 8, 24 or 32)")]
    UnsupportedDepth(u8),
    #[error("image data ended early: expected {expected} bytes")]
    Truncated { expected: usize },
}

/// The fixed 18 byte header, fields in file order. Multi-byte fields are
/// little endian.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub struct TargaHeader {
    pub ident_size: u8,
    /// 0 = none, 1 = paletted
    pub color_map_type: u8,
    /// 0 = none, 1 = indexed, 2 = rgb, 3 = grey, +8 = rle
    pub image_type: u8,
    pub color_map_start: u16,
    pub color_map_length: u16,
    pub color_map_bits: u8,
    pub x_origin: u16,
    pub y_origin: u16,
    pub width: u16,
    pub height: u16,
    pub bits: u8,
    pub descriptor: u8,
}

impl TargaHeader {
    pub fn parse(raw: &[u8; HEADER_LEN]) -> Self {
        let word = |at: usize| u16::from_le_bytes([raw[at], raw[at + 1]]);
        TargaHeader {
            ident_size: raw[0],
            color_map_type: raw[1],
            image_type: raw[2],
            color_map_start: word(3),
            color_map_length: word(5),
            color_map_bits: raw[7],
            x_origin: word(8),
            y_origin: word(10),
            width: word(12),
            height: word(14),
            bits: raw[16],
            descriptor: raw[17],
        }
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut raw = [0; HEADER_LEN];
        raw[0] = self.ident_size;
        raw[1] = self.color_map_type;
        raw[2] = self.image_type;
        raw[3..5].copy_from_slice(&self.color_map_start.to_le_bytes());
        raw[5..7].copy_from_slice(&self.color_map_length.to_le_bytes());
        raw[7] = self.color_map_bits;
        raw[8..10].copy_from_slice(&self.x_origin.to_le_bytes());
        raw[10..12].copy_from_slice(&self.y_origin.to_le_bytes());
        raw[12..14].copy_from_slice(&self.width.to_le_bytes());
        raw[14..16].copy_from_slice(&self.height.to_le_bytes());
        raw[16] = self.bits;
        raw[17] = self.descriptor;
        raw
    }
}

/// Pixel layout of decoded data, along with the GL formats used to upload it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TargaFormat {
    /// 32 bit images, stored BGRA and uploaded as RGBA.
    Bgra,
    /// 8 bit greyscale.
    Luminance,
    /// 24 bit images. Targa stores these as BGR, but they are reported as RGB;
    /// the channel order is assumed, not checked, and red and blue come out
    /// swapped for most files.
    Rgb,
}

impl TargaFormat {
    fn from_depth(bits: u8) -> Result<Self, TargaError> {
        match bits {
            32 => Ok(TargaFormat::Bgra),
            24 => Ok(TargaFormat::Rgb),
            8 => Ok(TargaFormat::Luminance),
            other => Err(TargaError::UnsupportedDepth(other)),
        }
    }

    pub fn bytes_per_pixel(&self) -> usize {
        match *self {
            TargaFormat::Bgra => 4,
            TargaFormat::Rgb => 3,
            TargaFormat::Luminance => 1,
        }
    }

    /// Layout of the pixel data as handed to `glTexImage2D`. The core profile
    /// has no luminance format, so greyscale goes up as a single red channel.
    pub fn gl_format(&self) -> GLenum {
        match *self {
            TargaFormat::Bgra => gl::BGRA,
            TargaFormat::Rgb => gl::RGB,
            TargaFormat::Luminance => gl::RED,
        }
    }

    pub fn gl_internal_format(&self) -> GLenum {
        match *self {
            TargaFormat::Bgra => gl::RGBA,
            TargaFormat::Rgb => gl::RGB,
            TargaFormat::Luminance => gl::R8,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TargaImage {
    pub header: TargaHeader,
    pub format: TargaFormat,
    pub data: Vec<u8>,
}

impl TargaImage {
    pub fn width(&self) -> u32 {
        self.header.width as u32
    }

    pub fn height(&self) -> u32 {
        self.header.height as u32
    }
}

pub fn read_tga<P: AsRef<Path>>(path: P) -> Result<TargaImage, TargaError> {
    decode(BufReader::new(File::open(path)?))
}

pub fn decode<R: Read>(mut reader: R) -> Result<TargaImage, TargaError> {
    let mut raw = [0; HEADER_LEN];
    read_exact_or_truncated(&mut reader, &mut raw)?;
    let header = TargaHeader::parse(&raw);
    let format = TargaFormat::from_depth(header.bits)?;

    // The image ID field sits between the header and the pixel data.
    let mut ident = vec![0; header.ident_size as usize];
    read_exact_or_truncated(&mut reader, &mut ident)?;

    // The header is untrusted, so the buffer only grows as pixel data
    // actually arrives.
    let size = header.width as usize * header.height as usize * format.bytes_per_pixel();
    let mut data = Vec::new();
    reader.take(size as u64).read_to_end(&mut data)?;
    if data.len() < size {
        return Err(TargaError::Truncated { expected: size });
    }

    Ok(TargaImage { header, format, data })
}

fn read_exact_or_truncated<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<(), TargaError> {
    reader.read_exact(buf).map_err(|err| match err.kind() {
        io::ErrorKind::UnexpectedEof => TargaError::Truncated { expected: buf.len() },
        _ => TargaError::Io(err),
    })
}
