//! Building blocks for a series of small OpenGL tutorial programs: typed GL
//! object wrappers, a shader program builder, a plain Targa decoder and the
//! window/event loop harness the programs in `src/bin` run on.

pub use gl;

#[macro_use]
pub mod gl_api;

pub mod config;
pub mod demo;
pub mod file;
pub mod geometry;
pub mod targa;
pub mod transform;
