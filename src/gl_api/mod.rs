#[macro_use]
pub mod error;

pub mod buffer;
pub mod layout;
pub mod shader;
pub mod texture;
pub mod uniform;
pub mod vertex_array;
