use std::ffi::CString;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("file contains a nul byte at offset {0}")]
    InteriorNul(usize),
}

/// Reads the whole file at `path` into memory, in binary mode, and returns it
/// as a nul-terminated buffer that can be handed straight to the driver.
///
/// A file of N bytes yields exactly N bytes followed by the terminator. Empty
/// files are fine.
pub fn read_all_text<P: AsRef<Path>>(path: P) -> Result<CString, FileError> {
    let mut file = File::open(path)?;
    let mut contents = Vec::with_capacity(file.metadata().map(|m| m.len() as usize + 1).unwrap_or(0));
    file.read_to_end(&mut contents)?;

    CString::new(contents).map_err(|err| FileError::InteriorNul(err.nul_position()))
}
