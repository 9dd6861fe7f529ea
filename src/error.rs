use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid color specification '{spec}'")]
    InvalidColor { spec: String },

    #[error("invalid icon size {size}: must be between 1 and {max}")]
    InvalidSize { size: u32, max: u32 },

    #[error("failed to create output directory '{}': {source}", path.display())]
    DirectoryCreateFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write icon '{}': {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to read config file '{}': {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("config line {line}: {message}")]
    ConfigInvalid { line: usize, message: String },
}
