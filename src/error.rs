use std::path::PathBuf;

use thiserror::Error;

/// Library error type. The binary wraps these in `anyhow` with context.
#[derive(Debug, Error)]
pub enum Error {
    #[error("not a valid archive: {0}")]
    InvalidFormat(String),

    #[error("lump `{name}` at offset {offset} (length {length}) runs past end of data ({data_len} bytes)")]
    TruncatedLump {
        name: String,
        offset: i64,
        length: i64,
        data_len: usize,
    },

    #[error("no valid source images supplied")]
    MissingInput,

    #[error("`{tool}` failed: {status}")]
    ExternalToolFailure { tool: PathBuf, status: String },

    #[error("binary record error: {0}")]
    Binary(#[from] binrw::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
