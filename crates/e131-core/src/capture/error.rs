use std::path::PathBuf;

use thiserror::Error;

/// Errors returned while building or writing a capture file.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("failed to build frame: {0}")]
    Build(String),
    #[error("frame too large for capture: {len} bytes")]
    FrameTooLarge { len: usize },
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}
