use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the application shell.
///
/// The drawing core itself never fails: invalid input such as undo on an
/// empty history is ignored. These errors cover config loading and export.
#[derive(Debug, Error)]
pub enum SketchError {
    /// The config file could not be parsed
    #[error("invalid config file {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Reading or writing a file failed
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// PNG encoding failed
    #[error("failed to encode image: {0}")]
    Image(#[from] image::ImageError),
    /// The export worker went away before reporting back
    #[error("export was cancelled")]
    ExportCancelled,
    /// The current target has no file system to export to
    #[error("export is not supported on this platform")]
    ExportUnsupported,
}

pub type SketchResult<T> = Result<T, SketchError>;
