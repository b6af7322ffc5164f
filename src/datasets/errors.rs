use std::path::PathBuf;

/// Failures while reading a dataset folder or writing a split.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// The dataset root or a class folder could not be listed.
    #[error("Failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
    /// An output directory could not be created.
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A file copy into the split tree failed.
    #[error("Failed to copy {from} to {to}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
    /// The dataset root has no parent to place a generated output folder in.
    #[error("Cannot derive an output folder next to {0}")]
    NoParent(PathBuf),
    /// Formatting the timestamp for a generated output folder failed.
    #[error("Failed to format output folder time: {0}")]
    FormatTime(#[from] time::error::Format),
}
