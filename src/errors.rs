use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The primary error type for all operations in `find-and-replace`.
///
/// Per-file variants (`PermissionDenied`, `Encoding`, `Read`, `Write`) are
/// reported and absorbed by the file processor. Run-level variants end the
/// whole invocation and carry an exit code.
#[derive(Error, Debug)]
pub enum Error {
    /// The search pattern is not a valid regular expression.
    #[error("Invalid regex pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// The replacement refers to a group the pattern does not define.
    #[error("Invalid replacement: {0}")]
    InvalidReplacement(String),

    /// The file glob could not be parsed.
    #[error("Invalid file pattern: {0}")]
    InvalidGlob(#[from] glob::PatternError),

    /// The file glob is absolute or climbs out of the directory.
    #[error("File pattern '{0}' must stay inside the directory.")]
    GlobOutsideRoot(String),

    /// The root directory handed to the locator does not exist.
    #[error("Directory '{}' does not exist.", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("Permission denied when accessing {}", path.display())]
    PermissionDenied { path: PathBuf },

    /// The file is not valid UTF-8 text.
    #[error("Unable to decode {}. It may be a binary file or use a different encoding.", path.display())]
    Encoding { path: PathBuf },

    #[error("Error reading {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Error writing {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    /// The user declined the global confirmation gate.
    #[error("Operation cancelled.")]
    UserCancelled,

    /// The user chose to quit at a per-file prompt.
    #[error("Quit requested.")]
    UserQuit,

    #[error("No matching files found.")]
    NoFilesFound,

    /// Reading from or writing to the terminal failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// A convenient type alias for `Result<T, find_and_replace::errors::Error>`.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Classifies a failed read of `path`.
    pub fn read(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::PermissionDenied => Error::PermissionDenied {
                path: path.to_path_buf(),
            },
            io::ErrorKind::InvalidData => Error::Encoding {
                path: path.to_path_buf(),
            },
            _ => Error::Read {
                path: path.to_path_buf(),
                source,
            },
        }
    }

    /// Classifies a failed write of `path`.
    pub fn write(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::PermissionDenied => Error::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => Error::Write {
                path: path.to_path_buf(),
                source,
            },
        }
    }

    /// The process exit code for an invocation that ended with this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidPattern(_) | Error::InvalidReplacement(_) | Error::InvalidGlob(_) => 2,
            Error::UserQuit => 130,
            _ => 1,
        }
    }

    /// Whether the runner has already shown this error on the colored channel.
    pub fn is_reported(&self) -> bool {
        !matches!(self, Error::Io(_))
    }
}
