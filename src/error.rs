// src/error.rs

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while assembling a picture or looking up a
/// space group.
///
/// `LengthMismatch` is the only condition detected while the render
/// configuration is being assembled. All other variants are data errors
/// raised by the collaborators (structure reader, scene writer, symmetry
/// search, the `povray` process) and are passed through unchanged.
#[derive(Debug, Error)]
pub enum Error {
    #[error("length mismatch: {indices} atom indices but {values} values")]
    LengthMismatch { indices: usize, values: usize },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}:{line}: {message}")]
    Parse {
        path: String,
        line: usize,
        message: String,
    },

    #[error("repeat factors must be at least 1, got {0:?}")]
    InvalidRepeat([u32; 3]),

    #[error("invalid lattice: {0}")]
    InvalidLattice(String),

    #[error("no space group found within symprec={symprec}")]
    SymmetryNotFound { symprec: f64 },

    #[error("invalid render option: {0}")]
    InvalidOption(String),

    #[error("invalid rotation string {0:?} (expected e.g. \"10x,-20y,5z\")")]
    InvalidRotation(String),

    #[error("unknown texture {0:?}")]
    UnknownTexture(String),

    #[error("atom index {index} out of range for a structure with {count} atoms")]
    AtomIndexOutOfRange { index: usize, count: usize },

    #[error("povray exited with {0}")]
    PovRay(String),

    #[error("style file error: {0}")]
    Style(#[from] serde_json::Error),
}

impl Error {
    /// True for every condition reported by a collaborator rather than the
    /// configuration builder itself.
    pub fn is_data_error(&self) -> bool {
        !matches!(self, Error::LengthMismatch { .. })
    }

    pub(crate) fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
