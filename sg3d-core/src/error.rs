/// Error types shared across the crate
use std::fmt;
use std::io;

/// Errors from the vector/matrix algebra.
///
/// These indicate a caller built inconsistent data and should be surfaced
/// immediately rather than recovered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MathError {
    /// A binary vector operation was given operands of unequal length.
    DimensionMismatch { expected: usize, actual: usize },
}

impl fmt::Display for MathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MathError::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "vector dimension mismatch: expected {} components, got {}",
                    expected, actual
                )
            }
        }
    }
}

impl std::error::Error for MathError {}

/// Errors from mesh construction and mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum MeshError {
    /// A color specification had a non-finite component or the wrong
    /// per-vertex cardinality.
    InvalidColorSpec(String),
    /// Loaded model data contained no vertices or no faces.
    EmptyModelData,
    /// A face referenced a vertex index past the end of the vertex list.
    FaceIndexOutOfBounds { face: usize, index: usize },
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshError::InvalidColorSpec(reason) => {
                write!(f, "invalid color specification: {}", reason)
            }
            MeshError::EmptyModelData => write!(f, "model data contains no geometry"),
            MeshError::FaceIndexOutOfBounds { face, index } => {
                write!(f, "face {} references out-of-bounds vertex {}", face, index)
            }
        }
    }
}

impl std::error::Error for MeshError {}

/// Errors from fetching or parsing a model file.
///
/// These are environmental: the load boundary catches them, logs them and
/// resolves the load to an absent object so the rest of the scene keeps
/// rendering.
#[derive(Debug)]
pub enum LoadError {
    /// The model file could not be read.
    Io(io::Error),
    /// The parse produced no vertices or no faces.
    EmptyModel,
    /// The loader thread exited without delivering a result.
    Worker,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(err) => write!(f, "failed to read model file: {}", err),
            LoadError::EmptyModel => write!(f, "model file parsed to empty geometry"),
            LoadError::Worker => write!(f, "model loader thread exited unexpectedly"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(value: io::Error) -> Self {
        LoadError::Io(value)
    }
}
