//! Error type shared by the whole pipeline.
//!
//! Every failure here is local and synchronous: the call that hits it returns
//! immediately and no partially transformed geometry is rasterized.
//! Off-screen pixels are *not* errors; they are dropped by the frame buffer.

use std::fmt;

use crate::buffers::{BufferId, BufferKind};
use crate::rasterizer::Primitive;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// Operand dimensions don't fit the operation.
    ShapeMismatch {
        operation: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },
    /// The requested primitive kind has no rasterizer.
    UnsupportedPrimitive(Primitive),
    /// An index points past the end of the sequence it refers to.
    IndexOutOfRange {
        what: &'static str,
        index: i64,
        len: usize,
    },
    /// No buffer of the given kind was registered under this id.
    BufferNotFound { kind: BufferKind, id: BufferId },
    /// Perspective divide by a zero homogeneous component.
    DegenerateHomogeneous,
    /// Malformed mesh record (1-based line number).
    Parse { line: usize, message: String },
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ShapeMismatch {
                operation,
                left,
                right,
            } => write!(
                f,
                "shape mismatch in {}: {}x{} vs {}x{}",
                operation, left.0, left.1, right.0, right.1
            ),
            Error::UnsupportedPrimitive(primitive) => {
                write!(f, "unsupported primitive: {:?}", primitive)
            }
            Error::IndexOutOfRange { what, index, len } => {
                write!(f, "{} index {} out of range (len {})", what, index, len)
            }
            Error::BufferNotFound { kind, id } => {
                write!(f, "no {} buffer with id {}", kind, id)
            }
            Error::DegenerateHomogeneous => {
                write!(f, "cannot perspective-divide a point with w = 0")
            }
            Error::Parse { line, message } => write!(f, "line {}: {}", line, message),
            Error::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
