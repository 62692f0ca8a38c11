/// Error types shared by the viewer core
use std::fmt;

/// Convenience alias used throughout the core
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the core
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    MeshParse(#[from] MeshParseError),

    #[error(
        "Invalid projection parameters: fov={fov}, aspect={aspect}, near={near}, far={far}"
    )]
    InvalidProjection {
        fov: f32,
        aspect: f32,
        near: f32,
        far: f32,
    },

    #[error("Unknown model: {0}")]
    UnknownModel(String),
}

/// A mesh text line that could not be turned into geometry
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("Malformed mesh data at line {line} ({kind}): {text:?}")]
pub struct MeshParseError {
    /// 1-based line number within the source text
    pub line: usize,
    /// The raw, untrimmed line
    pub text: String,
    pub kind: MeshParseErrorKind,
}

/// What exactly went wrong on a rejected line
#[derive(Debug, Clone, PartialEq)]
pub enum MeshParseErrorKind {
    /// A coordinate was missing or not a number
    InvalidNumber,
    /// A vertex directive carried the wrong number of values
    ArgumentCount(usize),
    /// A face listed fewer than three references
    TooFewFaceVertices(usize),
    /// A face reference was not of the form `p[/t][/n]`
    InvalidFaceReference(String),
    /// A reference resolved outside the populated range
    IndexOutOfRange {
        attribute: &'static str,
        index: i64,
        len: usize,
    },
}

impl fmt::Display for MeshParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNumber => write!(f, "invalid number"),
            Self::ArgumentCount(n) => write!(f, "unexpected number of values: {}", n),
            Self::TooFewFaceVertices(n) => write!(f, "face has {} vertices, need at least 3", n),
            Self::InvalidFaceReference(token) => write!(f, "invalid face reference '{}'", token),
            Self::IndexOutOfRange {
                attribute,
                index,
                len,
            } => write!(
                f,
                "{} index {} out of range (1..={})",
                attribute,
                index,
                len.saturating_sub(1)
            ),
        }
    }
}
