use std::path::{Path, PathBuf};
use std::{fmt, io};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("[SECTION MISSING] {message}")]
    SectionMissing { message: String },
    #[error("[NAME MISSING] {key} not in {section}")]
    NameMissing { key: String, section: String },
    #[error("[VALUE MISSING] value for {key} is missing")]
    ValueMissing { key: String },
    #[error("[TYPE MISMATCH] the type for {key} is not {expected}")]
    TypeMismatch { key: String, expected: Expected },
    #[error("[SYNTAX] line {line}: {reason}: {text:?}")]
    Syntax {
        line: usize,
        text: String,
        reason: &'static str,
    },
    #[error("[IO] {}{source}", location(.path.as_deref()))]
    Io {
        path: Option<PathBuf>,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn section_missing(message: impl Into<String>) -> Self {
        Self::SectionMissing {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match *self {
            Self::SectionMissing { .. } => ErrorKind::SectionMissing,
            Self::NameMissing { .. } => ErrorKind::NameMissing,
            Self::ValueMissing { .. } => ErrorKind::ValueMissing,
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Self::Syntax { .. } => ErrorKind::Syntax,
            Self::Io { .. } => ErrorKind::Io,
        }
    }
}

fn location(path: Option<&Path>) -> String {
    path.map(|p| format!("{}: ", p.display())).unwrap_or_default()
}

/// Category of an [`Error`], independent of the data it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    SectionMissing,
    NameMissing,
    ValueMissing,
    TypeMismatch,
    Syntax,
    Io,
}

impl ErrorKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::SectionMissing => "SECTION MISSING",
            Self::NameMissing => "NAME MISSING",
            Self::ValueMissing => "VALUE MISSING",
            Self::TypeMismatch => "TYPE MISMATCH",
            Self::Syntax => "SYNTAX",
            Self::Io => "IO",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.label().fmt(f)
    }
}

/// The type a typed getter was asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Int,
    Float,
    Double,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Int => "an int".fmt(f),
            Self::Float => "a float".fmt(f),
            Self::Double => "a double".fmt(f),
        }
    }
}
