use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// One spec problem, located by a human-readable path (`POST /people`,
/// `components.schemas.Person.email`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub location: String,
    pub message: String,
}

impl Diagnostic {
    pub fn new(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.message)
    }
}

/// Wrapper so a diagnostic list renders one per line inside error messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostics(pub Vec<Diagnostic>);

impl Diagnostics {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for d in &self.0 {
            write!(f, "\n  - {d}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not a valid OpenAPI document: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yml::Error,
    },

    #[error("spec failed validation ({count} problem(s)):{0}", count = .0.len())]
    Invalid(Diagnostics),

    #[error("schema {schema}: {reason}")]
    Unsupported { schema: String, reason: String },

    #[error("refusing to replace {path}: {reason}")]
    UnsafeOutput { path: PathBuf, reason: String },
}

impl CodegenError {
    pub fn unsupported(schema: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Unsupported {
            schema: schema.into(),
            reason: reason.into(),
        }
    }

    /// Diagnostics carried by a validation failure (empty for other variants).
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Self::Invalid(d) => &d.0,
            _ => &[],
        }
    }
}
