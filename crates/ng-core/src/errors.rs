//! Structured error types shared across the null-graph crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`NgError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (indices, sums, shapes).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for graph construction and sampling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum NgError {
    /// Degree vectors, fixed matrix or seed matrix have incompatible shapes.
    #[error("input shape error: {0}")]
    InputShape(ErrorInfo),
    /// A degree or matrix entry lies outside its admissible range.
    #[error("input range error: {0}")]
    InputRange(ErrorInfo),
    /// No matrix satisfies the degree sequences together with the fixed pattern.
    #[error("infeasible: {0}")]
    Infeasible(ErrorInfo),
    /// A sampling step found no valid candidate edit. Recovered inside the sampler.
    #[error("rigid step: {0}")]
    Rigid(ErrorInfo),
    /// Sampling parameters or configuration files are invalid.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Serialization and IO errors at the host surface.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl NgError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            NgError::InputShape(info)
            | NgError::InputRange(info)
            | NgError::Infeasible(info)
            | NgError::Rigid(info)
            | NgError::Config(info)
            | NgError::Serde(info) => info,
        }
    }

    /// Returns true for errors raised by input validation rather than by construction.
    pub fn is_validation(&self) -> bool {
        matches!(self, NgError::InputShape(_) | NgError::InputRange(_))
    }
}
