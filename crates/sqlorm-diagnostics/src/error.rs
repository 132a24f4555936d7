//! sqlorm error types

use crate::ErrorCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A diagnostic message tied to the expression that produced it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Rendering of the offending expression node
    pub node: Option<String>,
    /// Additional context or help
    pub help: Option<String>,
}

impl Diagnostic {
    /// Create a new error diagnostic
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            node: None,
            help: None,
        }
    }

    /// Set the offending node
    pub fn with_node(mut self, node: impl Into<String>) -> Self {
        self.node = Some(node.into());
        self
    }

    /// Set help text
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error: {} - {}", self.code, self.message)?;
        if let Some(node) = &self.node {
            write!(f, " in `{}`", node)?;
        }
        Ok(())
    }
}

/// Main sqlorm error type
#[derive(Debug, Clone, Error)]
pub enum OrmError {
    /// Result-type resolution error
    #[error("{code}: {message}")]
    Resolution {
        code: ErrorCode,
        message: String,
        node: Option<String>,
        context: Option<String>,
    },

    /// Schema / catalog error
    #[error("{code}: {message}")]
    Schema {
        code: ErrorCode,
        message: String,
        object: Option<String>,
        context: Option<String>,
    },

    /// Configuration error
    #[error("{code}: {message}")]
    Config {
        code: ErrorCode,
        message: String,
        context: Option<String>,
    },

    /// System error
    #[error("{code}: {message}")]
    System {
        code: ErrorCode,
        message: String,
        context: Option<String>,
    },
}

impl OrmError {
    /// Create a resolution error
    pub fn resolution(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Resolution {
            code,
            message: message.into(),
            node: None,
            context: None,
        }
    }

    /// Create a schema error
    pub fn schema(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Schema {
            code,
            message: message.into(),
            object: None,
            context: None,
        }
    }

    /// Create a configuration error
    pub fn config(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Config {
            code,
            message: message.into(),
            context: None,
        }
    }

    /// Create a system error
    pub fn system(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::System {
            code,
            message: message.into(),
            context: None,
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Resolution { code, .. } => *code,
            Self::Schema { code, .. } => *code,
            Self::Config { code, .. } => *code,
            Self::System { code, .. } => *code,
        }
    }

    /// Get the offending node rendering if available
    pub fn node(&self) -> Option<&str> {
        match self {
            Self::Resolution { node, .. } => node.as_deref(),
            _ => None,
        }
    }

    /// Convert to a diagnostic
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Self::Resolution { code, message, node, context } => {
                let mut diag = Diagnostic::error(*code, message.clone());
                if let Some(node) = node {
                    diag = diag.with_node(node.clone());
                }
                if let Some(help) = context.as_deref().or(code.info().help) {
                    diag = diag.with_help(help);
                }
                diag
            }
            Self::Schema { code, message, object, context } => {
                let mut diag = Diagnostic::error(*code, message.clone());
                if let Some(object) = object {
                    diag = diag.with_node(object.clone());
                }
                if let Some(ctx) = context {
                    diag = diag.with_help(ctx.clone());
                }
                diag
            }
            Self::Config { code, message, context } | Self::System { code, message, context } => {
                let mut diag = Diagnostic::error(*code, message.clone());
                if let Some(ctx) = context {
                    diag = diag.with_help(ctx.clone());
                }
                diag
            }
        }
    }
}

/// Builder for creating sqlorm errors with fluent API
pub struct ErrorBuilder {
    code: ErrorCode,
    message: String,
    node: Option<String>,
    context: Option<String>,
}

impl ErrorBuilder {
    /// Create a new error builder
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            node: None,
            context: None,
        }
    }

    /// Attach the offending node (or object name for schema errors)
    pub fn node(mut self, node: impl Into<String>) -> Self {
        self.node = Some(node.into());
        self
    }

    /// Add context information
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Build a resolution error
    pub fn resolution(self) -> OrmError {
        OrmError::Resolution {
            code: self.code,
            message: self.message,
            node: self.node,
            context: self.context,
        }
    }

    /// Build a schema error
    pub fn schema(self) -> OrmError {
        OrmError::Schema {
            code: self.code,
            message: self.message,
            object: self.node,
            context: self.context,
        }
    }

    /// Build a configuration error
    pub fn config(self) -> OrmError {
        OrmError::Config {
            code: self.code,
            message: self.message,
            context: self.context,
        }
    }

    /// Build a system error
    pub fn system(self) -> OrmError {
        OrmError::System {
            code: self.code,
            message: self.message,
            context: self.context,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ORM0100, ORM0101};

    #[test]
    fn test_error_builder() {
        let err = ErrorBuilder::new(ORM0100, "No such column mapped into 'cte1'")
            .node("cte1.total")
            .context("relation columns: [count]")
            .resolution();

        assert!(matches!(err, OrmError::Resolution { .. }));
        assert_eq!(err.code(), ORM0100);
        assert_eq!(err.node(), Some("cte1.total"));
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::error(ORM0101, "Compound select arms differ")
            .with_node("SELECT name UNION SELECT age");

        let text = diag.to_string();
        assert!(text.starts_with("error: ORM0101"));
        assert!(text.contains("SELECT name UNION SELECT age"));
    }

    #[test]
    fn test_resolution_diagnostic_falls_back_to_code_help() {
        let diag = OrmError::resolution(ORM0101, "arms differ").to_diagnostic();
        assert_eq!(diag.help.as_deref(), ORM0101.info().help);
    }
}
