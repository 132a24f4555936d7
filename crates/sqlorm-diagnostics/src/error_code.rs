//! sqlorm error codes following a structured numbering system
//!
//! Error code ranges:
//! - ORM0100-ORM0199: Resolution errors (result-type resolution)
//! - ORM0200-ORM0299: Schema errors (catalog lookups and loading)
//! - ORM0300-ORM0399: Configuration errors (serialization flags)
//! - ORM0400-ORM0499: System errors (I/O)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Error code identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorCode(u16);

impl ErrorCode {
    /// Create a new error code
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Get the numeric code
    pub const fn code(&self) -> u16 {
        self.0
    }

    /// Get error information for this code
    pub fn info(&self) -> &'static ErrorInfo {
        ERROR_INFO.get(&self.0).unwrap_or(&UNKNOWN_ERROR)
    }

    /// Check if this is a resolution error (0100-0199)
    pub const fn is_resolution_error(&self) -> bool {
        self.0 >= 100 && self.0 < 200
    }

    /// Check if this is a schema error (0200-0299)
    pub const fn is_schema_error(&self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    /// Check if this is a configuration error (0300-0399)
    pub const fn is_config_error(&self) -> bool {
        self.0 >= 300 && self.0 < 400
    }

    /// Check if this is a system error (0400-0499)
    pub const fn is_system_error(&self) -> bool {
        self.0 >= 400 && self.0 < 500
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ORM{:04}", self.0)
    }
}

/// Information about an error code
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    /// Short description of the error
    pub description: &'static str,
    /// Detailed help text
    pub help: Option<&'static str>,
}

impl ErrorInfo {
    const fn new(description: &'static str) -> Self {
        Self {
            description,
            help: None,
        }
    }

    const fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }
}

static UNKNOWN_ERROR: ErrorInfo = ErrorInfo::new("Unknown error");

static ERROR_INFO: LazyLock<HashMap<u16, ErrorInfo>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    // Resolution errors (0100-0199)
    map.insert(100, ErrorInfo::new("Unmapped member")
        .with_help("The member or alias is not part of the named relation's column list"));
    map.insert(101, ErrorInfo::new("Incompatible branch types")
        .with_help("Both arms of a compound select must return the same column types"));
    map.insert(102, ErrorInfo::new("Not a data field")
        .with_help("Member functions cannot be selected as columns; use a getter accessor"));
    map.insert(103, ErrorInfo::new("Unknown object type"));
    map.insert(104, ErrorInfo::new("Unknown relation"));
    map.insert(105, ErrorInfo::new("Unknown table alias"));
    map.insert(106, ErrorInfo::new("Column index out of range"));
    map.insert(107, ErrorInfo::new("Missing function argument"));
    map.insert(108, ErrorInfo::new("Cyclic relation reference"));

    // Schema errors (0200-0299)
    map.insert(200, ErrorInfo::new("Schema load failed"));
    map.insert(201, ErrorInfo::new("Duplicate column"));
    map.insert(202, ErrorInfo::new("Alias target not mapped"));
    map.insert(203, ErrorInfo::new("Unsupported schema file"));

    // Configuration errors (0300-0399)
    map.insert(300, ErrorInfo::new("Invalid serialization flags"));

    // System errors (0400-0499)
    map.insert(401, ErrorInfo::new("I/O error"));

    map
});

// Resolution errors
pub const ORM0100: ErrorCode = ErrorCode::new(100);
pub const ORM0101: ErrorCode = ErrorCode::new(101);
pub const ORM0102: ErrorCode = ErrorCode::new(102);
pub const ORM0103: ErrorCode = ErrorCode::new(103);
pub const ORM0104: ErrorCode = ErrorCode::new(104);
pub const ORM0105: ErrorCode = ErrorCode::new(105);
pub const ORM0106: ErrorCode = ErrorCode::new(106);
pub const ORM0107: ErrorCode = ErrorCode::new(107);
pub const ORM0108: ErrorCode = ErrorCode::new(108);

// Schema errors
pub const ORM0200: ErrorCode = ErrorCode::new(200);
pub const ORM0201: ErrorCode = ErrorCode::new(201);
pub const ORM0202: ErrorCode = ErrorCode::new(202);
pub const ORM0203: ErrorCode = ErrorCode::new(203);

// Configuration errors
pub const ORM0300: ErrorCode = ErrorCode::new(300);

// System errors
pub const ORM0401: ErrorCode = ErrorCode::new(401);
