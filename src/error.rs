//! Error types for stroke2font
//!
//! All modules use `StrokeResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for stroke2font operations
pub type StrokeResult<T> = Result<T, StrokeError>;

/// All errors that can occur while building an icon font
#[derive(Error, Debug)]
pub enum StrokeError {
    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Configuration file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("Missing or invalid --{0}")]
    MissingOption(&'static str),

    // External tool errors
    #[error("Required tool not found: {name}")]
    ToolNotFound {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} exited with code {code}:\n{output}")]
    ToolFailed {
        tool: String,
        code: i32,
        output: String,
    },

    #[error("{tool} did not finish within {secs}s")]
    ToolTimeout { tool: String, secs: u64 },

    // Template errors
    #[error("CSS template error: {0}")]
    Template(String),

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl StrokeError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a tool failure from its exit code and captured output
    pub fn tool_failed(tool: impl Into<String>, code: i32, output: impl Into<String>) -> Self {
        Self::ToolFailed {
            tool: tool.into(),
            code,
            output: output.into(),
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::ToolNotFound { name, .. } if name.contains("fantasticon") => {
                Some("Run: npm install -g fantasticon")
            }
            Self::ToolNotFound { name, .. } if name.contains("svg-fixer") => {
                Some("Run: npm install -g oslllo-svg-fixer")
            }
            Self::ToolNotFound { .. } => Some("Check the [tools] section of stroke2font.toml"),
            Self::MissingOption(_) => Some("Pass --config <file> or --in, --out and --name"),
            _ => None,
        }
    }
}
