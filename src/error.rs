use thiserror::Error;

/// Result type alias for osprey operations.
pub type Result<T> = std::result::Result<T, OspreyError>;

/// Errors that can occur while driving a scaffolding run.
///
/// Configuration and watch-setup errors are fatal at startup; tool errors
/// are recovered locally and the run retries on the next trigger.
#[derive(Error, Debug)]
pub enum OspreyError {
    /// Missing or contradictory startup parameters.
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error with context.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// An external tool could not be spawned or exited unsuccessfully.
    #[error("{tool} invocation failed: {message}")]
    Tool { tool: &'static str, message: String },

    /// An external tool ran but its output was missing or unusable.
    #[error("{tool} produced unusable output: {detail}")]
    ToolOutput { tool: &'static str, detail: String },

    /// Filesystem watch could not be established or broke down.
    #[error("filesystem watch failed: {0}")]
    Watch(#[from] notify::Error),
}

impl OspreyError {
    /// Create an IO error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io { context: context.into(), source }
    }

    /// Create an external-tool failure.
    pub fn tool(tool: &'static str, message: impl Into<String>) -> Self {
        Self::Tool { tool, message: message.into() }
    }

    /// Recoverable errors leave the run going; the next trigger retries.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Tool { .. } | Self::ToolOutput { .. })
    }
}
