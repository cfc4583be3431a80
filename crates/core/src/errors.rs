use std::path::PathBuf;

/// Result type alias for taskpick operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for taskpick operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Manifest (package.json) parsing errors
    #[error("failed to parse manifest '{path}': {message}")]
    ManifestParse {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Build file (Makefile) parsing errors
    #[error("failed to parse build file '{path}': {message}")]
    BuildFileParse { path: PathBuf, message: String },

    /// Command execution errors
    #[error("{}", format_command_error(.command, .args, .message, .exit_code))]
    CommandExecution {
        command: String,
        args: Vec<String>,
        message: String,
        exit_code: Option<i32>,
    },

    /// Configuration errors
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// File system operations
    #[error("file system {operation} operation failed for '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// Directory walk errors
    #[error("failed to walk '{path}': {message}")]
    Walk { path: PathBuf, message: String },

    /// Cache store errors
    #[error("cache store error for '{path}': {message}")]
    CacheStore { path: PathBuf, message: String },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

fn format_command_error(
    command: &str,
    args: &[String],
    message: &str,
    exit_code: &Option<i32>,
) -> String {
    let invocation = if args.is_empty() {
        command.to_string()
    } else {
        format!("{command} {}", args.join(" "))
    };
    match exit_code {
        Some(code) => format!("command '{invocation}' failed with exit code {code}: {message}"),
        None => format!("command '{invocation}' failed: {message}"),
    }
}

// Conversion implementations
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::FileSystem {
            path: PathBuf::new(),
            operation: "unknown".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Json {
            message: error.to_string(),
            source: error,
        }
    }
}

// Helper methods for creating errors with context
impl Error {
    /// Create a manifest parse error with a source error
    #[must_use]
    pub fn manifest_parse_with_source(
        path: impl Into<PathBuf>,
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Error::ManifestParse {
            path: path.into(),
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a build file parse error
    #[must_use]
    pub fn build_file_parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::BuildFileParse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a command execution error
    #[must_use]
    pub fn command_execution(
        command: impl Into<String>,
        args: Vec<String>,
        message: impl Into<String>,
        exit_code: Option<i32>,
    ) -> Self {
        Error::CommandExecution {
            command: command.into(),
            args,
            message: message.into(),
            exit_code,
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Create a file system error with context
    #[must_use]
    pub fn file_system(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Error::FileSystem {
            path: path.into(),
            operation: operation.into(),
            source,
        }
    }

    /// Create a directory walk error
    #[must_use]
    pub fn walk(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::Walk {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a cache store error
    #[must_use]
    pub fn cache_store(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::CacheStore {
            path: path.into(),
            message: message.into(),
        }
    }
}

// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to a Result
    fn context(self, message: impl Into<String>) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let base_error = e.into();
            Error::Configuration {
                message: format!("{}: {}", message.into(), base_error),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_error_includes_exit_code() {
        let err = Error::command_execution("pnpm", vec!["run".into(), "build".into()], "exited", Some(2));
        assert_eq!(
            err.to_string(),
            "command 'pnpm run build' failed with exit code 2: exited"
        );
    }

    #[test]
    fn command_error_without_args() {
        let err = Error::command_execution("make", vec![], "not found", None);
        assert_eq!(err.to_string(), "command 'make' failed: not found");
    }

    #[test]
    fn walk_error_names_the_directory() {
        let err = Error::walk("/repo/locked", "permission denied");
        assert_eq!(err.to_string(), "failed to walk '/repo/locked': permission denied");
    }

    #[test]
    fn context_wraps_message() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "gone",
        ));
        let err = result.context("reading cache").unwrap_err();
        assert!(err.to_string().starts_with("configuration error: reading cache:"));
    }
}
