use std::path::PathBuf;

/// Errors that can occur when building agents or loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown agent kind '{0}'")]
    UnknownAgent(String),

    #[error("invalid value for {param}: {reason}")]
    InvalidParam { param: &'static str, reason: String },

    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Errors that can occur when saving a value table.
///
/// Loading never fails: an unreadable table is replaced by an empty one.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("failed to write value table to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_agent_display() {
        let err = ConfigError::UnknownAgent("deepblue".to_string());
        assert_eq!(err.to_string(), "unknown agent kind 'deepblue'");
    }

    #[test]
    fn test_invalid_param_display() {
        let err = ConfigError::InvalidParam {
            param: "alpha",
            reason: "must be in [0, 1]".to_string(),
        };
        assert_eq!(err.to_string(), "invalid value for alpha: must be in [0, 1]");
    }

    #[test]
    fn test_table_error_display() {
        let err = TableError::Write {
            path: PathBuf::from("trained/q_table.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(
            err.to_string(),
            "failed to write value table to trained/q_table.json: denied"
        );
    }
}
