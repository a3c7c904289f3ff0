//! Domain error types.

/// Top-level error type for compounder.
#[derive(Debug, thiserror::Error)]
pub enum CompounderError {
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("upstream data error: {reason}")]
    UpstreamData { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CompounderError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        CompounderError::InvalidInput {
            reason: reason.into(),
        }
    }

    pub fn upstream(reason: impl Into<String>) -> Self {
        CompounderError::UpstreamData {
            reason: reason.into(),
        }
    }
}

impl From<&CompounderError> for std::process::ExitCode {
    fn from(err: &CompounderError) -> Self {
        let code: u8 = match err {
            CompounderError::Io(_) => 1,
            CompounderError::ConfigParse { .. }
            | CompounderError::ConfigMissing { .. }
            | CompounderError::ConfigInvalid { .. } => 2,
            CompounderError::InvalidInput { .. } => 3,
            CompounderError::UpstreamData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
