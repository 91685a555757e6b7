use thiserror::Error;

/// A schema document that failed to parse. Fatal: schema validity is a
/// precondition the caller guarantees.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("invalid JSON schema document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid YAML schema document: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Failure reported by a submit or save-draft hook. Recoverable: the wizard
/// stays in place with the busy flag cleared, ready for a manual retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct HookError {
    message: String,
}

impl HookError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}
