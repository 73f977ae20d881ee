use super::StoreError;

/// Top-level error for every forget table operation.
#[derive(Debug, thiserror::Error)]
pub enum ForgetError {
    #[error("collection not found: {name}")]
    NotFound { name: String },

    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("store unavailable: {0}")]
    StoreUnavailable(StoreError),

    #[error("timed out during {operation} after {timeout_ms}ms")]
    Timeout { operation: String, timeout_ms: u32 },

    #[error("{name} lost to a concurrent decay {attempts} times")]
    DecayConflict { name: String, attempts: u32 },

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("corrupt metadata at {key}: {value:?}")]
    CorruptMetadata { key: String, value: String },
}

impl ForgetError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// True for failures that came from the backing store rather than the caller.
    pub fn is_store_failure(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_) | Self::Timeout { .. })
    }
}

impl From<StoreError> for ForgetError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Busy {
                operation,
                timeout_ms,
            } => Self::Timeout {
                operation,
                timeout_ms,
            },
            other => Self::StoreUnavailable(other),
        }
    }
}
