use thiserror::Error;

/// Errors from store operations (used by trait definitions in keyscope-core).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store connection error: {0}")]
    Connection(String),

    #[error("store command failed: {0}")]
    Command(String),

    #[error("unexpected store reply: {0}")]
    UnexpectedReply(String),
}

/// Errors surfaced by the console service to its callers (HTTP, CLI).
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("key '{0}' not found")]
    KeyNotFound(String),

    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}

impl From<StoreError> for ConsoleError {
    fn from(e: StoreError) -> Self {
        ConsoleError::StoreUnavailable(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::Command("WRONGTYPE".to_string());
        assert_eq!(err.to_string(), "store command failed: WRONGTYPE");
    }

    #[test]
    fn test_key_not_found_display() {
        let err = ConsoleError::KeyNotFound("user:1".to_string());
        assert_eq!(err.to_string(), "key 'user:1' not found");
    }

    #[test]
    fn test_store_error_converts_to_unavailable() {
        let err: ConsoleError = StoreError::Connection("refused".to_string()).into();
        assert!(matches!(err, ConsoleError::StoreUnavailable(ref msg) if msg.contains("refused")));
    }
}
