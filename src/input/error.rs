//! Bridge error types

use thiserror::Error;

use crate::protocol::SessionId;

/// Result type for bridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Bridge error types
#[derive(Error, Debug)]
pub enum BridgeError {
    /// A live touch session already exists for this protocol session id.
    ///
    /// Raised when the decoder delivers a second add without an intervening
    /// remove; overwriting the entry would leak the previous touch session.
    #[error("Duplicate protocol session {0}: a live touch session already exists")]
    DuplicateSession(SessionId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_session_message() {
        let err = BridgeError::DuplicateSession(SessionId(17));
        assert_eq!(
            err.to_string(),
            "Duplicate protocol session 17: a live touch session already exists"
        );
    }
}
