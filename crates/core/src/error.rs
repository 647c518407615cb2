use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// One message per violated rule, in a stable order.
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// The storage layer could not hand out a connection in time.
    #[error("Unavailable: {0}")]
    Unavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a validation error carrying a single message.
    pub fn validation(msg: impl Into<String>) -> Self {
        CoreError::Validation(vec![msg.into()])
    }

    /// Whether the caller (not the server) is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CoreError::NotFound { .. } | CoreError::Validation(_) | CoreError::Conflict(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_display_joins_messages() {
        let err = CoreError::Validation(vec!["a is bad".into(), "b is bad".into()]);
        assert_eq!(err.to_string(), "Validation failed: a is bad; b is bad");
    }

    #[test]
    fn classification() {
        assert!(CoreError::Conflict("dup".into()).is_client_error());
        assert!(CoreError::NotFound { entity: "Product", id: 1 }.is_client_error());
        assert!(CoreError::validation("x").is_client_error());
        assert!(!CoreError::Internal("boom".into()).is_client_error());
        assert!(!CoreError::Unavailable("pool".into()).is_client_error());
    }
}
