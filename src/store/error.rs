use thiserror::Error;

/// Failure of a single store round-trip.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Store misconfigured: {0}")]
    Configuration(String),

    #[error("Store returned {status}: {message}")]
    Api { status: u16, message: String },
}

impl StoreError {
    /// Short label used for log fields and metric labels.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Unauthorized(_) => "unauthorized",
            Self::MalformedResponse(_) => "malformed_response",
            Self::NotFound(_) => "not_found",
            Self::Configuration(_) => "configuration",
            Self::Api { .. } => "api",
        }
    }

    /// Whether the same call might succeed if issued again later.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Api { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_errors() {
        assert!(StoreError::Network("reset".into()).is_retryable());
        assert!(
            StoreError::Api {
                status: 503,
                message: "unavailable".into()
            }
            .is_retryable()
        );
        assert!(!StoreError::Unauthorized("bad key".into()).is_retryable());
        assert!(
            !StoreError::Api {
                status: 400,
                message: "bad query".into()
            }
            .is_retryable()
        );
    }

    #[test]
    fn kind_labels() {
        assert_eq!(StoreError::Network("reset".into()).kind(), "network");
        assert_eq!(
            StoreError::MalformedResponse("eof".into()).kind(),
            "malformed_response"
        );
    }
}
