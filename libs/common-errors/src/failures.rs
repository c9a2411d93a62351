use std::error::Error as StdError;

use thiserror::Error;

type BoxedSource = Box<dyn StdError + Send + Sync + 'static>;

/// Raised when creating a resource would violate a uniqueness constraint.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ResourceAlreadyExistsError {
    message: String,
    #[source]
    source: Option<BoxedSource>,
}

impl ResourceAlreadyExistsError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>, source: impl Into<BoxedSource>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn message(&self) -> &str { &self.message }
}

/// Wraps failures raised while processing an OAuth2 login so the security
/// layer can classify them uniformly.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct OAuth2AuthenticationProcessingError {
    message: String,
    #[source]
    source: Option<BoxedSource>,
}

impl OAuth2AuthenticationProcessingError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>, source: impl Into<BoxedSource>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn message(&self) -> &str { &self.message }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn test_already_exists_without_source() {
        let err = ResourceAlreadyExistsError::new("duplicate name");

        assert_eq!(err.to_string(), "duplicate name");
        assert!(err.source().is_none());
    }

    #[test]
    fn test_authentication_keeps_source() {
        let cause = std::io::Error::other("provider unreachable");
        let err = OAuth2AuthenticationProcessingError::with_source(
            "Login with provider failed",
            cause,
        );

        assert_eq!(err.message(), "Login with provider failed");
        let source = err.source().expect("source should be kept");
        assert_eq!(source.to_string(), "provider unreachable");
    }
}
