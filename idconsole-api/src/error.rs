// Error types for the typed console API

use idconsole_http::HttpClientError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Http(#[from] HttpClientError),

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Invalid input: {0}")]
    Validation(String),
}

impl ApiError {
    /// HTTP status behind the error, if the server answered.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http(e) => e.status_code(),
            _ => None,
        }
    }

    /// Whether the session is missing or lacks permission.
    pub fn is_unauthorized(&self) -> bool {
        match self {
            Self::NotAuthenticated => true,
            Self::Http(e) => e.is_unauthorized(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_message_passes_through() {
        let err = ApiError::from(HttpClientError::Response {
            status: 409,
            message: "Username already exists".into(),
        });
        assert_eq!(err.to_string(), "Username already exists");
        assert_eq!(err.status_code(), Some(409));
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn test_unauthorized() {
        assert!(ApiError::NotAuthenticated.is_unauthorized());
        assert!(
            ApiError::from(HttpClientError::Response {
                status: 403,
                message: "HTTP 403".into(),
            })
            .is_unauthorized()
        );
        assert!(!ApiError::Validation("x".into()).is_unauthorized());
    }
}
