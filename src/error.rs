use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("client is not set up")]
    NotSetUp,

    #[error("not ok response while trying to {operation}{context}: status {status}")]
    Provider {
        operation: &'static str,
        context: String,
        status: u16,
    },

    #[error("{operation}{context} was rejected: {message}")]
    Rejected {
        operation: &'static str,
        context: String,
        message: String,
    },

    #[error("bad response from Investec auth: {reason}")]
    Auth { status: Option<u16>, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// The HTTP status reported by the provider, if this failure carries one
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Provider { status, .. } => Some(*status),
            Error::Auth { status, .. } => *status,
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_message() {
        let err = Error::Provider {
            operation: "get balance",
            context: " (account_id=A1)".to_string(),
            status: 404,
        };
        assert_eq!(
            err.to_string(),
            "not ok response while trying to get balance (account_id=A1): status 404"
        );
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_rejected_error_message() {
        let err = Error::Rejected {
            operation: "perform transfer for account",
            context: " (account_id=A1)".to_string(),
            message: "Insufficient funds".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "perform transfer for account (account_id=A1) was rejected: Insufficient funds"
        );
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_not_set_up_has_no_status() {
        assert_eq!(Error::NotSetUp.status(), None);
        assert_eq!(Error::NotSetUp.to_string(), "client is not set up");
    }
}
