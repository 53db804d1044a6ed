use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApifyError>;

#[derive(Debug, Error)]
pub enum ApifyError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication rejected (status {status}): {message}")]
    Auth { status: u16, message: String },

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Run {run_id} finished with status: {status}")]
    RunFailed { run_id: String, status: String },
}

impl ApifyError {
    /// Classify a non-success HTTP response from the platform.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 | 403 => ApifyError::Auth { status, message },
            _ => ApifyError::Api { status, message },
        }
    }

    /// Short machine-readable tag, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ApifyError::Network(_) => "network",
            ApifyError::Auth { .. } => "auth",
            ApifyError::Api { .. } => "api",
            ApifyError::Parse(_) => "parse",
            ApifyError::RunFailed { .. } => "run_failed",
        }
    }
}

impl From<reqwest::Error> for ApifyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApifyError::Parse(err.to_string())
        } else {
            ApifyError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApifyError {
    fn from(err: serde_json::Error) -> Self {
        ApifyError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_and_forbidden_are_auth_errors() {
        assert!(matches!(
            ApifyError::from_status(401, "bad token".into()),
            ApifyError::Auth { status: 401, .. }
        ));
        assert!(matches!(
            ApifyError::from_status(403, "no access".into()),
            ApifyError::Auth { status: 403, .. }
        ));
    }

    #[test]
    fn other_statuses_are_api_errors() {
        let err = ApifyError::from_status(402, "quota exceeded".into());
        assert_eq!(err.kind(), "api");
        assert_eq!(err.to_string(), "API error (status 402): quota exceeded");
    }

    #[test]
    fn run_failed_message_names_run_and_status() {
        let err = ApifyError::RunFailed {
            run_id: "abc".into(),
            status: "TIMED-OUT".into(),
        };
        assert_eq!(err.to_string(), "Run abc finished with status: TIMED-OUT");
    }
}
