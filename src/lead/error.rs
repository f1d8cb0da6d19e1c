use thiserror::Error;

/// Failure delivering a lead to the capture endpoint
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("endpoint responded with status {0}")]
    Status(reqwest::StatusCode),
}

impl SubmitError {
    /// Whether the endpoint answered at all
    pub fn is_status(&self) -> bool {
        matches!(self, Self::Status(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        let err = SubmitError::Status(reqwest::StatusCode::BAD_GATEWAY);
        assert_eq!(
            err.to_string(),
            "endpoint responded with status 502 Bad Gateway"
        );
        assert!(err.is_status());
    }
}
