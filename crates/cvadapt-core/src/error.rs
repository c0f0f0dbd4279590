use thiserror::Error;

#[derive(Error, Debug)]
pub enum CvAdaptError {
    #[error("Please paste a job description.")]
    EmptyJobDescription,

    #[error("Please select at least one change.")]
    NoAcceptedChanges,

    #[error("Run an analysis first.")]
    NoAnalysis,

    #[error("{0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CvAdaptError {
    /// Validation failures are shown as a blocking prompt before any
    /// network call; everything else goes to the transient banner.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyJobDescription | Self::NoAcceptedChanges | Self::NoAnalysis
        )
    }
}

/// Pull the `detail` field out of a non-2xx JSON error body.
/// Falls back to the operation's generic message when the body is not
/// JSON or carries no string detail.
pub fn extract_detail(body: &str, fallback: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.as_str().map(str::to_owned)))
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_detail_from_json_body() {
        let body = r#"{"detail": "Invalid version. Available: ['it', 'pm']"}"#;
        assert_eq!(
            extract_detail(body, "Analysis failed"),
            "Invalid version. Available: ['it', 'pm']"
        );
    }

    #[test]
    fn test_extract_detail_falls_back_on_garbage() {
        assert_eq!(
            extract_detail("<html>502 Bad Gateway</html>", "PDF generation failed"),
            "PDF generation failed"
        );
        assert_eq!(extract_detail("", "Analysis failed"), "Analysis failed");
    }

    #[test]
    fn test_extract_detail_falls_back_on_non_string_detail() {
        assert_eq!(
            extract_detail(r#"{"detail": {"code": 42}}"#, "Analysis failed"),
            "Analysis failed"
        );
    }

    #[test]
    fn test_validation_errors_carry_user_prompts() {
        assert_eq!(
            CvAdaptError::EmptyJobDescription.to_string(),
            "Please paste a job description."
        );
        assert_eq!(
            CvAdaptError::NoAcceptedChanges.to_string(),
            "Please select at least one change."
        );
        assert!(CvAdaptError::EmptyJobDescription.is_validation());
        assert!(CvAdaptError::NoAnalysis.is_validation());
        assert!(!CvAdaptError::Api("boom".to_string()).is_validation());
    }
}
