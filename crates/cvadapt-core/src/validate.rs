//! Pre-flight input validation. Failures here block before any network
//! call is made.

use crate::error::CvAdaptError;

/// Normalize a job description: trimmed and non-empty.
pub fn job_description(input: &str) -> Result<String, CvAdaptError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(CvAdaptError::EmptyJobDescription);
    }
    Ok(trimmed.to_string())
}
