//! Wire types for the CV adapter backend API.
//!
//! Field names and nullability must match the backend contract exactly;
//! `original_data` / `adapted_data` are opaque structured records that pass
//! through this layer unmodified.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response of `GET /api/versions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionCatalog {
    pub versions: Vec<String>,
    pub languages: Vec<String>,
}

/// One proposed edit to a single CV field, with before/after values and a
/// justification. `field_path` is unique within one analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Change {
    pub section: String,
    pub field_path: String,
    pub original_value: Value,
    pub adapted_value: Value,
    pub reason: String,
}

/// Body of `POST /api/analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub version: String,
    pub language: String,
    pub job_description: String,
}

/// Success body of `POST /api/analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub job_title: String,
    pub original_data: Value,
    pub adapted_data: Value,
    pub changes: Vec<Change>,
}

/// An analyze response with the request parameters echoed back onto it.
/// This is the working set held between analyze and finalize; exactly one
/// is live at a time and a new analysis replaces it wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub job_title: String,
    pub original_data: Value,
    pub adapted_data: Value,
    pub changes: Vec<Change>,
    pub version: String,
    pub language: String,
    pub job_description: String,
}

impl AnalysisResult {
    pub fn new(response: AnalyzeResponse, request: AnalyzeRequest) -> Self {
        Self {
            job_title: response.job_title,
            original_data: response.original_data,
            adapted_data: response.adapted_data,
            changes: response.changes,
            version: request.version,
            language: request.language,
            job_description: request.job_description,
        }
    }
}

/// Optional application-tracking metadata collected at finalize time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackingInfo {
    pub company_name: Option<String>,
    pub position_title: Option<String>,
    pub application_date: Option<String>,
    pub offer_link: Option<String>,
}

impl TrackingInfo {
    /// Build from raw form values; empty or whitespace-only input becomes
    /// absent and serializes as `null`.
    pub fn from_raw(company: &str, position: &str, date: &str, link: &str) -> Self {
        Self {
            company_name: normalize(company),
            position_title: normalize(position),
            application_date: normalize(date),
            offer_link: normalize(link),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.company_name.is_none()
            && self.position_title.is_none()
            && self.application_date.is_none()
            && self.offer_link.is_none()
    }
}

fn normalize(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Body of `POST /api/finalize`: the full original analysis payload, the
/// accepted-paths subset and the tracking metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalizeRequest {
    pub version: String,
    pub language: String,
    pub job_description: String,
    pub job_title: String,
    pub original_data: Value,
    pub adapted_data: Value,
    pub changes: Vec<Change>,
    pub accepted_paths: Vec<String>,
    #[serde(flatten)]
    pub tracking: TrackingInfo,
}

/// One element of `GET /api/history`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryItem {
    pub id: String,
    pub job_title: String,
    pub cv_version: String,
    pub language: String,
    pub created_at: String,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub position_title: Option<String>,
    #[serde(default)]
    pub application_date: Option<String>,
    #[serde(default)]
    pub offer_link: Option<String>,
}

/// Coerce an arbitrary-typed change value to display text: JSON strings
/// verbatim, everything else in its compact JSON rendering.
pub fn value_as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
