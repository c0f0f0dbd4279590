//! Review state for one analysis result.
//!
//! The accepted-change set lives here, not in the DOM: checkbox events are
//! synced into the session and `accepted_paths` is computed from it, so
//! presentation state can never drift from business state.

use std::collections::HashSet;

use crate::error::CvAdaptError;
use crate::models::{AnalysisResult, Change, FinalizeRequest, TrackingInfo};

/// The working set between one analyze call and the finalize that consumes
/// it. Every change starts accepted, matching the initially-checked
/// checkboxes.
#[derive(Debug, Clone)]
pub struct ReviewSession {
    result: AnalysisResult,
    accepted: HashSet<String>,
}

impl ReviewSession {
    pub fn new(result: AnalysisResult) -> Self {
        let accepted = result
            .changes
            .iter()
            .map(|c| c.field_path.clone())
            .collect();
        Self { result, accepted }
    }

    pub fn result(&self) -> &AnalysisResult {
        &self.result
    }

    pub fn job_title(&self) -> &str {
        &self.result.job_title
    }

    pub fn changes(&self) -> &[Change] {
        &self.result.changes
    }

    pub fn change_count(&self) -> usize {
        self.result.changes.len()
    }

    pub fn is_accepted(&self, field_path: &str) -> bool {
        self.accepted.contains(field_path)
    }

    /// Accept or reject a single change. Unknown paths are ignored;
    /// returns whether the path was known.
    pub fn set_accepted(&mut self, field_path: &str, accepted: bool) -> bool {
        let known = self
            .result
            .changes
            .iter()
            .any(|c| c.field_path == field_path);
        if !known {
            return false;
        }
        if accepted {
            self.accepted.insert(field_path.to_string());
        } else {
            self.accepted.remove(field_path);
        }
        true
    }

    /// Accept or reject every change at once.
    pub fn toggle_all(&mut self, accepted: bool) {
        if accepted {
            self.accepted = self
                .result
                .changes
                .iter()
                .map(|c| c.field_path.clone())
                .collect();
        } else {
            self.accepted.clear();
        }
    }

    pub fn accepted_count(&self) -> usize {
        self.accepted.len()
    }

    /// Accepted field paths in original change order, which is also the
    /// order the cards are rendered in.
    pub fn accepted_paths(&self) -> Vec<String> {
        self.result
            .changes
            .iter()
            .filter(|c| self.accepted.contains(&c.field_path))
            .map(|c| c.field_path.clone())
            .collect()
    }

    /// Build the finalize payload: the full original analysis plus the
    /// accepted subset and tracking metadata. Requires at least one
    /// accepted change.
    pub fn finalize_request(
        &self,
        tracking: TrackingInfo,
    ) -> Result<FinalizeRequest, CvAdaptError> {
        let accepted_paths = self.accepted_paths();
        if accepted_paths.is_empty() {
            return Err(CvAdaptError::NoAcceptedChanges);
        }

        Ok(FinalizeRequest {
            version: self.result.version.clone(),
            language: self.result.language.clone(),
            job_description: self.result.job_description.clone(),
            job_title: self.result.job_title.clone(),
            original_data: self.result.original_data.clone(),
            adapted_data: self.result.adapted_data.clone(),
            changes: self.result.changes.clone(),
            accepted_paths,
            tracking,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnalyzeRequest, AnalyzeResponse};
    use proptest::prelude::*;
    use serde_json::json;

    fn change(path: &str) -> Change {
        Change {
            section: "skills".to_string(),
            field_path: path.to_string(),
            original_value: json!("x"),
            adapted_value: json!("y"),
            reason: "closer match".to_string(),
        }
    }

    fn session_with(paths: &[&str]) -> ReviewSession {
        let response = AnalyzeResponse {
            job_title: "Engineer".to_string(),
            original_data: json!({"skills": ["x"]}),
            adapted_data: json!({"skills": ["y"]}),
            changes: paths.iter().map(|p| change(p)).collect(),
        };
        let request = AnalyzeRequest {
            version: "general".to_string(),
            language: "en".to_string(),
            job_description: "jd".to_string(),
        };
        ReviewSession::new(AnalysisResult::new(response, request))
    }

    #[test]
    fn test_all_changes_start_accepted() {
        let session = session_with(&["a", "b", "c"]);
        assert_eq!(session.accepted_count(), 3);
        assert!(session.is_accepted("a"));
        assert!(session.is_accepted("c"));
    }

    #[test]
    fn test_set_accepted_roundtrip() {
        let mut session = session_with(&["a", "b"]);
        assert!(session.set_accepted("a", false));
        assert!(!session.is_accepted("a"));
        assert!(session.is_accepted("b"));

        assert!(session.set_accepted("a", true));
        assert!(session.is_accepted("a"));
    }

    #[test]
    fn test_unknown_path_is_ignored() {
        let mut session = session_with(&["a"]);
        assert!(!session.set_accepted("nope", true));
        assert_eq!(session.accepted_count(), 1);
        assert_eq!(session.accepted_paths(), vec!["a"]);
    }

    #[test]
    fn test_toggle_all_off_then_on() {
        let mut session = session_with(&["a", "b", "c"]);
        session.toggle_all(false);
        assert_eq!(session.accepted_count(), 0);

        session.toggle_all(true);
        assert_eq!(session.accepted_count(), 3);
    }

    #[test]
    fn test_accepted_paths_keep_change_order() {
        let mut session = session_with(&["first", "second", "third", "fourth"]);
        session.set_accepted("second", false);
        assert_eq!(session.accepted_paths(), vec!["first", "third", "fourth"]);

        // Re-accepting does not move the path to the back.
        session.set_accepted("second", true);
        assert_eq!(
            session.accepted_paths(),
            vec!["first", "second", "third", "fourth"]
        );
    }

    #[test]
    fn test_finalize_requires_accepted_changes() {
        let mut session = session_with(&["a"]);
        session.toggle_all(false);
        assert!(matches!(
            session.finalize_request(TrackingInfo::default()),
            Err(CvAdaptError::NoAcceptedChanges)
        ));
    }

    #[test]
    fn test_finalize_carries_full_payload_and_subset() {
        let mut session = session_with(&["a", "b", "c"]);
        session.set_accepted("b", false);

        let tracking = TrackingInfo::from_raw("Acme", "Dev", "2026-08-30", "");
        let request = session.finalize_request(tracking).unwrap();

        assert_eq!(request.accepted_paths, vec!["a", "c"]);
        assert_eq!(request.changes.len(), 3); // full change list, not the subset
        assert_eq!(request.version, "general");
        assert_eq!(request.job_description, "jd");
        assert_eq!(request.tracking.company_name.as_deref(), Some("Acme"));
        assert_eq!(request.tracking.offer_link, None);
    }

    proptest! {
        /// Whatever sequence of toggles happens, accepted_paths is always a
        /// subset of the change list in original order.
        #[test]
        fn prop_accepted_paths_ordered_subset(toggles in proptest::collection::vec((0usize..5, any::<bool>()), 0..20)) {
            let paths = ["p0", "p1", "p2", "p3", "p4"];
            let mut session = session_with(&paths);
            for (idx, accepted) in toggles {
                session.set_accepted(paths[idx], accepted);
            }

            let accepted = session.accepted_paths();
            let positions: Vec<usize> = accepted
                .iter()
                .map(|p| paths.iter().position(|x| x == p).unwrap())
                .collect();
            let mut sorted = positions.clone();
            sorted.sort_unstable();
            prop_assert_eq!(positions, sorted);
            prop_assert_eq!(accepted.len(), session.accepted_count());
        }
    }
}
