//! The exported application controller.
//!
//! All state lives here in Rust; the page's JavaScript only forwards DOM
//! events into the exported methods. Buttons are disabled while a call is
//! in flight, which is an advisory guard only, not a lock.

use cvadapt_core::error::CvAdaptError;
use cvadapt_core::models::{AnalysisResult, AnalyzeRequest, TrackingInfo};
use cvadapt_core::review::ReviewSession;
use cvadapt_core::{validate, view};
use wasm_bindgen::prelude::*;
use web_sys::console;

use crate::api::ApiClient;
use crate::dom;

#[wasm_bindgen]
pub struct CvAdapterApp {
    client: ApiClient,
    session: Option<ReviewSession>,
}

impl CvAdapterApp {
    /// Install the outcome of an analyze call. A failure leaves the
    /// previous session untouched.
    fn apply_outcome(
        &mut self,
        outcome: Result<AnalysisResult, CvAdaptError>,
    ) -> Result<(), CvAdaptError> {
        let result = outcome?;
        self.session = Some(ReviewSession::new(result));
        Ok(())
    }

    fn render_changes(&self) -> Result<(), JsValue> {
        let Some(session) = &self.session else {
            return Ok(());
        };
        dom::set_text("job-title", session.job_title())?;
        dom::set_html(
            "changes-list",
            &view::render_change_cards(&view::card_views(session)),
        )?;
        dom::set_hidden("results", false)?;
        Ok(())
    }
}

#[wasm_bindgen]
impl CvAdapterApp {
    /// `api_base` defaults to same-origin relative paths.
    #[wasm_bindgen(constructor)]
    pub fn new(api_base: Option<String>) -> Self {
        Self {
            client: ApiClient::new(api_base.unwrap_or_default()),
            session: None,
        }
    }

    /// Fetch the version catalog and populate both selectors. Call once on
    /// page load.
    pub async fn start(&self) -> Result<(), JsValue> {
        let catalog = self.client.versions().await.map_err(to_js)?;
        dom::populate_select("version", &catalog.versions)?;
        dom::populate_select("language", &catalog.languages)?;
        Ok(())
    }

    /// Toggle between the analyze and history views.
    #[wasm_bindgen(js_name = showView)]
    pub fn show_view(&self, view_name: &str) -> Result<(), JsValue> {
        dom::set_hidden("analyze-view", view_name != "analyze")?;
        dom::set_hidden("history-view", view_name != "history")?;
        Ok(())
    }

    /// Submit the job description for analysis. A successful call replaces
    /// the live session; a failed one leaves it untouched.
    pub async fn analyze(&mut self) -> Result<(), JsValue> {
        let version = dom::select_value("version")?;
        let language = dom::select_value("language")?;
        let raw = dom::textarea_value("job-description")?;

        let job_description = match validate::job_description(&raw) {
            Ok(text) => text,
            Err(err) => {
                dom::alert(&err.to_string())?;
                return Ok(());
            }
        };

        dom::set_hidden("results", true)?;
        dom::set_hidden("loading", false)?;
        dom::set_disabled("analyze-btn", true)?;

        let request = AnalyzeRequest {
            version,
            language,
            job_description,
        };
        let outcome = self
            .client
            .analyze(&request)
            .await
            .map(|response| AnalysisResult::new(response, request));

        dom::set_hidden("loading", true)?;
        dom::set_disabled("analyze-btn", false)?;

        if let Err(err) = self.apply_outcome(outcome) {
            console::error_1(&format!("analyze failed: {}", err).into());
            dom::show_error(&err.to_string())?;
            return Ok(());
        }
        self.render_changes()
    }

    /// Sync one checkbox change into the session.
    #[wasm_bindgen(js_name = setAccepted)]
    pub fn set_accepted(&mut self, field_path: &str, accepted: bool) {
        if let Some(session) = &mut self.session {
            if !session.set_accepted(field_path, accepted) {
                console::warn_1(&format!("unknown change path: {}", field_path).into());
            }
        }
    }

    /// Accept or reject every rendered change and re-render the cards.
    #[wasm_bindgen(js_name = toggleAll)]
    pub fn toggle_all(&mut self, accepted: bool) -> Result<(), JsValue> {
        if let Some(session) = &mut self.session {
            session.toggle_all(accepted);
            self.render_changes()?;
        }
        Ok(())
    }

    /// Currently accepted field paths, in render order.
    #[wasm_bindgen(js_name = acceptedPaths)]
    pub fn accepted_paths(&self) -> Result<JsValue, JsValue> {
        let paths = self
            .session
            .as_ref()
            .map(|s| s.accepted_paths())
            .unwrap_or_default();
        serde_wasm_bindgen::to_value(&paths).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Submit the accepted subset plus tracking metadata and download the
    /// resulting document. The results view is restored whether the call
    /// succeeds or fails.
    pub async fn finalize(&self) -> Result<(), JsValue> {
        let Some(session) = &self.session else {
            dom::alert(&CvAdaptError::NoAnalysis.to_string())?;
            return Ok(());
        };

        let tracking = TrackingInfo::from_raw(
            &dom::input_value("company-name")?,
            &dom::input_value("position-title")?,
            &dom::input_value("application-date")?,
            &dom::input_value("offer-link")?,
        );

        let request = match session.finalize_request(tracking) {
            Ok(request) => request,
            Err(err) => {
                dom::alert(&err.to_string())?;
                return Ok(());
            }
        };

        dom::set_hidden("results", true)?;
        dom::set_hidden("generating", false)?;
        dom::set_disabled("finalize-btn", true)?;

        let outcome = self.client.finalize(&request).await;

        dom::set_hidden("generating", true)?;
        dom::set_disabled("finalize-btn", false)?;
        dom::set_hidden("results", false)?;

        match outcome {
            Ok(bytes) => dom::download_bytes(&bytes, "cv_adapted.pdf", "application/pdf"),
            Err(err) => {
                console::error_1(&format!("finalize failed: {}", err).into());
                dom::show_error(&err.to_string())
            }
        }
    }

    /// Fetch and render the history list. Failures render inline in place
    /// of the list.
    #[wasm_bindgen(js_name = loadHistory)]
    pub async fn load_history(&self) -> Result<(), JsValue> {
        dom::set_html("history-list", r#"<div class="spinner"></div>"#)?;

        match self.client.history().await {
            Ok(items) => {
                let rows: Vec<view::HistoryRowView> =
                    items.iter().map(view::HistoryRowView::from_item).collect();
                dom::set_html("history-list", &view::render_history_rows(&rows))
            }
            Err(err) => dom::set_html("history-list", &view::render_inline_error(&err.to_string())),
        }
    }

    /// Open a stored document in a new browser tab.
    #[wasm_bindgen(js_name = openHistoryPdf)]
    pub fn open_history_pdf(&self, id: &str) -> Result<(), JsValue> {
        dom::open_in_new_tab(&self.client.history_pdf_url(id))
    }

    /// Delete a history record, then reload the list.
    #[wasm_bindgen(js_name = deleteHistory)]
    pub async fn delete_history(&self, id: &str) -> Result<(), JsValue> {
        match self.client.delete_history(id).await {
            Ok(()) => self.load_history().await,
            Err(err) => dom::show_error(&err.to_string()),
        }
    }
}

fn to_js(err: CvAdaptError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cvadapt_core::models::{AnalyzeResponse, Change};
    use serde_json::json;

    fn result(paths: &[&str]) -> AnalysisResult {
        let response = AnalyzeResponse {
            job_title: "Engineer".to_string(),
            original_data: json!({}),
            adapted_data: json!({}),
            changes: paths
                .iter()
                .map(|p| Change {
                    section: "s".to_string(),
                    field_path: p.to_string(),
                    original_value: json!("a"),
                    adapted_value: json!("b"),
                    reason: "r".to_string(),
                })
                .collect(),
        };
        let request = AnalyzeRequest {
            version: "it".to_string(),
            language: "en".to_string(),
            job_description: "jd".to_string(),
        };
        AnalysisResult::new(response, request)
    }

    #[test]
    fn test_successful_outcome_replaces_session() {
        let mut app = CvAdapterApp::new(None);
        app.apply_outcome(Ok(result(&["a"]))).unwrap();
        app.apply_outcome(Ok(result(&["b", "c"]))).unwrap();

        let session = app.session.as_ref().unwrap();
        assert_eq!(session.change_count(), 2);
        assert_eq!(session.accepted_paths(), vec!["b", "c"]);
    }

    #[test]
    fn test_failed_outcome_keeps_previous_session() {
        let mut app = CvAdapterApp::new(None);
        app.apply_outcome(Ok(result(&["a"]))).unwrap();

        let err = app
            .apply_outcome(Err(CvAdaptError::Api("Invalid version".to_string())))
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid version");

        let session = app.session.as_ref().unwrap();
        assert_eq!(session.accepted_paths(), vec!["a"]);
    }

    #[test]
    fn test_failed_outcome_with_no_session_stays_unset() {
        let mut app = CvAdapterApp::new(None);
        let outcome = app.apply_outcome(Err(CvAdaptError::Network("offline".to_string())));
        assert!(outcome.is_err());
        assert!(app.session.is_none());
    }

    #[test]
    fn test_set_accepted_without_session_is_noop() {
        let mut app = CvAdapterApp::new(None);
        app.set_accepted("a", false); // must not panic
        assert!(app.session.is_none());
    }
}
