//! HTTP client for the CV adapter backend.
//!
//! Every call is a single best-effort fetch: no retries, no timeouts, no
//! cancellation. Non-2xx responses are mapped to `CvAdaptError::Api` with
//! the server's `detail` text when the body carries one.

use cvadapt_core::error::{extract_detail, CvAdaptError};
use cvadapt_core::models::{
    AnalyzeRequest, AnalyzeResponse, FinalizeRequest, HistoryItem, VersionCatalog,
};
use js_sys::Uint8Array;
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// Client over the backend JSON API. `base` is prefixed to every path and
/// defaults to empty for same-origin requests.
pub struct ApiClient {
    base: String,
}

impl ApiClient {
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self { base }
    }

    /// URL of a stored history document, for opening in a new tab.
    pub fn history_pdf_url(&self, id: &str) -> String {
        format!("{}/api/history/{}/pdf", self.base, id)
    }

    pub async fn versions(&self) -> Result<VersionCatalog, CvAdaptError> {
        let response = self.send("GET", "/api/versions", None).await?;
        expect_ok(&response, "Failed to load CV versions").await?;
        json_body(&response).await
    }

    pub async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalyzeResponse, CvAdaptError> {
        let response = self
            .send("POST", "/api/analyze", Some(to_body(request)?))
            .await?;
        expect_ok(&response, "Analysis failed").await?;
        json_body(&response).await
    }

    /// Returns the finalized document bytes.
    pub async fn finalize(&self, request: &FinalizeRequest) -> Result<Vec<u8>, CvAdaptError> {
        let response = self
            .send("POST", "/api/finalize", Some(to_body(request)?))
            .await?;
        expect_ok(&response, "PDF generation failed").await?;

        let buffer = JsFuture::from(response.array_buffer().map_err(js_error)?)
            .await
            .map_err(js_error)?;
        Ok(Uint8Array::new(&buffer).to_vec())
    }

    pub async fn history(&self) -> Result<Vec<HistoryItem>, CvAdaptError> {
        let response = self.send("GET", "/api/history", None).await?;
        expect_ok(&response, "Failed to load history").await?;
        json_body(&response).await
    }

    pub async fn delete_history(&self, id: &str) -> Result<(), CvAdaptError> {
        let path = format!("/api/history/{}", id);
        let response = self.send("DELETE", &path, None).await?;
        expect_ok(&response, "Failed to delete record").await?;
        Ok(())
    }

    async fn send(
        &self,
        method: &str,
        path: &str,
        body: Option<String>,
    ) -> Result<Response, CvAdaptError> {
        let opts = RequestInit::new();
        opts.set_method(method);
        opts.set_mode(RequestMode::Cors);
        if let Some(body) = &body {
            opts.set_body(&JsValue::from_str(body));
        }

        let url = format!("{}{}", self.base, path);
        let request = Request::new_with_str_and_init(&url, &opts).map_err(js_error)?;
        if body.is_some() {
            request
                .headers()
                .set("Content-Type", "application/json")
                .map_err(js_error)?;
        }

        let window =
            web_sys::window().ok_or_else(|| CvAdaptError::Network("No window".to_string()))?;
        let response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_error)?;
        response.dyn_into::<Response>().map_err(js_error)
    }
}

async fn expect_ok(response: &Response, fallback: &str) -> Result<(), CvAdaptError> {
    if response.ok() {
        return Ok(());
    }
    let body = match response.text() {
        Ok(promise) => JsFuture::from(promise)
            .await
            .ok()
            .and_then(|v| v.as_string())
            .unwrap_or_default(),
        Err(_) => String::new(),
    };
    Err(CvAdaptError::Api(extract_detail(&body, fallback)))
}

async fn json_body<T: DeserializeOwned>(response: &Response) -> Result<T, CvAdaptError> {
    let text = JsFuture::from(response.text().map_err(js_error)?)
        .await
        .map_err(js_error)?;
    let text = text.as_string().unwrap_or_default();
    serde_json::from_str(&text).map_err(|e| CvAdaptError::Serialization(e.to_string()))
}

fn to_body<T: Serialize>(value: &T) -> Result<String, CvAdaptError> {
    serde_json::to_string(value).map_err(|e| CvAdaptError::Serialization(e.to_string()))
}

fn js_error(value: JsValue) -> CvAdaptError {
    CvAdaptError::Network(
        value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value)),
    )
}
