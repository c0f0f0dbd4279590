//! WASM frontend for the CV adapter.
//!
//! All state is held in Rust via `CvAdapterApp`; the page's JavaScript
//! only forwards DOM events and never owns business state.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { CvAdapterApp } from './pkg/cvadapt_wasm.js';
//!
//! await init();
//! const app = new CvAdapterApp();
//! await app.start();
//!
//! analyzeBtn.addEventListener('click', () => app.analyze());
//! changesList.addEventListener('change', (e) =>
//!     app.setAccepted(e.target.dataset.path, e.target.checked));
//! finalizeBtn.addEventListener('click', () => app.finalize());
//! ```

pub mod api;
pub mod app;
pub mod dom;

use wasm_bindgen::prelude::*;

pub use api::ApiClient;
pub use app::CvAdapterApp;

/// Initialize the WASM module
/// Called automatically by wasm-bindgen
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Get the library version
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
