//! Domain logic for the CV adapter frontend.
//!
//! This crate is pure Rust with no browser dependencies so everything in it
//! is natively testable: the backend wire types, the review-session state
//! held between analyze and finalize, input validation, and the HTML view
//! rendering with escaping enforced by construction. The `cvadapt-wasm`
//! app wires these into the DOM.

pub mod error;
pub mod models;
pub mod review;
pub mod validate;
pub mod view;

pub use error::CvAdaptError;
pub use models::{
    AnalysisResult, AnalyzeRequest, AnalyzeResponse, Change, FinalizeRequest, HistoryItem,
    TrackingInfo, VersionCatalog,
};
pub use review::ReviewSession;
pub use view::{ChangeCardView, HistoryRowView};
