//! Output generation for the compliance browser.
//!
//! This crate turns records and views into artifacts:
//!
//! - **HTML**: result cards, as a fragment or a standalone page
//! - **Export**: the current filtered subset as JSON or CSV
//! - **Static API**: JSON endpoint files per standard, category and control

pub mod api;
mod error;
pub mod export;
pub mod html;
mod slug;

pub use api::{API_VERSION, ApiOptions, ApiSummary, generate_api};
pub use error::{ApiError, ExportError};
pub use export::{
    EXPORT_FILE_PREFIX, ExportArtifact, ExportFormat, export, export_csv, export_date,
    export_file_name, export_json, write_artifact,
};
pub use html::{render_page, render_view};
pub use slug::slugify;
