//! Everything that leaves the pipeline: preview pages and export archives

pub mod export;
pub mod preview;
pub mod templates;
pub mod thumbnail;

pub use export::{ExportBuilder, ExportError};
pub use preview::PreviewMaterializer;
