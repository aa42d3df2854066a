mod models;
mod formats;
mod manager;
mod errors;

pub use models::{ReportEntry, ReportFormatter, ReportInfo, ReportManager, ReportWriter};
pub use formats::formatter_for;
pub use errors::ReportError;
