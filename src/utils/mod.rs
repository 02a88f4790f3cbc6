pub mod errors;
pub mod table;

pub use errors::{extract_clean_error, AnalysisError};
pub use table::Table;
