//! # Data Module
//!
//! Review records, CSV artifacts and the cleaning stage.

mod cleaning;
mod io;
mod record;

pub use cleaning::{normalize_text, sample_indices, CleaningReport, ReviewCleaner};
pub use io::ReviewLoader;
pub use record::{
    columns, parse_rating, parse_timestamp, RawReview, RawTable, ReviewRecord, ReviewTable,
    TimeFeatures, DATE_FORMAT,
};
