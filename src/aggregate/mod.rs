//! Release aggregation: date grouping, annotation and report rows

pub mod annotation;
pub mod grouper;
pub mod report;
pub mod tag_stats;

pub use annotation::AnnotationFormatter;
pub use grouper::{group_releases, Grouping};
pub use report::{emit_rows, ReportRow, RowOrder};
pub use tag_stats::{summarize_tags, TagSummary};
