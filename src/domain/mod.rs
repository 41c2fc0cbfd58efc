//! Domain logic - release records, calendar rules and date buckets

pub mod bucket;
pub mod calendar;
pub mod release;
pub mod tag;

pub use bucket::{BucketMap, DateBucket};
pub use calendar::{is_weekend, weekday_name, DayBoundary};
pub use release::Release;
pub use tag::Tag;
