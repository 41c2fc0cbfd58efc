use crate::domain::BucketMap;
use crate::error::{ReleaseStatsError, Result};

/// One line of the release report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub date: String,
    pub weekday: String,
    pub count: usize,
    pub release_text: String,
}

/// Order of rows in the emitted report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowOrder {
    /// Order in which each date was first seen in the input
    #[default]
    FirstSeen,
    /// Ascending by date
    Chronological,
}

impl RowOrder {
    pub fn from_sort_flag(sort_by_date: bool) -> Self {
        if sort_by_date {
            RowOrder::Chronological
        } else {
            RowOrder::FirstSeen
        }
    }
}

/// Flatten buckets into report rows.
///
/// A bucket whose count disagrees with its entries means the fold is broken;
/// that is reported as an invariant violation rather than emitted.
pub fn emit_rows(buckets: &BucketMap, order: RowOrder) -> Result<Vec<ReportRow>> {
    let mut ordered: Vec<_> = buckets.iter().collect();
    if order == RowOrder::Chronological {
        ordered.sort_by_key(|bucket| bucket.date);
    }

    ordered
        .into_iter()
        .map(|bucket| {
            if bucket.count != bucket.entries.len() {
                return Err(ReleaseStatsError::invariant(format!(
                    "bucket {} has count {} but {} entries",
                    bucket.date_key(),
                    bucket.count,
                    bucket.entries.len()
                )));
            }

            Ok(ReportRow {
                date: bucket.date_key(),
                weekday: bucket.weekday.clone(),
                count: bucket.count,
                release_text: bucket.entries.join("\n"),
            })
        })
        .collect()
}
