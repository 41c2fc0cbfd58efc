use crate::aggregate::annotation::AnnotationFormatter;
use crate::domain::{is_weekend, BucketMap, DayBoundary, Release};

/// Settings for one grouping run
#[derive(Debug, Clone, Default)]
pub struct Grouping {
    pub day_boundary: DayBoundary,
    pub formatter: AnnotationFormatter,
}

impl Grouping {
    pub fn new(day_boundary: DayBoundary, formatter: AnnotationFormatter) -> Self {
        Grouping {
            day_boundary,
            formatter,
        }
    }

    /// Fold a single release into the map. Weekend releases leave it untouched.
    pub fn fold_step(&self, buckets: BucketMap, release: &Release) -> BucketMap {
        let date = self.day_boundary.calendar_date(&release.published_at);
        if is_weekend(date) {
            return buckets;
        }
        buckets.fold_entry(date, self.formatter.format(release))
    }
}

/// Group releases into per-day buckets, in arrival order.
///
/// Buckets come out in first-seen-date order; nothing is sorted here.
pub fn group_releases<'a, I>(releases: I, grouping: &Grouping) -> BucketMap
where
    I: IntoIterator<Item = &'a Release>,
{
    releases
        .into_iter()
        .fold(BucketMap::new(), |buckets, release| {
            grouping.fold_step(buckets, release)
        })
}

/// Number of releases the weekend filter removes
pub fn weekend_count<'a, I>(releases: I, day_boundary: DayBoundary) -> usize
where
    I: IntoIterator<Item = &'a Release>,
{
    releases
        .into_iter()
        .filter(|r| is_weekend(day_boundary.calendar_date(&r.published_at)))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, NaiveDate};

    fn release(id: &str, published: &str) -> Release {
        Release {
            id: id.to_string(),
            title: format!("v{}", id),
            tag_name: format!("v{}", id),
            body: Some(format!("change {}", id)),
            published_at: DateTime::parse_from_rfc3339(published).unwrap(),
            created_at: DateTime::parse_from_rfc3339(published).unwrap(),
            draft: false,
            prerelease: false,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_weekend_releases_create_no_bucket() {
        let releases = vec![
            release("1", "2025-05-31T10:00:00Z"),
            release("2", "2025-06-01T10:00:00Z"),
        ];
        let buckets = group_releases(&releases, &Grouping::default());
        assert!(buckets.is_empty());
        assert_eq!(weekend_count(&releases, DayBoundary::Utc), 2);
    }

    #[test]
    fn test_same_day_releases_share_bucket() {
        let releases = vec![
            release("1", "2025-05-30T01:00:00Z"),
            release("2", "2025-06-02T10:00:00Z"),
            release("3", "2025-05-30T23:00:00Z"),
        ];
        let buckets = group_releases(&releases, &Grouping::default());

        assert_eq!(buckets.len(), 2);
        let friday = buckets.get(&date(2025, 5, 30)).unwrap();
        assert_eq!(friday.count, 2);
        assert_eq!(friday.entries.len(), friday.count);
        assert!(friday.entries[0].contains("📦 v1"));
        assert!(friday.entries[1].contains("📦 v3"));
    }

    #[test]
    fn test_bucket_order_is_first_seen() {
        let releases = vec![
            release("1", "2025-06-04T10:00:00Z"),
            release("2", "2025-06-02T10:00:00Z"),
            release("3", "2025-06-04T11:00:00Z"),
        ];
        let buckets = group_releases(&releases, &Grouping::default());
        let dates: Vec<NaiveDate> = buckets.iter().map(|b| b.date).collect();
        assert_eq!(dates, vec![date(2025, 6, 4), date(2025, 6, 2)]);
    }

    #[test]
    fn test_grouping_is_repeatable() {
        let releases = vec![
            release("1", "2025-06-04T10:00:00Z"),
            release("2", "2025-06-07T10:00:00Z"),
            release("3", "2025-06-04T11:00:00Z"),
        ];
        let grouping = Grouping::default();
        assert_eq!(
            group_releases(&releases, &grouping),
            group_releases(&releases, &grouping)
        );
    }

    #[test]
    fn test_day_boundary_changes_key_near_midnight() {
        // Monday 00:30 in Seoul is Sunday 15:30 in UTC
        let releases = vec![release("1", "2025-06-02T00:30:00+09:00")];

        let utc = group_releases(&releases, &Grouping::default());
        assert!(utc.is_empty());

        let embedded = Grouping::new(
            DayBoundary::Embedded,
            AnnotationFormatter::new(&[], DayBoundary::Embedded).unwrap(),
        );
        let local = group_releases(&releases, &embedded);
        assert_eq!(local.len(), 1);
        assert!(local.get(&date(2025, 6, 2)).is_some());
    }
}
