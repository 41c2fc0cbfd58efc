use chrono::NaiveDate;
use std::collections::HashMap;

use super::calendar::weekday_name;

/// Aggregate of all qualifying releases published on one calendar date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateBucket {
    pub date: NaiveDate,
    pub weekday: String,
    pub count: usize,
    pub entries: Vec<String>,
}

impl DateBucket {
    /// Create a bucket holding its first annotation block
    pub fn new(date: NaiveDate, entry: String) -> Self {
        DateBucket {
            date,
            weekday: weekday_name(date).to_string(),
            count: 1,
            entries: vec![entry],
        }
    }

    /// Fold one more annotation block into the bucket
    pub fn push(&mut self, entry: String) {
        self.count += 1;
        self.entries.push(entry);
    }

    /// ISO date key, `YYYY-MM-DD`
    pub fn date_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Date-keyed buckets in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BucketMap {
    order: Vec<NaiveDate>,
    buckets: HashMap<NaiveDate, DateBucket>,
}

impl BucketMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `entry` to the bucket for `date`, creating it on first sight
    pub fn fold_entry(mut self, date: NaiveDate, entry: String) -> Self {
        match self.buckets.get_mut(&date) {
            Some(bucket) => bucket.push(entry),
            None => {
                self.order.push(date);
                self.buckets.insert(date, DateBucket::new(date, entry));
            }
        }
        self
    }

    pub fn get(&self, date: &NaiveDate) -> Option<&DateBucket> {
        self.buckets.get(date)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Buckets in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &DateBucket> {
        self.order.iter().filter_map(|date| self.buckets.get(date))
    }

    /// Total releases across all buckets
    pub fn total_releases(&self) -> usize {
        self.iter().map(|b| b.count).sum()
    }

    #[cfg(test)]
    pub(crate) fn bucket_mut(&mut self, date: &NaiveDate) -> Option<&mut DateBucket> {
        self.buckets.get_mut(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_bucket() {
        let bucket = DateBucket::new(date(2025, 5, 30), "a".to_string());
        assert_eq!(bucket.weekday, "Friday");
        assert_eq!(bucket.count, 1);
        assert_eq!(bucket.date_key(), "2025-05-30");
    }

    #[test]
    fn test_push_keeps_count_in_sync() {
        let mut bucket = DateBucket::new(date(2025, 5, 30), "a".to_string());
        bucket.push("b".to_string());
        assert_eq!(bucket.count, 2);
        assert_eq!(bucket.entries, vec!["a", "b"]);
    }

    #[test]
    fn test_fold_preserves_first_seen_order() {
        let map = BucketMap::new()
            .fold_entry(date(2025, 6, 3), "x".to_string())
            .fold_entry(date(2025, 5, 30), "y".to_string())
            .fold_entry(date(2025, 6, 3), "z".to_string());

        let keys: Vec<String> = map.iter().map(DateBucket::date_key).collect();
        assert_eq!(keys, vec!["2025-06-03", "2025-05-30"]);
        assert_eq!(map.len(), 2);
        assert_eq!(map.total_releases(), 3);
        assert_eq!(map.get(&date(2025, 6, 3)).unwrap().entries, vec!["x", "z"]);
    }

    #[test]
    fn test_empty_map() {
        let map = BucketMap::new();
        assert!(map.is_empty());
        assert_eq!(map.iter().count(), 0);
    }
}
