use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde_json::{Map, Value};

use crate::error::{ReleaseStatsError, Result};

/// A published release after normalization
#[derive(Debug, Clone, PartialEq)]
pub struct Release {
    pub id: String,
    pub title: String,
    pub tag_name: String,
    pub body: Option<String>,
    pub published_at: DateTime<FixedOffset>,
    pub created_at: DateTime<FixedOffset>,
    pub draft: bool,
    pub prerelease: bool,
}

impl Release {
    /// Normalize a raw release payload.
    ///
    /// Accepts the GitHub REST field names (`name`, `tag_name`, `published_at`,
    /// `created_at`) and their camelCase spellings. Fails with
    /// `MalformedRelease` when a timestamp is missing or unparsable and with
    /// `MissingIdentifier` when neither a title nor a tag name is present.
    pub fn from_value(payload: &Value) -> Result<Self> {
        let object = payload.as_object().ok_or_else(|| {
            ReleaseStatsError::malformed("<unknown>", "<payload>", compact(payload))
        })?;

        let id = release_id(object);
        let tag_name = text_field(object, &["tag_name", "tagName"]).unwrap_or_default();
        let title = text_field(object, &["name", "title"])
            .filter(|t| !t.trim().is_empty())
            .or_else(|| Some(tag_name.clone()).filter(|t| !t.trim().is_empty()))
            .ok_or_else(|| ReleaseStatsError::missing_identifier(&id))?;

        let published_at = timestamp_field(object, &id, &["published_at", "publishedAt"])?;
        let created_at = timestamp_field(object, &id, &["created_at", "createdAt"])?;

        Ok(Release {
            title,
            tag_name,
            body: text_field(object, &["body"]),
            published_at,
            created_at,
            draft: flag_field(object, "draft"),
            prerelease: flag_field(object, "prerelease"),
            id,
        })
    }
}

/// Whether a raw payload is marked as a draft, without normalizing it
pub fn is_draft_payload(payload: &Value) -> bool {
    payload.get("draft").and_then(Value::as_bool).unwrap_or(false)
}

/// Whether a raw payload is marked as a prerelease, without normalizing it
pub fn is_prerelease_payload(payload: &Value) -> bool {
    payload
        .get("prerelease")
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

/// Best-effort identifier of a raw payload, for error reporting
pub fn payload_id(payload: &Value) -> String {
    payload
        .as_object()
        .map(release_id)
        .unwrap_or_else(|| "<unknown>".to_string())
}

fn release_id(object: &Map<String, Value>) -> String {
    match object.get("id") {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        _ => "<unknown>".to_string(),
    }
}

fn text_field(object: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| object.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

fn flag_field(object: &Map<String, Value>, key: &str) -> bool {
    object.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn timestamp_field(
    object: &Map<String, Value>,
    id: &str,
    keys: &[&str],
) -> Result<DateTime<FixedOffset>> {
    let field = keys[0];
    let raw = keys.iter().find_map(|key| object.get(*key));

    match raw {
        Some(Value::String(s)) => {
            parse_timestamp(s).ok_or_else(|| ReleaseStatsError::malformed(id, field, s.as_str()))
        }
        Some(other) => Err(ReleaseStatsError::malformed(id, field, compact(other))),
        None => Err(ReleaseStatsError::malformed(id, field, "<missing>")),
    }
}

/// RFC 3339, or an ISO-8601 date-time without offset read as UTC
fn parse_timestamp(s: &str) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();
    DateTime::parse_from_rfc3339(s).ok().or_else(|| {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc().fixed_offset())
    })
}

fn compact(value: &Value) -> String {
    let text = value.to_string();
    if text.chars().count() > 40 {
        let head: String = text.chars().take(40).collect();
        format!("{}...", head)
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> Value {
        json!({
            "id": 101,
            "name": "v1.0.0",
            "tag_name": "v1.0.0",
            "body": "Fixed bug A",
            "published_at": "2025-05-30T10:00:00Z",
            "created_at": "2025-05-30T09:00:00Z",
            "draft": false,
            "prerelease": true
        })
    }

    #[test]
    fn test_normalize_github_payload() {
        let release = Release::from_value(&payload()).unwrap();
        assert_eq!(release.id, "101");
        assert_eq!(release.title, "v1.0.0");
        assert_eq!(release.body.as_deref(), Some("Fixed bug A"));
        assert_eq!(release.published_at.to_rfc3339(), "2025-05-30T10:00:00+00:00");
        assert!(release.prerelease);
        assert!(!release.draft);
    }

    #[test]
    fn test_camel_case_fields_are_accepted() {
        let raw = json!({
            "id": "abc",
            "title": "Spring release",
            "tagName": "v2.0.0",
            "publishedAt": "2025-06-02T08:00:00+09:00",
            "createdAt": "2025-06-02T07:00:00+09:00"
        });
        let release = Release::from_value(&raw).unwrap();
        assert_eq!(release.id, "abc");
        assert_eq!(release.title, "Spring release");
        assert_eq!(release.tag_name, "v2.0.0");
        assert_eq!(release.body, None);
    }

    #[test]
    fn test_title_falls_back_to_tag() {
        let mut raw = payload();
        raw["name"] = json!("");
        raw["tag_name"] = json!("@seed-design/react@0.3.1");
        let release = Release::from_value(&raw).unwrap();
        assert_eq!(release.title, "@seed-design/react@0.3.1");

        raw["name"] = Value::Null;
        let release = Release::from_value(&raw).unwrap();
        assert_eq!(release.title, "@seed-design/react@0.3.1");
    }

    #[test]
    fn test_missing_title_and_tag_fails() {
        let mut raw = payload();
        raw["name"] = json!("  ");
        raw["tag_name"] = json!("");
        let err = Release::from_value(&raw).unwrap_err();
        assert!(matches!(err, ReleaseStatsError::MissingIdentifier { ref id } if id == "101"));
    }

    #[test]
    fn test_timestamp_without_offset_is_utc() {
        let mut raw = payload();
        raw["published_at"] = json!("2025-05-30T10:00:00");
        raw["created_at"] = json!("2025-05-30T09:00:00.250");
        let release = Release::from_value(&raw).unwrap();
        assert_eq!(release.published_at.to_rfc3339(), "2025-05-30T10:00:00+00:00");
        assert_eq!(release.published_at.offset().local_minus_utc(), 0);
        assert_eq!(release.created_at.timestamp_subsec_millis(), 250);
    }

    #[test]
    fn test_invalid_published_at_fails() {
        let mut raw = payload();
        raw["published_at"] = json!("not a date");
        let err = Release::from_value(&raw).unwrap_err();
        match err {
            ReleaseStatsError::MalformedRelease { id, field, value } => {
                assert_eq!(id, "101");
                assert_eq!(field, "published_at");
                assert_eq!(value, "not a date");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_null_published_at_fails() {
        let mut raw = payload();
        raw["published_at"] = Value::Null;
        let err = Release::from_value(&raw).unwrap_err();
        assert!(matches!(err, ReleaseStatsError::MalformedRelease { ref field, .. } if field == "published_at"));
    }

    #[test]
    fn test_missing_created_at_fails() {
        let mut raw = payload();
        raw.as_object_mut().unwrap().remove("created_at");
        let err = Release::from_value(&raw).unwrap_err();
        assert!(matches!(err, ReleaseStatsError::MalformedRelease { ref field, ref value, .. }
            if field == "created_at" && value == "<missing>"));
    }

    #[test]
    fn test_non_object_payload_fails() {
        let err = Release::from_value(&json!([1, 2, 3])).unwrap_err();
        assert!(err.is_record_error());
    }

    #[test]
    fn test_payload_flags() {
        let raw = json!({"id": 5, "draft": true, "prerelease": false});
        assert!(is_draft_payload(&raw));
        assert!(!is_prerelease_payload(&raw));
        assert_eq!(payload_id(&raw), "5");
        assert_eq!(payload_id(&json!("oops")), "<unknown>");
    }
}
