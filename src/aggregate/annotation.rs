//! Per-release annotation blocks for the report's `Releases` column.

use regex::Regex;

use crate::domain::{DayBoundary, Release};
use crate::error::{ReleaseStatsError, Result};

/// First line of every annotation block
pub const SEPARATOR: &str = "----------------------------------------";

/// Marker in front of the release title
pub const TITLE_MARKER: &str = "📦";

/// Rendered in place of a change-log with no meaningful lines
pub const NO_DESCRIPTION: &str = "(No description)";

/// Section headers emitted by changeset tooling that carry no information on their own
pub fn default_boilerplate_headers() -> Vec<String> {
    vec![
        "Patch Changes".to_string(),
        "Minor Changes".to_string(),
        "Major Changes".to_string(),
    ]
}

/// Renders one release as a multi-line text block
#[derive(Debug, Clone)]
pub struct AnnotationFormatter {
    boilerplate: Option<Regex>,
    day_boundary: DayBoundary,
}

impl AnnotationFormatter {
    /// Build a formatter that drops the given header names.
    ///
    /// Each name is matched exactly after trimming, in plain form, as a
    /// markdown heading (`### Patch Changes`) or in bold (`**Patch Changes**`).
    pub fn new(boilerplate_headers: &[String], day_boundary: DayBoundary) -> Result<Self> {
        let names: Vec<String> = boilerplate_headers
            .iter()
            .map(|h| h.trim())
            .filter(|h| !h.is_empty())
            .map(regex::escape)
            .collect();

        let boilerplate = if names.is_empty() {
            None
        } else {
            let alternatives = names.join("|");
            let pattern = format!(
                r"^(?:#{{1,6}}\s*)?(?:(?:{alt})|\*\*(?:{alt})\*\*)$",
                alt = alternatives
            );
            Some(Regex::new(&pattern).map_err(|e| {
                ReleaseStatsError::config(format!("Invalid boilerplate header list: {}", e))
            })?)
        };

        Ok(AnnotationFormatter {
            boilerplate,
            day_boundary,
        })
    }

    /// Format a release:
    ///
    /// ```text
    /// ----------------------------------------
    /// 📦 v1.0.0
    /// 🕒 2025-05-30 09:00
    /// 📝 Changes:
    /// Fixed bug A
    /// ```
    pub fn format(&self, release: &Release) -> String {
        let created = self
            .day_boundary
            .local_datetime(&release.created_at)
            .format("%Y-%m-%d %H:%M");

        format!(
            "{}\n{} {}\n🕒 {}\n📝 Changes:\n{}",
            SEPARATOR,
            TITLE_MARKER,
            release.title,
            created,
            self.changelog(release.body.as_deref())
        )
    }

    /// Trimmed, non-boilerplate change-log lines, or the placeholder
    pub fn changelog(&self, body: Option<&str>) -> String {
        let lines: Vec<&str> = body
            .unwrap_or_default()
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !self.is_boilerplate(line))
            .collect();

        if lines.is_empty() {
            NO_DESCRIPTION.to_string()
        } else {
            lines.join("\n")
        }
    }

    fn is_boilerplate(&self, line: &str) -> bool {
        self.boilerplate
            .as_ref()
            .is_some_and(|re| re.is_match(line))
    }
}

impl Default for AnnotationFormatter {
    fn default() -> Self {
        AnnotationFormatter::new(&default_boilerplate_headers(), DayBoundary::Utc)
            .expect("default boilerplate pattern is valid")
    }
}
