use std::collections::BTreeMap;

use crate::domain::{Release, Tag};

/// Release count and newest version for one package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSummary {
    pub package: String,
    pub count: usize,
    pub latest: Option<String>,
}

/// Count releases per package, derived from tag names.
///
/// Every release is counted regardless of weekday. Releases without a tag
/// name are grouped under their title. Rows are sorted by package name.
pub fn summarize_tags(releases: &[Release]) -> Vec<TagSummary> {
    let mut packages: BTreeMap<String, (usize, Option<semver::Version>)> = BTreeMap::new();

    for release in releases {
        let name = if release.tag_name.trim().is_empty() {
            &release.title
        } else {
            &release.tag_name
        };
        let tag = Tag::new(name.trim());

        let entry = packages.entry(tag.package()).or_insert((0, None));
        entry.0 += 1;
        if let Some(version) = tag.version() {
            if entry.1.as_ref().map_or(true, |latest| version > *latest) {
                entry.1 = Some(version);
            }
        }
    }

    packages
        .into_iter()
        .map(|(package, (count, latest))| TagSummary {
            package,
            count,
            latest: latest.map(|v| v.to_string()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn release(tag: &str) -> Release {
        let ts = DateTime::parse_from_rfc3339("2025-05-31T10:00:00Z").unwrap();
        Release {
            id: tag.to_string(),
            title: tag.to_string(),
            tag_name: tag.to_string(),
            body: None,
            published_at: ts,
            created_at: ts,
            draft: false,
            prerelease: false,
        }
    }

    #[test]
    fn test_monorepo_tags_grouped_by_package() {
        let releases = vec![
            release("@stackflow/core@1.0.0"),
            release("@stackflow/react@1.1.0"),
            release("@stackflow/core@1.2.0"),
            release("@stackflow/core@1.1.5"),
        ];
        let summary = summarize_tags(&releases);
        assert_eq!(
            summary,
            vec![
                TagSummary {
                    package: "@stackflow/core".to_string(),
                    count: 3,
                    latest: Some("1.2.0".to_string()),
                },
                TagSummary {
                    package: "@stackflow/react".to_string(),
                    count: 1,
                    latest: Some("1.1.0".to_string()),
                },
            ]
        );
    }

    #[test]
    fn test_plain_tags_and_prereleases() {
        let releases = vec![release("v1.0.0"), release("v2.0.0-rc.1"), release("v1.9.0")];
        let summary = summarize_tags(&releases);
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].package, "*");
        assert_eq!(summary[0].count, 3);
        assert_eq!(summary[0].latest.as_deref(), Some("2.0.0-rc.1"));
    }

    #[test]
    fn test_unversioned_tag_has_no_latest() {
        let summary = summarize_tags(&[release("nightly")]);
        assert_eq!(summary[0].package, "nightly");
        assert_eq!(summary[0].latest, None);
    }

    #[test]
    fn test_empty_input() {
        assert!(summarize_tags(&[]).is_empty());
    }
}
