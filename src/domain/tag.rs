use regex::Regex;
use std::sync::OnceLock;

/// Package name used for tags that carry only a version, e.g. `v1.2.3`
pub const ROOT_PACKAGE: &str = "*";

/// A release tag split into the package it belongs to and its version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
}

impl Tag {
    /// Create a new tag from a string
    pub fn new(name: impl Into<String>) -> Self {
        Tag { name: name.into() }
    }

    /// Package part of the tag.
    ///
    /// `@scope/pkg@1.2.3` -> `@scope/pkg`, `pkg@1.2.3` -> `pkg`,
    /// `pkg-v1.2.3` -> `pkg`, `v1.2.3` -> [`ROOT_PACKAGE`].
    /// Tags without a recognizable version are their own package.
    pub fn package(&self) -> String {
        match split(&self.name) {
            Some((package, _)) if package.is_empty() => ROOT_PACKAGE.to_string(),
            Some((package, _)) => package.to_string(),
            None => self.name.clone(),
        }
    }

    /// Semantic version carried by the tag, if any
    pub fn version(&self) -> Option<semver::Version> {
        split(&self.name).and_then(|(_, version)| semver::Version::parse(version).ok())
    }
}

fn tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?P<package>.*?)(?:@|[-_/]?[vV]|[-_/]|^)(?P<version>\d+\.\d+\.\d+(?:[-+][0-9A-Za-z.+-]+)?)$")
            .expect("tag pattern is valid")
    })
}

fn split(name: &str) -> Option<(&str, &str)> {
    let captures = tag_regex().captures(name.trim())?;
    let package = captures.name("package").map_or("", |m| m.as_str());
    let version = captures.name("version")?.as_str();
    Some((package, version))
}
