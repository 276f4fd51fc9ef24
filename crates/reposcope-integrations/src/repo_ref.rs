//! Parse user-supplied repository references into an (owner, repository) pair.
//!
//! Two shapes are recognised:
//! - short form `a/b`
//! - full URL `scheme://host/a/b[/...]`
//!
//! Anything else is rejected with [`ReferenceError::InvalidReferenceFormat`].
//! Which of `a`/`b` becomes the owner is governed by [`SegmentOrder`]; the
//! default reads `a` as the repository and `b` as the owner.

use std::fmt;
use std::str::FromStr;

use reposcope_core::{ParserConfig, ReferenceError, SegmentOrder};
use serde::{Deserialize, Serialize};

/// Structural form of a raw reference, borrowed from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceShape<'a> {
    /// Exactly two `/`-separated segments.
    ShortForm { first: &'a str, second: &'a str },
    /// `scheme://host/first/second`, trailing segments ignored.
    FullUrl {
        scheme: &'a str,
        host: &'a str,
        first: &'a str,
        second: &'a str,
    },
    Invalid,
}

impl<'a> ReferenceShape<'a> {
    pub fn classify(raw: &'a str) -> Self {
        let segments: Vec<&'a str> = raw.split('/').collect();
        match segments[..] {
            [first, second] => ReferenceShape::ShortForm { first, second },
            [scheme, "", host, first, second, ..] if !host.is_empty() => {
                match scheme_name(scheme) {
                    Some(scheme) => ReferenceShape::FullUrl {
                        scheme,
                        host,
                        first,
                        second,
                    },
                    None => ReferenceShape::Invalid,
                }
            }
            _ => ReferenceShape::Invalid,
        }
    }

    /// The two path segments naming the repository, in input order.
    pub fn path_segments(&self) -> Option<(&'a str, &'a str)> {
        match *self {
            ReferenceShape::ShortForm { first, second }
            | ReferenceShape::FullUrl { first, second, .. } => Some((first, second)),
            ReferenceShape::Invalid => None,
        }
    }
}

/// `"https:"` -> `Some("https")`. RFC 3986 scheme characters only.
fn scheme_name(segment: &str) -> Option<&str> {
    let name = segment.strip_suffix(':')?;
    let mut chars = name.chars();
    let starts_alpha = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    let rest_valid = chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    (starts_alpha && rest_valid).then_some(name)
}

/// A parsed (owner, repository) pair.
///
/// Fields are only reachable through accessors. [`RepositoryReference::new`]
/// requires both to be non-empty; the parser may emit empty fields when
/// `allow_empty_segments` is set, and deserialization accepts anything the
/// parser can emit so serialized references always read back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryReference {
    owner: String,
    repository: String,
}

impl RepositoryReference {
    /// Build a reference from explicit parts. Both must be non-empty.
    pub fn new(
        owner: impl Into<String>,
        repository: impl Into<String>,
    ) -> Result<Self, ReferenceError> {
        let owner = owner.into();
        let repository = repository.into();
        if owner.is_empty() {
            return Err(ReferenceError::EmptyField("owner"));
        }
        if repository.is_empty() {
            return Err(ReferenceError::EmptyField("repository"));
        }
        Ok(Self { owner, repository })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// `owner/repository`
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repository)
    }

    /// Consume into `(owner, repository)`.
    pub fn into_parts(self) -> (String, String) {
        (self.owner, self.repository)
    }
}

impl fmt::Display for RepositoryReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repository)
    }
}

impl FromStr for RepositoryReference {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_reference(s)
    }
}

/// Stateless parser; cheap to clone and share between threads.
#[derive(Debug, Clone, Default)]
pub struct RepositoryReferenceParser {
    config: ParserConfig,
}

impl RepositoryReferenceParser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse `raw` without trimming or character validation.
    pub fn parse(&self, raw: &str) -> Result<RepositoryReference, ReferenceError> {
        let shape = ReferenceShape::classify(raw);
        tracing::debug!(?shape, "Classified repository reference");

        let (first, second) = shape
            .path_segments()
            .ok_or_else(|| ReferenceError::invalid_format(raw))?;

        let (owner, repository) = match self.config.segment_order {
            SegmentOrder::RepositoryFirst => (second, first),
            SegmentOrder::OwnerFirst => (first, second),
        };

        if owner.is_empty() || repository.is_empty() {
            if !self.config.allow_empty_segments {
                return Err(ReferenceError::invalid_format(raw));
            }
            tracing::trace!("Accepting reference with empty segment");
        }

        Ok(RepositoryReference {
            owner: owner.to_string(),
            repository: repository.to_string(),
        })
    }
}

/// Parse with the default configuration.
pub fn parse_reference(raw: &str) -> Result<RepositoryReference, ReferenceError> {
    RepositoryReferenceParser::default().parse(raw)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    fn invalid(raw: &str) -> ReferenceError {
        ReferenceError::invalid_format(raw)
    }

    #[test]
    fn test_no_slash_is_invalid() {
        for raw in ["", "repo", "https:", "   "] {
            assert_eq!(parse_reference(raw), Err(invalid(raw)), "input {raw:?}");
        }
    }

    #[test]
    fn test_short_form_assigns_repository_first() {
        let parsed = parse_reference("ownerX/repoY").unwrap();
        assert_eq!(parsed.repository(), "ownerX");
        assert_eq!(parsed.owner(), "repoY");
    }

    #[test]
    fn test_full_url_assigns_repository_first() {
        let parsed = parse_reference("https://github.com/ownerX/repoY").unwrap();
        assert_eq!(parsed.repository(), "ownerX");
        assert_eq!(parsed.owner(), "repoY");
    }

    #[test]
    fn test_full_url_ignores_trailing_segments() {
        let parsed = parse_reference("https://github.com/ownerX/repoY/tree/main").unwrap();
        assert_eq!(parsed.repository(), "ownerX");
        assert_eq!(parsed.owner(), "repoY");

        let parsed = parse_reference("http://gitlab.example.org/a/b/").unwrap();
        assert_eq!(parsed.repository(), "a");
        assert_eq!(parsed.owner(), "b");
    }

    #[test]
    fn test_owner_first_order() {
        let parser = RepositoryReferenceParser::new(ParserConfig {
            segment_order: SegmentOrder::OwnerFirst,
            allow_empty_segments: false,
        });
        let parsed = parser.parse("ownerX/repoY").unwrap();
        assert_eq!(parsed.owner(), "ownerX");
        assert_eq!(parsed.repository(), "repoY");

        let parsed = parser.parse("https://github.com/ownerX/repoY").unwrap();
        assert_eq!(parsed.owner(), "ownerX");
        assert_eq!(parsed.repository(), "repoY");
    }

    #[test]
    fn test_parse_is_idempotent() {
        let parser = RepositoryReferenceParser::default();
        for raw in ["a/b", "https://github.com/rust-lang/rust", "nope"] {
            assert_eq!(parser.parse(raw), parser.parse(raw));
        }
    }

    #[test]
    fn test_lone_slash_rejected_by_default() {
        assert_eq!(parse_reference("/"), Err(invalid("/")));
        assert_eq!(parse_reference("a/"), Err(invalid("a/")));
        assert_eq!(parse_reference("/b"), Err(invalid("/b")));
    }

    #[test]
    fn test_lone_slash_accepted_when_configured() {
        let parser = RepositoryReferenceParser::new(ParserConfig {
            allow_empty_segments: true,
            ..ParserConfig::default()
        });
        let parsed = parser.parse("/").unwrap();
        assert_eq!(parsed.owner(), "");
        assert_eq!(parsed.repository(), "");
    }

    #[test]
    fn test_host_without_scheme_is_invalid() {
        let raw = "github.com/torvalds/linux";
        assert_eq!(ReferenceShape::classify(raw), ReferenceShape::Invalid);
        assert_eq!(parse_reference(raw), Err(invalid(raw)));
    }

    #[test]
    fn test_double_slash_in_short_form_is_invalid() {
        assert_eq!(ReferenceShape::classify("a//b"), ReferenceShape::Invalid);
    }

    #[test]
    fn test_truncated_url_is_invalid() {
        for raw in ["https://github.com", "https://github.com/", "https://github.com/owner"] {
            assert_eq!(parse_reference(raw), Err(invalid(raw)), "input {raw:?}");
        }
    }

    #[test]
    fn test_bad_scheme_is_invalid() {
        for raw in ["://github.com/a/b", "1http://github.com/a/b", "ht tp://github.com/a/b"] {
            assert_eq!(ReferenceShape::classify(raw), ReferenceShape::Invalid, "input {raw:?}");
        }
    }

    #[test]
    fn test_missing_host_is_invalid() {
        assert_eq!(ReferenceShape::classify("file:///a/b"), ReferenceShape::Invalid);
    }

    #[test]
    fn test_classify_full_url() {
        assert_eq!(
            ReferenceShape::classify("git+ssh://host.example/a/b"),
            ReferenceShape::FullUrl {
                scheme: "git+ssh",
                host: "host.example",
                first: "a",
                second: "b",
            }
        );
    }

    #[test]
    fn test_segments_are_not_trimmed() {
        let parsed = parse_reference(" a / b ").unwrap();
        assert_eq!(parsed.repository(), " a ");
        assert_eq!(parsed.owner(), " b ");
    }

    #[test]
    fn test_from_str() {
        let parsed: RepositoryReference = "x/y".parse().unwrap();
        assert_eq!(parsed.full_name(), "y/x");
        assert!("xy".parse::<RepositoryReference>().is_err());
    }

    #[test]
    fn test_new_rejects_empty_fields() {
        assert_eq!(
            RepositoryReference::new("", "repo"),
            Err(ReferenceError::EmptyField("owner"))
        );
        assert_eq!(
            RepositoryReference::new("owner", ""),
            Err(ReferenceError::EmptyField("repository"))
        );
    }

    #[test]
    fn test_display_and_into_parts() {
        let reference = RepositoryReference::new("rust-lang", "cargo").unwrap();
        assert_eq!(reference.to_string(), "rust-lang/cargo");
        assert_eq!(
            reference.into_parts(),
            ("rust-lang".to_string(), "cargo".to_string())
        );
    }

    #[test]
    fn test_deserialize_reads_fields() {
        let ok: RepositoryReference =
            serde_json::from_str(r#"{"owner":"o","repository":"r"}"#).unwrap();
        assert_eq!(ok.owner(), "o");
        assert_eq!(ok.repository(), "r");

        assert!(serde_json::from_str::<RepositoryReference>(r#"{"owner":"o"}"#).is_err());
    }

    #[test]
    fn test_lenient_parse_survives_json_round_trip() {
        let parser = RepositoryReferenceParser::new(ParserConfig {
            allow_empty_segments: true,
            ..ParserConfig::default()
        });

        for raw in ["a/", "/", "https://github.com//b"] {
            let parsed = parser.parse(raw).unwrap();
            let json = serde_json::to_string(&parsed).unwrap();
            let restored: RepositoryReference = serde_json::from_str(&json).unwrap();
            assert_eq!(restored, parsed, "input {raw:?} via {json}");
        }
    }

    #[test]
    fn test_serialize_field_names() {
        let reference = RepositoryReference::new("o", "r").unwrap();
        let value = serde_json::to_value(&reference).unwrap();
        assert_eq!(value, serde_json::json!({"owner": "o", "repository": "r"}));
    }
}
