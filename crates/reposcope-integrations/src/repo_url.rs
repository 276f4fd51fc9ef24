//! Canonical GitHub names and link derivation for repository references.
//!
//! Links are only built here. Nothing is requested from them.

use reposcope_core::ReferenceError;
use url::Url;

use crate::repo_ref::RepositoryReference;

const GITHUB_PREFIXES: [&str; 3] = [
    "git@github.com:",
    "https://github.com/",
    "http://github.com/",
];

/// Normalizes a GitHub remote to the conventional `owner/repo` form.
///
/// Supports:
/// - `https://github.com/owner/repo`
/// - `https://github.com/owner/repo.git`
/// - `http://github.com/owner/repo`
/// - `git@github.com:owner/repo.git`
/// - `git@github.com:owner/repo`
///
/// Returns `None` if the URL does not look like a GitHub URL.
pub fn normalize_github_url(url: &str) -> Option<String> {
    let url = url.trim();
    let rest = GITHUB_PREFIXES
        .iter()
        .find_map(|prefix| url.strip_prefix(prefix))?;
    let path = rest.split(['?', '#']).next().unwrap_or(rest);

    let segments: Vec<&str> = path.split('/').collect();
    match segments[..] {
        [owner, repo, ..] if !owner.is_empty() && !owner.contains("..") => {
            let repo = repo.strip_suffix(".git").unwrap_or(repo);
            (!repo.is_empty() && !repo.contains("..")).then(|| format!("{owner}/{repo}"))
        }
        _ => None,
    }
}

impl RepositoryReference {
    /// Web page for the repository, e.g. `https://github.com/{owner}/{repository}`.
    pub fn html_url(&self, web_base: &Url) -> Result<Url, ReferenceError> {
        join_segments(web_base, &[self.owner(), self.repository()])
    }

    /// REST endpoint for the repository, e.g. `https://api.github.com/repos/{owner}/{repository}`.
    pub fn api_url(&self, api_base: &Url) -> Result<Url, ReferenceError> {
        join_segments(api_base, &["repos", self.owner(), self.repository()])
    }
}

fn join_segments(base: &Url, segments: &[&str]) -> Result<Url, ReferenceError> {
    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|()| ReferenceError::InvalidUrl(format!("{base} cannot be a base URL")))?;
        path.pop_if_empty().extend(segments.iter().copied());
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_https_without_git() {
        assert_eq!(
            normalize_github_url("https://github.com/foo/bar"),
            Some("foo/bar".to_string())
        );
    }

    #[test]
    fn test_https_with_git_and_extra_path() {
        assert_eq!(
            normalize_github_url("https://github.com/foo/bar.git"),
            Some("foo/bar".to_string())
        );
        assert_eq!(
            normalize_github_url("https://github.com/foo/bar/tree/main?tab=readme#top"),
            Some("foo/bar".to_string())
        );
    }

    #[test]
    fn test_ssh() {
        assert_eq!(
            normalize_github_url("git@github.com:foo/bar.git"),
            Some("foo/bar".to_string())
        );
        assert_eq!(
            normalize_github_url("git@github.com:foo/bar"),
            Some("foo/bar".to_string())
        );
    }

    #[test]
    fn test_rejects_non_github_and_incomplete() {
        assert_eq!(normalize_github_url(""), None);
        assert_eq!(normalize_github_url("foo/bar"), None);
        assert_eq!(normalize_github_url("https://gitlab.com/a/b"), None);
        assert_eq!(normalize_github_url("https://github.com/foo"), None);
        assert_eq!(normalize_github_url("https://github.com/foo/.git"), None);
        assert_eq!(normalize_github_url("git@github.com:../bar"), None);
    }

    #[test]
    fn test_trimmed() {
        assert_eq!(
            normalize_github_url("  https://github.com/x/y  "),
            Some("x/y".to_string())
        );
    }

    #[test]
    fn test_html_url() {
        let reference = RepositoryReference::new("rust-lang", "rust").unwrap();
        let base = Url::parse("https://github.com").unwrap();
        assert_eq!(
            reference.html_url(&base).unwrap().as_str(),
            "https://github.com/rust-lang/rust"
        );
    }

    #[test]
    fn test_api_url_with_enterprise_prefix() {
        let reference = RepositoryReference::new("team", "service").unwrap();
        let base = Url::parse("https://ghe.example.com/api/v3/?x=1").unwrap();
        assert_eq!(
            reference.api_url(&base).unwrap().as_str(),
            "https://ghe.example.com/api/v3/repos/team/service"
        );
    }

    #[test]
    fn test_api_url_escapes_segments() {
        let reference = RepositoryReference::new("a b", "c?d").unwrap();
        let base = Url::parse("https://api.github.com").unwrap();
        assert_eq!(
            reference.api_url(&base).unwrap().as_str(),
            "https://api.github.com/repos/a%20b/c%3Fd"
        );
    }

    #[test]
    fn test_cannot_be_base() {
        let reference = RepositoryReference::new("o", "r").unwrap();
        let base = Url::parse("mailto:someone@example.com").unwrap();
        assert!(matches!(
            reference.html_url(&base),
            Err(ReferenceError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_parsed_reference_links_follow_parsed_fields() {
        let reference = crate::parse_reference("ownerX/repoY").unwrap();
        let base = Url::parse("https://github.com").unwrap();
        assert_eq!(
            reference.html_url(&base).unwrap().as_str(),
            "https://github.com/repoY/ownerX"
        );
    }
}
