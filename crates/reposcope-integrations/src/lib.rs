pub mod repo_ref;
pub mod repo_url;

pub use repo_ref::{parse_reference, ReferenceShape, RepositoryReference, RepositoryReferenceParser};
pub use repo_url::normalize_github_url;
