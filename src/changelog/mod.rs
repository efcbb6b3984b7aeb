//! Markdown changelog generation.
//!
//! [`generate`] runs the whole pipeline for a pair of references: resolve the
//! commit range, bucket commits by category, then render.

pub mod payload;
pub mod render;

pub use payload::ReleasePayload;
pub use render::render;

use tracing::debug;

use crate::classifier::{Classifier, StructuredChangelog};
use crate::error::Result;
use crate::git::Repository;
use crate::notice::NoticeSink;
use crate::range::{self, CommitRange, RangeOptions};

/// What a changelog is about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogRequest {
    pub project: String,
    pub release_date: String,
    pub tail: String,
    pub head: String,
    /// Version shown in the heading; the head reference when unset
    pub version: Option<String>,
}

impl ChangelogRequest {
    pub fn version(&self) -> &str {
        self.version.as_deref().unwrap_or(&self.head)
    }
}

/// How the commits of a changelog are selected and classified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChangelogOptions {
    pub range: RangeOptions,
    pub classifier: Classifier,
}

/// Drain a resolved range into category buckets
pub fn collect(range: CommitRange<'_>, classifier: &Classifier) -> Result<StructuredChangelog> {
    let commits = range.collect::<Result<Vec<_>>>()?;
    debug!(count = commits.len(), "collected commits");
    Ok(classifier.structure(commits))
}

/// Markdown changelog for the commits new in `request.head` relative to `request.tail`
pub fn generate<R>(
    repo: &R,
    request: &ChangelogRequest,
    options: &ChangelogOptions,
    sink: &mut dyn NoticeSink,
) -> Result<String>
where
    R: Repository + ?Sized,
{
    let range = range::resolve(repo, &request.tail, &request.head, &options.range, sink)?;
    let structured = collect(range, &options.classifier)?;

    Ok(render(
        &request.project,
        request.version(),
        &request.release_date,
        &structured,
    ))
}

/// Same as [`generate`], wrapped in a release payload tagged with the version
pub fn generate_payload<R>(
    repo: &R,
    request: &ChangelogRequest,
    options: &ChangelogOptions,
    sink: &mut dyn NoticeSink,
) -> Result<ReleasePayload>
where
    R: Repository + ?Sized,
{
    let body = generate(repo, request, options, sink)?;
    let version = request.version();
    Ok(ReleasePayload::new(&request.project, version, version, body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockRepository;
    use crate::notice::Discard;

    fn request(tail: &str, head: &str) -> ChangelogRequest {
        ChangelogRequest {
            project: "proj".to_string(),
            release_date: "2024-01-01".to_string(),
            tail: tail.to_string(),
            head: head.to_string(),
            version: None,
        }
    }

    fn tagged_repo() -> MockRepository {
        let mut repo = MockRepository::new();
        let c1 = repo.commit_on_head(":tada: init").unwrap();
        let c2 = repo.commit_on_head(":art: change").unwrap();
        repo.add_tag("v1", c1);
        repo.add_tag("v2", c2);
        repo
    }

    #[test]
    fn test_generate_tag_to_tag() {
        let repo = tagged_repo();
        let md = generate(&repo, &request("v1", "v2"), &ChangelogOptions::default(), &mut Discard)
            .unwrap();

        assert!(md.starts_with("# proj v2"));
        assert!(md.contains("- change ("));
        assert!(!md.contains("init"));
    }

    #[test]
    fn test_version_override() {
        let repo = tagged_repo();
        let mut req = request("v1", "v2");
        req.version = Some("2.0.0".to_string());
        let md = generate(&repo, &req, &ChangelogOptions::default(), &mut Discard).unwrap();
        assert!(md.starts_with("# proj 2.0.0"));
    }

    #[test]
    fn test_generate_payload() {
        let repo = tagged_repo();
        let payload =
            generate_payload(&repo, &request("v1", "v2"), &ChangelogOptions::default(), &mut Discard)
                .unwrap();
        assert_eq!(payload.tag_name, "v2");
        assert_eq!(payload.name, "proj v2");
        assert!(payload.body.contains("- change ("));
    }

    #[test]
    fn test_missing_ref_fails() {
        let repo = tagged_repo();
        let err = generate(&repo, &request("v1", "nope"), &ChangelogOptions::default(), &mut Discard)
            .unwrap_err();
        assert!(err.to_string().contains("nope"));
    }
}
