//! Automatic SemVer release: pick the next version from existing tags, tag
//! HEAD with it and produce the notes since the previous reachable release.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, info, warn};

use crate::changelog::{self, ChangelogOptions, ReleasePayload};
use crate::domain::{SemVer, VersionBump};
use crate::error::{GitmojiError, Result};
use crate::git::{Repository, Signer, TagRef};
use crate::notice::NoticeSink;
use crate::range;

/// Tagger identity used when the repository has none configured
pub const FALLBACK_SIGNER_NAME: &str = "gitmoji-release";
pub const FALLBACK_SIGNER_EMAIL: &str = "release@gitmoji-release";

/// Which tags set the floor for the next version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VersionFloorScope {
    /// Every version tag in the repository, so numbers used on abandoned
    /// branches are never issued again
    #[default]
    Global,
    /// Only version tags reachable from HEAD
    Reachable,
}

impl FromStr for VersionFloorScope {
    type Err = GitmojiError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "global" => Ok(VersionFloorScope::Global),
            "reachable" => Ok(VersionFloorScope::Reachable),
            other => Err(GitmojiError::InvalidScope(other.to_string())),
        }
    }
}

impl fmt::Display for VersionFloorScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VersionFloorScope::Global => "global",
            VersionFloorScope::Reachable => "reachable",
        })
    }
}

/// What to do when the new tag name is already taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnTagExists {
    #[default]
    Error,
    /// Keep the existing tag and carry on
    Skip,
    /// Delete the existing tag and create it again at HEAD
    Overwrite,
}

impl FromStr for OnTagExists {
    type Err = GitmojiError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "error" => Ok(OnTagExists::Error),
            "skip" => Ok(OnTagExists::Skip),
            "overwrite" => Ok(OnTagExists::Overwrite),
            other => Err(GitmojiError::config(format!(
                "Unsupported on_tag_exists value: {} (expected error, skip or overwrite)",
                other
            ))),
        }
    }
}

impl fmt::Display for OnTagExists {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OnTagExists::Error => "error",
            OnTagExists::Skip => "skip",
            OnTagExists::Overwrite => "overwrite",
        })
    }
}

/// Settings for [`auto_release`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReleaseOptions {
    pub bump: VersionBump,
    /// ISO date for the notes; today when unset
    pub release_date: Option<String>,
    pub on_tag_exists: OnTagExists,
    pub version_floor_scope: VersionFloorScope,
    pub changelog: ChangelogOptions,
    /// Produce a [`ReleasePayload`] instead of plain markdown
    pub github_payload: bool,
    pub draft: bool,
    pub prerelease: bool,
    /// Tagger used when the repository has no identity configured
    pub fallback_signer: Option<Signer>,
}

/// Release notes in the requested shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseOutput {
    Markdown(String),
    Payload(ReleasePayload),
}

impl ReleaseOutput {
    /// Text to print: the markdown itself or the payload as JSON
    pub fn to_text(&self) -> Result<String> {
        match self {
            ReleaseOutput::Markdown(markdown) => Ok(markdown.clone()),
            ReleaseOutput::Payload(payload) => payload.to_json(),
        }
    }
}

/// What happened to the release tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagOutcome {
    Created,
    /// The name was taken and the existing tag was left alone
    Skipped,
    /// The existing tag was replaced by one at HEAD
    Overwritten,
}

/// Outcome of a release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub version: SemVer,
    pub tag_name: String,
    pub tag_outcome: TagOutcome,
    /// Last version tag reachable from HEAD before this release
    pub previous_tag: Option<String>,
    pub output: ReleaseOutput,
}

/// Highest version among `tags`, with the tag that carries it.
/// On equal versions the first tag in name order wins.
fn highest<'t, I>(tags: I) -> Option<(SemVer, &'t TagRef)>
where
    I: IntoIterator<Item = &'t TagRef>,
{
    tags.into_iter()
        .filter_map(|tag| SemVer::from_tag(&tag.name).map(|version| (version, tag)))
        .fold(None, |best, (version, tag)| match best {
            Some((top, _)) if top >= version => best,
            _ => Some((version, tag)),
        })
}

/// Version tags reachable from `head`, a tag on `head` itself included
fn reachable_tags<'t, R>(repo: &R, head: git2::Oid, tags: &'t [TagRef]) -> Result<Vec<&'t TagRef>>
where
    R: Repository + ?Sized,
{
    let mut reachable = Vec::new();
    for tag in tags {
        if SemVer::from_tag(&tag.name).is_none() {
            continue;
        }
        if tag.target == head || repo.is_descendant_of(head, tag.target)? {
            reachable.push(tag);
        }
    }
    Ok(reachable)
}

/// Next version after `last_reachable`, floored by `global_max` in global scope
pub fn next_version(
    last_reachable: SemVer,
    global_max: SemVer,
    scope: VersionFloorScope,
    bump: VersionBump,
) -> Result<SemVer> {
    let base = match scope {
        VersionFloorScope::Global => last_reachable.max(global_max),
        VersionFloorScope::Reachable => last_reachable,
    };
    base.bump(bump)
}

fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

fn create_release_tag<R>(
    repo: &R,
    tag_name: &str,
    head: git2::Oid,
    signer: &Signer,
    policy: OnTagExists,
) -> Result<TagOutcome>
where
    R: Repository + ?Sized,
{
    let err = match repo.create_tag(tag_name, head, tag_name, signer) {
        Ok(()) => {
            info!(tag = tag_name, "created release tag");
            return Ok(TagOutcome::Created);
        }
        Err(err) => err,
    };

    match policy {
        OnTagExists::Error => Err(err),
        OnTagExists::Skip => {
            warn!(tag = tag_name, "{}; keeping the existing tag", err);
            Ok(TagOutcome::Skipped)
        }
        OnTagExists::Overwrite => {
            if let Err(delete_err) = repo.delete_tag(tag_name) {
                debug!(tag = tag_name, "{}", delete_err);
                return Err(err);
            }
            repo.create_tag(tag_name, head, tag_name, signer)?;
            info!(tag = tag_name, "overwrote release tag");
            Ok(TagOutcome::Overwritten)
        }
    }
}

/// Tag HEAD with the next version and render the notes for it.
///
/// The notes cover everything since the last version tag reachable from HEAD,
/// or the whole history when there is none.
pub fn auto_release<R>(
    project: &str,
    repo: &R,
    options: &ReleaseOptions,
    sink: &mut dyn NoticeSink,
) -> Result<Release>
where
    R: Repository + ?Sized,
{
    let release_date = options.release_date.clone().unwrap_or_else(today);
    let head = repo.head_commit()?;

    let tags = repo.list_tags()?;
    let last_reachable = highest(reachable_tags(repo, head, &tags)?);
    let global_max = highest(&tags);

    let version = next_version(
        last_reachable.map(|(v, _)| v).unwrap_or_default(),
        global_max.map(|(v, _)| v).unwrap_or_default(),
        options.version_floor_scope,
        options.bump,
    )?;
    let tag_name = version.tag_name();
    let previous_tag = last_reachable.map(|(_, tag)| tag.name.clone());
    debug!(
        previous = ?previous_tag,
        global_max = ?global_max.map(|(v, _)| v.to_string()),
        scope = %options.version_floor_scope,
        bump = %options.bump,
        "computed next version {}",
        version
    );

    let signer = repo
        .default_signer()
        .or_else(|| options.fallback_signer.clone())
        .unwrap_or_else(|| Signer::new(FALLBACK_SIGNER_NAME, FALLBACK_SIGNER_EMAIL));
    let tag_outcome = create_release_tag(repo, &tag_name, head, &signer, options.on_tag_exists)?;

    let commits = match &previous_tag {
        Some(tail) => range::resolve(repo, tail, &tag_name, &options.changelog.range, sink)?,
        None => range::resolve_all(repo, &tag_name, options.changelog.range.sorting)?,
    };
    let structured = changelog::collect(commits, &options.changelog.classifier)?;
    let markdown = changelog::render(project, &tag_name, &release_date, &structured);

    let output = if options.github_payload {
        ReleaseOutput::Payload(
            ReleasePayload::new(project, &tag_name, &tag_name, markdown)
                .draft(options.draft)
                .prerelease(options.prerelease),
        )
    } else {
        ReleaseOutput::Markdown(markdown)
    };

    Ok(Release {
        version,
        tag_name,
        tag_outcome,
        previous_tag,
        output,
    })
}
