//! Workflow orchestration behind the command line.
//!
//! Command line values are merged over the configuration file here, so the
//! workflows can be called programmatically without depending on clap.
//! Every option is validated before the repository is touched.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::changelog::{self, ChangelogOptions, ChangelogRequest};
use crate::classifier::Classifier;
use crate::config::Config;
use crate::domain::VersionBump;
use crate::git::{Git2Repository, Signer, Sorting};
use crate::notice::{NoticeSink, Verbosity};
use crate::range::{RangeMode, RangeOptions};
use crate::release::{self, OnTagExists, Release, ReleaseOptions, VersionFloorScope};

/// Range selection flags shared by both workflows
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RangeArgs {
    /// Overrides `[range] mode`
    pub range_mode: Option<String>,
    pub strict_ancestor: bool,
    /// Overrides `[range] sorting`
    pub sorting: Option<String>,
    pub quiet: bool,
    pub verbose: bool,
}

impl RangeArgs {
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}

/// Output shape flags shared by both workflows
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OutputArgs {
    /// Print a JSON release payload instead of markdown
    pub github_payload: bool,
    pub draft: bool,
    pub prerelease: bool,
}

/// Arguments for the changelog workflow
#[derive(Debug, Clone, PartialEq)]
pub struct ChangelogWorkflowArgs {
    pub project: String,
    pub release_date: String,
    pub tail: String,
    pub head: String,
    pub repo: PathBuf,
    /// Version shown in the heading, defaults to `head`
    pub version: Option<String>,
    pub range: RangeArgs,
    pub output: OutputArgs,
}

/// Arguments for the release workflow
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseWorkflowArgs {
    pub project: String,
    pub repo: PathBuf,
    /// Overrides `[release] bump`
    pub bump: Option<String>,
    /// Defaults to today
    pub release_date: Option<String>,
    /// Overrides `[release] on_tag_exists`
    pub on_tag_exists: Option<String>,
    /// Overrides `[release] version_floor_scope`
    pub version_floor_scope: Option<String>,
    pub range: RangeArgs,
    pub output: OutputArgs,
}

fn range_options(args: &RangeArgs, config: &Config) -> Result<RangeOptions> {
    let mode = match &args.range_mode {
        Some(mode) => mode.parse::<RangeMode>().unwrap_or_default(),
        None => config.range.mode(),
    };
    let sorting = match &args.sorting {
        Some(sorting) => sorting.parse::<Sorting>()?,
        None => config.range.sorting()?,
    };

    Ok(RangeOptions {
        mode,
        strict_ancestor: args.strict_ancestor || config.range.strict_ancestor,
        sorting,
        verbosity: args.verbosity(),
    })
}

fn changelog_options(args: &RangeArgs, config: &Config) -> Result<ChangelogOptions> {
    Ok(ChangelogOptions {
        range: range_options(args, config)?,
        classifier: Classifier::new(config.classifier.fallback_to_includes),
    })
}

fn open_repository(path: &Path) -> Result<Git2Repository> {
    Git2Repository::open(path)
        .with_context(|| format!("Cannot open git repository at {}", path.display()))
}

/// Changelog between two references
///
/// # Returns
///
/// The markdown, or the release payload as JSON with `--github-payload`
pub fn run_changelog_workflow(
    args: &ChangelogWorkflowArgs,
    config: &Config,
    sink: &mut dyn NoticeSink,
) -> Result<String> {
    let options = changelog_options(&args.range, config)?;
    debug!(?options, "changelog options");
    let repo = open_repository(&args.repo)?;

    let request = ChangelogRequest {
        project: args.project.clone(),
        release_date: args.release_date.clone(),
        tail: args.tail.clone(),
        head: args.head.clone(),
        version: args.version.clone(),
    };

    if !args.output.github_payload {
        return Ok(changelog::generate(&repo, &request, &options, sink)?);
    }

    let payload = changelog::generate_payload(&repo, &request, &options, sink)?
        .draft(args.output.draft || config.release.draft)
        .prerelease(args.output.prerelease || config.release.prerelease);
    Ok(payload.to_json()?)
}

/// Tag HEAD with the next version and produce its notes
///
/// # Returns
///
/// The release, whose output is markdown or a payload per `--github-payload`
pub fn run_release_workflow(
    args: &ReleaseWorkflowArgs,
    config: &Config,
    sink: &mut dyn NoticeSink,
) -> Result<Release> {
    let bump = match &args.bump {
        Some(bump) => bump.parse::<VersionBump>()?,
        None => config.release.bump()?,
    };
    let version_floor_scope = match &args.version_floor_scope {
        Some(scope) => scope.parse::<VersionFloorScope>()?,
        None => config.release.version_floor_scope()?,
    };
    let on_tag_exists = match &args.on_tag_exists {
        Some(policy) => policy.parse::<OnTagExists>()?,
        None => config.release.on_tag_exists()?,
    };

    let options = ReleaseOptions {
        bump,
        release_date: args.release_date.clone(),
        on_tag_exists,
        version_floor_scope,
        changelog: changelog_options(&args.range, config)?,
        github_payload: args.output.github_payload,
        draft: args.output.draft || config.release.draft,
        prerelease: args.output.prerelease || config.release.prerelease,
        fallback_signer: config.signature.as_ref().map(Signer::from),
    };
    debug!(?options, "release options");

    let repo = open_repository(&args.repo)?;
    Ok(release::auto_release(&args.project, &repo, &options, sink)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GitmojiError;
    use crate::notice::Discard;

    fn release_args(repo: PathBuf) -> ReleaseWorkflowArgs {
        ReleaseWorkflowArgs {
            project: "proj".to_string(),
            repo,
            bump: None,
            release_date: None,
            on_tag_exists: None,
            version_floor_scope: None,
            range: RangeArgs::default(),
            output: OutputArgs::default(),
        }
    }

    #[test]
    fn test_cli_overrides_config() {
        let mut config = Config::default();
        config.range.mode = "head-only".to_string();
        config.range.sorting = "time".to_string();

        let args = RangeArgs {
            range_mode: Some("common-base".to_string()),
            ..RangeArgs::default()
        };
        let options = range_options(&args, &config).unwrap();
        assert_eq!(options.mode, RangeMode::CommonBase);
        assert_eq!(options.sorting, "time".parse::<Sorting>().unwrap());
    }

    #[test]
    fn test_config_fills_unset_flags() {
        let mut config = Config::default();
        config.range.strict_ancestor = true;
        config.classifier.fallback_to_includes = false;

        let options = changelog_options(&RangeArgs::default(), &config).unwrap();
        assert!(options.range.strict_ancestor);
        assert_eq!(options.range.mode, RangeMode::Auto);
        assert!(!options.classifier.fallback_to_includes);
    }

    #[test]
    fn test_quiet_and_verbose() {
        let args = RangeArgs {
            quiet: true,
            verbose: true,
            ..RangeArgs::default()
        };
        let options = range_options(&args, &Config::default()).unwrap();
        assert_eq!(options.verbosity, Verbosity::Quiet);
    }

    #[test]
    fn test_bad_sorting_is_rejected() {
        let args = RangeArgs {
            sorting: Some("sideways".to_string()),
            ..RangeArgs::default()
        };
        assert!(range_options(&args, &Config::default()).is_err());
    }

    #[test]
    fn test_invalid_bump_fails_before_opening_repository() {
        let mut args = release_args(PathBuf::from("/definitely/not/a/repo"));
        args.bump = Some("huge".to_string());

        let err = run_release_workflow(&args, &Config::default(), &mut Discard).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GitmojiError>(),
            Some(GitmojiError::InvalidBump(v)) if v == "huge"
        ));
    }

    #[test]
    fn test_invalid_scope_from_config() {
        let mut config = Config::default();
        config.release.version_floor_scope = "galaxy".to_string();

        let args = release_args(PathBuf::from("/definitely/not/a/repo"));
        let err = run_release_workflow(&args, &config, &mut Discard).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GitmojiError>(),
            Some(GitmojiError::InvalidScope(_))
        ));
    }
}
