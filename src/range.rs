//! Commit range resolution between two named points of the commit graph.
//!
//! `auto` mode picks a strategy from the shape of the history:
//! - head descends from tail: `direct`, everything after tail
//! - histories diverged: `common-base`, everything after the merge-base
//! - histories are unrelated: `head-only`, everything reachable from head
//!
//! Strategy choice and fallbacks are reported through a [`NoticeSink`] and
//! never change which commits are yielded.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::domain::CommitRecord;
use crate::error::{GitmojiError, Result};
use crate::git::{CommitWalk, Repository, Sorting};
use crate::notice::{NoticeSink, RangeNotice, Verbosity};

/// Strategy for deciding which commits are new
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangeMode {
    #[default]
    Auto,
    Direct,
    CommonBase,
    HeadOnly,
}

impl RangeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RangeMode::Auto => "auto",
            RangeMode::Direct => "direct",
            RangeMode::CommonBase => "common-base",
            RangeMode::HeadOnly => "head-only",
        }
    }
}

impl FromStr for RangeMode {
    type Err = Infallible;

    /// Unrecognized names fall back to `direct`
    fn from_str(s: &str) -> std::result::Result<Self, Infallible> {
        Ok(match s {
            "auto" => RangeMode::Auto,
            "common-base" => RangeMode::CommonBase,
            "head-only" => RangeMode::HeadOnly,
            "direct" => RangeMode::Direct,
            other => {
                debug!(mode = other, "unknown range mode, using direct");
                RangeMode::Direct
            }
        })
    }
}

impl fmt::Display for RangeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for [`resolve`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RangeOptions {
    pub mode: RangeMode,
    /// Fail unless head descends from tail, whatever the mode
    pub strict_ancestor: bool,
    pub sorting: Sorting,
    pub verbosity: Verbosity,
}

/// Lazily enumerated commits of a resolved range.
///
/// Single pass; call [`resolve`] again to start over.
pub struct CommitRange<'r> {
    mode: RangeMode,
    walk: CommitWalk<'r>,
}

impl CommitRange<'_> {
    /// The strategy actually used; never [`RangeMode::Auto`]
    pub fn mode(&self) -> RangeMode {
        self.mode
    }
}

impl Iterator for CommitRange<'_> {
    type Item = Result<CommitRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.walk.next()
    }
}

fn emit(sink: &mut dyn NoticeSink, verbosity: Verbosity, notice: RangeNotice) {
    debug!(?notice, "range notice");
    if let Some(message) = notice.render(verbosity) {
        sink.notice(&message);
    }
}

/// Resolve the commits that are new in `head_ref` relative to `tail_ref`.
///
/// Both names may be fully-qualified references, bare tag names or object
/// ids. Resolution failures and strict-ancestor violations are returned
/// before any commit is produced.
pub fn resolve<'r, R>(
    repo: &'r R,
    tail_ref: &str,
    head_ref: &str,
    options: &RangeOptions,
    sink: &mut dyn NoticeSink,
) -> Result<CommitRange<'r>>
where
    R: Repository + ?Sized,
{
    let tail = repo.resolve_commit(tail_ref)?;
    let head = repo.resolve_commit(head_ref)?;

    let needs_ancestry = options.strict_ancestor || options.mode == RangeMode::Auto;
    // Equal endpoints count as linear history with nothing new
    let descends = needs_ancestry && (head == tail || repo.is_descendant_of(head, tail)?);

    if options.strict_ancestor && !descends {
        return Err(GitmojiError::NotAncestor {
            tail: tail_ref.to_string(),
            head: head_ref.to_string(),
        });
    }

    let (mode, hide) = match options.mode {
        RangeMode::Auto if descends => {
            emit(sink, options.verbosity, RangeNotice::AutoDirect);
            (RangeMode::Direct, Some(tail))
        }
        RangeMode::Auto => match repo.merge_base(head, tail)? {
            Some(merge_base) => {
                emit(sink, options.verbosity, RangeNotice::AutoCommonBase { merge_base });
                (RangeMode::CommonBase, Some(merge_base))
            }
            None => {
                emit(sink, options.verbosity, RangeNotice::AutoHeadOnly);
                (RangeMode::HeadOnly, None)
            }
        },
        RangeMode::Direct => (RangeMode::Direct, Some(tail)),
        RangeMode::CommonBase => match repo.merge_base(head, tail)? {
            Some(merge_base) => (RangeMode::CommonBase, Some(merge_base)),
            None => {
                emit(sink, options.verbosity, RangeNotice::CommonBaseUnavailable);
                (RangeMode::HeadOnly, None)
            }
        },
        RangeMode::HeadOnly => (RangeMode::HeadOnly, None),
    };

    debug!(
        tail = %tail,
        head = %head,
        requested = %options.mode,
        effective = %mode,
        "resolved commit range"
    );

    Ok(CommitRange {
        mode,
        walk: repo.walk(head, hide, options.sorting)?,
    })
}

/// Every commit reachable from `head_ref`, for histories without a tail
pub fn resolve_all<'r, R>(repo: &'r R, head_ref: &str, sorting: Sorting) -> Result<CommitRange<'r>>
where
    R: Repository + ?Sized,
{
    let head = repo.resolve_commit(head_ref)?;
    Ok(CommitRange {
        mode: RangeMode::HeadOnly,
        walk: repo.walk(head, None, sorting)?,
    })
}
