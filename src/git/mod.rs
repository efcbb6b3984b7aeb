//! Git operations abstraction layer
//!
//! The [Repository] trait is everything the changelog and release logic need
//! from version control: name resolution, reachability queries, merge-base
//! computation, commit walking and tag mutation. Two implementations exist:
//!
//! - [repository::Git2Repository]: a real repository through the `git2` crate
//! - [mock::MockRepository]: an in-memory commit graph for tests
//!
//! ```rust
//! # use gitmoji_release::git::{Repository, Sorting};
//! # fn example<R: Repository>(repo: &R) -> gitmoji_release::Result<()> {
//! let head = repo.resolve_commit("v2.0.0")?;
//! let tail = repo.resolve_commit("v1.0.0")?;
//! for commit in repo.walk(head, Some(tail), Sorting::default())? {
//!     println!("{}", commit?.subject());
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use std::fmt;
use std::str::FromStr;

use git2::Oid;

use crate::domain::CommitRecord;
use crate::error::{GitmojiError, Result};

/// Lazily produced commits of a revision walk
pub type CommitWalk<'r> = Box<dyn Iterator<Item = Result<CommitRecord>> + 'r>;

/// Traversal order of a revision walk.
///
/// The default is topological with commit-time tie breaking, newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sorting {
    pub topological: bool,
    pub time: bool,
    pub reverse: bool,
}

impl Default for Sorting {
    fn default() -> Self {
        Sorting {
            topological: true,
            time: true,
            reverse: false,
        }
    }
}

impl Sorting {
    pub fn none() -> Self {
        Sorting {
            topological: false,
            time: false,
            reverse: false,
        }
    }

    pub fn to_git2(self) -> git2::Sort {
        let mut sort = git2::Sort::NONE;
        if self.topological {
            sort |= git2::Sort::TOPOLOGICAL;
        }
        if self.time {
            sort |= git2::Sort::TIME;
        }
        if self.reverse {
            sort |= git2::Sort::REVERSE;
        }
        sort
    }
}

impl FromStr for Sorting {
    type Err = GitmojiError;

    /// Parses a comma separated flag list such as `topological,time` or `none`
    fn from_str(s: &str) -> Result<Self> {
        let mut sorting = Sorting::none();
        for flag in s.split(',').map(str::trim).filter(|f| !f.is_empty()) {
            match flag {
                "none" => {}
                "topological" | "topo" => sorting.topological = true,
                "time" | "date" => sorting.time = true,
                "reverse" => sorting.reverse = true,
                other => {
                    return Err(GitmojiError::config(format!(
                        "Unknown sorting flag '{}' (expected topological, time, reverse or none)",
                        other
                    )))
                }
            }
        }
        Ok(sorting)
    }
}

impl fmt::Display for Sorting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags: Vec<&str> = [
            (self.topological, "topological"),
            (self.time, "time"),
            (self.reverse, "reverse"),
        ]
        .iter()
        .filter(|(on, _)| *on)
        .map(|(_, name)| *name)
        .collect();

        if flags.is_empty() {
            f.write_str("none")
        } else {
            f.write_str(&flags.join(","))
        }
    }
}

/// A tag reference peeled to the commit it points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRef {
    pub name: String,
    pub target: Oid,
}

/// Identity recorded on annotated tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signer {
    pub name: String,
    pub email: String,
}

impl Signer {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Signer {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Common git operation trait for abstraction
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Implementations map a name
/// that cannot be resolved to [GitmojiError::RefNotFound] and tag creation
/// or deletion failures to [GitmojiError::Tag].
pub trait Repository {
    /// Resolve a fully-qualified reference, a bare tag name, or anything
    /// revparse understands (such as a hex object id) to a commit. Annotated
    /// tags are peeled.
    fn resolve_commit(&self, name: &str) -> Result<Oid>;

    /// The commit HEAD points at
    fn head_commit(&self) -> Result<Oid>;

    /// Whether `commit` has `ancestor` in its history. A commit is not its
    /// own descendant.
    fn is_descendant_of(&self, commit: Oid, ancestor: Oid) -> Result<bool>;

    /// Best common ancestor of two commits, `None` for unrelated histories
    fn merge_base(&self, one: Oid, two: Oid) -> Result<Option<Oid>>;

    /// Walk every commit reachable from `start`, excluding `hide` and its
    /// ancestors when given.
    fn walk(&self, start: Oid, hide: Option<Oid>, sorting: Sorting) -> Result<CommitWalk<'_>>;

    /// All tags that resolve to a commit, sorted by name
    fn list_tags(&self) -> Result<Vec<TagRef>>;

    /// Create an annotated tag. Fails if a tag with that name already exists.
    fn create_tag(&self, name: &str, target: Oid, message: &str, tagger: &Signer) -> Result<()>;

    fn delete_tag(&self, name: &str) -> Result<()>;

    /// The identity configured for this repository, if any
    fn default_signer(&self) -> Option<Signer>;
}
