//! Gitmoji classification of commit messages.
//!
//! Two matching rules coexist on purpose:
//! - [`Classifier::classify`] is lenient. A marker at the start of the subject
//!   wins, and failing that (with `fallback_to_includes`) any marker mentioned
//!   anywhere in the subject decides the category.
//! - [`separate_marker_and_subject`] is anchored. Only a marker at the very
//!   start of the subject counts.
//!
//! The renderer uses the anchored rule, so a commit that merely mentions a
//! marker mid-sentence is counted in its category's bucket of the
//! [`StructuredChangelog`] but never shows up in the rendered markdown.

use std::collections::BTreeMap;

use tracing::debug;

use crate::domain::catalog::{self, CATALOG};
use crate::domain::commit::first_line;
use crate::domain::{Category, ClassifiedCommit, CommitRecord};
use crate::error::{GitmojiError, Result};

/// Maps commit messages to changelog categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classifier {
    /// Allow a marker found anywhere in the subject when none starts it
    pub fallback_to_includes: bool,
}

impl Default for Classifier {
    fn default() -> Self {
        Classifier {
            fallback_to_includes: true,
        }
    }
}

impl Classifier {
    pub fn new(fallback_to_includes: bool) -> Self {
        Classifier {
            fallback_to_includes,
        }
    }

    /// Category of the first catalog marker found in the subject line.
    ///
    /// Fails with [`GitmojiError::NoMarkerFound`] when no marker matches.
    pub fn classify(&self, message: &str) -> Result<Category> {
        let subject = first_line(message);

        if let Some(entry) = CATALOG.iter().find(|e| e.prefix_of(subject).is_some()) {
            return Ok(entry.category);
        }

        if self.fallback_to_includes {
            if let Some(entry) = CATALOG.iter().find(|e| e.appears_in(subject)) {
                return Ok(entry.category);
            }
        }

        Err(GitmojiError::NoMarkerFound(subject.to_string()))
    }

    /// Bucket commits by category, keeping input order inside each bucket.
    ///
    /// Every category gets a slot, and commits without a marker land in
    /// [`Category::Hmm`].
    pub fn structure<I>(&self, commits: I) -> StructuredChangelog
    where
        I: IntoIterator<Item = CommitRecord>,
    {
        let mut structured = StructuredChangelog::new();

        for commit in commits {
            let category = match self.classify(&commit.message) {
                Ok(category) => category,
                Err(e) => {
                    debug!(commit = %commit.id, "{}", e);
                    Category::Hmm
                }
            };
            structured.push(category, commit);
        }

        structured
    }
}

/// Split the subject line into the leading marker and the remaining text.
///
/// On a match returns `(marker, rest)` with the marker and the whitespace
/// around it removed. Without a leading marker, non-strict mode returns
/// `("", subject)` and strict mode fails with
/// [`GitmojiError::MarkerNotAtStart`].
pub fn separate_marker_and_subject(message: &str, strict: bool) -> Result<(&str, &str)> {
    let subject = first_line(message);

    for entry in CATALOG {
        if let Some(marker) = entry.prefix_of(subject) {
            return Ok((marker, subject[marker.len()..].trim()));
        }
    }

    if strict {
        return Err(GitmojiError::MarkerNotAtStart(subject.to_string()));
    }

    Ok(("", subject))
}

/// Renderable view of a commit, or `None` when its subject does not start
/// with a catalog marker.
pub fn classified_entry(commit: &CommitRecord) -> Option<ClassifiedCommit<'_>> {
    let (marker, subject) = separate_marker_and_subject(&commit.message, true).ok()?;
    let entry = catalog::lookup(marker)?;
    Some(ClassifiedCommit::new(commit, entry, marker, subject))
}

/// Commits grouped by category, one slot per category in priority order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredChangelog {
    buckets: BTreeMap<Category, Vec<CommitRecord>>,
}

impl StructuredChangelog {
    pub fn new() -> Self {
        let buckets = Category::ALL
            .iter()
            .map(|category| (*category, Vec::new()))
            .collect();
        StructuredChangelog { buckets }
    }

    pub fn push(&mut self, category: Category, commit: CommitRecord) {
        self.buckets.entry(category).or_default().push(commit);
    }

    pub fn get(&self, category: Category) -> &[CommitRecord] {
        self.buckets
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Categories with their commits, in priority order
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[CommitRecord])> {
        self.buckets
            .iter()
            .map(|(category, commits)| (*category, commits.as_slice()))
    }

    /// Total number of commits across all categories
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for StructuredChangelog {
    fn default() -> Self {
        Self::new()
    }
}
