use git2::Oid;

use super::catalog::MarkerEntry;
use super::category::Category;

/// A commit as handed out by the git access layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub id: Oid,
    /// Full message; the first line is the subject
    pub message: String,
    pub parents: Vec<Oid>,
    /// Committer time, seconds since the epoch
    pub time: i64,
}

impl CommitRecord {
    /// First line of the message
    pub fn subject(&self) -> &str {
        first_line(&self.message)
    }

    /// Abbreviated id used in rendered output
    pub fn short_id(&self) -> String {
        let mut id = self.id.to_string();
        id.truncate(7);
        id
    }
}

/// First line of a commit message, without the line terminator
pub fn first_line(message: &str) -> &str {
    message
        .split('\n')
        .next()
        .unwrap_or_default()
        .trim_end_matches('\r')
}

/// A commit whose subject starts with a recognized marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedCommit<'c> {
    pub commit: &'c CommitRecord,
    pub category: Category,
    /// The marker exactly as written at the start of the subject
    pub marker: &'c str,
    pub emoji: &'static str,
    pub description: &'static str,
    /// Subject with the marker and surrounding whitespace removed
    pub subject: &'c str,
}

impl<'c> ClassifiedCommit<'c> {
    pub fn new(
        commit: &'c CommitRecord,
        entry: &'static MarkerEntry,
        marker: &'c str,
        subject: &'c str,
    ) -> Self {
        ClassifiedCommit {
            commit,
            category: entry.category,
            marker,
            emoji: entry.emoji,
            description: entry.description,
            subject,
        }
    }
}
