use std::path::Path;

use git2::{ErrorCode, ObjectType, Oid, Repository as Git2Repo};
use tracing::debug;

use super::{CommitWalk, Signer, Sorting, TagRef};
use crate::domain::CommitRecord;
use crate::error::{GitmojiError, Result};

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    /// Look up `name` as a reference; `Ok(None)` when no such reference exists
    fn reference_commit(&self, refname: &str, name: &str) -> Result<Option<Oid>> {
        match self.repo.find_reference(refname) {
            Ok(reference) => {
                let commit = reference
                    .peel_to_commit()
                    .map_err(|_| GitmojiError::ref_not_found(name))?;
                Ok(Some(commit.id()))
            }
            Err(e) if e.code() == ErrorCode::NotFound || e.code() == ErrorCode::InvalidSpec => {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn to_record(commit: &git2::Commit<'_>) -> CommitRecord {
    CommitRecord {
        id: commit.id(),
        message: String::from_utf8_lossy(commit.message_bytes()).into_owned(),
        parents: commit.parent_ids().collect(),
        time: commit.time().seconds(),
    }
}

impl super::Repository for Git2Repository {
    fn resolve_commit(&self, name: &str) -> Result<Oid> {
        if name.starts_with("refs/") {
            return self
                .reference_commit(name, name)?
                .ok_or_else(|| GitmojiError::ref_not_found(name));
        }

        if let Some(oid) = self.reference_commit(&format!("refs/tags/{}", name), name)? {
            return Ok(oid);
        }

        let object = self
            .repo
            .revparse_single(name)
            .map_err(|_| GitmojiError::ref_not_found(name))?;
        let commit = object
            .peel_to_commit()
            .map_err(|_| GitmojiError::ref_not_found(name))?;

        Ok(commit.id())
    }

    fn head_commit(&self) -> Result<Oid> {
        let head = self
            .repo
            .head()
            .map_err(|_| GitmojiError::ref_not_found("HEAD"))?;
        Ok(head.peel_to_commit()?.id())
    }

    fn is_descendant_of(&self, commit: Oid, ancestor: Oid) -> Result<bool> {
        Ok(self.repo.graph_descendant_of(commit, ancestor)?)
    }

    fn merge_base(&self, one: Oid, two: Oid) -> Result<Option<Oid>> {
        match self.repo.merge_base(one, two) {
            Ok(oid) => Ok(Some(oid)),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn walk(&self, start: Oid, hide: Option<Oid>, sorting: Sorting) -> Result<CommitWalk<'_>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(sorting.to_git2())?;
        revwalk.push(start)?;
        if let Some(hidden) = hide {
            revwalk.hide(hidden)?;
        }

        let repo = &self.repo;
        Ok(Box::new(revwalk.map(move |oid| -> Result<CommitRecord> {
            let commit = repo.find_commit(oid?)?;
            Ok(to_record(&commit))
        })))
    }

    fn list_tags(&self) -> Result<Vec<TagRef>> {
        let names = self.repo.tag_names(None)?;
        let mut tags = Vec::new();

        for name in names.iter().flatten() {
            let reference = match self.repo.find_reference(&format!("refs/tags/{}", name)) {
                Ok(reference) => reference,
                Err(_) => continue,
            };
            // Tags on trees or blobs carry no version information for us
            if let Ok(commit) = reference.peel(ObjectType::Commit) {
                tags.push(TagRef {
                    name: name.to_string(),
                    target: commit.id(),
                });
            }
        }

        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    fn create_tag(&self, name: &str, target: Oid, message: &str, tagger: &Signer) -> Result<()> {
        let object = self
            .repo
            .find_object(target, Some(ObjectType::Commit))
            .map_err(|e| GitmojiError::tag(format!("Cannot find commit {}: {}", target, e)))?;
        let signature = git2::Signature::now(&tagger.name, &tagger.email)?;

        self.repo
            .tag(name, &object, &signature, message, false)
            .map_err(|e| GitmojiError::tag(format!("Cannot create tag '{}': {}", name, e)))?;

        debug!(tag = name, target = %target, "created annotated tag");
        Ok(())
    }

    fn delete_tag(&self, name: &str) -> Result<()> {
        self.repo
            .tag_delete(name)
            .map_err(|e| GitmojiError::tag(format!("Cannot delete tag '{}': {}", name, e)))?;

        debug!(tag = name, "deleted tag");
        Ok(())
    }

    fn default_signer(&self) -> Option<Signer> {
        let signature = self.repo.signature().ok()?;
        Some(Signer::new(signature.name()?, signature.email()?))
    }
}
