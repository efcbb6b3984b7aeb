#![allow(dead_code)]

use std::cell::Cell;
use std::path::Path;

use git2::{ObjectType, Oid, Repository, Signature, Time};
use tempfile::TempDir;

/// Throwaway repository with empty-tree commits and controlled timestamps
pub struct TestRepo {
    dir: TempDir,
    pub repo: Repository,
    clock: Cell<i64>,
}

impl TestRepo {
    /// Repository whose local config names the user "t"
    pub fn new() -> Self {
        let test = Self::anonymous();
        {
            let mut config = test.repo.config().unwrap();
            config.set_str("user.name", "t").unwrap();
            config.set_str("user.email", "t@example.com").unwrap();
        }
        test
    }

    /// Repository with no identity of its own
    pub fn anonymous() -> Self {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        TestRepo {
            dir,
            repo,
            clock: Cell::new(1_700_000_000),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    fn signature(&self) -> Signature<'static> {
        let now = self.clock.get() + 60;
        self.clock.set(now);
        Signature::new("t", "t@example.com", &Time::new(now, 0)).unwrap()
    }

    fn write(&self, update_ref: Option<&str>, message: &str, parents: &[Oid]) -> Oid {
        let tree_id = self.repo.treebuilder(None).unwrap().write().unwrap();
        let tree = self.repo.find_tree(tree_id).unwrap();
        let parents: Vec<git2::Commit<'_>> = parents
            .iter()
            .map(|oid| self.repo.find_commit(*oid).unwrap())
            .collect();
        let parent_refs: Vec<&git2::Commit<'_>> = parents.iter().collect();
        let sig = self.signature();

        self.repo
            .commit(update_ref, &sig, &sig, message, &tree, &parent_refs)
            .unwrap()
    }

    /// Commit on top of HEAD and advance it
    pub fn commit(&self, message: &str) -> Oid {
        let parents: Vec<Oid> = self
            .repo
            .head()
            .ok()
            .and_then(|head| head.target())
            .into_iter()
            .collect();
        self.write(Some("HEAD"), message, &parents)
    }

    /// Commit with explicit parents, leaving HEAD alone
    pub fn commit_with_parents(&self, message: &str, parents: &[Oid]) -> Oid {
        self.write(None, message, parents)
    }

    pub fn set_head(&self, oid: Oid) {
        self.repo.set_head_detached(oid).unwrap();
    }

    /// Annotated tag
    pub fn tag(&self, name: &str, target: Oid) {
        let object = self.repo.find_object(target, Some(ObjectType::Commit)).unwrap();
        let sig = self.signature();
        self.repo.tag(name, &object, &sig, name, false).unwrap();
    }

    pub fn lightweight_tag(&self, name: &str, target: Oid) {
        let object = self.repo.find_object(target, Some(ObjectType::Commit)).unwrap();
        self.repo.tag_lightweight(name, &object, false).unwrap();
    }

    /// Commit a tag name currently points at
    pub fn tag_target(&self, name: &str) -> Oid {
        self.repo
            .find_reference(&format!("refs/tags/{}", name))
            .unwrap()
            .peel_to_commit()
            .unwrap()
            .id()
    }

    pub fn head(&self) -> Oid {
        self.repo.head().unwrap().peel_to_commit().unwrap().id()
    }
}
