use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use git2::Oid;

use super::{CommitWalk, Repository, Signer, Sorting, TagRef};
use crate::domain::CommitRecord;
use crate::error::{GitmojiError, Result};

/// Tag stored by the mock, with the annotation it was created with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockTag {
    pub name: String,
    pub target: Oid,
    pub message: Option<String>,
    pub tagger: Option<Signer>,
}

/// In-memory commit graph for testing without actual git operations.
///
/// Every new commit gets a later timestamp than the previous one, so commit
/// time ordering matches creation order.
pub struct MockRepository {
    commits: HashMap<Oid, CommitRecord>,
    /// Creation order, used to break ties deterministically
    order: Vec<Oid>,
    head: Option<Oid>,
    tags: RefCell<Vec<MockTag>>,
    signer: Option<Signer>,
    fail_tag_deletion: bool,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            commits: HashMap::new(),
            order: Vec::new(),
            head: None,
            tags: RefCell::new(Vec::new()),
            signer: None,
            fail_tag_deletion: false,
        }
    }

    /// Add a commit with the given parents without moving HEAD
    pub fn add_commit(&mut self, message: &str, parents: &[Oid]) -> Result<Oid> {
        let serial = self.order.len() as u64 + 1;
        let mut bytes = [0u8; 20];
        bytes[..8].copy_from_slice(&serial.to_be_bytes());
        bytes[19] = 0x5a;
        let id = Oid::from_bytes(&bytes)?;

        for parent in parents {
            if !self.commits.contains_key(parent) {
                return Err(GitmojiError::ref_not_found(parent.to_string()));
            }
        }

        self.commits.insert(
            id,
            CommitRecord {
                id,
                message: message.to_string(),
                parents: parents.to_vec(),
                time: 1_700_000_000 + serial as i64 * 60,
            },
        );
        self.order.push(id);
        Ok(id)
    }

    /// Add a commit on top of HEAD (a root commit when HEAD is unset) and move HEAD to it
    pub fn commit_on_head(&mut self, message: &str) -> Result<Oid> {
        let parents: Vec<Oid> = self.head.into_iter().collect();
        let id = self.add_commit(message, &parents)?;
        self.head = Some(id);
        Ok(id)
    }

    pub fn set_head(&mut self, oid: Oid) {
        self.head = Some(oid);
    }

    /// Add a lightweight tag pointing to an OID
    pub fn add_tag(&mut self, name: impl Into<String>, oid: Oid) {
        self.tags.get_mut().push(MockTag {
            name: name.into(),
            target: oid,
            message: None,
            tagger: None,
        });
    }

    pub fn set_default_signer(&mut self, signer: Signer) {
        self.signer = Some(signer);
    }

    /// Make every subsequent `delete_tag` call fail
    pub fn fail_tag_deletion(&mut self) {
        self.fail_tag_deletion = true;
    }

    pub fn tag(&self, name: &str) -> Option<MockTag> {
        self.tags.borrow().iter().find(|t| t.name == name).cloned()
    }

    pub fn commit(&self, oid: Oid) -> Option<&CommitRecord> {
        self.commits.get(&oid)
    }

    /// `oid` and everything reachable from it
    fn ancestors(&self, oid: Oid) -> HashSet<Oid> {
        let mut seen = HashSet::new();
        let mut stack = vec![oid];

        while let Some(current) = stack.pop() {
            if !seen.insert(current) {
                continue;
            }
            if let Some(commit) = self.commits.get(&current) {
                stack.extend(commit.parents.iter().copied());
            }
        }

        seen
    }

    fn position(&self, oid: &Oid) -> usize {
        self.order.iter().position(|o| o == oid).unwrap_or(0)
    }

    /// Newest first: by commit time when requested, else by creation order
    fn newest_first(&self, oids: &mut [Oid], by_time: bool) {
        oids.sort_by(|a, b| {
            let key = |oid: &Oid| {
                let time = if by_time { self.commits[oid].time } else { 0 };
                (time, self.position(oid))
            };
            key(b).cmp(&key(a))
        });
    }

    /// Children are emitted before their parents; among commits whose
    /// children are all emitted, the newest goes next.
    fn topological(&self, selected: &HashSet<Oid>, by_time: bool) -> Vec<Oid> {
        let mut pending_children: HashMap<Oid, usize> =
            selected.iter().map(|oid| (*oid, 0)).collect();
        for oid in selected {
            for parent in &self.commits[oid].parents {
                if let Some(count) = pending_children.get_mut(parent) {
                    *count += 1;
                }
            }
        }

        let mut ready: Vec<Oid> = pending_children
            .iter()
            .filter(|(_, count)| **count == 0)
            .map(|(oid, _)| *oid)
            .collect();
        let mut ordered = Vec::with_capacity(selected.len());

        while !ready.is_empty() {
            self.newest_first(&mut ready, by_time);
            let next = ready.remove(0);
            ordered.push(next);

            for parent in &self.commits[&next].parents {
                if let Some(count) = pending_children.get_mut(parent) {
                    *count -= 1;
                    if *count == 0 {
                        ready.push(*parent);
                    }
                }
            }
        }

        ordered
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn resolve_commit(&self, name: &str) -> Result<Oid> {
        if name == "HEAD" {
            return self.head_commit();
        }

        let tag_name = name.strip_prefix("refs/tags/").unwrap_or(name);
        if let Some(tag) = self.tags.borrow().iter().find(|t| t.name == tag_name) {
            return Ok(tag.target);
        }

        match Oid::from_str(name) {
            Ok(oid) if !name.starts_with("refs/") && self.commits.contains_key(&oid) => Ok(oid),
            _ => Err(GitmojiError::ref_not_found(name)),
        }
    }

    fn head_commit(&self) -> Result<Oid> {
        self.head.ok_or_else(|| GitmojiError::ref_not_found("HEAD"))
    }

    fn is_descendant_of(&self, commit: Oid, ancestor: Oid) -> Result<bool> {
        Ok(commit != ancestor && self.ancestors(commit).contains(&ancestor))
    }

    fn merge_base(&self, one: Oid, two: Oid) -> Result<Option<Oid>> {
        let reachable_from_one = self.ancestors(one);
        let common: Vec<Oid> = self
            .ancestors(two)
            .into_iter()
            .filter(|oid| reachable_from_one.contains(oid))
            .collect();

        // Best candidates are the common ancestors no other candidate descends from
        let mut best: Vec<Oid> = common
            .iter()
            .copied()
            .filter(|candidate| {
                !common
                    .iter()
                    .any(|other| other != candidate && self.ancestors(*other).contains(candidate))
            })
            .collect();
        self.newest_first(&mut best, true);

        Ok(best.first().copied())
    }

    fn walk(&self, start: Oid, hide: Option<Oid>, sorting: Sorting) -> Result<CommitWalk<'_>> {
        if !self.commits.contains_key(&start) {
            return Err(GitmojiError::ref_not_found(start.to_string()));
        }

        let hidden = hide.map(|oid| self.ancestors(oid)).unwrap_or_default();
        let selected: HashSet<Oid> = self
            .ancestors(start)
            .into_iter()
            .filter(|oid| !hidden.contains(oid))
            .collect();

        let mut ordered = if sorting.topological {
            self.topological(&selected, sorting.time)
        } else {
            let mut oids: Vec<Oid> = selected.into_iter().collect();
            self.newest_first(&mut oids, sorting.time);
            oids
        };
        if sorting.reverse {
            ordered.reverse();
        }

        let records: Vec<CommitRecord> = ordered
            .iter()
            .map(|oid| self.commits[oid].clone())
            .collect();
        Ok(Box::new(records.into_iter().map(Ok)))
    }

    fn list_tags(&self) -> Result<Vec<TagRef>> {
        let mut tags: Vec<TagRef> = self
            .tags
            .borrow()
            .iter()
            .map(|t| TagRef {
                name: t.name.clone(),
                target: t.target,
            })
            .collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    fn create_tag(&self, name: &str, target: Oid, message: &str, tagger: &Signer) -> Result<()> {
        if !self.commits.contains_key(&target) {
            return Err(GitmojiError::tag(format!("Cannot find commit {}", target)));
        }

        let mut tags = self.tags.borrow_mut();
        if tags.iter().any(|t| t.name == name) {
            return Err(GitmojiError::tag(format!(
                "Cannot create tag '{}': tag already exists",
                name
            )));
        }

        tags.push(MockTag {
            name: name.to_string(),
            target,
            message: Some(message.to_string()),
            tagger: Some(tagger.clone()),
        });
        Ok(())
    }

    fn delete_tag(&self, name: &str) -> Result<()> {
        if self.fail_tag_deletion {
            return Err(GitmojiError::tag(format!("Cannot delete tag '{}'", name)));
        }

        let mut tags = self.tags.borrow_mut();
        let before = tags.len();
        tags.retain(|t| t.name != name);
        if tags.len() == before {
            return Err(GitmojiError::tag(format!("Cannot delete tag '{}': not found", name)));
        }
        Ok(())
    }

    fn default_signer(&self) -> Option<Signer> {
        self.signer.clone()
    }
}
