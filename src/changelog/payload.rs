use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Release record in the shape hosting services expect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleasePayload {
    pub tag_name: String,
    pub name: String,
    pub body: String,
    pub draft: bool,
    pub prerelease: bool,
}

impl ReleasePayload {
    /// Payload for `tag_name` titled `<project> <version>`
    pub fn new(project: &str, version: &str, tag_name: &str, body: String) -> Self {
        ReleasePayload {
            tag_name: tag_name.to_string(),
            name: format!("{} {}", project, version),
            body,
            draft: false,
            prerelease: false,
        }
    }

    pub fn draft(mut self, draft: bool) -> Self {
        self.draft = draft;
        self
    }

    pub fn prerelease(mut self, prerelease: bool) -> Self {
        self.prerelease = prerelease;
        self
    }

    /// Pretty JSON; non-ASCII text is written as-is
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
