//! Domain logic - pure business rules independent of git operations

pub mod catalog;
pub mod category;
pub mod commit;
pub mod version;

pub use catalog::{MarkerEntry, CATALOG};
pub use category::Category;
pub use commit::{ClassifiedCommit, CommitRecord};
pub use version::{SemVer, VersionBump};
