pub mod changelog;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod notice;
pub mod range;
pub mod release;
pub mod ui;

pub use error::{GitmojiError, Result};
