//! User interface module.
//!
//! - `formatter` - styled messages on standard error
//! - This module - the notice sink used by the command line

pub mod formatter;

pub use formatter::{
    display_error, display_notice, display_release_tag, display_success, format_release_tag,
    NOTICE_PREFIX,
};

use crate::notice::NoticeSink;

/// Prints advisory notices to standard error with the tool prefix
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrNotices;

impl NoticeSink for StderrNotices {
    fn notice(&mut self, message: &str) {
        display_notice(message);
    }
}
