//! Formatting for terminal output.
//!
//! Standard output carries the changelog or payload only, so everything here
//! prints to standard error. The `format_*` functions are pure.

use console::style;

use crate::release::TagOutcome;

/// Prefix of advisory notices
pub const NOTICE_PREFIX: &str = "[gitmoji-release]";

pub fn format_error(message: &str) -> String {
    format!("{} {}", style("ERROR:").red().bold(), message)
}

pub fn format_success(message: &str) -> String {
    format!("{} {}", style("✓").green(), message)
}

pub fn format_notice(message: &str) -> String {
    format!("{} {}", style(NOTICE_PREFIX).yellow(), message)
}

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{}", format_error(message));
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    eprintln!("{}", format_success(message));
}

pub fn display_notice(message: &str) {
    eprintln!("{}", format_notice(message));
}

/// Describe what a release did with its tag.
///
/// # Arguments
/// * `previous` - Last reachable version tag, `None` for a first release
/// * `tag` - The release tag name
/// * `outcome` - Whether the tag was created, kept or replaced
pub fn format_release_tag(previous: Option<&str>, tag: &str, outcome: TagOutcome) -> String {
    let tag = style(tag).green().bold();
    let action = match outcome {
        TagOutcome::Created => format!("Tagged {}", tag),
        TagOutcome::Skipped => format!("Tag {} already exists, left unchanged", tag),
        TagOutcome::Overwritten => format!("Moved existing tag {} to HEAD", tag),
    };
    match previous {
        Some(previous) => format!("{} (previous release {})", action, style(previous).dim()),
        None => format!("{} (first release)", action),
    }
}

pub fn display_release_tag(previous: Option<&str>, tag: &str, outcome: TagOutcome) {
    let message = format_release_tag(previous, tag, outcome);
    match outcome {
        TagOutcome::Skipped => display_notice(&message),
        TagOutcome::Created | TagOutcome::Overwritten => display_success(&message),
    }
}
