use git2::Oid;

/// How chatty advisory notices are
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
}

impl Verbosity {
    /// Quiet wins over verbose when both are requested
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }
}

/// Non-fatal observations made while choosing a commit range.
/// They never change which commits are returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeNotice {
    /// Auto mode found head descends from tail
    AutoDirect,
    /// Auto mode found diverged histories and stops at their merge-base
    AutoCommonBase { merge_base: Oid },
    /// Auto mode found unrelated histories and lists everything from head
    AutoHeadOnly,
    /// Common-base was requested explicitly but the histories share nothing
    CommonBaseUnavailable,
}

impl RangeNotice {
    /// Text to show at the given verbosity, `None` when nothing is shown
    pub fn render(&self, verbosity: Verbosity) -> Option<String> {
        let verbose = match verbosity {
            Verbosity::Quiet => return None,
            Verbosity::Normal => false,
            Verbosity::Verbose => true,
        };

        match self {
            RangeNotice::AutoDirect => {
                verbose.then(|| "auto: using direct (linear history)".to_string())
            }
            RangeNotice::AutoCommonBase { merge_base } if verbose => Some(format!(
                "auto: using common-base (merge-base {})",
                short(merge_base)
            )),
            RangeNotice::AutoCommonBase { .. } => Some("auto: using common-base".to_string()),
            RangeNotice::AutoHeadOnly => {
                Some("auto: no merge-base; falling back to head-only".to_string())
            }
            RangeNotice::CommonBaseUnavailable => Some(
                "common-base requested but no merge-base found; falling back to head-only"
                    .to_string(),
            ),
        }
    }
}

fn short(oid: &Oid) -> String {
    let mut id = oid.to_string();
    id.truncate(7);
    id
}

/// Receiver of advisory notices
pub trait NoticeSink {
    fn notice(&mut self, message: &str);
}

/// Collects notices in memory
impl NoticeSink for Vec<String> {
    fn notice(&mut self, message: &str) {
        self.push(message.to_string());
    }
}

/// Drops every notice
#[derive(Debug, Default, Clone, Copy)]
pub struct Discard;

impl NoticeSink for Discard {
    fn notice(&mut self, _message: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Oid {
        Oid::from_str("abc1234def5678abc1234def5678abc1234def56").unwrap()
    }

    #[test]
    fn test_quiet_silences_everything() {
        let notices = [
            RangeNotice::AutoDirect,
            RangeNotice::AutoCommonBase { merge_base: base() },
            RangeNotice::AutoHeadOnly,
            RangeNotice::CommonBaseUnavailable,
        ];
        for notice in notices {
            assert_eq!(notice.render(Verbosity::Quiet), None);
        }
    }

    #[test]
    fn test_direct_only_shown_when_verbose() {
        assert_eq!(RangeNotice::AutoDirect.render(Verbosity::Normal), None);
        assert_eq!(
            RangeNotice::AutoDirect.render(Verbosity::Verbose).unwrap(),
            "auto: using direct (linear history)"
        );
    }

    #[test]
    fn test_common_base_detail_when_verbose() {
        let notice = RangeNotice::AutoCommonBase { merge_base: base() };
        assert_eq!(
            notice.render(Verbosity::Normal).unwrap(),
            "auto: using common-base"
        );
        assert_eq!(
            notice.render(Verbosity::Verbose).unwrap(),
            "auto: using common-base (merge-base abc1234)"
        );
    }

    #[test]
    fn test_fallback_messages() {
        assert!(RangeNotice::AutoHeadOnly
            .render(Verbosity::Normal)
            .unwrap()
            .contains("no merge-base; falling back to head-only"));
        assert!(RangeNotice::CommonBaseUnavailable
            .render(Verbosity::Normal)
            .unwrap()
            .contains("common-base requested but no merge-base"));
    }

    #[test]
    fn test_verbosity_from_flags() {
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
    }

    #[test]
    fn test_vec_sink_collects() {
        let mut sink: Vec<String> = Vec::new();
        sink.notice("hello");
        assert_eq!(sink, vec!["hello".to_string()]);
    }
}
