use std::fmt;

/// Changelog category, in presentation priority order.
///
/// The derived `Ord` follows declaration order, so sorting or iterating a
/// `BTreeMap<Category, _>` yields categories in the order they are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    CriticalChanges,
    Features,
    BugFixes,
    Performance,
    Lint,
    Documentation,
    Test,
    Maintenance,
    DependencyBuildConfig,
    ProjectManagement,
    I18nAccessibilityUx,
    Miscellaneous,
    Hmm,
}

impl Category {
    /// Every category in presentation order
    pub const ALL: [Category; 13] = [
        Category::CriticalChanges,
        Category::Features,
        Category::BugFixes,
        Category::Performance,
        Category::Lint,
        Category::Documentation,
        Category::Test,
        Category::Maintenance,
        Category::DependencyBuildConfig,
        Category::ProjectManagement,
        Category::I18nAccessibilityUx,
        Category::Miscellaneous,
        Category::Hmm,
    ];

    /// Heading used in rendered output
    pub fn title(&self) -> &'static str {
        match self {
            Category::CriticalChanges => "Critical Changes",
            Category::Features => "Feature and Functional Changes",
            Category::BugFixes => "Bug Fixes",
            Category::Performance => "Performance Improvements",
            Category::Lint => "Lint",
            Category::Documentation => "Documentation and Comment",
            Category::Test => "Test",
            Category::Maintenance => "Code Maintenance and Refactoring",
            Category::DependencyBuildConfig => "Dependency, Build, and Configuration",
            Category::ProjectManagement => "File and Project Management",
            Category::I18nAccessibilityUx => "Internalization, Accessibility, and UI/UX",
            Category::Miscellaneous => "Miscellaneous / Other Changes",
            Category::Hmm => "Hmm...",
        }
    }

    /// Fixed descriptive line shown under the category heading
    pub fn subtext(&self) -> &'static str {
        match self {
            Category::CriticalChanges => "Hotfixes, security patches and breaking changes. Read these first.",
            Category::Features => "New capabilities and changes in behavior.",
            Category::BugFixes => "Things that were broken and now are not.",
            Category::Performance => "Same results, less waiting.",
            Category::Lint => "Compiler and linter warnings, silenced the right way.",
            Category::Documentation => "Docs, comments and typo hunting.",
            Category::Test => "Tests added, updated or finally passing.",
            Category::Maintenance => "Refactors, restructuring and cleanup.",
            Category::DependencyBuildConfig => "Dependencies, CI, build scripts and configuration.",
            Category::ProjectManagement => "Files moved, renamed, licensed or released.",
            Category::I18nAccessibilityUx => "Translations, accessibility and user-facing polish.",
            Category::Miscellaneous => "Everything else worth mentioning.",
            Category::Hmm => "Commits without a recognized gitmoji.",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_sorted_and_complete() {
        let mut sorted = Category::ALL;
        sorted.sort();
        assert_eq!(sorted, Category::ALL);
        assert_eq!(Category::ALL.len(), 13);
    }

    #[test]
    fn test_hmm_is_last() {
        assert_eq!(Category::ALL.last(), Some(&Category::Hmm));
        assert!(Category::ALL.iter().all(|c| *c <= Category::Hmm));
    }

    #[test]
    fn test_titles_are_unique() {
        let titles: std::collections::HashSet<&str> =
            Category::ALL.iter().map(|c| c.title()).collect();
        assert_eq!(titles.len(), 13);
    }

    #[test]
    fn test_display_uses_title() {
        assert_eq!(
            Category::Maintenance.to_string(),
            "Code Maintenance and Refactoring"
        );
    }
}
