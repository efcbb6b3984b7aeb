//! Static gitmoji catalog.
//!
//! The catalog is a compile-time table. Declaration order is significant:
//! marker lookups scan it front to back and the first hit wins.

use std::borrow::Cow;

use super::category::Category;

const VARIATION_SELECTOR: char = '\u{FE0F}';

/// One entry of the gitmoji vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerEntry {
    /// Shortcode form, e.g. `:bug:`
    pub marker: &'static str,
    pub emoji: &'static str,
    pub description: &'static str,
    pub category: Category,
}

impl MarkerEntry {
    const fn new(
        marker: &'static str,
        emoji: &'static str,
        description: &'static str,
        category: Category,
    ) -> Self {
        MarkerEntry {
            marker,
            emoji,
            description,
            category,
        }
    }

    /// Spellings that identify this entry in a commit subject: the shortcode,
    /// the emoji, and the emoji without its variation selector when it has one.
    fn forms(&self) -> impl Iterator<Item = Cow<'static, str>> {
        let bare = self.emoji.replace(VARIATION_SELECTOR, "");
        let bare = (bare != self.emoji).then_some(Cow::Owned(bare));
        [Cow::Borrowed(self.marker), Cow::Borrowed(self.emoji)]
            .into_iter()
            .chain(bare)
    }

    /// Returns the slice of `text` holding this entry's marker if `text` starts with it
    pub fn prefix_of<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.forms()
            .find(|form| text.starts_with(form.as_ref()))
            .map(|form| &text[..form.len()])
    }

    /// Whether any spelling of this entry appears anywhere in `text`
    pub fn appears_in(&self, text: &str) -> bool {
        self.forms().any(|form| text.contains(form.as_ref()))
    }

    /// Whether `marker` is one of this entry's spellings
    pub fn is_spelled(&self, marker: &str) -> bool {
        self.forms().any(|form| form == marker)
    }
}

/// Finds the catalog entry for a marker in any accepted spelling
pub fn lookup(marker: &str) -> Option<&'static MarkerEntry> {
    if marker.is_empty() {
        return None;
    }
    CATALOG.iter().find(|entry| entry.is_spelled(marker))
}

use Category::*;

pub static CATALOG: &[MarkerEntry] = &[
    MarkerEntry::new(":art:", "🎨", "Improve structure / format of the code.", Maintenance),
    MarkerEntry::new(":zap:", "⚡️", "Improve performance.", Performance),
    MarkerEntry::new(":fire:", "🔥", "Remove code or files.", Maintenance),
    MarkerEntry::new(":bug:", "🐛", "Fix a bug.", BugFixes),
    MarkerEntry::new(":ambulance:", "🚑️", "Critical hotfix.", CriticalChanges),
    MarkerEntry::new(":sparkles:", "✨", "Introduce new features.", Features),
    MarkerEntry::new(":memo:", "📝", "Add or update documentation.", Documentation),
    MarkerEntry::new(":rocket:", "🚀", "Deploy stuff.", DependencyBuildConfig),
    MarkerEntry::new(":lipstick:", "💄", "Add or update the UI and style files.", I18nAccessibilityUx),
    MarkerEntry::new(":tada:", "🎉", "Begin a project.", ProjectManagement),
    MarkerEntry::new(":white_check_mark:", "✅", "Add, update, or pass tests.", Test),
    MarkerEntry::new(":lock:", "🔒️", "Fix security or privacy issues.", CriticalChanges),
    MarkerEntry::new(":closed_lock_with_key:", "🔐", "Add or update secrets.", DependencyBuildConfig),
    MarkerEntry::new(":bookmark:", "🔖", "Release / Version tags.", ProjectManagement),
    MarkerEntry::new(":rotating_light:", "🚨", "Fix compiler / linter warnings.", Lint),
    MarkerEntry::new(":construction:", "🚧", "Work in progress.", Miscellaneous),
    MarkerEntry::new(":green_heart:", "💚", "Fix CI Build.", DependencyBuildConfig),
    MarkerEntry::new(":arrow_down:", "⬇️", "Downgrade dependencies.", DependencyBuildConfig),
    MarkerEntry::new(":arrow_up:", "⬆️", "Upgrade dependencies.", DependencyBuildConfig),
    MarkerEntry::new(":pushpin:", "📌", "Pin dependencies to specific versions.", DependencyBuildConfig),
    MarkerEntry::new(":construction_worker:", "👷", "Add or update CI build system.", DependencyBuildConfig),
    MarkerEntry::new(":chart_with_upwards_trend:", "📈", "Add or update analytics or track code.", Features),
    MarkerEntry::new(":recycle:", "♻️", "Refactor code.", Maintenance),
    MarkerEntry::new(":heavy_plus_sign:", "➕", "Add a dependency.", DependencyBuildConfig),
    MarkerEntry::new(":heavy_minus_sign:", "➖", "Remove a dependency.", DependencyBuildConfig),
    MarkerEntry::new(":wrench:", "🔧", "Add or update configuration files.", DependencyBuildConfig),
    MarkerEntry::new(":hammer:", "🔨", "Add or update development scripts.", DependencyBuildConfig),
    MarkerEntry::new(":globe_with_meridians:", "🌐", "Internationalization and localization.", I18nAccessibilityUx),
    MarkerEntry::new(":pencil2:", "✏️", "Fix typos.", Documentation),
    MarkerEntry::new(":poop:", "💩", "Write bad code that needs to be improved.", Miscellaneous),
    MarkerEntry::new(":rewind:", "⏪️", "Revert changes.", Miscellaneous),
    MarkerEntry::new(":twisted_rightwards_arrows:", "🔀", "Merge branches.", ProjectManagement),
    MarkerEntry::new(":package:", "📦️", "Add or update compiled files or packages.", DependencyBuildConfig),
    MarkerEntry::new(":alien:", "👽️", "Update code due to external API changes.", Features),
    MarkerEntry::new(":truck:", "🚚", "Move or rename resources (e.g.: files, paths, routes).", ProjectManagement),
    MarkerEntry::new(":page_facing_up:", "📄", "Add or update license.", ProjectManagement),
    MarkerEntry::new(":boom:", "💥", "Introduce breaking changes.", CriticalChanges),
    MarkerEntry::new(":bento:", "🍱", "Add or update assets.", ProjectManagement),
    MarkerEntry::new(":wheelchair:", "♿️", "Improve accessibility.", I18nAccessibilityUx),
    MarkerEntry::new(":bulb:", "💡", "Add or update comments in source code.", Documentation),
    MarkerEntry::new(":beers:", "🍻", "Write code drunkenly.", Miscellaneous),
    MarkerEntry::new(":speech_balloon:", "💬", "Add or update text and literals.", I18nAccessibilityUx),
    MarkerEntry::new(":card_file_box:", "🗃️", "Perform database related changes.", Features),
    MarkerEntry::new(":loud_sound:", "🔊", "Add or update logs.", Maintenance),
    MarkerEntry::new(":mute:", "🔇", "Remove logs.", Maintenance),
    MarkerEntry::new(":busts_in_silhouette:", "👥", "Add or update contributor(s).", ProjectManagement),
    MarkerEntry::new(":children_crossing:", "🚸", "Improve user experience / usability.", I18nAccessibilityUx),
    MarkerEntry::new(":building_construction:", "🏗️", "Make architectural changes.", Maintenance),
    MarkerEntry::new(":iphone:", "📱", "Work on responsive design.", I18nAccessibilityUx),
    MarkerEntry::new(":clown_face:", "🤡", "Mock things.", Test),
    MarkerEntry::new(":egg:", "🥚", "Add or update an easter egg.", Miscellaneous),
    MarkerEntry::new(":see_no_evil:", "🙈", "Add or update a .gitignore file.", ProjectManagement),
    MarkerEntry::new(":camera_flash:", "📸", "Add or update snapshots.", Test),
    MarkerEntry::new(":alembic:", "⚗️", "Perform experiments.", Miscellaneous),
    MarkerEntry::new(":mag:", "🔍️", "Improve SEO.", I18nAccessibilityUx),
    MarkerEntry::new(":label:", "🏷️", "Add or update types.", Maintenance),
    MarkerEntry::new(":seedling:", "🌱", "Add or update seed files.", ProjectManagement),
    MarkerEntry::new(":triangular_flag_on_post:", "🚩", "Add, update, or remove feature flags.", Features),
    MarkerEntry::new(":goal_net:", "🥅", "Catch errors.", BugFixes),
    MarkerEntry::new(":dizzy:", "💫", "Add or update animations and transitions.", I18nAccessibilityUx),
    MarkerEntry::new(":wastebasket:", "🗑️", "Deprecate code that needs to be cleaned up.", Maintenance),
    MarkerEntry::new(":passport_control:", "🛂", "Work on code related to authorization, roles and permissions.", Features),
    MarkerEntry::new(":adhesive_bandage:", "🩹", "Simple fix for a non-critical issue.", BugFixes),
    MarkerEntry::new(":monocle_face:", "🧐", "Data exploration/inspection.", Miscellaneous),
    MarkerEntry::new(":coffin:", "⚰️", "Remove dead code.", Maintenance),
    MarkerEntry::new(":test_tube:", "🧪", "Add a failing test.", Test),
    MarkerEntry::new(":necktie:", "👔", "Add or update business logic.", Features),
    MarkerEntry::new(":stethoscope:", "🩺", "Add or update healthcheck.", Features),
    MarkerEntry::new(":bricks:", "🧱", "Infrastructure related changes.", DependencyBuildConfig),
    MarkerEntry::new(":technologist:", "🧑‍💻", "Improve developer experience.", Miscellaneous),
    MarkerEntry::new(":money_with_wings:", "💸", "Add sponsorships or money related infrastructure.", ProjectManagement),
    MarkerEntry::new(":thread:", "🧵", "Add or update code related to multithreading or concurrency.", Features),
    MarkerEntry::new(":safety_vest:", "🦺", "Add or update code related to validation.", Features),
    MarkerEntry::new(":airplane:", "✈️", "Improve offline support.", Features),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_markers_are_unique() {
        let markers: HashSet<&str> = CATALOG.iter().map(|e| e.marker).collect();
        assert_eq!(markers.len(), CATALOG.len());
        let emojis: HashSet<&str> = CATALOG.iter().map(|e| e.emoji).collect();
        assert_eq!(emojis.len(), CATALOG.len());
    }

    #[test]
    fn test_markers_are_shortcodes() {
        for entry in CATALOG {
            assert!(
                entry.marker.starts_with(':') && entry.marker.ends_with(':'),
                "bad shortcode {}",
                entry.marker
            );
        }
    }

    #[test]
    fn test_no_entry_maps_to_hmm() {
        assert!(CATALOG.iter().all(|e| e.category != Category::Hmm));
    }

    #[test]
    fn test_lookup_by_shortcode_and_emoji() {
        let by_code = lookup(":sparkles:").unwrap();
        let by_emoji = lookup("✨").unwrap();
        assert_eq!(by_code, by_emoji);
        assert_eq!(by_code.description, "Introduce new features.");
        assert_eq!(by_code.category, Category::Features);
    }

    #[test]
    fn test_lookup_without_variation_selector() {
        let entry = lookup("⚡").unwrap();
        assert_eq!(entry.marker, ":zap:");
    }

    #[test]
    fn test_lookup_unknown() {
        assert!(lookup(":nonexistent:").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn test_prefix_of_returns_text_slice() {
        let entry = lookup(":zap:").unwrap();
        assert_eq!(entry.prefix_of("⚡ faster"), Some("⚡"));
        assert_eq!(entry.prefix_of("⚡️ faster"), Some("⚡️"));
        assert_eq!(entry.prefix_of(":zap: faster"), Some(":zap:"));
        assert_eq!(entry.prefix_of("faster :zap:"), None);
    }

    #[test]
    fn test_appears_in() {
        let entry = lookup(":bug:").unwrap();
        assert!(entry.appears_in("Text with :bug: inside"));
        assert!(!entry.appears_in("Text without markers"));
    }

    #[test]
    fn test_art_is_maintenance() {
        assert_eq!(lookup(":art:").unwrap().category, Category::Maintenance);
    }
}
