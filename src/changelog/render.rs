use crate::classifier::{classified_entry, StructuredChangelog};
use crate::domain::{Category, ClassifiedCommit, CommitRecord};

const SEPARATOR: &str = "---";

const SUBTEXT: &str = "_\"Change is always thrilling!\"_  \n_(And sometimes a little confusing.)_";

/// Entries of one category sharing an emoji and description
struct SubGroup<'c> {
    emoji: &'static str,
    description: &'static str,
    entries: Vec<ClassifiedCommit<'c>>,
}

/// Group renderable commits by `(emoji, description)`, keeping first-seen order
/// of groups and of commits inside each group. Commits whose subject does not
/// start with a catalog marker are left out.
fn sub_groups(commits: &[CommitRecord]) -> Vec<SubGroup<'_>> {
    let mut groups: Vec<SubGroup<'_>> = Vec::new();

    for entry in commits.iter().filter_map(classified_entry) {
        match groups
            .iter_mut()
            .find(|g| g.emoji == entry.emoji && g.description == entry.description)
        {
            Some(group) => group.entries.push(entry),
            None => groups.push(SubGroup {
                emoji: entry.emoji,
                description: entry.description,
                entries: vec![entry],
            }),
        }
    }

    groups
}

fn render_header(out: &mut String, project: &str, version: &str, release_date: &str) {
    out.push_str(&format!("# {} {}\n\n", project, version));
    out.push_str(&format!("Released on {}\n\n", release_date));
    out.push_str(SUBTEXT);
    out.push_str("\n\n");
}

fn render_category(out: &mut String, category: Category, groups: &[SubGroup<'_>]) {
    out.push_str(&format!("## {}\n\n", category.title()));
    out.push_str(&format!("_{}_\n\n", category.subtext()));

    for group in groups {
        out.push_str(&format!("### {} {}\n\n", group.emoji, group.description));
        for entry in &group.entries {
            out.push_str(&format!(
                "- {} ({})\n",
                entry.subject,
                entry.commit.short_id()
            ));
        }
        out.push('\n');
    }
}

/// Render a structured changelog to markdown.
///
/// Categories appear in priority order and only when at least one of their
/// commits starts with a catalog marker. Deterministic for equal inputs.
pub fn render(
    project: &str,
    version: &str,
    release_date: &str,
    changelog: &StructuredChangelog,
) -> String {
    let mut out = String::new();

    render_header(&mut out, project, version, release_date);
    out.push_str(SEPARATOR);
    out.push_str("\n\n");

    for (category, commits) in changelog.iter() {
        let groups = sub_groups(commits);
        if groups.is_empty() {
            continue;
        }
        render_category(&mut out, category, &groups);
        out.push_str(SEPARATOR);
        out.push_str("\n\n");
    }

    out.trim().to_string()
}
