pub mod orchestration;

pub use orchestration::{
    run_changelog_workflow, run_release_workflow, ChangelogWorkflowArgs, OutputArgs, RangeArgs,
    ReleaseWorkflowArgs,
};
