use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gitmoji_release::cli::{
    run_changelog_workflow, run_release_workflow, ChangelogWorkflowArgs, OutputArgs, RangeArgs,
    ReleaseWorkflowArgs,
};
use gitmoji_release::config;
use gitmoji_release::ui::{self, StderrNotices};

#[derive(Parser)]
#[command(
    name = "gitmoji-release",
    version,
    about = "Generate gitmoji changelogs and cut SemVer releases from git history"
)]
struct Cli {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the changelog between two references
    Changelog {
        project: String,
        release_date: String,
        /// Older end of the range (excluded)
        tail: String,
        /// Newer end of the range
        head: String,

        #[arg(long, help = "Version shown in the heading [default: HEAD argument]")]
        version: Option<String>,

        #[command(flatten)]
        common: CommonFlags,
    },
    /// Tag HEAD with the next version and print its release notes
    Release {
        project: String,

        #[arg(long, help = "patch, minor or major [default: patch]")]
        bump: Option<String>,

        #[arg(long, help = "Release date for the notes [default: today]")]
        release_date: Option<String>,

        #[arg(long, help = "error, skip or overwrite [default: error]")]
        on_tag_exists: Option<String>,

        #[arg(long, help = "global or reachable [default: global]")]
        version_floor_scope: Option<String>,

        #[command(flatten)]
        common: CommonFlags,
    },
}

#[derive(Args)]
struct CommonFlags {
    #[arg(long, default_value = ".", help = "Repository directory")]
    repo: PathBuf,

    #[arg(
        long,
        help = "auto, direct, common-base or head-only [default: auto]"
    )]
    range_mode: Option<String>,

    #[arg(long, help = "Fail unless HEAD descends from TAIL")]
    strict_ancestor: bool,

    #[arg(long, help = "Commit order, e.g. topological,time or none")]
    sorting: Option<String>,

    #[arg(short, long, help = "Suppress notices")]
    quiet: bool,

    #[arg(short, long, help = "Detailed notices and debug logging")]
    verbose: bool,

    #[arg(long, help = "Print a JSON release payload instead of markdown")]
    github_payload: bool,

    #[arg(long, help = "Mark the payload as a draft")]
    draft: bool,

    #[arg(long, help = "Mark the payload as a prerelease")]
    prerelease: bool,
}

impl CommonFlags {
    fn range(&self) -> RangeArgs {
        RangeArgs {
            range_mode: self.range_mode.clone(),
            strict_ancestor: self.strict_ancestor,
            sorting: self.sorting.clone(),
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }

    fn output(&self) -> OutputArgs {
        OutputArgs {
            github_payload: self.github_payload,
            draft: self.draft,
            prerelease: self.prerelease,
        }
    }
}

impl Command {
    fn common(&self) -> &CommonFlags {
        match self {
            Command::Changelog { common, .. } | Command::Release { common, .. } => common,
        }
    }
}

fn init_tracing(quiet: bool, verbose: bool) {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = config::load_config(cli.config.as_deref())?;
    let mut notices = StderrNotices;

    match cli.command {
        Command::Changelog {
            project,
            release_date,
            tail,
            head,
            version,
            common,
        } => {
            let args = ChangelogWorkflowArgs {
                project,
                release_date,
                tail,
                head,
                repo: common.repo.clone(),
                version,
                range: common.range(),
                output: common.output(),
            };
            let text = run_changelog_workflow(&args, &config, &mut notices)?;
            println!("{}", text);
        }
        Command::Release {
            project,
            bump,
            release_date,
            on_tag_exists,
            version_floor_scope,
            common,
        } => {
            let args = ReleaseWorkflowArgs {
                project,
                repo: common.repo.clone(),
                bump,
                release_date,
                on_tag_exists,
                version_floor_scope,
                range: common.range(),
                output: common.output(),
            };
            let release = run_release_workflow(&args, &config, &mut notices)?;
            if !common.quiet {
                ui::display_release_tag(
                    release.previous_tag.as_deref(),
                    &release.tag_name,
                    release.tag_outcome,
                );
            }
            println!("{}", release.output.to_text()?);
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let common = cli.command.common();
    init_tracing(common.quiet, common.verbose);

    if let Err(e) = run(cli) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}
