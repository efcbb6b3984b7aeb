// Runs in its own process: it points libgit2 away from the host's global
// and system git config, which would otherwise supply a tagger identity.
mod common;

use common::TestRepo;
use git2::ConfigLevel;
use gitmoji_release::cli::{run_release_workflow, OutputArgs, RangeArgs, ReleaseWorkflowArgs};
use gitmoji_release::config::{Config, SignatureConfig};
use gitmoji_release::notice::Discard;
use gitmoji_release::release::{FALLBACK_SIGNER_EMAIL, FALLBACK_SIGNER_NAME};
use serial_test::serial;
use tempfile::TempDir;

/// Empty global, XDG and system config for the rest of this process
fn isolate_git_config() -> TempDir {
    let empty = TempDir::new().unwrap();
    for level in [ConfigLevel::Global, ConfigLevel::XDG, ConfigLevel::System] {
        unsafe {
            git2::opts::set_search_path(level, empty.path()).unwrap();
        }
    }
    empty
}

fn released_anonymously() -> TestRepo {
    let test = TestRepo::anonymous();
    let init = test.commit(":tada: init");
    test.tag("v0.1.0", init);
    test.commit(":bug: fix");
    test
}

fn release_args(test: &TestRepo) -> ReleaseWorkflowArgs {
    ReleaseWorkflowArgs {
        project: "proj".to_string(),
        repo: test.path().to_path_buf(),
        bump: None,
        release_date: Some("2000-01-01".to_string()),
        on_tag_exists: None,
        version_floor_scope: None,
        range: RangeArgs::default(),
        output: OutputArgs::default(),
    }
}

fn tagger(test: &TestRepo, tag: &str) -> (String, String) {
    let tag = test
        .repo
        .find_reference(&format!("refs/tags/{}", tag))
        .unwrap()
        .peel_to_tag()
        .unwrap();
    let tagger = tag.tagger().unwrap();
    (
        tagger.name().unwrap().to_string(),
        tagger.email().unwrap().to_string(),
    )
}

#[test]
#[serial]
fn test_configured_signature_used_without_repository_identity() {
    let _empty = isolate_git_config();
    let test = released_anonymously();
    assert!(test.repo.signature().is_err());

    let mut config = Config::default();
    config.signature = Some(SignatureConfig {
        name: "ci".to_string(),
        email: "ci@example.com".to_string(),
    });
    run_release_workflow(&release_args(&test), &config, &mut Discard).unwrap();

    assert_eq!(
        tagger(&test, "v0.1.1"),
        ("ci".to_string(), "ci@example.com".to_string())
    );
}

#[test]
#[serial]
fn test_builtin_signature_without_any_identity() {
    let _empty = isolate_git_config();
    let test = released_anonymously();
    assert!(test.repo.signature().is_err());

    run_release_workflow(&release_args(&test), &Config::default(), &mut Discard).unwrap();

    assert_eq!(
        tagger(&test, "v0.1.1"),
        (
            FALLBACK_SIGNER_NAME.to_string(),
            FALLBACK_SIGNER_EMAIL.to_string()
        )
    );
}
