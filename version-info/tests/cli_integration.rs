mod common;

use common::{is_short_hash, released_repo, TestRepo, REMOTE_URL};
use std::process::Command;
use version_info::{collect, CollectPolicy, GitCliProvider, MetadataProvider, QueryError};

/// These tests drive the real `git` binary and pass trivially without one.
fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

#[test]
fn test_clean_tagged_commit() {
    if !git_available() {
        return;
    }
    let repo = released_repo("v1.2.0");
    let provider = GitCliProvider::new(repo.path());

    let info = collect(&provider, &CollectPolicy::default()).unwrap();
    assert_eq!(info.remote_origin_url, REMOTE_URL);
    assert_eq!(info.branch, "main");
    assert_eq!(info.short_version, "v1.2.0");
    assert_eq!(info.long_version, "v1.2.0");
}

#[test]
fn test_commits_after_tag() {
    if !git_available() {
        return;
    }
    let repo = released_repo("v1.2.0");
    repo.commit("src.c", "int main(void) { return 0; }\n", "Add source");

    let provider = GitCliProvider::new(repo.path());
    assert_eq!(provider.latest_tag().unwrap().as_deref(), Some("v1.2.0"));
    let long = provider.describe().unwrap();
    assert!(long.starts_with("v1.2.0-1-g"), "unexpected: {long}");
}

#[test]
fn test_untagged_repository() {
    if !git_available() {
        return;
    }
    let repo = TestRepo::new();
    repo.commit("README.md", "hello\n", "Initial commit");

    let provider = GitCliProvider::new(repo.path());
    assert!(provider.latest_tag().unwrap().is_none());
    let long = provider.describe().unwrap();
    assert!(is_short_hash(&long), "expected bare hash, got {long}");
    assert!(repo.head_oid().to_string().starts_with(&long));
}

#[test]
fn test_dirty_tree_is_marked() {
    if !git_available() {
        return;
    }
    let repo = released_repo("v1.2.0");
    repo.make_dirty("README.md");

    let provider = GitCliProvider::new(repo.path());
    assert_eq!(provider.describe().unwrap(), "v1.2.0-dirty");
}

#[test]
fn test_missing_remote_is_not_configured() {
    if !git_available() {
        return;
    }
    let repo = TestRepo::new();
    repo.commit("README.md", "hello\n", "Initial commit");

    let provider = GitCliProvider::new(repo.path());
    match provider.remote_url() {
        Err(QueryError::NotConfigured { what }) => assert_eq!(what, "remote 'origin'"),
        other => panic!("Expected NotConfigured, got {:?}", other),
    }
}

#[test]
fn test_detached_head_has_no_branch() {
    if !git_available() {
        return;
    }
    let repo = released_repo("v1.2.0");
    repo.detach_head();

    let provider = GitCliProvider::new(repo.path());
    assert_eq!(provider.branch().unwrap(), "");
}

#[test]
fn test_outside_repository_fails_describe() {
    if !git_available() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let provider = GitCliProvider::new(dir.path());
    assert!(matches!(
        provider.describe(),
        Err(QueryError::CommandFailed { .. })
    ));
}

#[test]
fn test_backends_agree() {
    if !git_available() {
        return;
    }
    let repo = released_repo("v3.1.4");
    repo.commit("main.c", "/* one */\n", "One");
    repo.commit("main.c", "/* two */\n", "Two");

    let cli = collect(&GitCliProvider::new(repo.path()), &CollectPolicy::default()).unwrap();
    let lib = collect(
        &version_info::Git2Provider::new(repo.path()),
        &CollectPolicy::default(),
    )
    .unwrap();
    assert_eq!(cli, lib);
}
