#![allow(dead_code)]

use git2::{Commit, ObjectType, Oid, Repository, RepositoryInitOptions, Signature};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub const REMOTE_URL: &str = "https://example.com/r.git";

/// Scratch repository built through libgit2 so no git binary is needed
pub struct TestRepo {
    pub dir: TempDir,
    pub repo: Repository,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head("main");
        let repo = Repository::init_opts(dir.path(), &opts).expect("init repository");
        Self { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    fn signature() -> Signature<'static> {
        Signature::now("Test User", "test@example.com").expect("signature")
    }

    pub fn commit(&self, file: &str, contents: &str, message: &str) -> Oid {
        fs::write(self.path().join(file), contents).expect("write file");

        let mut index = self.repo.index().expect("open index");
        index.add_path(Path::new(file)).expect("stage file");
        index.write().expect("write index");
        let tree_id = index.write_tree().expect("write tree");
        let tree = self.repo.find_tree(tree_id).expect("find tree");

        let parents: Vec<Commit> = match self.repo.head() {
            Ok(head) => vec![head.peel_to_commit().expect("head commit")],
            Err(_) => Vec::new(),
        };
        let parent_refs: Vec<&Commit> = parents.iter().collect();

        let sig = Self::signature();
        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
            .expect("commit")
    }

    pub fn tag(&self, name: &str) {
        let target = self
            .repo
            .head()
            .and_then(|head| head.peel(ObjectType::Commit))
            .expect("head object");
        self.repo
            .tag_lightweight(name, &target, false)
            .expect("create tag");
    }

    pub fn annotated_tag(&self, name: &str) {
        let target = self
            .repo
            .head()
            .and_then(|head| head.peel(ObjectType::Commit))
            .expect("head object");
        let sig = Self::signature();
        self.repo
            .tag(name, &target, &sig, &format!("Release {name}"), false)
            .expect("create annotated tag");
    }

    pub fn add_remote(&self, name: &str, url: &str) {
        self.repo.remote(name, url).expect("add remote");
    }

    /// Modify a tracked file without committing it.
    pub fn make_dirty(&self, file: &str) {
        fs::write(self.path().join(file), "uncommitted change\n").expect("write file");
    }

    pub fn detach_head(&self) {
        let oid = self
            .repo
            .head()
            .ok()
            .and_then(|head| head.target())
            .expect("head target");
        self.repo.set_head_detached(oid).expect("detach head");
    }

    pub fn head_oid(&self) -> Oid {
        self.repo
            .head()
            .ok()
            .and_then(|head| head.target())
            .expect("head target")
    }
}

/// A tagged, clean repository with an origin remote.
pub fn released_repo(tag: &str) -> TestRepo {
    let repo = TestRepo::new();
    repo.add_remote("origin", REMOTE_URL);
    repo.commit("README.md", "hello\n", "Initial commit");
    repo.tag(tag);
    repo
}

pub fn is_short_hash(value: &str) -> bool {
    value.len() >= 7 && value.chars().all(|c| c.is_ascii_hexdigit())
}
