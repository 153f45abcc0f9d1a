//! Test fixtures: a scratch repository plus a private settings file.

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::git_helpers;

/// A temporary git repository with one commit on `main`, and a settings
/// file path that never touches the real home directory.
pub struct ShellFixture {
    temp: TempDir,
    pub repo: PathBuf,
    pub config: PathBuf,
}

impl ShellFixture {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let repo = temp.path().join("repo");
        git_helpers::init_repo(&repo);
        git_helpers::commit_file(&repo, "README.md", "# test\n", "Initial commit");
        let config = temp.path().join("G").join("config.yml");
        Self {
            temp,
            repo,
            config,
        }
    }

    /// Scratch directory next to the repository
    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    /// `g` running inside the repository with the private settings file
    pub fn g(&self) -> Command {
        let mut cmd = Command::cargo_bin("g").unwrap();
        cmd.current_dir(&self.repo)
            .env("G_CONFIG", &self.config)
            .env("GIT_MERGE_AUTOEDIT", "no")
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }

    pub fn write(&self, name: &str, content: &str) {
        std::fs::write(self.repo.join(name), content).unwrap();
    }
}
