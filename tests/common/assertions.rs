//! Custom assertion helpers for integration tests.

use std::path::Path;

use super::git_helpers;

/// Assert that a repo is on the expected branch.
pub fn assert_on_branch(repo_path: &Path, expected: &str) {
    let actual = git_helpers::current_branch(repo_path);
    assert_eq!(
        actual,
        expected,
        "Expected repo at {} to be on branch '{}', but was on '{}'",
        repo_path.display(),
        expected,
        actual
    );
}

/// Assert the exact set of staged files.
pub fn assert_staged(repo_path: &Path, expected: &[&str]) {
    let staged = git_helpers::staged_files(repo_path);
    assert_eq!(
        staged, expected,
        "Unexpected index contents in {}",
        repo_path.display()
    );
}
