//! `@submodules`, `update` and `find`

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::cli::output::Output;
use crate::core::dispatch::{GitInvocation, GitSubcommand, Invocation};
use crate::core::settings::{Registration, Settings};
use crate::util::paths::expand_home;

/// Arguments of the per-submodule update call
const UPDATE_ARGS: [&str; 5] = ["foreach", "git", "pull", "origin", "master"];

/// File that marks a repository carrying submodules
const GITMODULES: &str = ".gitmodules";

/// Print the registered submodules. Returns how many were shown.
pub fn run_show_submodules(settings: &Settings) -> usize {
    if settings.submodules.is_empty() {
        Output::warning("No submodules registered yet (use `@name = path`)");
        return 0;
    }

    Output::header("Submodules:");
    for submodule in &settings.submodules {
        let mut line = format!(
            "{} {}",
            Output::branch_name(&submodule.name),
            Output::path(&submodule.path)
        );
        if !expand_home(&submodule.path).is_dir() {
            line.push_str(" (missing)");
        }
        Output::list_item(&line);
    }
    settings.submodules.len()
}

/// Plan a `git submodule foreach git pull origin master` inside every
/// registered submodule
pub fn update_plan(settings: &Settings) -> Vec<Invocation> {
    settings
        .submodules
        .iter()
        .map(|submodule| {
            Invocation::Git(
                GitInvocation::new(GitSubcommand::Submodule, UPDATE_ARGS)
                    .in_dir(expand_home(&submodule.path)),
            )
        })
        .collect()
}

/// Walk `root` for repositories with a `.gitmodules` file and register each
/// one under its directory name. Ignored and already registered paths are
/// skipped without a word. Returns the newly registered directories.
pub fn discover(settings: &mut Settings, root: &Path) -> io::Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    find_gitmodules(root, &mut found)?;

    let mut added = Vec::new();
    for dir in found {
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| dir.display().to_string());
        match settings.add_submodule(&name, &dir) {
            Registration::Added => added.push(dir),
            outcome => debug!(dir = %dir.display(), ?outcome, "not registering"),
        }
    }
    Ok(added)
}

fn find_gitmodules(dir: &Path, found: &mut Vec<PathBuf>) -> io::Result<()> {
    if dir.join(GITMODULES).is_file() {
        found.push(dir.to_path_buf());
    }

    let mut entries: Vec<_> = fs::read_dir(dir)?.filter_map(Result::ok).collect();
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        // file_type() does not follow symlinks, so the walk cannot loop
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        if !is_dir || entry.file_name() == ".git" {
            continue;
        }
        if let Err(e) = find_gitmodules(&entry.path(), found) {
            debug!(dir = %entry.path().display(), error = %e, "skipping unreadable directory");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn superproject(root: &Path, rel: &str) -> PathBuf {
        let dir = root.join(rel);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(GITMODULES), "").unwrap();
        dir
    }

    #[test]
    fn test_update_plan_runs_in_each_submodule() {
        let mut settings = Settings::default();
        settings.add_submodule("lib", Path::new("/work/lib"));
        settings.add_submodule("docs", Path::new("/work/docs"));

        let plan = update_plan(&settings);
        assert_eq!(plan.len(), 2);
        match &plan[0] {
            Invocation::Git(git) => {
                assert_eq!(git.to_string(), "git submodule foreach git pull origin master");
                assert_eq!(git.cwd, Some(PathBuf::from("/work/lib")));
            }
            other => panic!("expected a git call, got {:?}", other),
        }
    }

    #[test]
    fn test_update_plan_empty_without_submodules() {
        assert!(update_plan(&Settings::default()).is_empty());
        assert_eq!(run_show_submodules(&Settings::default()), 0);
    }

    #[test]
    fn test_discover_registers_repos_with_gitmodules() {
        let temp = TempDir::new().unwrap();
        let root = fs::canonicalize(temp.path()).unwrap();
        let app = superproject(&root, "work/app");
        let site = superproject(&root, "site");
        fs::create_dir_all(root.join("plain/src")).unwrap();
        superproject(&root, "work/app/.git/modules");

        let mut settings = Settings::default();
        let added = discover(&mut settings, &root).unwrap();

        assert_eq!(added, vec![site.clone(), app.clone()]);
        let names: Vec<&str> = settings.submodules.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["site", "app"]);
    }

    #[test]
    fn test_discover_skips_ignored_and_known_paths() {
        let temp = TempDir::new().unwrap();
        let root = fs::canonicalize(temp.path()).unwrap();
        let app = superproject(&root, "app");
        let vendor = superproject(&root, "vendor");
        let tools = superproject(&root, "tools");

        let mut settings = Settings::default();
        settings.add_submodule("app", &app);
        settings.ignore_submodule(&vendor);

        let added = discover(&mut settings, &root).unwrap();
        assert_eq!(added, vec![tools]);
        assert_eq!(settings.submodules.len(), 2);

        // A second walk finds nothing new
        assert!(discover(&mut settings, &root).unwrap().is_empty());
    }

    #[test]
    fn test_discover_missing_root_fails() {
        let mut settings = Settings::default();
        assert!(discover(&mut settings, Path::new("/definitely/not/here")).is_err());
    }
}
