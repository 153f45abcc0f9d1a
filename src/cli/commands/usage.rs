//! Usage screen, shown for an empty line

use crate::cli::output::{Output, Table};

/// The syntax table: task, what git runs, what to type in G
pub fn usage_table() -> Table {
    let mut table = Table::new(vec!["Task", "Git syntax", "G syntax"]);
    for (task, git, g) in [
        ("Add files to the index", "git add file1 file2", "+ file1 file2"),
        ("Remove files from the index", "git reset file1 file2", "- file1 file2"),
        ("Show changes of files", "git diff file1 file2", "~ file1 file2"),
        ("Push to a remote repository", "git push origin master", "@master -> @origin"),
        (
            "Merge branches",
            "git checkout feature; git merge master",
            "@feature > @master",
        ),
        ("Change directory", "cd ~/src/project", "cd ~/src/project"),
        ("Register a submodule", "", "@lib = ~/src/lib"),
        ("Register a remote", "", "upstream = git@host:repo.git"),
        ("List registered remotes", "", "@remotes"),
        ("List registered submodules", "", "@submodules"),
        ("Never register a path", "", "ignore ~/vendor/lib"),
        ("Register every repo with submodules", "", "find ~/src"),
        (
            "Update all submodules",
            "git submodule foreach git pull origin master",
            "update",
        ),
    ] {
        table.add_row(vec![task, git, g]);
    }
    table
}

/// Print the usage screen
pub fn run_usage() {
    Output::header("G is an interface to simplify the work with the git command line tool.");
    println!();
    usage_table().print();
}
