//! `@remotes`: list the remotes registered for a directory

use std::path::Path;

use crate::cli::output::Output;
use crate::core::settings::Settings;

/// Print the remotes registered for `dir`. Returns how many were shown.
pub fn run_show_remotes(settings: &Settings, dir: &Path) -> usize {
    let remotes = match settings.remotes_for(dir) {
        Some(remotes) if !remotes.is_empty() => remotes,
        _ => {
            Output::warning(&format!(
                "No remotes registered for {} (use `name = url`)",
                dir.display()
            ));
            return 0;
        }
    };

    Output::header(&format!("Remotes for {}:", Output::path(&dir.display().to_string())));
    for (name, url) in remotes {
        Output::kv(&Output::branch_name(name), url);
    }
    remotes.len()
}
