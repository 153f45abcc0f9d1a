//! Path helpers

use std::path::PathBuf;

/// Expand a leading `~` to the user's home directory.
///
/// `~` and `~/rest` (or `~\rest`) are expanded; `~user` forms and paths
/// without a tilde are returned unchanged.
pub fn expand_home(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with(['/', '\\']) => rest,
        _ => return PathBuf::from(path),
    };

    let Some(home) = dirs::home_dir() else {
        return PathBuf::from(path);
    };
    let rest = rest.trim_start_matches(['/', '\\']);
    if rest.is_empty() {
        home
    } else {
        home.join(rest)
    }
}
