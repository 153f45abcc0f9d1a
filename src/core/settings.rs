//! Settings document
//!
//! The settings file (`~/.config/G/config.yml`) records remotes per working
//! directory and the submodules G knows about.
//!
//! ```yaml
//! history-length: 1000
//! ignore-submodules:
//!   - ~/vendor/skip
//! repositories:
//!   /home/me/project:
//!     remotes:
//!       origin: git@github.com:me/project.git
//! submodules:
//!   - name: lib
//!     path: /home/me/project/lib
//!     ignore-dirty: true
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::util::paths::expand_home;

/// Errors that can occur when loading or saving settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Home directory could not be determined")]
    NoHome,
}

/// Outcome of registering a remote or submodule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Added,
    /// An entry with the same key already exists; nothing changed
    AlreadyPresent,
    /// The path is listed under `ignore-submodules`
    Ignored,
}

/// Remotes registered for one working directory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryEntry {
    /// Map: remote name -> URL
    #[serde(default)]
    pub remotes: BTreeMap<String, String>,
}

/// A registered submodule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SubmoduleEntry {
    pub name: String,
    pub path: String,
    /// Leave uncommitted submodule changes alone
    #[serde(default = "default_ignore_dirty")]
    pub ignore_dirty: bool,
}

fn default_ignore_dirty() -> bool {
    true
}

fn default_history_length() -> usize {
    1000
}

/// The persisted settings document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Settings {
    /// Lines of prompt history kept per session
    #[serde(default = "default_history_length")]
    pub history_length: usize,
    /// Map: working directory -> registered remotes
    #[serde(default)]
    pub repositories: BTreeMap<String, RepositoryEntry>,
    #[serde(default)]
    pub submodules: Vec<SubmoduleEntry>,
    /// Submodule paths that must never be registered
    #[serde(default)]
    pub ignore_submodules: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            history_length: default_history_length(),
            repositories: BTreeMap::new(),
            submodules: Vec::new(),
            ignore_submodules: Vec::new(),
        }
    }
}

impl Settings {
    /// Parse settings from a YAML string. An empty document yields defaults.
    pub fn parse(yaml: &str) -> Result<Self, SettingsError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings: Settings = serde_yaml::from_str(yaml)?;
        Ok(settings)
    }

    /// Remotes registered for `dir`, matching keys after `~` expansion
    pub fn remotes_for(&self, dir: &Path) -> Option<&BTreeMap<String, String>> {
        self.repositories
            .iter()
            .find(|(key, _)| expand_home(key) == dir)
            .map(|(_, entry)| &entry.remotes)
    }

    /// Register a remote for `dir`. Existing names are left untouched.
    pub fn add_remote(&mut self, dir: &Path, name: &str, url: &str) -> Registration {
        let key = self
            .repositories
            .keys()
            .find(|key| expand_home(key) == dir)
            .cloned()
            .unwrap_or_else(|| dir.display().to_string());

        let entry = self.repositories.entry(key).or_default();
        if entry.remotes.contains_key(name) {
            return Registration::AlreadyPresent;
        }
        entry.remotes.insert(name.to_string(), url.to_string());
        Registration::Added
    }

    /// Whether `path` is listed under `ignore-submodules`
    pub fn is_ignored(&self, path: &Path) -> bool {
        self.ignore_submodules
            .iter()
            .any(|ignored| expand_home(ignored) == path)
    }

    /// Add `path` to `ignore-submodules` and drop any registration for it
    pub fn ignore_submodule(&mut self, path: &Path) -> Registration {
        if self.is_ignored(path) {
            return Registration::AlreadyPresent;
        }
        self.submodules.retain(|s| expand_home(&s.path) != path);
        self.ignore_submodules.push(path.display().to_string());
        Registration::Added
    }

    /// Register a submodule. Duplicate names or paths are left untouched.
    pub fn add_submodule(&mut self, name: &str, path: &Path) -> Registration {
        if self.is_ignored(path) {
            return Registration::Ignored;
        }

        let duplicate = self
            .submodules
            .iter()
            .any(|s| s.name == name || expand_home(&s.path) == path);
        if duplicate {
            return Registration::AlreadyPresent;
        }

        self.submodules.push(SubmoduleEntry {
            name: name.to_string(),
            path: path.display().to_string(),
            ignore_dirty: default_ignore_dirty(),
        });
        Registration::Added
    }
}

/// Persistence seam for the settings document
pub trait SettingsStore {
    fn load(&self) -> Result<Settings, SettingsError>;
    fn save(&self, settings: &Settings) -> Result<(), SettingsError>;
}

/// Settings stored as YAML on disk
#[derive(Debug, Clone)]
pub struct YamlSettingsStore {
    path: PathBuf,
}

impl YamlSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `~/.config/G/config.yml`
    pub fn default_location() -> Result<Self, SettingsError> {
        let home = dirs::home_dir().ok_or(SettingsError::NoHome)?;
        Ok(Self::new(home.join(".config").join("G").join("config.yml")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> SettingsError {
        SettingsError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl SettingsStore for YamlSettingsStore {
    /// Load settings; a missing file yields defaults
    fn load(&self) -> Result<Settings, SettingsError> {
        if !self.path.exists() {
            return Ok(Settings::default());
        }
        let content = std::fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        Settings::parse(&content)
    }

    /// Save settings. The document is serialized before the file is touched
    /// and written through a sibling temp file, so a failure leaves the
    /// previous document intact.
    fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        let yaml = serde_yaml::to_string(settings)?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        std::fs::write(&tmp, yaml).map_err(|e| self.io_error(e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| {
            let _ = std::fs::remove_file(&tmp);
            self.io_error(e)
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_settings() {
        let yaml = r#"
history-length: 50
ignore-submodules:
  - /opt/vendor
repositories:
  /home/me/project:
    remotes:
      origin: git@github.com:me/project.git
submodules:
  - name: lib
    path: /home/me/project/lib
    ignore-dirty: false
"#;
        let settings = Settings::parse(yaml).unwrap();
        assert_eq!(settings.history_length, 50);
        assert_eq!(settings.ignore_submodules, vec!["/opt/vendor"]);
        let remotes = settings
            .remotes_for(Path::new("/home/me/project"))
            .unwrap();
        assert_eq!(remotes["origin"], "git@github.com:me/project.git");
        assert_eq!(settings.submodules.len(), 1);
        assert!(!settings.submodules[0].ignore_dirty);
    }

    #[test]
    fn test_parse_empty_document() {
        assert_eq!(Settings::parse("").unwrap(), Settings::default());
        assert_eq!(Settings::parse("  \n").unwrap(), Settings::default());
    }

    #[test]
    fn test_parse_defaults() {
        let settings = Settings::parse("submodules: []\n").unwrap();
        assert_eq!(settings.history_length, 1000);
        assert!(settings.repositories.is_empty());
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let result = Settings::parse("repositories: [unterminated");
        assert!(matches!(result, Err(SettingsError::Parse(_))));
    }

    #[test]
    fn test_add_remote() {
        let mut settings = Settings::default();
        let dir = Path::new("/work/app");

        assert_eq!(
            settings.add_remote(dir, "origin", "git@host:app.git"),
            Registration::Added
        );
        assert_eq!(
            settings.add_remote(dir, "origin", "git@host:other.git"),
            Registration::AlreadyPresent
        );
        assert_eq!(
            settings.add_remote(dir, "upstream", "git@host:up.git"),
            Registration::Added
        );

        let remotes = settings.remotes_for(dir).unwrap();
        assert_eq!(remotes.len(), 2);
        assert_eq!(remotes["origin"], "git@host:app.git");
        assert!(settings.remotes_for(Path::new("/elsewhere")).is_none());
    }

    #[test]
    fn test_add_submodule() {
        let mut settings = Settings::default();
        let path = Path::new("/work/app/lib");

        assert_eq!(settings.add_submodule("lib", path), Registration::Added);
        assert_eq!(
            settings.add_submodule("lib", Path::new("/work/other")),
            Registration::AlreadyPresent
        );
        assert_eq!(
            settings.add_submodule("lib2", path),
            Registration::AlreadyPresent
        );
        assert_eq!(settings.submodules.len(), 1);
        assert!(settings.submodules[0].ignore_dirty);
    }

    #[test]
    fn test_ignored_submodule_rejected() {
        let mut settings = Settings {
            ignore_submodules: vec!["/work/vendor".to_string()],
            ..Settings::default()
        };
        assert_eq!(
            settings.add_submodule("vendor", Path::new("/work/vendor")),
            Registration::Ignored
        );
        assert!(settings.submodules.is_empty());
    }

    #[test]
    fn test_ignore_submodule_unregisters_it() {
        let mut settings = Settings::default();
        let path = Path::new("/work/vendor");
        settings.add_submodule("vendor", path);

        assert_eq!(settings.ignore_submodule(path), Registration::Added);
        assert_eq!(settings.ignore_submodule(path), Registration::AlreadyPresent);
        assert_eq!(settings.ignore_submodules, vec!["/work/vendor"]);
        assert!(settings.submodules.is_empty());
        assert_eq!(settings.add_submodule("vendor", path), Registration::Ignored);
    }

    #[test]
    fn test_store_missing_file_loads_defaults() {
        let temp = TempDir::new().unwrap();
        let store = YamlSettingsStore::new(temp.path().join("config.yml"));
        assert_eq!(store.load().unwrap(), Settings::default());
    }

    #[test]
    fn test_store_roundtrip_creates_parent() {
        let temp = TempDir::new().unwrap();
        let store = YamlSettingsStore::new(temp.path().join("G").join("config.yml"));

        let mut settings = Settings::default();
        settings.add_submodule("lib", Path::new("/work/lib"));
        store.save(&settings).unwrap();

        assert!(store.path().exists());
        assert!(!temp.path().join("G").join("config.yml.tmp").exists());
        assert_eq!(store.load().unwrap(), settings);

        let content = std::fs::read_to_string(store.path()).unwrap();
        assert!(content.contains("history-length"));
        assert!(content.contains("ignore-dirty"));
    }

    #[test]
    fn test_store_corrupt_file_is_not_overwritten_by_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        std::fs::write(&path, "submodules: {{{").unwrap();

        let store = YamlSettingsStore::new(&path);
        assert!(store.load().is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "submodules: {{{");
    }
}
