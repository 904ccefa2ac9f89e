//! Locates the configuration file for a check run.
//!
//! Lookup order:
//!
//! 1. `--config` / `$SHEETLINT_CONFIG`, trusted as given
//! 2. `sheetlint.toml` or `.sheetlint.toml` in the checked directory or the
//!    nearest ancestor that has one (the parent directory for a single file)
//! 3. `config.toml` in `$SHEETLINT_CONFIG_DIR` or `~/.sheetlint/`
//! 4. built-in defaults

use std::path::{Path, PathBuf};

const LOCAL_NAMES: [&str; 2] = ["sheetlint.toml", ".sheetlint.toml"];
const GLOBAL_NAME: &str = "config.toml";

/// Where the configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given on the command line.
    Explicit(PathBuf),
    /// Found next to the stylesheets.
    Local(PathBuf),
    /// The user-wide fallback.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// Path of the file to load, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(path) | Self::Local(path) | Self::Global(path) => Some(path),
            Self::Default => None,
        }
    }

    /// Returns `true` for the user-wide fallback.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }
}

/// Resolves the configuration for checking `target`.
#[must_use]
pub fn resolve(target: &Path, explicit: Option<&Path>) -> ConfigSource {
    let start = target
        .canonicalize()
        .unwrap_or_else(|_| target.to_path_buf());
    Resolver {
        global_dir: global_config_dir(),
    }
    .resolve(search_start(&start), explicit)
}

/// User-wide configuration directory.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    match std::env::var_os("SHEETLINT_CONFIG_DIR") {
        Some(dir) => Some(PathBuf::from(dir)),
        None => home::home_dir().map(|home| home.join(".sheetlint")),
    }
}

fn search_start(target: &Path) -> &Path {
    if target.is_file() {
        target.parent().unwrap_or(Path::new("."))
    } else {
        target
    }
}

struct Resolver {
    global_dir: Option<PathBuf>,
}

impl Resolver {
    fn resolve(&self, start: &Path, explicit: Option<&Path>) -> ConfigSource {
        if let Some(path) = explicit {
            return ConfigSource::Explicit(path.to_path_buf());
        }
        if let Some(path) = find_local(start) {
            tracing::debug!("Using project config {}", path.display());
            return ConfigSource::Local(path);
        }
        self.global_dir
            .as_deref()
            .map(|dir| dir.join(GLOBAL_NAME))
            .filter(|path| path.is_file())
            .map_or(ConfigSource::Default, |path| {
                tracing::debug!("Using global config {}", path.display());
                ConfigSource::Global(path)
            })
    }
}

fn find_local(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        LOCAL_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) -> PathBuf {
        fs::write(path, "").unwrap();
        path.to_path_buf()
    }

    fn resolver(global: Option<&TempDir>) -> Resolver {
        Resolver {
            global_dir: global.map(|dir| dir.path().to_path_buf()),
        }
    }

    #[test]
    fn explicit_path_wins_without_existence_check() {
        let project = TempDir::new().unwrap();
        touch(&project.path().join("sheetlint.toml"));

        let source = resolver(None).resolve(project.path(), Some(Path::new("/missing.toml")));
        assert_eq!(source, ConfigSource::Explicit(PathBuf::from("/missing.toml")));
    }

    #[test]
    fn plain_name_preferred_over_dotfile() {
        let project = TempDir::new().unwrap();
        let plain = touch(&project.path().join("sheetlint.toml"));
        touch(&project.path().join(".sheetlint.toml"));

        assert_eq!(resolver(None).resolve(project.path(), None), ConfigSource::Local(plain));
    }

    #[test]
    fn dotfile_found() {
        let project = TempDir::new().unwrap();
        let dotfile = touch(&project.path().join(".sheetlint.toml"));

        assert_eq!(resolver(None).resolve(project.path(), None), ConfigSource::Local(dotfile));
    }

    #[test]
    fn nearest_ancestor_config_is_used() {
        let project = TempDir::new().unwrap();
        let root_config = touch(&project.path().join("sheetlint.toml"));
        let nested = project.path().join("styles/components");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(resolver(None).resolve(&nested, None), ConfigSource::Local(root_config));

        let closer = touch(&project.path().join("styles/.sheetlint.toml"));
        assert_eq!(resolver(None).resolve(&nested, None), ConfigSource::Local(closer));
    }

    #[test]
    fn single_file_searches_from_its_directory() {
        let project = TempDir::new().unwrap();
        let sheet = touch(&project.path().join("site.css"));

        assert_eq!(search_start(&sheet), project.path());
        assert_eq!(search_start(project.path()), project.path());
    }

    #[test]
    fn global_config_is_the_fallback() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();

        assert_eq!(
            resolver(Some(&global)).resolve(project.path(), None),
            ConfigSource::Default
        );

        let config = touch(&global.path().join("config.toml"));
        let source = resolver(Some(&global)).resolve(project.path(), None);
        assert!(source.is_global());
        assert_eq!(source.path(), Some(config.as_path()));
    }

    #[test]
    fn local_config_shadows_global() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        touch(&global.path().join("config.toml"));
        touch(&project.path().join("sheetlint.toml"));

        let source = resolver(Some(&global)).resolve(project.path(), None);
        assert!(matches!(source, ConfigSource::Local(_)));
        assert!(!source.is_global());
    }

    #[test]
    fn default_has_no_path() {
        assert!(ConfigSource::Default.path().is_none());
    }
}
