use crate::api::{LibrisApi, LibrisPaths};
use crate::config::LibrisConfig;
use crate::model::Scope;
use crate::store::fs::FileStore;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Overrides the per-user data directory used for the global scope.
pub const GLOBAL_DATA_ENV: &str = "LIBRIS_GLOBAL_DATA";

pub struct LibrisContext {
    pub api: LibrisApi<FileStore>,
    pub scope: Scope,
    pub config: LibrisConfig,
}

/// Global library root: `$LIBRIS_GLOBAL_DATA` if set, else the platform data dir.
pub fn global_data_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os(GLOBAL_DATA_ENV).filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "libris", "libris").map(|dirs| dirs.data_dir().to_path_buf())
}

/// Wires a file-backed API for `cwd`, loading the config of the active scope.
///
/// An unreadable config falls back to defaults with a warning, so a broken
/// `libris.json` can still be fixed through `libris config`.
pub fn initialize(cwd: &Path, use_global: bool) -> LibrisContext {
    initialize_with(cwd, global_data_dir(), use_global)
}

pub fn initialize_with(cwd: &Path, global: Option<PathBuf>, use_global: bool) -> LibrisContext {
    let scope = if use_global {
        Scope::Global
    } else {
        Scope::Project
    };
    let paths = LibrisPaths {
        project: cwd.to_path_buf(),
        global,
    };

    let config = match paths.scope_dir(scope) {
        Ok(root) => LibrisConfig::load(&root).unwrap_or_else(|e| {
            tracing::warn!("Ignoring unreadable config in {}: {}", root.display(), e);
            LibrisConfig::default()
        }),
        Err(_) => LibrisConfig::default(),
    };
    tracing::debug!("Scope {:?}, config {:?}", scope, config);

    let store = FileStore::new(paths.clone()).with_config(config.clone());
    let api = LibrisApi::new(store, paths, config.clone());

    LibrisContext { api, scope, config }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn project_scope_uses_cwd_config() {
        let cwd = TempDir::new().unwrap();
        let mut config = LibrisConfig::default();
        config.set("cover-size", "64").unwrap();
        config.save(cwd.path()).unwrap();

        let ctx = initialize_with(cwd.path(), None, false);
        assert_eq!(ctx.scope, Scope::Project);
        assert_eq!(ctx.config.cover_size, 64);
        assert_eq!(ctx.api.paths().project, cwd.path());
    }

    #[test]
    fn global_scope_reads_global_config() {
        let cwd = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        let mut config = LibrisConfig::default();
        config.set("library-file", "books.json").unwrap();
        config.save(global.path()).unwrap();

        let ctx = initialize_with(cwd.path(), Some(global.path().to_path_buf()), true);
        assert_eq!(ctx.scope, Scope::Global);
        assert_eq!(ctx.config.library_file, "books.json");
    }

    #[test]
    fn broken_config_falls_back_to_defaults() {
        let cwd = TempDir::new().unwrap();
        std::fs::write(cwd.path().join("libris.json"), "{ not json").unwrap();

        let ctx = initialize_with(cwd.path(), None, false);
        assert_eq!(ctx.config, LibrisConfig::default());
    }
}
