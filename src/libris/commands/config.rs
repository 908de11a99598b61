use crate::commands::{CmdMessage, CmdResult, LibrisPaths};
use crate::config::{LibrisConfig, CONFIG_FILENAME};
use crate::error::Result;
use crate::model::Scope;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(paths: &LibrisPaths, scope: Scope, action: ConfigAction) -> Result<CmdResult> {
    let dir = paths.scope_dir(scope)?;
    let mut result = CmdResult::default();
    let mut config = LibrisConfig::load(&dir).unwrap_or_else(|e| {
        tracing::warn!("Unreadable config in {}: {}", dir.display(), e);
        result.add_message(CmdMessage::warning(format!(
            "Ignoring unreadable {}: {} (defaults shown; setting a key rewrites it)",
            CONFIG_FILENAME, e
        )));
        LibrisConfig::default()
    });

    match action {
        ConfigAction::ShowAll => Ok(result.with_config(config)),
        ConfigAction::ShowKey(key) => {
            match config.get(&key) {
                Some(value) => result.add_message(CmdMessage::info(value)),
                None => {
                    result.add_message(CmdMessage::error(format!("Unknown config key: {}", key)))
                }
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            if let Err(e) = config.set(&key, &value) {
                result.add_message(CmdMessage::error(e.to_string()));
                return Ok(result);
            }
            config.save(&dir)?;
            let shown = config.get(&key).unwrap_or(value);
            result.add_message(CmdMessage::success(format!("{} set to {}", key, shown)));
            Ok(result.with_config(config))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use tempfile::TempDir;

    fn paths(dir: &TempDir) -> LibrisPaths {
        LibrisPaths {
            project: dir.path().to_path_buf(),
            global: None,
        }
    }

    #[test]
    fn show_all_returns_defaults() {
        let dir = TempDir::new().unwrap();
        let result = run(&paths(&dir), Scope::Project, ConfigAction::ShowAll).unwrap();
        assert_eq!(result.config, Some(LibrisConfig::default()));
    }

    #[test]
    fn set_persists_and_show_key_reads_back() {
        let dir = TempDir::new().unwrap();
        let paths = paths(&dir);
        run(
            &paths,
            Scope::Project,
            ConfigAction::Set("cover-size".into(), "320".into()),
        )
        .unwrap();

        let result = run(
            &paths,
            Scope::Project,
            ConfigAction::ShowKey("cover-size".into()),
        )
        .unwrap();
        assert_eq!(result.messages[0].content, "320");
    }

    #[test]
    fn invalid_value_reports_error_without_saving() {
        let dir = TempDir::new().unwrap();
        let result = run(
            &paths(&dir),
            Scope::Project,
            ConfigAction::Set("cover-size".into(), "big".into()),
        )
        .unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Error);
        assert!(!dir.path().join("libris.json").exists());
    }

    #[test]
    fn unknown_key() {
        let dir = TempDir::new().unwrap();
        let result = run(
            &paths(&dir),
            Scope::Project,
            ConfigAction::ShowKey("colour".into()),
        )
        .unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Error);
    }

    #[test]
    fn set_replaces_malformed_config() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("libris.json"), "{ not json").unwrap();

        let result = run(
            &paths(&dir),
            Scope::Project,
            ConfigAction::Set("cover-size".into(), "100".into()),
        )
        .unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
        assert_eq!(result.messages[1].level, MessageLevel::Success);

        let reloaded = LibrisConfig::load(dir.path()).unwrap();
        assert_eq!(reloaded.cover_size, 100);
        assert_eq!(reloaded.image_dir, LibrisConfig::default().image_dir);
    }

    #[test]
    fn show_all_with_malformed_config_shows_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("libris.json"), "{ not json").unwrap();

        let result = run(&paths(&dir), Scope::Project, ConfigAction::ShowAll).unwrap();
        assert_eq!(result.config, Some(LibrisConfig::default()));
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
    }

    #[test]
    fn global_scope_without_dir_fails() {
        let dir = TempDir::new().unwrap();
        assert!(run(&paths(&dir), Scope::Global, ConfigAction::ShowAll).is_err());
    }
}
