use crate::commands::{CmdMessage, CmdResult, LibrisPaths};
use crate::config::{LibrisConfig, CONFIG_FILENAME};
use crate::error::Result;
use crate::model::Scope;
use std::fs;

/// Creates the library root with its data and cover directories, and writes a
/// default config file if there is none yet.
pub fn run(paths: &LibrisPaths, scope: Scope) -> Result<CmdResult> {
    let dir = paths.scope_dir(scope)?;
    let config = LibrisConfig::load(&dir)?;

    fs::create_dir_all(dir.join(&config.data_dir))?;
    fs::create_dir_all(dir.join(&config.image_dir))?;
    if !dir.join(CONFIG_FILENAME).exists() {
        config.save(&dir)?;
    }

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Initialized libris library at {}",
        dir.display()
    )));
    Ok(result)
}
