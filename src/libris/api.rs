//! # API Facade
//!
//! The API layer is a thin facade over the command layer and the single entry
//! point for every libris operation, whatever the UI.
//!
//! The facade:
//! - **Dispatches** to the matching `commands::*::run`
//! - **Resolves context**: the cover store and export paths for the active scope
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no printing and holds no business rules; those live in `commands/`.
//!
//! `LibrisApi<S: DataStore>` is generic over the storage backend: `FileStore` in
//! production, `InMemoryStore` in tests.

use crate::commands;
use crate::config::LibrisConfig;
use crate::covers::CoverStore;
use crate::error::Result;
use crate::model::{BookDraft, BookPatch, Scope, SearchField, SortKey};
use crate::store::DataStore;
use chrono::Local;
use std::path::PathBuf;

pub struct LibrisApi<S: DataStore> {
    store: S,
    paths: commands::LibrisPaths,
    config: LibrisConfig,
}

impl<S: DataStore> LibrisApi<S> {
    pub fn new(store: S, paths: commands::LibrisPaths, config: LibrisConfig) -> Self {
        Self {
            store,
            paths,
            config,
        }
    }

    pub fn add_book(
        &mut self,
        scope: Scope,
        draft: &BookDraft,
        cover: Option<&[u8]>,
    ) -> Result<commands::CmdResult> {
        let covers = self.covers(scope)?;
        commands::add::run(&mut self.store, &covers, scope, draft, cover)
    }

    pub fn list_books(&self, scope: Scope, sort: SortKey) -> Result<commands::CmdResult> {
        commands::list::run(&self.store, scope, sort)
    }

    pub fn edit_book(
        &mut self,
        scope: Scope,
        title: &str,
        patch: &BookPatch,
        cover: Option<&[u8]>,
    ) -> Result<commands::CmdResult> {
        let covers = self.covers(scope)?;
        commands::edit::run(&mut self.store, &covers, scope, title, patch, cover)
    }

    pub fn search_books(
        &self,
        scope: Scope,
        field: SearchField,
        query: &str,
        sort: Option<SortKey>,
    ) -> Result<commands::CmdResult> {
        commands::search::run(&self.store, scope, field, query, sort)
    }

    pub fn remove_book(&mut self, scope: Scope, title: &str) -> Result<commands::CmdResult> {
        commands::remove::run(&mut self.store, scope, title)
    }

    pub fn stats(&self, scope: Scope) -> Result<commands::CmdResult> {
        commands::stats::run(&self.store, scope)
    }

    /// Exports to `output`, or to a default file name in the current directory.
    pub fn export(
        &self,
        scope: Scope,
        format: ExportFormat,
        output: Option<PathBuf>,
    ) -> Result<commands::CmdResult> {
        let covers = self.covers(scope)?;
        let output = output.unwrap_or_else(|| {
            self.paths
                .project
                .join(commands::export::default_filename(format, Local::now()))
        });
        commands::export::run(&self.store, &covers, scope, format, &output)
    }

    pub fn cover(&self, scope: Scope, title: &str) -> Result<commands::CmdResult> {
        let covers = self.covers(scope)?;
        commands::cover::run(&self.store, &covers, scope, title)
    }

    pub fn doctor(&mut self, scope: Scope, fix: bool) -> Result<commands::CmdResult> {
        let covers = self.covers(scope)?;
        commands::doctor::run(&mut self.store, &covers, scope, fix)
    }

    pub fn config(&self, scope: Scope, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths, scope, action)
    }

    pub fn init(&self, scope: Scope) -> Result<commands::CmdResult> {
        commands::init::run(&self.paths, scope)
    }

    pub fn paths(&self) -> &commands::LibrisPaths {
        &self.paths
    }

    fn covers(&self, scope: Scope) -> Result<CoverStore> {
        let root = self.paths.scope_dir(scope)?;
        Ok(CoverStore::new(root, &self.config))
    }
}

pub use crate::commands::config::ConfigAction;
pub use crate::export::ExportFormat;
pub use commands::{CmdMessage, CmdResult, LibrisPaths, MessageLevel};
