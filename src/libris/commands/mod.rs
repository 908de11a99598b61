use crate::config::LibrisConfig;
use crate::covers::DisplayCover;
use crate::error::{LibrisError, Result};
use crate::model::{Book, Scope};
use crate::stats::LibraryStats;
use std::path::PathBuf;

pub mod add;
pub mod config;
pub mod cover;
pub mod doctor;
pub mod edit;
pub mod export;
pub mod init;
pub mod list;
pub mod remove;
pub mod search;
pub mod stats;

/// Library roots per scope.
#[derive(Debug, Clone)]
pub struct LibrisPaths {
    pub project: PathBuf,
    pub global: Option<PathBuf>,
}

impl LibrisPaths {
    pub fn scope_dir(&self, scope: Scope) -> Result<PathBuf> {
        match scope {
            Scope::Project => Ok(self.project.clone()),
            Scope::Global => self.global.clone().ok_or_else(|| {
                LibrisError::Store("Global scope is not available (no data directory)".into())
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_books: Vec<Book>,
    pub listed_books: Vec<Book>,
    pub stats: Option<LibraryStats>,
    pub cover: Option<DisplayCover>,
    pub exported_path: Option<PathBuf>,
    pub config: Option<LibrisConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_books(mut self, books: Vec<Book>) -> Self {
        self.affected_books = books;
        self
    }

    pub fn with_listed_books(mut self, books: Vec<Book>) -> Self {
        self.listed_books = books;
        self
    }

    pub fn with_stats(mut self, stats: LibraryStats) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_cover(mut self, cover: DisplayCover) -> Self {
        self.cover = Some(cover);
        self
    }

    pub fn with_exported_path(mut self, path: PathBuf) -> Self {
        self.exported_path = Some(path);
        self
    }

    pub fn with_config(mut self, config: LibrisConfig) -> Self {
        self.config = Some(config);
        self
    }
}
