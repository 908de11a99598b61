//! # Libris Architecture
//!
//! Libris is a **UI-agnostic book-collection library**. The command-line client is one
//! way of driving it; the same core could sit behind a web form or a desktop app.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Resolves the library root and cover directory per scope  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One module per user action: load, mutate, save           │
//! │  - Returns `CmdResult`, never prints                        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (store/, covers.rs, query.rs, stats.rs, export.rs)    │
//! │  - DataStore trait: FileStore (JSON), InMemoryStore (tests) │
//! │  - Collection: the in-memory records and CRUD primitives    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Persistence Model
//!
//! The whole collection lives in one JSON array. Every action reloads it, and every
//! mutation rewrites it in full (temp file + rename). There is no locking: the last
//! save wins. Titles are the lookup key, so two books with the same title are
//! indistinguishable to `edit` and `remove`.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each user action
//! - [`store`]: Storage abstraction, implementations and the [`store::Collection`]
//! - [`covers`]: Cover image storage and inline embedding
//! - [`query`]: Sorting and searching over a collection
//! - [`stats`]: Aggregate reading statistics
//! - [`export`]: CSV, JSON and archive exports
//! - [`model`]: Core data types (`Book`, `BookDraft`, `BookPatch`, `Scope`)
//! - [`config`]: Per-library configuration
//! - [`init`]: Context setup (scope roots, config, file-backed API)
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod covers;
pub mod error;
pub mod export;
pub mod init;
pub mod model;
pub mod query;
pub mod stats;
pub mod store;
