//! # CLI Layer
//!
//! This module is **one possible UI client** for libris, not the application itself.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Reads cover files named on the command line
//! - Handles argument parsing and logging setup
//! - Formats output for human consumption
//!
//! Each `handle_*()` calls one `LibrisApi` method and prints its `CmdResult`.

use super::print::{print_books, print_messages, print_stats};
use super::setup::{Cli, Commands};
use clap::Parser;
use libris::api::{ConfigAction, ExportFormat, LibrisApi};
use libris::error::{LibrisError, Result};
use libris::init::initialize;
use libris::model::{parse_year, BookDraft, BookPatch, Scope, SearchField, SortKey};
use libris::store::fs::FileStore;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

struct AppContext {
    api: LibrisApi<FileStore>,
    scope: Scope,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = init_context(&cli);

    match cli.command {
        Some(Commands::Add {
            title,
            author,
            year,
            genre,
            read,
            cover,
        }) => {
            let draft = BookDraft::new(title, author, year, genre, read);
            handle_add(&mut ctx, draft, cover)
        }
        Some(Commands::List { sort }) => handle_list(&ctx, sort),
        Some(Commands::Edit {
            target,
            title,
            author,
            year,
            genre,
            read,
            cover,
        }) => {
            let patch = BookPatch {
                title,
                author,
                year: year.as_deref().map(parse_year).transpose()?,
                genre,
                read,
            };
            handle_edit(&mut ctx, &target, patch, cover)
        }
        Some(Commands::Search { query, by, sort }) => handle_search(&ctx, &query, by, sort),
        Some(Commands::Remove { title }) => handle_remove(&mut ctx, &title),
        Some(Commands::Stats) => handle_stats(&ctx),
        Some(Commands::Export { format, output }) => handle_export(&ctx, format, output),
        Some(Commands::Cover { title }) => handle_cover(&ctx, &title),
        Some(Commands::Doctor { fix }) => handle_doctor(&mut ctx, fix),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        Some(Commands::Init) => handle_init(&ctx),
        None => handle_list(&ctx, SortKey::default()),
    }
}

/// Logs go to stderr so they never mix with command output.
fn init_logging(verbose: bool) {
    let default = if verbose { "warn,libris=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .try_init();
}

fn init_context(cli: &Cli) -> AppContext {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let ctx = initialize(&cwd, cli.global);

    AppContext {
        api: ctx.api,
        scope: ctx.scope,
    }
}

fn read_cover(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| {
        LibrisError::validation(format!("Cannot read cover {}: {}", path.display(), e))
    })
}

fn handle_add(ctx: &mut AppContext, draft: BookDraft, cover: Option<PathBuf>) -> Result<()> {
    let upload = cover.as_deref().map(read_cover).transpose()?;
    let result = ctx.api.add_book(ctx.scope, &draft, upload.as_deref())?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &AppContext, sort: SortKey) -> Result<()> {
    let result = ctx.api.list_books(ctx.scope, sort)?;
    print_books(&result.listed_books);
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(
    ctx: &mut AppContext,
    target: &str,
    patch: BookPatch,
    cover: Option<PathBuf>,
) -> Result<()> {
    let upload = cover.as_deref().map(read_cover).transpose()?;
    let result = ctx
        .api
        .edit_book(ctx.scope, target, &patch, upload.as_deref())?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_search(
    ctx: &AppContext,
    query: &str,
    by: SearchField,
    sort: Option<SortKey>,
) -> Result<()> {
    let result = ctx.api.search_books(ctx.scope, by, query, sort)?;
    if !result.listed_books.is_empty() {
        print_books(&result.listed_books);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_remove(ctx: &mut AppContext, title: &str) -> Result<()> {
    let result = ctx.api.remove_book(ctx.scope, title)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_stats(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.stats(ctx.scope)?;
    if let Some(stats) = &result.stats {
        print_stats(stats);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_export(ctx: &AppContext, format: ExportFormat, output: Option<PathBuf>) -> Result<()> {
    let result = ctx.api.export(ctx.scope, format, output)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_cover(ctx: &AppContext, title: &str) -> Result<()> {
    let result = ctx.api.cover(ctx.scope, title)?;
    if let Some(cover) = &result.cover {
        if cover.is_placeholder() {
            tracing::warn!("No cover file for {:?}, showing placeholder", title);
        }
        println!("{}", cover.data_uri());
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_doctor(ctx: &mut AppContext, fix: bool) -> Result<()> {
    let result = ctx.api.doctor(ctx.scope, fix)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let show_all = key.is_none();
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = ctx.api.config(ctx.scope, action)?;
    if show_all {
        if let Some(config) = &result.config {
            for (k, v) in config.entries() {
                println!("{} = {}", k, v);
            }
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_init(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.init(ctx.scope)?;
    print_messages(&result.messages);
    Ok(())
}
