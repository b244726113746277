//! # CLI Layer
//!
//! This module is **one possible UI client** for booklist. It is the only place that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! Every invocation loads the list, runs one operation through [`BookListStore`] and
//! redraws: messages first, then the affected page. View state (search, page) comes
//! from the arguments and is gone when the process exits.
//!
//! Books are addressed by their 1-based position in the **full** list, which is what
//! `list` prints even while a search filter is active, or by id.

use super::print::{print_messages, print_page};
use super::setup::{Cli, Commands, ExportKind, SortField};
use booklist::api::{BookListStore, BookSelector, CmdResult, ExportFormat};
use booklist::config::BooklistConfig;
use booklist::error::{BooklistError, Result};
use booklist::model::SortKey;
use booklist::store::fs::FileStore;
use clap::Parser;
use directories::ProjectDirs;
use std::path::PathBuf;

const DATA_DIR_ENV: &str = "BOOKLIST_DATA";

struct AppContext {
    api: BookListStore<FileStore>,
    data_dir: PathBuf,
    verbose: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Add { title, author }) => handle_add(&mut ctx, &title, &author),
        Some(Commands::List { search, page }) => {
            handle_list(&mut ctx, search.as_deref().unwrap_or(""), page)
        }
        Some(Commands::Search { term, page }) => handle_list(&mut ctx, &term, page),
        Some(Commands::Edit {
            book,
            title,
            author,
        }) => handle_edit(&mut ctx, &book, &title, &author),
        Some(Commands::Delete { books }) => handle_delete(&mut ctx, &books),
        Some(Commands::Move { from, to }) => handle_move(&mut ctx, from, to),
        Some(Commands::Sort { by }) => handle_sort(&mut ctx, by),
        Some(Commands::Export { format, output }) => handle_export(&mut ctx, format, output),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        None => handle_list(&mut ctx, "", 1),
    }
}

fn resolve_data_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.data_dir {
        return Ok(dir.clone());
    }
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let proj_dirs = ProjectDirs::from("com", "booklist", "booklist").ok_or_else(|| {
        BooklistError::Store("Could not determine a data directory".to_string())
    })?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = resolve_data_dir(cli)?;
    let config = BooklistConfig::load(&data_dir)?;

    let store = FileStore::new(data_dir.clone()).with_blob_name(&config.blob_name);
    let (api, loaded) = BookListStore::open(store, config.page_size);

    let ctx = AppContext {
        api,
        data_dir,
        verbose: cli.verbose,
    };
    if ctx.verbose {
        println!("Using {}", ctx.api.location());
    }
    print_messages(&loaded.messages, ctx.verbose);
    Ok(ctx)
}

/// Prints the result's messages, then redraws the current page.
fn redraw(ctx: &AppContext, result: &CmdResult) {
    print_messages(&result.messages, ctx.verbose);
    let page = result
        .page
        .clone()
        .unwrap_or_else(|| ctx.api.visible_slice());
    print_page(&page, &ctx.api.view().search_query);
}

fn handle_add(ctx: &mut AppContext, title: &str, author: &str) -> Result<()> {
    let result = ctx.api.create(title, author)?;
    // Show the page the new book landed on.
    let last_page = ctx.api.visible_slice().page_count;
    let mut page = ctx.api.set_page(last_page)?;
    page.messages = result.messages;
    redraw(ctx, &page);
    Ok(())
}

fn handle_list(ctx: &mut AppContext, search: &str, page: usize) -> Result<()> {
    let mut result = ctx.api.set_search_query(search)?;
    if page != 1 {
        let paged = ctx.api.set_page(page)?;
        result.page = paged.page;
    }
    redraw(ctx, &result);
    Ok(())
}

fn handle_edit(ctx: &mut AppContext, book: &str, title: &str, author: &str) -> Result<()> {
    let selector: BookSelector = book.parse()?;
    let id = ctx.api.resolve_one(&selector)?;
    let result = ctx.api.update(&id, title, author)?;
    redraw(ctx, &result);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, books: &[String]) -> Result<()> {
    let selectors = books
        .iter()
        .map(|s| s.parse())
        .collect::<Result<Vec<BookSelector>>>()?;
    // Resolve everything up front so positions refer to the list as printed.
    let ids = ctx.api.resolve(&selectors)?;

    let mut combined = CmdResult::default();
    for id in ids {
        let result = ctx.api.delete(&id)?;
        combined.messages.extend(result.messages);
        combined.affected_books.extend(result.affected_books);
    }
    redraw(ctx, &combined);
    Ok(())
}

fn handle_move(ctx: &mut AppContext, from: usize, to: usize) -> Result<()> {
    let len = ctx.api.books().len();
    for position in [from, to] {
        if position == 0 || position > len {
            return Err(BooklistError::Api(format!("No book at position {}", position)));
        }
    }
    let result = ctx.api.reorder(from - 1, to - 1)?;
    let target_page = (to - 1) / ctx.api.view().page_size + 1;
    let mut page = ctx.api.set_page(target_page)?;
    page.messages = result.messages;
    redraw(ctx, &page);
    Ok(())
}

fn handle_sort(ctx: &mut AppContext, by: SortField) -> Result<()> {
    let key = match by {
        SortField::Title => SortKey::Title,
        SortField::Author => SortKey::Author,
    };
    let result = ctx.api.sort_by(key)?;
    redraw(ctx, &result);
    Ok(())
}

fn handle_export(ctx: &mut AppContext, kind: ExportKind, output: Option<PathBuf>) -> Result<()> {
    let format = match kind {
        ExportKind::Csv => ExportFormat::Csv,
        ExportKind::Pdf => ExportFormat::Pdf,
    };
    let result = ctx.api.export(format, output.as_deref())?;
    print_messages(&result.messages, ctx.verbose);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let mut config = BooklistConfig::load(&ctx.data_dir)?;
    match (key, value) {
        (None, _) => {
            for key in BooklistConfig::keys() {
                println!("{} = {}", key, config.get(key)?);
            }
        }
        (Some(key), None) => println!("{} = {}", key, config.get(&key)?),
        (Some(key), Some(value)) => {
            config.set(&key, &value)?;
            config.save(&ctx.data_dir)?;
            println!("{} = {}", key, config.get(&key)?);
        }
    }
    Ok(())
}
