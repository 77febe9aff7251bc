//! bookshelf - manage a personal reading list from the terminal.
//!
//! # Responsibility
//! - Translate subcommands into `bookshelf_core` shelf operations.
//! - Print the shelf after every command, grouped by reading status.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use bookshelf_core::{
    delete_confirmation_prompt, init_logging, render_text, BookId, Bookshelf, Change, FormValues,
    LocalStorage, ShelfConfig, ShelfEvent, ShelfObserver, SqliteStorage, Submission,
};
use clap::{Parser, Subcommand};
use log::debug;

#[derive(Parser)]
#[command(name = "bookshelf")]
#[command(version = bookshelf_core::core_version())]
#[command(about = "Personal bookshelf manager", long_about = None)]
#[command(after_help = "EXAMPLES:
    bookshelf add --title Dune --author Herbert --year 1965
    bookshelf complete 1700000000000
    bookshelf list --search time")]
struct Cli {
    /// Storage database file (overrides BOOKSHELF_DB_PATH)
    #[arg(long, value_name = "PATH", global = true)]
    db: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error (overrides BOOKSHELF_LOG_LEVEL)
    #[arg(long, value_name = "LEVEL", global = true)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files (overrides BOOKSHELF_LOG_DIR)
    #[arg(long, value_name = "DIR", global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the shelf, optionally filtered by title
    List {
        /// Case-insensitive title fragment
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Add a new book
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
        #[arg(long, allow_hyphen_values = true)]
        year: String,
        /// Put the book straight into the finished group
        #[arg(long)]
        complete: bool,
    },
    /// Mark a book as read
    Complete { id: BookId },
    /// Move a book back to "not yet read"
    Undo { id: BookId },
    /// Delete a book
    Delete {
        id: BookId,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Edit the fields of an existing book
    Edit {
        id: BookId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        author: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        year: Option<String>,
        #[arg(long, conflicts_with = "incomplete")]
        complete: bool,
        #[arg(long)]
        incomplete: bool,
    },
}

/// Surfaces alerts and edit focus on the terminal.
struct TerminalObserver;

impl ShelfObserver for TerminalObserver {
    fn notify(&mut self, event: &ShelfEvent<'_>) {
        match event {
            ShelfEvent::Alert { message } => eprintln!("! {message}"),
            ShelfEvent::EditStarted { book_id, form } => {
                eprintln!("Editing [{book_id}] \"{}\"", form.title);
            }
            ShelfEvent::Saved { payload } => {
                debug!("event=data_saved module=cli status=ok bytes={}", payload.len());
            }
            ShelfEvent::RenderRequested(_) => {}
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let config = ShelfConfig::from_env()
        .with_db_path(cli.db)
        .with_log_level(cli.log_level)
        .with_log_dir(cli.log_dir);

    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, log_dir).map_err(|e| e.to_string())?;
    }

    let storage = SqliteStorage::open(&config.db_path)
        .map_err(|e| format!("cannot open {}: {e}", config.db_path.display()))?;
    let mut shelf = Bookshelf::new(storage);
    shelf.subscribe(TerminalObserver);
    shelf.load().map_err(|e| e.to_string())?;

    let filter = execute(&mut shelf, cli.command)?;
    let view = shelf.render(filter.as_deref());
    print!("{}", render_text(&view));
    Ok(())
}

/// Runs one command; returns the title filter to render with.
fn execute<S: LocalStorage>(
    shelf: &mut Bookshelf<S>,
    command: Command,
) -> Result<Option<String>, String> {
    match command {
        Command::List { search } => return Ok(search),
        Command::Add {
            title,
            author,
            year,
            complete,
        } => {
            shelf
                .form_mut()
                .set_values(FormValues::new(title, author, year, complete));
            if let Submission::Added(id) = shelf.submit().map_err(|e| e.to_string())? {
                println!("Added book {id}.");
            }
        }
        Command::Complete { id } => {
            report(id, shelf.mark_complete(id).map_err(|e| e.to_string())?, "Marked as read");
        }
        Command::Undo { id } => {
            report(id, shelf.mark_incomplete(id).map_err(|e| e.to_string())?, "Marked as unread");
        }
        Command::Delete { id, yes } => {
            let Some(book) = shelf.find_book(id) else {
                report(id, Change::NotFound, "");
                return Ok(None);
            };
            let prompt = delete_confirmation_prompt(book);
            if !yes && !confirm(&prompt) {
                println!("Kept book {id}.");
                return Ok(None);
            }
            report(id, shelf.remove_book(id).map_err(|e| e.to_string())?, "Deleted");
        }
        Command::Edit {
            id,
            title,
            author,
            year,
            complete,
            incomplete,
        } => {
            if shelf.begin_edit(id) == Change::NotFound {
                report(id, Change::NotFound, "");
                return Ok(None);
            }
            let values = shelf.form_mut().values_mut();
            if let Some(title) = title {
                values.title = title;
            }
            if let Some(author) = author {
                values.author = author;
            }
            if let Some(year) = year {
                values.year = year;
            }
            if complete {
                values.is_complete = true;
            } else if incomplete {
                values.is_complete = false;
            }
            if let Submission::Updated(id) = shelf.submit().map_err(|e| e.to_string())? {
                println!("Updated book {id}.");
            }
        }
    }
    Ok(None)
}

fn report(id: BookId, change: Change, done: &str) {
    match change {
        Change::Applied => println!("{done} book {id}."),
        Change::NotFound => eprintln!("No book with id {id}; nothing changed."),
    }
}

fn confirm(prompt: &str) -> bool {
    print!("{prompt} [y/N] ");
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::{execute, Cli, Command};
    use bookshelf_core::{core_version, Bookshelf, FormValues, MemoryStorage};
    use clap::CommandFactory;

    #[test]
    fn version_flag_reports_core_version() {
        assert_eq!(Cli::command().get_version(), Some(core_version()));
    }

    #[test]
    fn list_passes_search_through_unchanged() {
        let mut shelf = Bookshelf::new(MemoryStorage::new());
        shelf
            .add_book(&FormValues::new("Dune", "Herbert", "1965", false))
            .unwrap();
        shelf
            .add_book(&FormValues::new("The   Gap", "Anon", "2000", false))
            .unwrap();

        let filter = execute(
            &mut shelf,
            Command::List {
                search: Some("   ".to_string()),
            },
        )
        .unwrap();
        assert_eq!(filter.as_deref(), Some("   "));

        let view = shelf.render(filter.as_deref());
        assert_eq!(view.len(), 1);
        assert_eq!(view.incomplete[0].title, "The   Gap");
    }
}
