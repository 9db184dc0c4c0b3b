//! Library catalog command-line shell.
//!
//! # Responsibility
//! - Map subcommands onto `library_core` services.
//! - Print DTOs as one-line text or as JSON (`--json`).
//!
//! # Invariants
//! - Configuration is resolved and validated before the database is opened.
//! - Every write command runs through a service, so it is transactional.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use library_core::db::seed::seed_demo_data;
use library_core::{
    init_logging, open_db, AppConfig, AuthorService, BookService, BookWrite, CommentService,
    EntityId, GenreService, SqliteAuthorRepository, SqliteGenreRepository,
};
use log::debug;
use serde::Serialize;
use std::fmt::Display;

#[derive(Debug, Parser)]
#[command(name = "library", version, about = "Library catalog: books, authors, genres, comments")]
struct Cli {
    /// SQLite database file. Overrides LIBRARY_DB_PATH.
    #[arg(long, global = true)]
    db: Option<String>,

    /// Print results as JSON instead of text lines.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Load the demo catalog into an empty database.
    Seed,
    #[command(subcommand)]
    Authors(ListCommand),
    #[command(subcommand)]
    Genres(ListCommand),
    #[command(subcommand)]
    Books(BookCommand),
    #[command(subcommand)]
    Comments(CommentCommand),
}

#[derive(Debug, Subcommand)]
enum ListCommand {
    /// List all entries ordered by id.
    List,
}

#[derive(Debug, Subcommand)]
enum BookCommand {
    List,
    Get { id: EntityId },
    Add(BookArgs),
    Update {
        id: EntityId,
        #[command(flatten)]
        book: BookArgs,
    },
    Delete { id: EntityId },
}

#[derive(Debug, Args)]
struct BookArgs {
    #[arg(long)]
    title: String,
    #[arg(long)]
    author: EntityId,
    /// Genre ids, comma separated or repeated.
    #[arg(long = "genre", value_delimiter = ',', required = true)]
    genres: Vec<EntityId>,
}

impl From<BookArgs> for BookWrite {
    fn from(args: BookArgs) -> Self {
        BookWrite::new(args.title, args.author, args.genres)
    }
}

#[derive(Debug, Subcommand)]
enum CommentCommand {
    /// List comments of one book.
    List {
        #[arg(long)]
        book: EntityId,
    },
    Get { id: EntityId },
    Add {
        #[arg(long)]
        book: EntityId,
        content: String,
    },
    Update { id: EntityId, content: String },
    Delete { id: EntityId },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::from_env().context("invalid environment configuration")?;
    if let Some(path) = cli.db.as_deref() {
        config = config.with_db_path(path).context("invalid --db value")?;
    }
    init_logging(&config.log_level, config.log_dir.as_deref())
        .context("failed to initialize logging")?;
    debug!(
        "event=cli_start module=cli status=ok db_path={}",
        config.db_path.display()
    );

    let mut conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open database `{}`", config.db_path.display()))?;
    let out = Output { json: cli.json };

    match cli.command {
        Commands::Seed => {
            let seeded = seed_demo_data(&mut conn)?;
            println!("{}", if seeded { "seeded" } else { "catalog not empty, skipped" });
        }
        Commands::Authors(ListCommand::List) => {
            let service = AuthorService::new(SqliteAuthorRepository::new(&conn));
            out.list(&service.find_all()?)?;
        }
        Commands::Genres(ListCommand::List) => {
            let service = GenreService::new(SqliteGenreRepository::new(&conn));
            out.list(&service.find_all()?)?;
        }
        Commands::Books(command) => run_books(&mut BookService::new(&mut conn), command, &out)?,
        Commands::Comments(command) => {
            run_comments(&mut CommentService::new(&mut conn), command, &out)?
        }
    }
    Ok(())
}

fn run_books(service: &mut BookService<'_>, command: BookCommand, out: &Output) -> Result<()> {
    match command {
        BookCommand::List => out.list(&service.find_all()?),
        BookCommand::Get { id } => match service.find_by_id(id)? {
            Some(book) => out.one(&book),
            None => anyhow::bail!("book with id {id} not found"),
        },
        BookCommand::Add(args) => out.one(&service.insert(&args.into())?),
        BookCommand::Update { id, book } => out.one(&service.update(id, &book.into())?),
        BookCommand::Delete { id } => {
            service.delete_by_id(id)?;
            println!("deleted book {id}");
            Ok(())
        }
    }
}

fn run_comments(
    service: &mut CommentService<'_>,
    command: CommentCommand,
    out: &Output,
) -> Result<()> {
    match command {
        CommentCommand::List { book } => out.list(&service.find_all_by_book_id(book)?),
        CommentCommand::Get { id } => match service.find_by_id(id)? {
            Some(comment) => out.one(&comment),
            None => anyhow::bail!("comment with id {id} not found"),
        },
        CommentCommand::Add { book, content } => out.one(&service.insert(&content, book)?),
        CommentCommand::Update { id, content } => out.one(&service.update(id, &content)?),
        CommentCommand::Delete { id } => {
            service.delete_by_id(id)?;
            println!("deleted comment {id}");
            Ok(())
        }
    }
}

struct Output {
    json: bool,
}

impl Output {
    fn one<T: Serialize + Display>(&self, item: &T) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(item)?);
        } else {
            println!("{item}");
        }
        Ok(())
    }

    fn list<T: Serialize + Display>(&self, items: &[T]) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(items)?);
        } else {
            for item in items {
                println!("{item}");
            }
        }
        Ok(())
    }
}
