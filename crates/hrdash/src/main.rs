//! `hrdash` - CLI for the HR dashboard
//!
//! This binary lists and searches employees, manages bookmarks and prints
//! department analytics.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::PathBuf;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use hrdash::cli::{BookmarkCommand, Cli, Command, ConfigCommand};
use hrdash::{
    init_logging, BookmarkStore, Config, Dashboard, FileProvider, HttpProvider, RecordProvider,
    SqliteStore,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    let config_path = cli.config.clone();
    let source = cli.command.source().cloned();
    let open = move || open_dashboard(config_path, source);

    let output = match cli.command {
        // Configuration commands must work even when the file is broken
        Command::Config(config_cmd) => return handle_config(cli.config, config_cmd),
        Command::List(cmd) => {
            let (_, dashboard) = open()?;
            dashboard
                .list(&cmd.filter(), cmd.page, cmd.page_size, cmd.format)
                .await?
        }
        Command::Show(cmd) => {
            let (_, dashboard) = open()?;
            dashboard.show(cmd.id, cmd.format).await?
        }
        Command::Bookmark(BookmarkCommand::Toggle { id }) => {
            let (_, mut dashboard) = open()?;
            dashboard.toggle_bookmark(id)
        }
        Command::Bookmark(BookmarkCommand::List { format, .. }) => {
            let (_, dashboard) = open()?;
            dashboard.bookmarked(format).await?
        }
        Command::Analytics(cmd) => {
            let (config, dashboard) = open()?;
            let mut rng = seeded_rng(config.provider.seed);
            dashboard
                .analytics(cmd.sort.into(), cmd.format, &mut rng)
                .await?
        }
    };

    println!("{}", output.trim_end());
    Ok(())
}

type Session = (Config, Dashboard<SqliteStore>);

/// Load configuration, pick the record provider and open the bookmark store.
fn open_dashboard(
    config_path: Option<PathBuf>,
    source: Option<PathBuf>,
) -> Result<Session, Box<dyn std::error::Error>> {
    let config = Config::load_from(config_path)?;
    let provider = build_provider(&config, source)?;
    let store = SqliteStore::open(config.database_path())?;
    let bookmarks = BookmarkStore::load_with_key(store, config.storage.bookmarks_key.clone());
    let dashboard = Dashboard::new(provider, bookmarks, config.display.page_size);
    Ok((config, dashboard))
}

/// `--source` wins over `provider.source_file`; without either, use the API.
fn build_provider(
    config: &Config,
    source: Option<PathBuf>,
) -> Result<Box<dyn RecordProvider>, Box<dyn std::error::Error>> {
    if let Some(path) = source.or_else(|| config.provider.source_file.clone()) {
        debug!("Using file provider: {}", path.display());
        Ok(Box::new(FileProvider::new(path, config.provider.seed)))
    } else {
        debug!("Using HTTP provider: {}", config.provider.base_url);
        Ok(Box::new(HttpProvider::new(&config.provider)?))
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64)
}

fn handle_config(
    config_path: Option<PathBuf>,
    cmd: ConfigCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = Config::load_from(config_path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Provider]");
                match &config.provider.source_file {
                    Some(path) => println!("  Source file:        {}", path.display()),
                    None => println!("  Base URL:           {}", config.provider.base_url),
                }
                println!("  Limit:              {}", config.provider.limit);
                println!("  Timeout (secs):     {}", config.provider.timeout_secs);
                match config.provider.seed {
                    Some(seed) => println!("  Seed:               {seed}"),
                    None => println!("  Seed:               random"),
                }
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!("  Bookmarks key:      {}", config.storage.bookmarks_key);
                println!();
                println!("[Display]");
                println!("  Page size:          {}", config.display.page_size);
            }
        }
        ConfigCommand::Path => {
            println!(
                "{}",
                config_path
                    .unwrap_or_else(Config::default_config_path)
                    .display()
            );
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or(config_path)
                .unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
