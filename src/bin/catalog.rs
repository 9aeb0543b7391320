//! Catalog CLI
//!
//! Runs the catalog controller against a file-backed store and prints the
//! resulting markup to stdout.
//!
//! ```text
//! catalog list --query lamp
//! catalog show 3
//! catalog delete 3 --yes
//! catalog reset
//! ```

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use catalog_browser::{
    AppEvent, CatalogApp, CatalogConfig, CatalogResult, FileSeedSource, FileStore, Host,
    HttpSeedSource, Route, Screen, SeedSource,
};

#[derive(Parser, Debug)]
#[command(name = "catalog", about = "Browse and edit the product catalog")]
struct Cli {
    /// YAML configuration file
    #[arg(long, env = "CATALOG_CONFIG")]
    config: Option<PathBuf>,

    /// Directory holding the persisted collection
    #[arg(long, env = "CATALOG_DATA_DIR", default_value = ".catalog")]
    data_dir: PathBuf,

    /// Seed resource: http(s) URL or local JSON file (defaults to the config's seed_url)
    #[arg(long, env = "CATALOG_SEED")]
    seed: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the product list
    List {
        /// Free-text filter
        #[arg(short, long)]
        query: Option<String>,
    },
    /// Render one product
    Show { id: String },
    /// Delete a product
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Forget the stored collection; the next run re-seeds
    Reset,
}

/// Terminal host: prompts on stderr, keeps the last screen for printing.
struct TerminalHost {
    assume_yes: bool,
    screen: Option<Screen>,
}

impl Host for TerminalHost {
    fn confirm(&mut self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        eprint!("{} [y/N] ", message);
        let _ = std::io::stderr().flush();
        let mut answer = String::new();
        if std::io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }

    fn notify(&mut self, message: &str) {
        eprintln!("{}", message);
    }

    fn set_fragment(&mut self, fragment: &str) {
        tracing::debug!(fragment, "Route changed");
    }

    fn show(&mut self, screen: &Screen) {
        self.screen = Some(screen.clone());
    }
}

fn load_config(path: Option<&PathBuf>) -> CatalogResult<CatalogConfig> {
    match path {
        Some(path) => Ok(CatalogConfig::from_file(path)?),
        None => Ok(CatalogConfig::default()),
    }
}

/// Forget the stored collection so the next run re-seeds.
fn reset(app: &mut CatalogApp<FileStore>) -> anyhow::Result<()> {
    app.store_mut()
        .clear()
        .context("failed to clear stored products")
}

fn seed_source(location: &str) -> anyhow::Result<Box<dyn SeedSource>> {
    if location.starts_with("http://") || location.starts_with("https://") {
        let source = HttpSeedSource::new(location)
            .with_context(|| format!("invalid seed URL {}", location))?;
        Ok(Box::new(source))
    } else {
        Ok(Box::new(FileSeedSource::new(location)))
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_browser=info,catalog=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref()).context("failed to load configuration")?;
    let mut app = CatalogApp::new(config, FileStore::new(&cli.data_dir));

    if let Command::Reset = cli.command {
        reset(&mut app)?;
        tracing::info!(dir = %cli.data_dir.display(), "Stored products cleared");
        return Ok(());
    }

    let seed_location = cli
        .seed
        .clone()
        .unwrap_or_else(|| app.config().seed_url.clone());
    let seed = seed_source(&seed_location)?;

    let mut host = TerminalHost {
        assume_yes: false,
        screen: None,
    };

    let initial = match &cli.command {
        Command::Show { id } => Route::detail(id.clone()).fragment(),
        _ => String::new(),
    };
    app.start(seed.as_ref(), &initial, &mut host).await;

    match cli.command {
        Command::List { query: Some(query) } => {
            app.handle(AppEvent::QueryChanged(query), &mut host);
        }
        Command::Delete { id, yes } => {
            host.assume_yes = yes;
            app.handle(AppEvent::DeleteRequested(id), &mut host);
        }
        _ => {}
    }

    if let Some(screen) = &host.screen {
        print!("{}", screen.to_html());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_browser::{Origin, Product, StaticSeed};

    fn quiet_host() -> TerminalHost {
        TerminalHost {
            assume_yes: true,
            screen: None,
        }
    }

    #[test]
    fn test_seed_source_picks_http_for_urls() {
        let seed = seed_source("https://shop.example.com/products.json").unwrap();
        assert_eq!(seed.location(), "https://shop.example.com/products.json");

        let seed = seed_source("http://localhost:8080/products.json").unwrap();
        assert_eq!(seed.location(), "http://localhost:8080/products.json");
    }

    #[test]
    fn test_seed_source_treats_other_locations_as_files() {
        let seed = seed_source("data/products.json").unwrap();
        assert_eq!(seed.location(), "data/products.json");

        // no scheme match, so not parsed as a URL
        let seed = seed_source("ftp.example.com/products.json").unwrap();
        assert_eq!(seed.location(), "ftp.example.com/products.json");
    }

    #[test]
    fn test_seed_source_rejects_malformed_url() {
        assert!(seed_source("http://").is_err());
    }

    #[tokio::test]
    async fn test_reset_forces_reseed() {
        let dir = tempfile::tempdir().unwrap();
        let products = vec![Product::new("1", "Lamp", "Desk lamp", 25.0, "lamp.png")];

        let mut app = CatalogApp::new(CatalogConfig::default(), FileStore::new(dir.path()));
        let origin = app
            .start(&StaticSeed::products(&products), "", &mut quiet_host())
            .await;
        assert_eq!(origin, Origin::Seeded);
        assert!(app.store().load().is_some());

        reset(&mut app).unwrap();
        assert!(app.store().load().is_none());
        // resetting twice is fine
        reset(&mut app).unwrap();

        let seed = StaticSeed::products(&products);
        let mut next = CatalogApp::new(CatalogConfig::default(), FileStore::new(dir.path()));
        assert_eq!(next.start(&seed, "", &mut quiet_host()).await, Origin::Seeded);
        assert_eq!(seed.fetch_count(), 1);
    }
}
