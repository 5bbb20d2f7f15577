/// Cadence - terminal playback driver
use cadence_cli::{config::CliConfig, driver};
use cadence_core::Catalog;
use cadence_playback::PlaybackSession;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cadence")]
#[command(about = "Drive a Cadence playback session from the terminal", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./cadence.toml when present)
    #[arg(short, long, global = true, env = "CADENCE_CONFIG_FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start playback and read commands from stdin
    Run {
        /// Catalog file (JSON array of tracks); a demo catalog is used otherwise
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Index of the first track to play
        #[arg(short, long, default_value_t = 0)]
        start: usize,
    },
    /// Validate a catalog file and print its tracks
    Catalog {
        /// Catalog file path
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::load(cli.config.as_deref())?;
    config.validate()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Run { catalog, start } => {
            run(&config, catalog, start).await?;
        }
        Commands::Catalog { path } => {
            let catalog = Catalog::load(&path)?;
            print!("{}", driver::catalog_summary(&catalog));
        }
    }

    Ok(())
}

async fn run(config: &CliConfig, catalog: Option<PathBuf>, start: usize) -> anyhow::Result<()> {
    let catalog = match catalog {
        Some(path) => Catalog::load(&path)?,
        None => driver::demo_catalog()?,
    };
    tracing::info!("Catalog loaded: {} tracks", catalog.len());

    let session = PlaybackSession::new(config.playback.clone())?;
    let event_log = driver::spawn_event_log(session.events());

    let driver = driver::Driver::new(session, catalog);
    driver.start(start)?;
    tracing::info!("Type `help` for commands");

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    driver.run(stdin, &mut stdout).await?;

    // Dropping the session closes the event stream
    drop(driver);
    event_log.await?;

    tracing::info!("Bye");
    Ok(())
}
