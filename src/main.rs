use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use daylist::{api, db, seed};

#[derive(Parser)]
#[command(name = "daylist")]
#[command(about = "Self-hosted personal task management server")]
struct Cli {
    /// Database file path. Defaults to the platform data directory.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the daylist server
    Serve {
        /// Port for HTTP API
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
    /// Populate the database with sample data
    Seed,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "daylist=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn open_store(path: Option<PathBuf>) -> anyhow::Result<db::Store> {
    let store = match path {
        Some(path) => db::Store::open(path)?,
        None => db::Store::open_default()?,
    };
    store.migrate()?;
    Ok(store)
}

async fn serve(store: db::Store, port: u16) -> anyhow::Result<()> {
    store.ensure_default_list()?;
    let app = api::create_router(store);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    tracing::info!("daylist listening on http://127.0.0.1:{}", port);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let store = open_store(cli.db)?;

    match cli.command {
        Some(Commands::Serve { port }) => serve(store, port).await?,
        Some(Commands::Seed) => {
            store.ensure_default_list()?;
            seed::seed(&store)?;
        }
        None => serve(store, 3000).await?,
    }

    Ok(())
}
