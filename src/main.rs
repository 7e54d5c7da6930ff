use color_eyre::eyre::Result;
use std::io::IsTerminal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use filedeck_config::Settings;
use filedeck_core::ListingService;

mod cli;
mod render;
use cli::{Cli, USAGE};

#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: jemallocator::Jemalloc = jemallocator::Jemalloc;

#[cfg(windows)]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<()> {
    // Install error hooks
    color_eyre::install()?;

    setup_logging();

    let cli = Cli::parse(std::env::args().skip(1))?;
    if cli.help {
        println!("{USAGE}");
        return Ok(());
    }

    if let Err(e) = run(cli).await {
        error!("filedeck error: {}", e);
        return Err(e);
    }

    Ok(())
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("filedeck=info,warn"));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .with_thread_ids(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let settings = match &cli.config {
        Some(path) => Settings::load_from(path).await?,
        None => Settings::load().await?,
    };
    settings.validate()?;
    info!("Storage root: {}", settings.storage_root.display());

    let service = ListingService::new(&settings);

    match cli.path.as_deref() {
        None => {
            let listing = service.list_root().await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&listing)?);
            } else {
                print!("{}", render::render_tree(&listing.entries));
                println!("{}", render::render_stats(&listing.stats));
            }
        }
        Some(path) => {
            let listing = service.get_folder(path).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&listing)?);
            } else {
                println!("{}/", listing.folder.name());
                print!("{}", render::render_tree(listing.folder.children()));
                println!("{}", render::render_stats(&listing.stats));
            }
        }
    }

    Ok(())
}
