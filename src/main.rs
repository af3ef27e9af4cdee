use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use quakemap::feed::build_client;
use quakemap::html_template::render_page;
use quakemap::server::{start_server, AppState};
use quakemap::utils::{local_url, open_in_browser};
use quakemap::{load_map, FeedType, Settings};

#[derive(Parser)]
#[command(name = "quakemap")]
#[command(author, version, long_about = None)]
#[command(about = "Plot the USGS earthquake feed on an interactive map")]
struct Cli {
    /// Settings file (defaults to quakemap.ini next to the executable)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// USGS summary feed, e.g. all_day, 4.5_week
    #[arg(long, global = true, conflicts_with = "url")]
    feed: Option<FeedType>,

    /// Explicit GeoJSON feed URL
    #[arg(long, global = true)]
    url: Option<String>,

    /// Open the map in a browser when ready
    #[arg(long, global = true)]
    open: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the map over HTTP (default)
    Serve {
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Write the map to a standalone HTML file
    Write {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "info,quakemap=debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };
    if let Some(feed) = cli.feed {
        settings.feed_url = feed.url();
    }
    if let Some(url) = &cli.url {
        settings.feed_url = url.clone();
    }

    let command = cli.command.unwrap_or(Commands::Serve { port: None });
    match &command {
        Commands::Serve { port: Some(port) } => settings.port = *port,
        Commands::Write { output: Some(output) } => {
            settings.output_path = output.to_string_lossy().to_string()
        }
        _ => {}
    }
    let open = cli.open || settings.auto_open_browser;

    let client = build_client(Duration::from_secs(settings.request_timeout_secs))?;
    let rendered = load_map(&client, &settings)
        .await
        .context("Failed to load earthquake feed")?;
    let page = render_page(&rendered.map)?;

    match command {
        Commands::Write { .. } => {
            let output = PathBuf::from(&settings.output_path);
            if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Creating {}", parent.display()))?;
            }
            tokio::fs::write(&output, page)
                .await
                .with_context(|| format!("Failed to write {}", output.display()))?;
            tracing::info!(
                "Wrote map with {} markers to {}",
                rendered.summary.markers_added,
                output.display()
            );

            if open {
                open_in_browser(&output.to_string_lossy())?;
            }
        }
        Commands::Serve { .. } => {
            let port = settings.port;
            if open {
                let url = local_url(port);
                tokio::spawn(async move {
                    tokio::time::sleep(Duration::from_millis(500)).await;
                    if let Err(e) = open_in_browser(&url) {
                        tracing::warn!("{:#}", e);
                    }
                });
            }
            start_server(AppState::new(rendered, page), port).await?;
        }
    }

    Ok(())
}
