//! Main application entry point

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use lvi_app::cli::Args;
use lvi_app::{create_sample_database, Session, DEFAULT_SAMPLE_BRANDS};

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    if let Some(path) = &args.sample {
        create_sample_database(path, DEFAULT_SAMPLE_BRANDS)
            .with_context(|| format!("Failed to create sample database at {}", path.display()))?;
        return Ok(());
    }

    let config = args.load_config()?;

    info!("Starting {}", config.title);
    let session = Session::from_config(&config)?;
    let pages = session.render_all();

    let output = json!({
        "title": session.title(),
        "views": session.router().view_names().collect::<Vec<_>>(),
        "pages": pages,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
