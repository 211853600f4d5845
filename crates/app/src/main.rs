//! Waypost - Main Entry Point
//!
//! Command-line front end for the collection interchange engine.

mod cli;
mod commands;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use waypost_application::ImportConfig;

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<(), commands::CommandError> {
    // Logs go to stderr so command output can be piped
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = ImportConfig::default()
        .with_max_file_size(cli.max_file_size)
        .with_schema_depth_limit(cli.schema_depth_limit);

    match cli.command {
        Commands::Detect { input } => {
            let format = commands::detect(&input, config).await?;
            println!("{format}");
        }
        Commands::Import { input } => {
            let output = commands::import(&input, config).await?;
            println!("{}", commands::summary(&output));
        }
        Commands::Convert { input, output } => {
            let imported = commands::convert(&input, &output, config).await?;
            println!(
                "Wrote {} ({} requests) to {}",
                imported.collection.name,
                imported.collection.request_count(),
                output.display()
            );
        }
        Commands::Formats => print!("{}", commands::formats()),
    }

    Ok(())
}
