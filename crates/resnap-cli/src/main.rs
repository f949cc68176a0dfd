mod lookup;
mod service;
mod session;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use resnap_core::{format_caption, Condition, LookupOutcome};
use tracing_subscriber::EnvFilter;

use crate::service::ServiceClient;

#[derive(Debug, Parser)]
#[command(name = "resnap")]
#[command(about = "Estimate the resale price of an item from a description or a photo")]
struct Cli {
    /// Base URL of the lookup service (defaults to `RESNAP_SERVICE_URL`)
    #[arg(long, global = true)]
    service_url: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Look up a price by description
    Search {
        /// What the item is (e.g., "Ikea Gunde chair")
        #[arg(required = true, num_args = 1..)]
        term: Vec<String>,
        /// Item condition (New, Open box, Used, Broken, For parts or not working)
        #[arg(long, short, default_value = "New")]
        condition: Condition,
    },
    /// Identify the item in a photo, then look up its price
    Photo {
        path: PathBuf,
        /// Item condition (New, Open box, Used, Broken, For parts or not working)
        #[arg(long, short, default_value = "New")]
        condition: Condition,
    },
    /// Interactive session with history, a save list, and featured items
    Session {
        /// Starting condition for lookups
        #[arg(long, short, default_value = "New")]
        condition: Condition,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = resnap_core::load_client_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let service_url = cli.service_url.as_deref().unwrap_or(&config.service_url);
    let service = ServiceClient::new(service_url, config.request_timeout_secs)?;

    match cli.command {
        Commands::Search { term, condition } => {
            let term = term.join(" ");
            let outcome = lookup::search_outcome(&service, &term, condition).await?;
            print_outcome(&outcome);
        }
        Commands::Photo { path, condition } => {
            let photo = lookup::read_photo(&path).await?;
            let outcome = lookup::photo_outcome(&service, &photo, condition).await?;
            print_outcome(&outcome);
        }
        Commands::Session { condition } => {
            session::run_session(
                service,
                condition,
                Duration::from_millis(config.showcase_interval_ms),
            )
            .await?;
        }
    }

    Ok(())
}

fn print_outcome(outcome: &LookupOutcome) {
    println!(
        "{}",
        format_caption(&outcome.label, outcome.condition.label(), &outcome.estimate)
    );
    if let Some(thumbnail) = outcome.thumbnail.as_deref() {
        println!("image: {thumbnail}");
    }
}

#[cfg(test)]
mod tests;
