use anyhow::Result;
use clap::{Parser, Subcommand};
use job_market::analysis::{aggregate_jobs, NerClassifier};
use job_market::environment::{AppConfig, Secrets};
use job_market::export::write_csv;
use job_market::itjobs::ItJobsClient;
use job_market::start_web_server;
use std::path::PathBuf;
use tracing::warn;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

#[derive(Parser)]
#[command(name = "jobscope")]
#[command(about = "Analyze Portugal's IT job market from the itjobs.pt API")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the dashboard and JSON API server
    Serve {
        #[arg(long, default_value_t = 8000)]
        port: u16,
    },
    /// List the available location filters
    Locations,
    /// Fetch, aggregate, and write the offers table to a CSV file
    Export {
        /// Location code to filter by (see `locations`)
        #[arg(long)]
        location: Option<u32>,
        #[arg(long, default_value = "jobs.csv")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; real deployments export the variables directly.
    dotenvy::dotenv().ok();

    Registry::default()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or(EnvFilter::new("job_market=info,jobscope=info,rocket::server=off")),
        )
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load()?;
    let secrets = Secrets::from_env();

    match cli.command {
        Command::Serve { port } => start_web_server(config, secrets, port).await,
        Command::Locations => list_locations(config, secrets).await,
        Command::Export { location, output } => export_csv(config, secrets, location, output).await,
    }
}

async fn list_locations(config: AppConfig, secrets: Secrets) -> Result<()> {
    let client = ItJobsClient::new(&config, secrets.api_key)?;

    match client.fetch_locations().await {
        Ok(locations) if locations.is_empty() => println!("No locations available."),
        Ok(locations) => {
            println!("{:<6} LOCATION", "CODE");
            for location in locations {
                println!("{:<6} {}", location.id, location.name);
            }
        }
        Err(e) => {
            warn!("Location list unavailable: {:#}", e);
            println!("No locations available.");
        }
    }

    Ok(())
}

async fn export_csv(
    config: AppConfig,
    secrets: Secrets,
    location: Option<u32>,
    output: PathBuf,
) -> Result<()> {
    let client = ItJobsClient::new(&config, secrets.api_key)?;
    let classifier = NerClassifier::new(
        config.ner_base_url.clone(),
        config.ner_model.clone(),
        secrets.ner_api_token,
        config.timeout_seconds,
    )?;

    let jobs = client.fetch_all_jobs(location).await;
    if jobs.is_empty() {
        println!("No jobs found.");
        return Ok(());
    }

    let aggregation = aggregate_jobs(&jobs, &classifier).await;
    write_csv(&aggregation.rows, &output)?;

    println!(
        "{} offer(s) written to {} ({} remote, {} on-site, {} companies)",
        aggregation.total,
        output.display(),
        aggregation.remote_count,
        aggregation.non_remote_count,
        aggregation.company_counts.len()
    );

    Ok(())
}
