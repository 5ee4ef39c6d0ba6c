//! Tripweaver - LLM travel itinerary pipeline
//!
//! CLI entry point for planning trips.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use eyre::{Context, Result};
use tracing::info;

use tripweaver::cli::{Cli, Command, OutputFormat};
use tripweaver::config::Config;
use tripweaver::domain::{FinalItinerary, TripRequest};
use tripweaver::pipeline::{Pipeline, STANDARD_STAGES};

fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tripweaver")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Setup tracing subscriber - write to log file, not stdout/stderr
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let log_file = fs::File::create(log_dir.join("tripweaver.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!(
        "Tripweaver loaded config: provider={}, model={}",
        config.llm.provider, config.llm.model
    );

    match cli.command {
        Some(Command::Plan { request, format }) => cmd_plan(&config, request.as_ref(), format).await,
        Some(Command::Stages) => cmd_stages(),
        Some(Command::Check) => cmd_check(&config),
        None => {
            let mut cmd = Cli::command();
            cmd.print_help()?;
            println!();
            Ok(())
        }
    }
}

/// Plan a trip from a request file or stdin
async fn cmd_plan(config: &Config, request_path: Option<&PathBuf>, format: OutputFormat) -> Result<()> {
    // Validate API keys early
    config.validate()?;

    let raw = match request_path {
        Some(path) => fs::read_to_string(path)
            .context(format!("Failed to read trip request from {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read trip request from stdin")?;
            buf
        }
    };
    let request: TripRequest =
        serde_json::from_str(&raw).context("Failed to parse trip request JSON")?;

    let pipeline = Pipeline::standard(config).context("Failed to build pipeline")?;
    let itinerary = pipeline.run(&request).await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&itinerary)?),
        OutputFormat::Text => print_itinerary(&itinerary),
    }
    Ok(())
}

/// List the pipeline stages in execution order
fn cmd_stages() -> Result<()> {
    println!("{}", "Pipeline stages".bold());
    for (i, name) in STANDARD_STAGES.iter().enumerate() {
        println!("  {}. {}", i + 1, name);
    }
    Ok(())
}

/// Check configuration and API key availability
fn cmd_check(config: &Config) -> Result<()> {
    println!("{}", "Configuration".bold());
    println!("  LLM provider: {} ({})", config.llm.provider, config.llm.model);
    println!("  LLM endpoint: {}", config.llm.base_url);
    println!("  Search endpoint: {}", config.search.base_url);
    if let Some(dir) = &config.prompts_dir {
        println!("  Prompt overrides: {}", dir.display());
    }
    println!();

    let mut ok = true;
    for (label, var) in [
        ("LLM", &config.llm.api_key_env),
        ("Search", &config.search.api_key_env),
    ] {
        if std::env::var(var).is_ok() {
            println!("{} {} API key found in {}", "✓".green(), label, var);
        } else {
            println!(
                "{} {} API key missing. Set the {} environment variable.",
                "✗".red(),
                label,
                var
            );
            ok = false;
        }
    }

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

/// Render the itinerary as a human-readable summary
fn print_itinerary(itinerary: &FinalItinerary) {
    if let Some(summary) = &itinerary.user_request_summary {
        let destination = summary
            .destination
            .clone()
            .or_else(|| summary.hotel_city.clone())
            .unwrap_or_else(|| "your destination".to_string());
        println!("{}", format!("Trip to {destination}").bold());
        if let (Some(departure), Some(ret)) = (&summary.departure_date, &summary.return_date) {
            println!("  {} to {} ({} days)", departure, ret, summary.num_days.unwrap_or(0));
        }
        println!();
    }

    if let Some(disclaimer) = &itinerary.disclaimer {
        println!("{} {}", "⚠".yellow(), disclaimer.yellow());
        println!();
    }

    if !itinerary.flights.is_empty() {
        println!("{}", "Flights".bold().underline());
        for leg in &itinerary.flights {
            println!(
                "  {}: {} ({}) -> {} ({})  {}",
                leg.airline.cyan(),
                leg.departure_airport,
                leg.departure_time,
                leg.arrival_airport,
                leg.arrival_time,
                leg.price.dimmed()
            );
        }
        println!();
    }

    if !itinerary.hotels.is_empty() {
        println!("{}", "Hotels".bold().underline());
        for hotel in &itinerary.hotels {
            let rating = hotel
                .rating
                .map(|r| format!("{r}/5"))
                .unwrap_or_else(|| "unrated".to_string());
            println!(
                "  {} ({}, {}/night)",
                hotel.hotel_name.cyan(),
                rating,
                hotel.price_per_night
            );
            if !hotel.address.is_empty() {
                println!("    {}", hotel.address);
            }
            if !hotel.description.is_empty() {
                println!("    {}", hotel.description.italic());
            }
            if !hotel.perks.is_empty() {
                println!("    Perks: {}", hotel.perks);
            }
        }
        println!();
    }

    if !itinerary.days.is_empty() {
        println!("{}", "Day by day".bold().underline());
        for day in &itinerary.days {
            println!(
                "  {} {}",
                format!("Day {}", day.day).green().bold(),
                format!("{} ({})", day.date, day.city).dimmed()
            );
            for activity in &day.activities {
                println!(
                    "    - {} [{}, {}]",
                    activity.name, activity.best_time_to_visit, activity.ticket_price
                );
            }
        }
        println!();
    }

    if !itinerary.travel_options.is_empty() {
        println!("{}", "Getting around".bold().underline());
        for option in &itinerary.travel_options {
            println!("  {}: {}", option.method.cyan(), option.description);
        }
        println!();
    }

    if !itinerary.research.is_empty() {
        println!("{}", "Good to know".bold().underline());
        for detail in &itinerary.research {
            println!("  {}: {}", detail.title.cyan(), detail.notes);
        }
        println!();
    }

    if !itinerary.notes_and_warnings.is_empty() {
        println!("{}", "Notes".bold().underline());
        for note in &itinerary.notes_and_warnings {
            println!("  {}", note.dimmed());
        }
    }
}
