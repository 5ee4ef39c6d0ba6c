//! CLI definitions for the `sw` debugging binary

use clap::{Parser, Subcommand};

/// SearchWire - query SerpApi engines from the command line
#[derive(Parser)]
#[command(
    name = "searchwire",
    about = "SerpApi Google Flights/Hotels search client",
    version,
    after_help = "Requires SERPAPI_API_KEY to be set in the environment"
)]
pub struct Cli {
    /// SerpApi endpoint override
    #[arg(long, global = true, help = "SerpApi base URL")]
    pub base_url: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Search round-trip flights between two IATA codes
    Flights {
        /// Departure IATA code (e.g. AUS)
        source: String,

        /// Arrival IATA code (e.g. CDG)
        destination: String,

        /// Outbound date (YYYY-MM-DD)
        outbound_date: String,

        /// Return date (YYYY-MM-DD)
        return_date: String,
    },

    /// Search hotels in a city
    Hotels {
        /// City or location (e.g. "Paris")
        place: String,

        /// Check-in date (YYYY-MM-DD)
        check_in_date: String,

        /// Check-out date (YYYY-MM-DD)
        check_out_date: String,

        /// Number of adult guests
        #[arg(short, long, default_value = "2")]
        adults: u32,

        /// Budget tier: economy, standard, or luxury
        #[arg(short, long)]
        budget: Option<String>,
    },
}
