use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use crate::config::{Config, load_dotenv};
use crate::credentials::process_provider;
use crate::logging::{LogTarget, init_logging};
use crate::models::{Query, RosterMatch};
use crate::roster::Roster;
use crate::session::Session;
use crate::sheets::{SheetsApi, SheetsClient};
use crate::tui::run_interactive;
use crate::utils::sanitize_cell;

#[derive(Parser)]
#[command(name = "roster-appeal")]
#[command(version = "0.1.0")]
#[command(about = "Find your entry in the group roster and ask to stay", long_about = None)]
pub struct Cli {
    /// Name to search for when the form opens
    #[arg(short = 'q', long = "q", value_name = "QUERY")]
    pub query: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Look up a name once and print the matching row
    Search {
        query: String,

        /// Print the match as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Search { query, json }) => {
            init_logging(LogTarget::Stderr)?;
            let (roster, _) = open_roster()?;
            search_once(&roster, &query, json)
        }
        None => {
            let _guard = init_logging(LogTarget::File)?;
            let (roster, config) = open_roster()?;
            run_interactive(roster, Session::new(config.share_base), cli.query)
        }
    }
}

fn open_roster() -> Result<(Roster<SheetsClient>, Config)> {
    load_dotenv();
    let config = Config::from_env()?;

    let client = SheetsClient::connect(process_provider(&config))
        .context("Failed to open the roster spreadsheet")?;
    info!("Using spreadsheet {}", config.spreadsheet_id);

    Ok((Roster::new(client, config.spreadsheet_id.clone()), config))
}

#[derive(Serialize)]
struct SearchReport<'a> {
    #[serde(flatten)]
    found: &'a RosterMatch,
    link: String,
    header: &'a [String],
}

fn search_once<S: SheetsApi>(roster: &Roster<S>, raw: &str, json: bool) -> Result<()> {
    let query = Query::new(raw);
    let Some(found) = roster.find_row(&query)? else {
        println!("No results found");
        return Ok(());
    };
    let header = roster.header()?;
    let link = roster.row_link(found.position);

    if json {
        let report = SearchReport { found: &found, link, header };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Row {}", found.position);
    println!("{link}");
    for (label, value) in found.fields(header) {
        println!("  {}: {}", sanitize_cell(label), sanitize_cell(value));
    }

    Ok(())
}
