use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use am4route_lib::{load_dataset, resolve_dataset_path, GameMode, ReferenceData};

use am4route_cli::commands::lookup::{handle_aircraft_command, handle_airport_command};
use am4route_cli::commands::route::{handle_route_command, RouteCommandArgs};
use am4route_cli::output::{render_route, OutputFormat};
use am4route_cli::terminal::ColorPalette;

#[derive(Parser, Debug)]
#[command(author, version, about = "Airline Manager 4 route economics")]
struct Cli {
    /// Override the dataset location (SQLite file or CSV directory).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve an airport by code, name or id (e.g. `LHR`, `icao:egll`, `id:2`).
    Airport {
        query: String,
    },
    /// Resolve an aircraft by shortname, name or id (e.g. `b744`, `name:a380-800`).
    Aircraft {
        query: String,
    },
    /// Configure an aircraft for a route and project its daily income.
    Route {
        /// Origin airport query.
        #[arg(long = "from")]
        from: String,
        /// Destination airport query.
        #[arg(long = "to")]
        to: String,
        /// Aircraft query.
        #[arg(long)]
        aircraft: String,
        /// Flights per day; demand is split evenly between them.
        #[arg(long, default_value_t = 1)]
        trips: u16,
        /// Game mode: easy or realism.
        #[arg(long, default_value_t = GameMode::Easy)]
        mode: GameMode,
        /// Airline reputation (0-100).
        #[arg(long)]
        reputation: Option<f64>,
        /// Ticket price relative to the in-game autoprice (1.0 = autoprice).
        #[arg(long)]
        autoprice_ratio: Option<f64>,
        /// Large cargo training level (0-6).
        #[arg(long, default_value_t = 0)]
        l_training: u8,
        /// Heavy cargo training level (0-6).
        #[arg(long, default_value_t = 0)]
        h_training: u8,
        /// Use this load factor (0-1) instead of the estimate.
        #[arg(long)]
        load: Option<f64>,
        /// JSON file overriding game constants.
        #[arg(long)]
        economics: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let data = load_data(cli.data_dir.as_deref())?;

    let output = match cli.command {
        Command::Airport { query } => handle_airport_command(&data, &query, cli.format)?,
        Command::Aircraft { query } => handle_aircraft_command(&data, &query, cli.format)?,
        Command::Route {
            from,
            to,
            aircraft,
            trips,
            mode,
            reputation,
            autoprice_ratio,
            l_training,
            h_training,
            load,
            economics,
        } => {
            let args = RouteCommandArgs {
                from,
                to,
                aircraft,
                trips_per_day: trips,
                game_mode: mode,
                reputation,
                autoprice_ratio,
                l_training,
                h_training,
                load,
                economics,
            };
            let summary = handle_route_command(&data, &args)?;
            render_route(&summary, cli.format, ColorPalette::detect())?
        }
    };

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(output.as_bytes())
        .context("failed to write output")?;
    Ok(())
}

fn load_data(target: Option<&Path>) -> Result<ReferenceData> {
    let path = resolve_dataset_path(target).context("failed to locate the AM4 dataset")?;
    load_dataset(&path).with_context(|| format!("failed to load dataset from {}", path.display()))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
