use chrono::NaiveDateTime;
use clap::{Args, Parser, Subcommand, ValueEnum};
use fare_engine::application::engine::{EngineLimits, FareEngine, FareQuery};
use fare_engine::domain::ports::RateTableSourceBox;
use fare_engine::error::FareError;
use fare_engine::infrastructure::builtin::BuiltinRateTable;
use fare_engine::infrastructure::json_file::JsonRateTable;
use fare_engine::interfaces::csv::fare_writer::FareWriter;
use fare_engine::interfaces::csv::trip_reader::TripReader;
use fare_engine::interfaces::summary::{breakdown_text, trip_summary};
use fare_engine::interfaces::timestamp::parse_timestamp;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON rate table to use instead of the built-in chart
    #[arg(long, global = true)]
    rate_table: Option<PathBuf>,

    /// Longest trip accepted, in days
    #[arg(long, global = true, default_value_t = EngineLimits::DEFAULT_MAX_SPAN_DAYS)]
    max_span_days: u32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Price a single trip
    Estimate(EstimateArgs),
    /// Price every trip in a CSV file and write the fares to stdout
    Batch {
        /// Input trips CSV file
        input: PathBuf,
    },
    /// Print the active rate table as JSON
    Table,
}

#[derive(Args)]
struct EstimateArgs {
    /// Trip start, local time (e.g. 2024-01-01T10:00)
    #[arg(long, value_parser = parse_timestamp)]
    start: NaiveDateTime,

    /// Trip end, local time
    #[arg(long, value_parser = parse_timestamp)]
    end: NaiveDateTime,

    /// Uniform surcharge tier: standard or uplift
    #[arg(long, default_value = "standard")]
    uplift: String,

    /// Trip geography: local or intercity
    #[arg(long, default_value = "local")]
    zone: String,

    /// Pricing track: roundTrip or oneWay
    #[arg(long, default_value = "roundTrip")]
    route: String,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Summary,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(io::stderr().is_terminal()),
        )
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let source: RateTableSourceBox = match &cli.rate_table {
        Some(path) => Box::new(JsonRateTable::new(path)),
        None => Box::new(BuiltinRateTable),
    };
    let limits = EngineLimits::with_max_span_days(cli.max_span_days);
    let engine = FareEngine::from_source(source.as_ref(), limits).into_diagnostic()?;

    match cli.command {
        Command::Estimate(args) => estimate(&engine, args),
        Command::Batch { input } => batch(&engine, input),
        Command::Table => {
            let json = serde_json::to_string_pretty(engine.table()).into_diagnostic()?;
            println!("{json}");
            Ok(())
        }
    }
}

fn estimate(engine: &FareEngine, args: EstimateArgs) -> Result<()> {
    let query = FareQuery::parse(args.start, args.end, &args.uplift, &args.zone, &args.route)
        .into_diagnostic()?;
    let fare = engine.compute_fare(&query).into_diagnostic()?;

    match args.format {
        OutputFormat::Text => println!("{}", breakdown_text(&fare)),
        OutputFormat::Summary => println!("{}", trip_summary(&query, &fare)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&fare).into_diagnostic()?),
    }
    Ok(())
}

fn batch(engine: &FareEngine, input: PathBuf) -> Result<()> {
    let file = File::open(input).into_diagnostic()?;
    let reader = TripReader::new(BufReader::new(file));

    let stdout = io::stdout();
    let mut writer = FareWriter::new(stdout.lock());
    for record in reader.trips() {
        let trip = match record {
            Ok(trip) => trip,
            Err(e) => {
                tracing::warn!("error reading trip: {e}");
                continue;
            }
        };
        match engine.compute_fare(&trip.query()) {
            Ok(fare) => writer.write_fare(&trip.trip, &fare).into_diagnostic()?,
            // Coverage gaps abort the whole run.
            Err(e @ FareError::Configuration(_)) => return Err(e).into_diagnostic(),
            Err(e) => tracing::warn!(trip = %trip.trip, "error pricing trip: {e}"),
        }
    }
    writer.flush().into_diagnostic()?;

    Ok(())
}
