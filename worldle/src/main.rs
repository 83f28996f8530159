use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use worldle_core::{
    bearing_deg, build_metadata, distance_km, proximity_percent, CountryMetadata,
    DailySelection, Direction, LatLon,
};
use worldle_data::DailyPermutation;

mod loader;

#[derive(Parser)]
#[command(name = "worldle")]
#[command(version, about = "Daily country puzzle engine: selection, distances and bonus flags")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Country catalog JSON (default: embedded dataset)
    #[arg(long, global = true, env = "WORLDLE_CATALOG")]
    catalog: Option<PathBuf>,

    /// Daily permutation JSON (default: embedded permutation)
    #[arg(long, global = true, env = "WORLDLE_PERMUTATION")]
    permutation: Option<PathBuf>,

    /// Engine config JSON (default: built-in defaults)
    #[arg(long, global = true, env = "WORLDLE_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Print today's selection and puzzle metadata as JSON
    Today {
        /// Evaluate at this instant instead of now (RFC 3339)
        #[arg(long)]
        at: Option<DateTime<Utc>>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Print puzzle metadata for an explicit target country
    Metadata {
        /// Target country code
        #[arg(value_name = "CODE")]
        code: String,

        /// Bonus-round seed (normally the puzzle number)
        #[arg(long, default_value = "1")]
        seed: String,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Show the feedback a player would get guessing FROM when the answer is TO
    Distance {
        #[arg(value_name = "FROM")]
        from: String,
        #[arg(value_name = "TO")]
        to: String,
    },

    /// Generate a new daily permutation from the catalog
    Permute {
        /// Shuffle seed (default: current time)
        #[arg(long)]
        seed: Option<u64>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check that catalog, permutation and config fit together
    Validate,
}

#[derive(Serialize)]
struct TodayOutput<'a> {
    selection: &'a DailySelection,
    metadata: &'a CountryMetadata,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = std::str::FromStr::from_str(&cli.log_level).unwrap_or(log::LevelFilter::Info);
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();

    match &cli.command {
        Commands::Today { at, pretty } => today(&cli, *at, *pretty),
        Commands::Metadata { code, seed, pretty } => metadata(&cli, code, seed, *pretty),
        Commands::Distance { from, to } => distance(&cli, from, to),
        Commands::Permute { seed, output } => permute(&cli, *seed, output.as_deref()),
        Commands::Validate => validate(&cli),
    }
}

fn load(cli: &Cli) -> Result<loader::Inputs> {
    loader::load_inputs(
        cli.catalog.as_deref(),
        cli.permutation.as_deref(),
        cli.config.as_deref(),
    )
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

fn today(cli: &Cli, at: Option<DateTime<Utc>>, pretty: bool) -> Result<()> {
    let inputs = load(cli)?;
    let schedule = inputs.schedule();
    let now = at.unwrap_or_else(Utc::now);

    let selection = schedule.selection_at(now);
    log::info!(
        "Puzzle #{} at {}: {}",
        selection.puzzle_number,
        now,
        selection.target_code
    );

    let metadata = build_metadata(
        &inputs.catalog,
        &selection.target_code,
        &selection.seed(),
        &inputs.config,
    )
    .with_context(|| format!("Failed to build metadata for #{}", selection.puzzle_number))?;

    let output = TodayOutput {
        selection: &selection,
        metadata: &metadata,
    };
    println!("{}", to_json(&output, pretty)?);
    Ok(())
}

fn metadata(cli: &Cli, code: &str, seed: &str, pretty: bool) -> Result<()> {
    let inputs = load(cli)?;
    let metadata = build_metadata(&inputs.catalog, code, seed, &inputs.config)?;
    println!("{}", to_json(&metadata, pretty)?);
    Ok(())
}

fn distance(cli: &Cli, from: &str, to: &str) -> Result<()> {
    let catalog = loader::load_catalog(cli.catalog.as_deref())?;
    let lookup = |code: &str| {
        catalog
            .get(code)
            .ok_or_else(|| worldle_core::EngineError::UnknownCountry(code.to_string()))
    };
    let from = lookup(from)?;
    let to = lookup(to)?;

    let km = distance_km(LatLon::from(from), LatLon::from(to)).round() as u32;
    let bearing = bearing_deg(LatLon::from(from), LatLon::from(to));
    let direction = Direction::from_bearing(bearing);
    // Same rounding as DistanceEntry, so 359.6 reads as 0.
    let bearing = (bearing.round() as u16) % 360;

    println!(
        "{} -> {}: {} km, bearing {}° ({} {}), {}% proximity",
        from.name,
        to.name,
        km,
        bearing,
        direction,
        direction.arrow(),
        proximity_percent(km)
    );
    Ok(())
}

fn permute(cli: &Cli, seed: Option<u64>, output: Option<&std::path::Path>) -> Result<()> {
    let catalog = loader::load_catalog(cli.catalog.as_deref())?;
    let seed = seed.unwrap_or_else(|| Utc::now().timestamp() as u64);
    log::info!("Shuffling {} countries with seed {}", catalog.len(), seed);

    let permutation = DailyPermutation::generate(&catalog, seed);
    let json = permutation.to_json_pretty()?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create output directory: {}", parent.display())
                    })?;
                }
            }
            std::fs::write(path, &json)
                .with_context(|| format!("Failed to write permutation: {}", path.display()))?;
            println!(
                "Wrote {}-day permutation to {}",
                permutation.len(),
                path.display()
            );
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn validate(cli: &Cli) -> Result<()> {
    let inputs = load(cli)?;

    if inputs.config.bonus_round_size > inputs.catalog.len() {
        anyhow::bail!(
            "bonus_round_size {} exceeds catalog size {}",
            inputs.config.bonus_round_size,
            inputs.catalog.len()
        );
    }

    // Build one puzzle end to end so sampling problems surface here too.
    let selection = inputs.schedule().selection_for_day(0);
    build_metadata(
        &inputs.catalog,
        &selection.target_code,
        &selection.seed(),
        &inputs.config,
    )?;

    println!(
        "OK: {} countries, {}-day cycle, bonus round of {}",
        inputs.catalog.len(),
        inputs.permutation.len(),
        inputs.config.bonus_round_size
    );
    Ok(())
}
