// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

// Use library instead of local modules
use shelter_dashboard::{
    init_logging, open_source, Config, DashboardSettings, DashboardView, DataQualityEngine,
    FilterQuery, RecordStore, SourceKind, DEFAULT_CONFIG_FILE,
};

/// Shelter Dashboard - intake trends, animal mix, and open cases for an animal shelter
///
/// Examples:
///   shelter-dashboard
///   shelter-dashboard --source sqlite --path warehouse.db summary --animal-types Dog --animal-types Cat
///   shelter-dashboard summary --start 2023-01-01 --end 2023-06-30 --json
///   shelter-dashboard init-config
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    ///
    /// If not specified, looks for shelter-dashboard.toml in the current directory
    #[arg(short, long, value_name = "FILE", env = "SHELTER_DASHBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Record source kind (overrides the config file)
    #[arg(long, value_enum)]
    source: Option<SourceKind>,

    /// CSV file or SQLite database path (overrides the config file)
    #[arg(long, value_name = "PATH")]
    path: Option<PathBuf>,

    /// Warehouse table name, SQLite only (overrides the config file)
    #[arg(long, value_name = "TABLE")]
    table: Option<String>,

    /// Maximum number of rows to load (overrides the config file)
    #[arg(long, value_name = "COUNT")]
    limit: Option<usize>,

    /// Enable verbose logging output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive terminal dashboard (default)
    Tui,

    /// Print the dashboard for one set of filters and exit
    Summary {
        #[command(flatten)]
        filters: FilterArgs,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Write a default shelter-dashboard.toml
    InitConfig,
}

/// Filter flags; same semantics as the HTTP query parameters
#[derive(clap::Args, Debug, Default)]
struct FilterArgs {
    /// Selected animal type; repeat the flag per value, pass it bare for no restriction
    #[arg(long, value_name = "VALUE", num_args = 0..)]
    animal_types: Option<Vec<String>>,

    /// Selected sex; repeat the flag per value, pass it bare for no restriction
    #[arg(long, value_name = "VALUE", num_args = 0..)]
    sexes: Option<Vec<String>>,

    /// Selected intake condition; repeat the flag per value, pass it bare for no restriction
    #[arg(long, value_name = "VALUE", num_args = 0..)]
    intake_conditions: Option<Vec<String>>,

    /// First intake day, YYYY-MM-DD
    #[arg(long, value_name = "DATE")]
    start: Option<String>,

    /// Last intake day, YYYY-MM-DD
    #[arg(long, value_name = "DATE")]
    end: Option<String>,
}

impl From<FilterArgs> for FilterQuery {
    fn from(args: FilterArgs) -> Self {
        FilterQuery {
            animal_types: args.animal_types,
            sexes: args.sexes,
            intake_conditions: args.intake_conditions,
            start: args.start,
            end: args.end,
        }
    }
}

fn main() {
    let args = Args::parse();

    // No data needed, no logging needed
    if matches!(args.command, Some(Command::InitConfig)) {
        if let Err(e) = run_init_config() {
            eprintln!("❌ Error: {:#}", e);
            std::process::exit(1);
        }
        return;
    }

    if let Err(e) = init_logging(args.verbose) {
        eprintln!("❌ Error: {:#}", e);
        std::process::exit(1);
    }
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(args) {
        error!("{:#}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = load_config(&args)?;
    let store = load_store(&config)?;
    let settings = DashboardSettings::from(&config.map);

    match args.command {
        Some(Command::Summary { filters, json }) => run_summary(&store, &settings, filters, json),
        Some(Command::Tui) | None => run_ui_mode(store, settings),
        Some(Command::InitConfig) => Ok(()),
    }
}

/// Config file first, CLI flags on top
fn load_config(args: &Args) -> Result<Config> {
    let mut config = Config::resolve(args.config.as_deref())?;

    if let Some(kind) = args.source {
        config.source.kind = kind;
    }
    if let Some(path) = &args.path {
        config.source.path = path.clone();
    }
    if let Some(table) = &args.table {
        config.source.table = table.clone();
    }
    if let Some(limit) = args.limit {
        config.source.limit = limit;
    }

    Ok(config)
}

/// One warehouse session: open, fetch, close
fn load_store(config: &Config) -> Result<RecordStore> {
    info!(
        "Opening {:?} source at {}",
        config.source.kind,
        config.source.path.display()
    );

    let mut source = open_source(&config.source)?;
    let store = RecordStore::load(source.as_mut(), config.source.limit)?;
    source.close().context("Failed to close record source")?;

    Ok(store)
}

fn run_init_config() -> Result<()> {
    Config::write_default(Path::new(DEFAULT_CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", DEFAULT_CONFIG_FILE);
    Ok(())
}

// ============================================================================
// SUMMARY MODE
// ============================================================================

fn run_summary(
    store: &RecordStore,
    settings: &DashboardSettings,
    filters: FilterArgs,
    json: bool,
) -> Result<()> {
    let options = store.filter_options();
    let criteria = FilterQuery::from(filters)
        .into_criteria(&options)
        .context("Invalid filter")?;
    let view = DashboardView::build(store, &criteria, settings);

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!("🐾 Shelter Dashboard - {}", store.source_name());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    if let Some(warning) = &view.warning {
        println!("\n⚠️  {}", warning);
    }

    let overview = &view.overview;
    println!("\n📊 Overview");
    println!("   Records shown:   {} of {}", overview.shown_records, overview.total_records);
    println!(
        "   Open cases:      {} of {}",
        overview.open_cases_shown, overview.open_cases_total
    );

    println!("\n📈 Monthly intake");
    for point in &view.monthly_intake.points {
        println!("   {}  {:>5}", point.month.format("%Y-%m"), point.count);
    }
    if view.monthly_intake.undated > 0 {
        println!("   (no intake date: {})", view.monthly_intake.undated);
    }

    println!("\n🐕 Animal types");
    for entry in &view.animal_types.counts {
        println!("   {:<20} {:>5}", entry.animal_type, entry.count);
    }
    if view.animal_types.unlabeled > 0 {
        println!("   (no type: {})", view.animal_types.unlabeled);
    }

    println!("\n⏱️  Days in shelter");
    match view.days_in_shelter.summary() {
        Some(summary) => println!(
            "   {} outcomes: min {}, median {:.1}, mean {:.1}, max {}",
            summary.count, summary.min, summary.median, summary.mean, summary.max
        ),
        None => println!("   No Days in Shelter data available."),
    }

    println!("\n🗺️  Open cases by zip code");
    for zone in &view.geo.open_zones {
        println!("   {}", zone.label());
    }
    if view.geo.unzoned_open_cases > 0 {
        println!("   (no zip code: {})", view.geo.unzoned_open_cases);
    }

    let engine = DataQualityEngine::new();
    let quality = engine.batch_summary(&engine.validate_batch(store.records()));
    println!("\n✅ Data quality: {}", quality.summary());

    Ok(())
}

// ============================================================================
// UI MODE
// ============================================================================

#[cfg(feature = "tui")]
fn run_ui_mode(store: RecordStore, settings: DashboardSettings) -> Result<()> {
    println!("🖥️  Loading Shelter Dashboard UI...\n");
    println!("✓ Loaded {} records from {}", store.len(), store.source_name());
    println!("Starting UI... (Press 'q' to quit)\n");

    let mut app = ui::App::new(store, settings);
    ui::run_ui(&mut app)?;

    println!("\n✅ UI closed successfully");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_store: RecordStore, _settings: DashboardSettings) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use: shelter-dashboard summary");
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_filters(argv: &[&str]) -> FilterQuery {
        let args = Args::try_parse_from(argv).unwrap();
        match args.command {
            Some(Command::Summary { filters, .. }) => FilterQuery::from(filters),
            other => panic!("expected summary, got {:?}", other),
        }
    }

    #[test]
    fn test_filter_flags_repeat() {
        let query = parse_filters(&[
            "shelter-dashboard",
            "summary",
            "--intake-conditions",
            "SICK, TREATABLE",
            "--intake-conditions",
            "HEALTHY",
            "--start",
            "2023-01-01",
        ]);

        assert_eq!(
            query.intake_conditions,
            Some(vec!["SICK, TREATABLE".to_string(), "HEALTHY".to_string()])
        );
        assert_eq!(query.animal_types, None);
        assert_eq!(query.start.as_deref(), Some("2023-01-01"));
    }

    #[test]
    fn test_bare_filter_flag_clears_dimension() {
        let query = parse_filters(&["shelter-dashboard", "summary", "--sexes", "--json"]);
        assert_eq!(query.sexes, Some(Vec::new()));
    }
}
