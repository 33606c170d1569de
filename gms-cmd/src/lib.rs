//! Command implementations for the GMS CLI.
//!
//! Subcommands fetch a well's history (remote API or an offline CSV), run
//! the balance engine against a scenario and print or export the results.

use clap::{Args, Subcommand};

pub mod export;
pub mod irrigate;
pub mod recharge;
pub mod scenario;
pub mod source;

/// Where well histories and metadata come from.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Well history API endpoint
    #[arg(long, env = "GMS_HISTORY_URL", default_value = gms_core::history_client::DEFAULT_HISTORY_URL)]
    pub history_url: String,

    /// Read the history from a local CSV with `date,value` columns instead of the API
    #[arg(long)]
    pub history_csv: Option<String>,

    /// Well metadata CSV (WellNo, State, District, Block, Village, Latitude, Longitude)
    #[arg(long, env = "GMS_METADATA_CSV", default_value = gms_core::metadata::DEFAULT_METADATA_CSV)]
    pub metadata_csv: String,
}

/// Scenario parameters shared by the commands that run the balance engine.
#[derive(Args, Debug, Clone)]
pub struct ScenarioArgs {
    /// JSON file overriding any subset of the default scenario parameters
    #[arg(short = 's', long)]
    pub scenario: Option<String>,

    /// Forecast horizon in months
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub horizon: u32,

    /// Water demand of a proposed project [MCM/yr]
    #[arg(long)]
    pub demand: Option<f64>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the groundwater balance for a well under a scenario
    Scenario {
        /// Well identifier, e.g. W07541
        #[arg(short = 'w', long)]
        well: String,

        #[command(flatten)]
        scenario: ScenarioArgs,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Per hydrological year WTF recharge and historical summary for a well
    Recharge {
        #[arg(short = 'w', long)]
        well: String,

        /// Specific yield used for the per-year estimate
        #[arg(long, default_value_t = 0.05)]
        specific_yield: f64,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Write the data download CSV and a key-value report for a well
    Export {
        #[arg(short = 'w', long)]
        well: String,

        /// Output path for historical and forecast rows
        #[arg(long)]
        csv: String,

        /// Output path for the key-value report
        #[arg(long)]
        report: Option<String>,

        #[command(flatten)]
        scenario: ScenarioArgs,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Irrigation requirement and pump run time for a farm
    Irrigate(irrigate::IrrigateArgs),
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Scenario {
            well,
            scenario,
            source,
        } => scenario::run_scenario(&well, &scenario, &source).await,
        Command::Recharge {
            well,
            specific_yield,
            source,
        } => recharge::run_recharge(&well, specific_yield, &source).await,
        Command::Export {
            well,
            csv,
            report,
            scenario,
            source,
        } => export::run_export(&well, &csv, report.as_deref(), &scenario, &source).await,
        Command::Irrigate(args) => irrigate::run_irrigate(&args).await,
    }
}
