//! GMS CLI - groundwater well analytics and decision support scenarios.

use clap::{ArgAction, Parser};
use log::LevelFilter;

#[derive(Parser)]
#[command(
    name = "gms-cli",
    version,
    about = "Groundwater monitoring and decision support toolkit"
)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG applies otherwise
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: gms_cmd::Command,
}

fn level_for(verbose: u8) -> Option<LevelFilter> {
    match verbose {
        0 => None,
        1 => Some(LevelFilter::Info),
        2 => Some(LevelFilter::Debug),
        _ => Some(LevelFilter::Trace),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut logger = env_logger::Builder::from_default_env();
    if let Some(level) = level_for(cli.verbose) {
        logger.filter_level(level);
    }
    logger.init();
    gms_cmd::run(cli.command).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(level_for(0), None);
        assert_eq!(level_for(2), Some(LevelFilter::Debug));
        assert_eq!(level_for(7), Some(LevelFilter::Trace));
    }

    #[test]
    fn test_parses_scenario_command() {
        let cli = Cli::try_parse_from([
            "gms-cli", "-vv", "scenario", "--well", "W07541", "--horizon", "6", "--history-csv", "levels.csv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, gms_cmd::Command::Scenario { ref well, .. } if well == "W07541"));
    }

    #[test]
    fn test_rejects_horizon_out_of_range() {
        assert!(Cli::try_parse_from(["gms-cli", "scenario", "--well", "W1", "--horizon", "13"]).is_err());
    }
}
