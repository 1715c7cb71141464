//! VOR Calculator
//!
//! Wildfire risk scoring and fire-rated material spec tool for
//! residential new construction.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use vor_calculator::config::ScoringConfig;
use vor_calculator::models::{RiskTier, Site, SiteAssessment, format_rounded};
use vor_calculator::{calculator, sites};

const DEFAULT_LOG_DIRECTIVE: &str = "warn";

#[derive(Parser)]
#[command(name = "vor-calculator")]
#[command(about = "Wildfire risk scoring and fire-rated material spec tool")]
struct Cli {
    /// Path to a TOML scoring config (defaults to the built-in thresholds)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all risk zones with their scores
    Zones,

    /// Show the spec analysis for a zone
    Assess {
        /// Zone name (e.g., "Hollywood Hills")
        zone: String,

        /// Hide the embodied carbon impact
        #[arg(long)]
        no_carbon: bool,
    },

    /// Score arbitrary site inputs
    Score {
        /// Fuel density in percent
        #[arg(short, long)]
        fuel: f64,

        /// Slope in degrees
        #[arg(short, long)]
        slope: f64,

        /// Baseline embodied carbon in kgCO2e/m2
        #[arg(short, long)]
        base_carbon: Option<f64>,

        /// Reject inputs outside the configured ranges
        #[arg(long)]
        strict: bool,
    },

    /// Show the active tier thresholds and materials
    Tiers,

    /// Write the default scoring config as TOML
    InitConfig {
        /// Output path
        #[arg(default_value = "vor_config.toml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Zones => {
            println!(
                "{:<30} {:>8} {:>10} {:>8} {:>10}",
                "Zone", "Fuel (%)", "Slope (°)", "VOR", "Tier"
            );
            println!("{}", "-".repeat(70));
            for site in sites::all() {
                let assessment = calculator::assess_site(site, &config);
                println!(
                    "{:<30} {:>8.0} {:>10.0} {:>8} {:>10}",
                    site.zone_name,
                    site.fuel_density,
                    site.slope_degrees,
                    assessment.score.formatted(config.display_decimals),
                    assessment.recommendation.tier
                );
            }
        }

        Commands::Assess { zone, no_carbon } => {
            let site = sites::require(&zone)?;
            let mut assessment = calculator::assess_site(site, &config);
            debug!(zone = %site.zone_name, vor = assessment.score.value(), "assessed zone");
            if no_carbon {
                assessment = assessment.without_carbon();
            }
            println!("{}", assessment);
        }

        Commands::Score {
            fuel,
            slope,
            base_carbon,
            strict,
        } => {
            let assessment = score_inputs(fuel, slope, base_carbon, strict, &config)?;
            println!("{}", assessment);
        }

        Commands::Tiers => {
            let t = &config.thresholds;
            println!("{:<10} {:<16} {:>9}  Material", "Tier", "VOR", "Premium");
            println!("{}", "-".repeat(70));
            for tier in RiskTier::ALL.iter().rev() {
                let range = match tier {
                    RiskTier::Critical => format!("> {}", t.critical),
                    RiskTier::Elevated => format!("{} < v <= {}", t.elevated, t.critical),
                    RiskTier::Nominal => format!("<= {}", t.elevated),
                };
                let spec = config.tiers.get(*tier);
                println!(
                    "{:<10} {:<16} {:>8}%  {}",
                    tier,
                    range,
                    format_rounded(spec.carbon_premium_pct, 0),
                    spec.material_spec
                );
            }
        }

        Commands::InitConfig { path, force } => {
            write_default_config(&path, force)?;
            println!("Config written to: {}", path.display());
        }
    }

    Ok(())
}

/// `RUST_LOG` if set, otherwise warnings and errors only
fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVE))
}

/// Score ad-hoc inputs; `strict` turns out-of-range values into an error
fn score_inputs(
    fuel: f64,
    slope: f64,
    base_carbon: Option<f64>,
    strict: bool,
    config: &ScoringConfig,
) -> Result<SiteAssessment> {
    if strict {
        calculator::compute_vor_checked(fuel, slope, &config.input_ranges)?;
    } else if !config.input_ranges.fuel_density.contains(fuel)
        || !config.input_ranges.slope_degrees.contains(slope)
    {
        warn!(fuel, slope, "inputs outside documented ranges; score may be meaningless");
    }

    let site = Site {
        zone_name: "Custom site".to_string(),
        fuel_density: fuel,
        slope_degrees: slope,
        latitude: 0.0,
        longitude: 0.0,
        base_carbon,
    };
    Ok(calculator::assess_site(&site, config))
}

fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    let text = ScoringConfig::default().to_toml_string()?;
    fs::write(path, text)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    info!(path = %path.display(), "wrote default scoring config");
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<ScoringConfig> {
    match path {
        Some(path) => {
            let config = ScoringConfig::load(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?;
            info!(path = %path.display(), "using scoring config");
            Ok(config)
        }
        None => Ok(ScoringConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;
    use vor_calculator::ScoringError;

    #[test]
    fn default_log_filter_shows_warnings() {
        let filter = EnvFilter::new(DEFAULT_LOG_DIRECTIVE);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn strict_score_rejects_out_of_range_fuel() {
        let err = score_inputs(150.0, 40.0, None, true, &ScoringConfig::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ScoringError>(),
            Some(ScoringError::InvalidInput { field: "fuel_density", .. })
        ));
    }

    #[test]
    fn lenient_score_still_classifies_out_of_range_input() {
        let assessment =
            score_inputs(150.0, 40.0, Some(100.0), false, &ScoringConfig::default()).unwrap();
        assert_eq!(assessment.recommendation.tier, RiskTier::Critical);
        assert!((assessment.score.value() - 60.0).abs() < 1e-9);
        assert!((assessment.carbon.unwrap().total - 145.0).abs() < 1e-9);
    }

    #[test]
    fn init_config_refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vor_config.toml");
        fs::write(&path, "display_decimals = 3\n").unwrap();

        assert!(write_default_config(&path, false).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "display_decimals = 3\n");

        write_default_config(&path, true).unwrap();
        assert_eq!(ScoringConfig::load(&path).unwrap(), ScoringConfig::default());
    }

    #[test]
    fn init_config_writes_new_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fresh.toml");

        write_default_config(&path, false).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn assess_flag_drops_carbon() {
        let config = load_config(None).unwrap();
        let site = sites::require("Hollywood Hills").unwrap();
        let text = calculator::assess_site(site, &config).without_carbon().to_string();
        assert!(!text.contains("kgCO2e"));
    }
}
