//! VOR Calculator
//!
//! Scores residential zones for wildfire exposure (Value of Risk) and maps
//! the score to a fire-rated material spec and its embodied-carbon premium.

pub mod calculator;
pub mod config;
pub mod error;
pub mod models;
pub mod sites;

pub use calculator::{
    assess_site, classify, classify_with, compute_carbon_impact, compute_carbon_impact_with,
    compute_vor, compute_vor_checked,
};
pub use config::ScoringConfig;
pub use error::{ConfigError, ScoringError};
pub use models::{CarbonImpact, Recommendation, RiskScore, RiskTier, Site, SiteAssessment};
