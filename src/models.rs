//! Data models for zones, scores and material recommendations

use std::fmt;

use serde::{Deserialize, Serialize};

/// A residential zone with the spatial inputs used for scoring
#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    pub zone_name: String,
    pub fuel_density: f64,  // percent, 0-100
    pub slope_degrees: f64, // 0-90
    pub latitude: f64,
    pub longitude: f64,
    pub base_carbon: Option<f64>, // kgCO2e/m2
}

/// Value of Risk for a single site.
///
/// Holds the exact product; rounding only happens when displayed.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct RiskScore {
    vor: f64,
}

impl RiskScore {
    pub fn new(vor: f64) -> Self {
        Self { vor }
    }

    pub fn value(&self) -> f64 {
        self.vor
    }

    /// Round to `decimals` places for display
    pub fn rounded(&self, decimals: u32) -> f64 {
        round_to(self.vor, decimals)
    }

    pub fn formatted(&self, decimals: u32) -> String {
        format_rounded(self.vor, decimals)
    }
}

impl fmt::Display for RiskScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.formatted(1))
    }
}

/// Risk tier, ordered from lowest to highest risk
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    Nominal,
    Elevated,
    Critical,
}

impl RiskTier {
    pub const ALL: [RiskTier; 3] = [RiskTier::Nominal, RiskTier::Elevated, RiskTier::Critical];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Nominal => "Nominal",
            RiskTier::Elevated => "Elevated",
            RiskTier::Critical => "Critical",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Material recommendation derived from a VOR value
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub tier: RiskTier,
    pub material_spec: String,
    pub material_detail: String,
    pub carbon_premium_pct: f64, // increase over baseline embodied carbon
    pub insight: Option<String>,
}

/// Embodied carbon after applying a tier's premium
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarbonImpact {
    pub baseline: f64,
    pub total: f64,
    pub premium_pct: f64,
}

/// Everything displayed for a selected zone
#[derive(Debug, Clone)]
pub struct SiteAssessment {
    pub site: Site,
    pub score: RiskScore,
    pub recommendation: Recommendation,
    pub carbon: Option<CarbonImpact>,
    pub display_decimals: u32,
}

/// Round half away from zero; `-0.0` collapses to `0.0`
pub(crate) fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor + 0.0
}

/// Every displayed number goes through here so ties round the same way
pub fn format_rounded(value: f64, decimals: u32) -> String {
    format!("{:.*}", decimals as usize, round_to(value, decimals))
}
