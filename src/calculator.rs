//! Risk scoring and material recommendation logic

use std::fmt;

use once_cell::sync::Lazy;

use crate::config::{InputRanges, ScoringConfig};
use crate::error::{Result, ScoringError};
use crate::models::{
    CarbonImpact, Recommendation, RiskScore, RiskTier, Site, SiteAssessment, format_rounded,
};

static CANONICAL: Lazy<ScoringConfig> = Lazy::new(ScoringConfig::default);

/// Compute the Value of Risk for a site
///
/// `vor = fuel_density * slope_degrees / 100`, unrounded. Total over all
/// inputs; use [`compute_vor_checked`] to reject out-of-range values.
pub fn compute_vor(fuel_density: f64, slope_degrees: f64) -> RiskScore {
    RiskScore::new(fuel_density * slope_degrees / 100.0)
}

/// Same as [`compute_vor`] but rejects inputs outside `ranges`
pub fn compute_vor_checked(
    fuel_density: f64,
    slope_degrees: f64,
    ranges: &InputRanges,
) -> Result<RiskScore> {
    for (field, value, range) in [
        ("fuel_density", fuel_density, ranges.fuel_density),
        ("slope_degrees", slope_degrees, ranges.slope_degrees),
    ] {
        if !range.contains(value) {
            return Err(ScoringError::InvalidInput {
                field,
                value,
                min: range.min,
                max: range.max,
            });
        }
    }
    Ok(compute_vor(fuel_density, slope_degrees))
}

/// Classify a VOR value with the canonical thresholds
pub fn classify(vor: f64) -> Recommendation {
    classify_with(vor, &CANONICAL)
}

/// Classify a VOR value; strict comparisons, highest tier checked first
pub fn classify_with(vor: f64, config: &ScoringConfig) -> Recommendation {
    let tier = if vor > config.thresholds.critical {
        RiskTier::Critical
    } else if vor > config.thresholds.elevated {
        RiskTier::Elevated
    } else {
        RiskTier::Nominal
    };

    let spec = config.tiers.get(tier);
    Recommendation {
        tier,
        material_spec: spec.material_spec.clone(),
        material_detail: spec.material_detail.clone(),
        carbon_premium_pct: spec.carbon_premium_pct,
        insight: spec.insight.clone(),
    }
}

/// Embodied carbon for a baseline once the tier's premium is applied
pub fn compute_carbon_impact(base_carbon: f64, tier: RiskTier) -> CarbonImpact {
    compute_carbon_impact_with(base_carbon, tier, &CANONICAL)
}

pub fn compute_carbon_impact_with(
    base_carbon: f64,
    tier: RiskTier,
    config: &ScoringConfig,
) -> CarbonImpact {
    let spec = config.tiers.get(tier);
    CarbonImpact {
        baseline: base_carbon,
        total: base_carbon * spec.carbon_multiplier(),
        premium_pct: spec.carbon_premium_pct,
    }
}

/// Score a site and derive its recommendation and carbon impact
pub fn assess_site(site: &Site, config: &ScoringConfig) -> SiteAssessment {
    let score = compute_vor(site.fuel_density, site.slope_degrees);
    let recommendation = classify_with(score.value(), config);
    let carbon = site
        .base_carbon
        .map(|base| compute_carbon_impact_with(base, recommendation.tier, config));

    SiteAssessment {
        site: site.clone(),
        score,
        recommendation,
        carbon,
        display_decimals: config.display_decimals,
    }
}

impl SiteAssessment {
    /// Drop the embodied carbon section from the report
    pub fn without_carbon(mut self) -> Self {
        self.carbon = None;
        self
    }
}

impl fmt::Display for CarbonImpact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} kgCO2e/m2 (+{}% risk premium over {})",
            format_rounded(self.total, 1),
            format_rounded(self.premium_pct, 0),
            format_rounded(self.baseline, 1)
        )
    }
}

impl fmt::Display for SiteAssessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Spec Analysis: {} ===", self.site.zone_name)?;
        writeln!(
            f,
            "VOR (Value of Risk): {}",
            self.score.formatted(self.display_decimals)
        )?;
        writeln!(f, "Risk tier: {}", self.recommendation.tier)?;
        writeln!(f)?;

        writeln!(f, "Recommended material:")?;
        writeln!(f, "  {}", self.recommendation.material_spec)?;
        if !self.recommendation.material_detail.is_empty() {
            writeln!(f, "  ({})", self.recommendation.material_detail)?;
        }
        writeln!(f)?;

        if let Some(carbon) = &self.carbon {
            writeln!(f, "Embodied carbon:")?;
            writeln!(f, "  {}", carbon)?;
            if let Some(insight) = self
                .recommendation
                .insight
                .as_deref()
                .filter(|i| !i.is_empty())
            {
                writeln!(f, "  Insight: {}", insight)?;
            }
            writeln!(f)?;
        }

        write!(
            f,
            "Spatial inputs: Fuel {}% | Slope {}°",
            self.site.fuel_density, self.site.slope_degrees
        )
    }
}
