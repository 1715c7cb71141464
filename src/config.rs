//! Scoring configuration
//!
//! Thresholds, tier materials and carbon premiums live in one record so
//! that tuning them is a config change. The defaults are the canonical
//! Los Angeles WUI table; a TOML file may override any subset of keys.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::models::RiskTier;

const MAX_DISPLAY_DECIMALS: u32 = 6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub display_decimals: u32,
    pub thresholds: Thresholds,
    pub tiers: TierSpecs,
    pub input_ranges: InputRanges,
}

/// VOR cutoffs; a tier applies when VOR is strictly greater than its cutoff
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub elevated: f64,
    pub critical: f64,
}

/// Per-tier materials; keys missing from a config keep the canonical values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "TierSpecsPatch")]
pub struct TierSpecs {
    pub nominal: TierSpec,
    pub elevated: TierSpec,
    pub critical: TierSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierSpec {
    pub material_spec: String,
    pub material_detail: String,
    pub carbon_premium_pct: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insight: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "InputRangesPatch")]
pub struct InputRanges {
    pub fuel_density: ValueRange,
    pub slope_degrees: ValueRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TierSpecsPatch {
    nominal: TierSpecPatch,
    elevated: TierSpecPatch,
    critical: TierSpecPatch,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TierSpecPatch {
    material_spec: Option<String>,
    material_detail: Option<String>,
    carbon_premium_pct: Option<f64>,
    insight: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct InputRangesPatch {
    fuel_density: RangePatch,
    slope_degrees: RangePatch,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RangePatch {
    min: Option<f64>,
    max: Option<f64>,
}

impl TierSpecPatch {
    fn apply(self, base: TierSpec) -> TierSpec {
        TierSpec {
            material_spec: self.material_spec.unwrap_or(base.material_spec),
            material_detail: self.material_detail.unwrap_or(base.material_detail),
            carbon_premium_pct: self.carbon_premium_pct.unwrap_or(base.carbon_premium_pct),
            insight: self.insight.or(base.insight),
        }
    }
}

impl From<TierSpecsPatch> for TierSpecs {
    fn from(patch: TierSpecsPatch) -> Self {
        let base = TierSpecs::default();
        Self {
            nominal: patch.nominal.apply(base.nominal),
            elevated: patch.elevated.apply(base.elevated),
            critical: patch.critical.apply(base.critical),
        }
    }
}

impl RangePatch {
    fn apply(self, base: ValueRange) -> ValueRange {
        ValueRange {
            min: self.min.unwrap_or(base.min),
            max: self.max.unwrap_or(base.max),
        }
    }
}

impl From<InputRangesPatch> for InputRanges {
    fn from(patch: InputRangesPatch) -> Self {
        let base = InputRanges::default();
        Self {
            fuel_density: patch.fuel_density.apply(base.fuel_density),
            slope_degrees: patch.slope_degrees.apply(base.slope_degrees),
        }
    }
}

impl ValueRange {
    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            display_decimals: 1,
            thresholds: Thresholds::default(),
            tiers: TierSpecs::default(),
            input_ranges: InputRanges::default(),
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            elevated: 15.0,
            critical: 30.0,
        }
    }
}

impl Default for TierSpecs {
    fn default() -> Self {
        Self {
            nominal: TierSpec {
                material_spec: "Standard timber framing".to_string(),
                material_detail: "FSC-certified timber, WUI code compliant".to_string(),
                carbon_premium_pct: 0.0,
                insight: None,
            },
            elevated: TierSpec {
                material_spec: "Ignition-resistant assembly".to_string(),
                material_detail: "Fiber cement / limestone-based siding + 1/8\" ember mesh"
                    .to_string(),
                carbon_premium_pct: 15.0,
                insight: None,
            },
            critical: TierSpec {
                material_spec: "Non-combustible assembly".to_string(),
                material_detail: "LC3 cement + mineral wool".to_string(),
                carbon_premium_pct: 45.0,
                insight: Some(
                    "Switch to a bio-based intumescent coating to cut embodied carbon by 15% \
                     without changing the VOR tier"
                        .to_string(),
                ),
            },
        }
    }
}

impl Default for InputRanges {
    fn default() -> Self {
        Self {
            fuel_density: ValueRange { min: 0.0, max: 100.0 },
            slope_degrees: ValueRange { min: 0.0, max: 90.0 },
        }
    }
}

impl TierSpec {
    /// Factor applied to baseline embodied carbon
    pub fn carbon_multiplier(&self) -> f64 {
        1.0 + self.carbon_premium_pct / 100.0
    }
}

impl TierSpecs {
    pub fn get(&self, tier: RiskTier) -> &TierSpec {
        match tier {
            RiskTier::Nominal => &self.nominal,
            RiskTier::Elevated => &self.elevated,
            RiskTier::Critical => &self.critical,
        }
    }
}

impl ScoringConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ScoringConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "loading scoring config");
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let Thresholds { elevated, critical } = self.thresholds;
        if !elevated.is_finite() || !critical.is_finite() {
            return Err(ConfigError::Invalid("thresholds must be finite".to_string()));
        }
        if elevated >= critical {
            return Err(ConfigError::Invalid(format!(
                "elevated threshold ({elevated}) must be below critical threshold ({critical})"
            )));
        }

        let premiums: Vec<f64> = RiskTier::ALL
            .iter()
            .map(|&tier| self.tiers.get(tier).carbon_premium_pct)
            .collect();
        if premiums.iter().any(|p| !p.is_finite() || *p < 0.0) {
            return Err(ConfigError::Invalid(
                "carbon premiums must be non-negative".to_string(),
            ));
        }
        if premiums.windows(2).any(|w| w[0] > w[1]) {
            return Err(ConfigError::Invalid(
                "carbon premiums must not decrease as risk rises".to_string(),
            ));
        }

        for (name, range) in [
            ("fuel_density", self.input_ranges.fuel_density),
            ("slope_degrees", self.input_ranges.slope_degrees),
        ] {
            if !(range.min < range.max) {
                return Err(ConfigError::Invalid(format!(
                    "{name} range min ({}) must be below max ({})",
                    range.min, range.max
                )));
            }
        }

        if self.display_decimals > MAX_DISPLAY_DECIMALS {
            return Err(ConfigError::Invalid(format!(
                "display_decimals must be at most {MAX_DISPLAY_DECIMALS}"
            )));
        }

        Ok(())
    }
}
