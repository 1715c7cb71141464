//! Fixed table of residential risk zones
//!
//! The table is built once on first access and is read-only afterwards.

use once_cell::sync::Lazy;

use crate::error::{Result, ScoringError};
use crate::models::Site;

static SITES: Lazy<Vec<Site>> = Lazy::new(|| {
    vec![
        zone("Malibu / Santa Monica Mtns", 95.0, 40.0, 34.07, -118.70, 210.0),
        zone("Hollywood Hills", 75.0, 30.0, 34.12, -118.32, 180.0),
        zone("Pasadena Foothills", 60.0, 22.0, 34.14, -118.14, 150.0),
        zone("Downtown LA", 10.0, 2.0, 34.04, -118.24, 90.0),
    ]
});

fn zone(name: &str, fuel: f64, slope: f64, lat: f64, lon: f64, base_carbon: f64) -> Site {
    Site {
        zone_name: name.to_string(),
        fuel_density: fuel,
        slope_degrees: slope,
        latitude: lat,
        longitude: lon,
        base_carbon: Some(base_carbon),
    }
}

/// All zones in display order
pub fn all() -> &'static [Site] {
    &SITES
}

/// Look up a zone by name, ignoring case and surrounding whitespace
pub fn find(name: &str) -> Option<&'static Site> {
    let wanted = name.trim();
    SITES
        .iter()
        .find(|s| s.zone_name.eq_ignore_ascii_case(wanted))
}

pub fn require(name: &str) -> Result<&'static Site> {
    find(name).ok_or_else(|| ScoringError::UnknownZone(name.trim().to_string()))
}
