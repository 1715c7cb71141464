use std::io::Write;

use tempfile::NamedTempFile;
use vor_calculator::{
    ConfigError, RiskTier, ScoringConfig, assess_site, classify, classify_with, compute_vor, sites,
};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn canonical_scenarios() {
    let cases = [
        (95.0, 40.0, 38.0, RiskTier::Critical, "Non-combustible assembly", 45.0),
        (75.0, 35.0, 26.25, RiskTier::Elevated, "Ignition-resistant assembly", 15.0),
        (60.0, 22.0, 13.2, RiskTier::Nominal, "Standard timber framing", 0.0),
        (10.0, 2.0, 0.2, RiskTier::Nominal, "Standard timber framing", 0.0),
        (0.0, 0.0, 0.0, RiskTier::Nominal, "Standard timber framing", 0.0),
    ];

    for (fuel, slope, vor, tier, material, premium) in cases {
        let score = compute_vor(fuel, slope);
        assert_close(score.value(), vor);

        let rec = classify(score.value());
        assert_eq!(rec.tier, tier, "fuel={fuel} slope={slope}");
        assert_eq!(rec.material_spec, material);
        assert_eq!(rec.carbon_premium_pct, premium);
    }
}

#[test]
fn vor_matches_formula_exactly() {
    for fuel in [0.0, 12.5, 33.0, 60.0, 99.9, 100.0] {
        for slope in [0.0, 1.0, 17.5, 45.0, 90.0] {
            assert_eq!(compute_vor(fuel, slope).value(), fuel * slope / 100.0);
        }
    }
}

// Arithmetic symmetry only; fuel and slope are not interchangeable inputs.
#[test]
fn vor_is_arithmetically_symmetric() {
    assert_eq!(compute_vor(75.0, 30.0).value(), compute_vor(30.0, 75.0).value());
}

#[test]
fn classification_is_monotonic() {
    let mut previous = classify(-5.0).tier;
    let mut vor = -5.0;
    while vor <= 95.0 {
        let tier = classify(vor).tier;
        assert!(tier >= previous, "tier dropped at vor={vor}");
        previous = tier;
        vor += 0.25;
    }
    assert_eq!(previous, RiskTier::Critical);
}

#[test]
fn zone_table_assessments() {
    let expected = [
        ("Malibu / Santa Monica Mtns", 38.0, RiskTier::Critical, 304.5),
        ("Hollywood Hills", 22.5, RiskTier::Elevated, 207.0),
        ("Pasadena Foothills", 13.2, RiskTier::Nominal, 150.0),
        ("Downtown LA", 0.2, RiskTier::Nominal, 90.0),
    ];
    let config = ScoringConfig::default();

    for (zone, vor, tier, carbon) in expected {
        let site = sites::require(zone).unwrap();
        let assessment = assess_site(site, &config);
        assert_close(assessment.score.value(), vor);
        assert_eq!(assessment.recommendation.tier, tier);
        assert_close(assessment.carbon.unwrap().total, carbon);
    }
}

#[test]
fn config_file_changes_classification() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[thresholds]
elevated = 10.0
critical = 20.0

[tiers.critical]
material_spec = "Ultra-High Performance Concrete"
material_detail = "Intumescent coating"
carbon_premium_pct = 40.0
"#
    )
    .unwrap();

    let config = ScoringConfig::load(file.path()).unwrap();
    let site = sites::require("Hollywood Hills").unwrap();
    let assessment = assess_site(site, &config);

    assert_eq!(assessment.recommendation.tier, RiskTier::Critical);
    assert_eq!(
        assessment.recommendation.material_spec,
        "Ultra-High Performance Concrete"
    );
    assert_close(assessment.carbon.unwrap().total, 252.0);
    assert_eq!(classify_with(15.0, &config).tier, RiskTier::Elevated);
}

#[test]
fn missing_config_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ScoringConfig::load(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn written_default_config_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vor_config.toml");
    std::fs::write(&path, ScoringConfig::default().to_toml_string().unwrap()).unwrap();

    assert_eq!(ScoringConfig::load(&path).unwrap(), ScoringConfig::default());
}
