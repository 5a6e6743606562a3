use super::*;
use crate::models::{CoastalSite, Intensity};

fn sample_at(lat: f64, lon: f64, area: f64) -> ConcentrationSample {
    ConcentrationSample {
        latitude: lat,
        longitude: lon,
        area_km2: area,
        density: 50,
        intensity: Intensity::Low,
        location: "test".to_string(),
    }
}

#[test]
fn test_empty_sequence() {
    let registry = CoastalRegistry::yucatan_peninsula();
    let stats = compute_statistics(&[], &registry);

    assert_eq!(stats.total_biomass_km2, 0.0);
    assert_eq!(stats.high_risk_site_count, 0);
    assert!(stats.top_affected_sites.is_empty());
    assert_eq!(stats.monitored_site_count, 18);
}

#[test]
fn test_total_biomass_is_exact_sum() {
    let registry = CoastalRegistry::yucatan_peninsula();
    let samples = vec![
        sample_at(21.0, -86.0, 10.0),
        sample_at(21.0, -86.1, 20.0),
        sample_at(21.1619, -86.8515, 30.0),
    ];
    let stats = compute_statistics(&samples, &registry);
    assert_eq!(stats.total_biomass_km2, 60.0);
}

#[test]
fn test_terminal_at_cancun() {
    let registry = CoastalRegistry::yucatan_peninsula();
    let samples = vec![sample_at(21.5, -86.0, 12.0), sample_at(21.1619, -86.8515, 40.0)];
    let stats = compute_statistics(&samples, &registry);

    let first = &stats.top_affected_sites[0];
    assert_eq!(first.name, "Cancún");
    assert_eq!(first.distance_km, 0.0);
    assert_eq!(first.risk_tier, RiskTier::High);
    assert_eq!(first.density, 95);
    assert_eq!(first.biomass_share_km2, 40.0);

    assert_eq!(stats.top_affected_sites.len(), TOP_SITE_COUNT);
    assert!(stats
        .top_affected_sites
        .windows(2)
        .all(|w| w[0].distance_km <= w[1].distance_km));
    assert!(stats.high_risk_site_count >= 1);
}

#[test]
fn test_tier_boundaries() {
    assert_eq!(RiskTier::from_distance(0.0), RiskTier::High);
    assert_eq!(RiskTier::from_distance(29.9), RiskTier::High);
    assert_eq!(RiskTier::from_distance(30.0), RiskTier::Medium);
    assert_eq!(RiskTier::from_distance(59.9), RiskTier::Medium);
    assert_eq!(RiskTier::from_distance(60.0), RiskTier::Low);
}

#[test]
fn test_small_registry_limits_top_sites() {
    let registry = CoastalRegistry::new(vec![
        CoastalSite::new("A", "R", 21.0, -87.0, "a"),
        CoastalSite::new("B", "R", 21.5, -87.0, "b"),
    ]);
    let stats = compute_statistics(&[sample_at(21.0, -87.0, 5.0)], &registry);
    assert_eq!(stats.top_affected_sites.len(), 2);
    assert_eq!(stats.monitored_site_count, 2);
}

#[test]
fn test_far_sites_floor_share_and_density() {
    // B sits roughly 222 km north of the arrival point.
    let registry = CoastalRegistry::new(vec![CoastalSite::new("B", "R", 23.0, -87.0, "b")]);
    let stats = compute_statistics(&[sample_at(21.0, -87.0, 50.0)], &registry);

    let b = &stats.top_affected_sites[0];
    assert!(b.distance_km > 200.0);
    assert_eq!(b.biomass_share_km2, 0.0);
    assert_eq!(b.density, 30);
    assert_eq!(b.risk_tier, RiskTier::Low);
    assert_eq!(stats.high_risk_site_count, 0);
}

#[test]
fn test_share_is_rounded_to_two_decimals() {
    let registry = CoastalRegistry::new(vec![CoastalSite::new("A", "R", 21.1, -87.0, "a")]);
    let stats = compute_statistics(&[sample_at(21.0, -87.0, 33.333)], &registry);
    let share = stats.top_affected_sites[0].biomass_share_km2;
    assert_eq!(share, (share * 100.0).round() / 100.0);
}

#[test]
fn test_only_terminal_sample_drives_risk() {
    let registry = CoastalRegistry::yucatan_peninsula();
    // An early sample right on Chetumal must not affect the ranking.
    let samples = vec![
        sample_at(18.5001, -88.2962, 100.0),
        sample_at(21.1619, -86.8515, 10.0),
    ];
    let stats = compute_statistics(&samples, &registry);
    assert_eq!(stats.top_affected_sites[0].name, "Cancún");
    assert!(stats.top_affected_sites.iter().all(|s| s.name != "Chetumal"));
}
