//! Statistics aggregator.
//!
//! Risk is scored from the terminal (arrival) sample only: every registered
//! site is ranked by its distance to that single point.

use serde::{Deserialize, Serialize};

use crate::models::{distance_km, CoastalRegistry, ConcentrationSample};

/// Sites closer than this to the arrival point count as high risk.
pub const HIGH_RISK_RADIUS_KM: f64 = 100.0;
/// Number of sites reported in [`DerivedStatistics::top_affected_sites`].
pub const TOP_SITE_COUNT: usize = 4;
/// Distance at which a site's biomass share reaches zero.
pub const BIOMASS_FALLOFF_KM: f64 = 200.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    High,
    Medium,
    Low,
}

impl RiskTier {
    /// `High` under 30 km, `Medium` under 60 km, `Low` otherwise.
    pub fn from_distance(distance_km: f64) -> Self {
        if distance_km < 30.0 {
            RiskTier::High
        } else if distance_km < 60.0 {
            RiskTier::Medium
        } else {
            RiskTier::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::High => "High",
            RiskTier::Medium => "Medium",
            RiskTier::Low => "Low",
        }
    }
}

/// Risk entry for one of the sites nearest to the arrival point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteRisk {
    pub name: String,
    pub region: String,
    pub distance_km: f64,
    pub biomass_share_km2: f64,
    pub density: u8,
    pub risk_tier: RiskTier,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DerivedStatistics {
    pub total_biomass_km2: f64,
    pub high_risk_site_count: usize,
    pub top_affected_sites: Vec<SiteRisk>,
    pub monitored_site_count: usize,
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Aggregate statistics for a full, chronologically ordered sample sequence.
///
/// An empty sequence yields zero totals and no ranked sites.
pub fn compute_statistics<'a, I>(samples: I, registry: &CoastalRegistry) -> DerivedStatistics
where
    I: IntoIterator<Item = &'a ConcentrationSample>,
{
    let mut total_biomass_km2 = 0.0;
    let mut terminal: Option<&ConcentrationSample> = None;
    for sample in samples {
        total_biomass_km2 += sample.area_km2;
        terminal = Some(sample);
    }

    let Some(terminal) = terminal else {
        return DerivedStatistics {
            monitored_site_count: registry.len(),
            ..Default::default()
        };
    };

    let arrival = terminal.position();
    let terminal_area = terminal.area_km2.max(0.0);

    let mut ranked: Vec<(f64, usize)> = registry
        .sites()
        .iter()
        .enumerate()
        .map(|(i, site)| (distance_km(site.position(), arrival), i))
        .collect();

    let high_risk_site_count = ranked
        .iter()
        .filter(|(d, _)| *d <= HIGH_RISK_RADIUS_KM)
        .count();

    ranked.sort_by(|a, b| a.0.total_cmp(&b.0));

    let top_affected_sites = ranked
        .iter()
        .take(TOP_SITE_COUNT)
        .map(|&(d, i)| {
            let site = &registry.sites()[i];
            let share = (terminal_area * (1.0 - d / BIOMASS_FALLOFF_KM)).max(0.0);
            SiteRisk {
                name: site.name.clone(),
                region: site.region.clone(),
                distance_km: d,
                biomass_share_km2: round_to(share, 2),
                density: (100.0 - d).clamp(30.0, 95.0).round() as u8,
                risk_tier: RiskTier::from_distance(d),
            }
        })
        .collect();

    let stats = DerivedStatistics {
        total_biomass_km2,
        high_risk_site_count,
        top_affected_sites,
        monitored_site_count: registry.len(),
    };

    log::info!(
        "Statistics: {:.2} km² total biomass, {} of {} sites within {} km of arrival",
        stats.total_biomass_km2,
        stats.high_risk_site_count,
        stats.monitored_site_count,
        HIGH_RISK_RADIUS_KM
    );
    stats
}

#[cfg(test)]
#[path = "statistics_tests.rs"]
mod statistics_tests;
