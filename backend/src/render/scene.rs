//! Scene composition: which shapes make up one animation frame.
//!
//! A frame consists of, in draw order:
//! 1. every filtered trajectory as a dashed polyline,
//! 2. for each filtered step up to the current one with biomass: the impact
//!    overlay (terminal step only, when the animation sits on it), the
//!    particle field, a translucent background circle and a hover anchor.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_6;
use std::fmt::Write as _;
use std::sync::Arc;

use super::primitives::{DrawCommand, Style, Tooltip};
use super::surface::RenderSurface;
use crate::models::{
    split_trajectories, CoastalRegistry, ConcentrationSample, DriftSeries, DriftStep, GeoBounds,
    GeoPoint, SiteFilter,
};
use crate::services::density_field::{
    color_for_density, generate_field, particle_count, spread_radius_meters, Color, Particle,
    ParticleKind,
};
use crate::services::impact::{affected_sites, AffectedSite, IMPACT_RADIUS_FACTOR};

/// Viewport padding used when fitting to a trajectory.
pub const FIT_PADDING_PX: u32 = 50;

/// Arrow head size in degrees.
const ARROW_SIZE_DEG: f64 = 0.015;

const IMPACT_FILL: Color = Color::rgb(0xef, 0x44, 0x44);
const IMPACT_STROKE: Color = Color::rgb(0xdc, 0x26, 0x26);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Draw marker, label, connector and arrow for each affected site
    #[serde(default)]
    pub mark_affected_sites: bool,
    /// Particle RNG seed; entropy-seeded when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

impl From<&crate::config::RenderSettings> for RenderOptions {
    fn from(settings: &crate::config::RenderSettings) -> Self {
        Self {
            mark_affected_sites: settings.mark_affected_sites,
            seed: settings.seed,
        }
    }
}

/// Builds frame draw lists from a drift series.
pub struct SceneComposer {
    registry: Arc<CoastalRegistry>,
    options: RenderOptions,
    rng: StdRng,
}

impl SceneComposer {
    pub fn new(registry: Arc<CoastalRegistry>, options: RenderOptions) -> Self {
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            registry,
            options,
            rng,
        }
    }

    pub fn options(&self) -> RenderOptions {
        self.options
    }

    /// Draw list for the frame showing `current_step`.
    ///
    /// `current_step` indexes the full series. Steps are shown when they pass
    /// the filter and their index is at most `current_step`.
    pub fn compose_step(
        &mut self,
        series: &DriftSeries,
        filter: &SiteFilter,
        current_step: usize,
    ) -> Vec<DrawCommand> {
        let filtered = series.filtered(filter);
        let mut commands = Vec::new();

        for trajectory in split_trajectories(&filtered) {
            commands.push(DrawCommand::Polyline {
                points: trajectory.positions(),
                style: Style::stroke(Color::BLACK, 3.0)
                    .with_opacity(0.3)
                    .dashed("10, 10"),
                tooltip: None,
            });
        }

        let terminal_index = series.len().checked_sub(1);
        let on_terminal = terminal_index == Some(current_step);

        for step in filtered.iter().filter(|s| s.index <= current_step) {
            if !step.sample.has_biomass() {
                log::trace!("Skipping step {} without biomass", step.index);
                continue;
            }
            let is_arrival = on_terminal && Some(step.index) == terminal_index;
            self.compose_sample(step, is_arrival, &mut commands);
        }

        commands
    }

    /// Clear `surface` and draw the frame for `current_step`.
    pub fn render_step(
        &mut self,
        surface: &mut dyn RenderSurface,
        series: &DriftSeries,
        filter: &SiteFilter,
        current_step: usize,
    ) {
        let commands = self.compose_step(series, filter, current_step);
        log::debug!(
            "Rendering step {} with {} draw commands",
            current_step,
            commands.len()
        );
        surface.clear();
        for command in commands {
            surface.draw(command);
        }
    }

    fn compose_sample(&mut self, step: &DriftStep, is_arrival: bool, out: &mut Vec<DrawCommand>) {
        let sample = &step.sample;
        let spread = spread_radius_meters(sample.area_km2);
        let count = particle_count(sample.area_km2);
        let color = color_for_density(sample.density);

        if is_arrival {
            self.compose_impact(sample, spread, out);
        }

        let field = generate_field(sample, count, spread, &mut self.rng);
        out.extend(field.into_iter().map(particle_command));

        out.push(DrawCommand::Circle {
            center: sample.position(),
            radius_m: spread * 0.9,
            style: Style::filled(color, 0.2),
            tooltip: None,
        });

        out.push(DrawCommand::CircleMarker {
            center: sample.position(),
            radius_px: spread / 10.0,
            style: Style::invisible(),
            tooltip: Some(Tooltip::hover(sample_tooltip(sample))),
        });
    }

    fn compose_impact(&self, sample: &ConcentrationSample, spread: f64, out: &mut Vec<DrawCommand>) {
        let center = sample.position();
        let radius_m = spread * IMPACT_RADIUS_FACTOR;
        let affected = affected_sites(&self.registry, center, radius_m / 1000.0);

        log::info!(
            "Coastal arrival at ({:.4}, {:.4}): {} site(s) within {:.1} km",
            center.latitude,
            center.longitude,
            affected.len(),
            radius_m / 1000.0
        );

        out.push(DrawCommand::Circle {
            center,
            radius_m,
            style: Style::stroke(IMPACT_STROKE, 4.0)
                .with_fill(IMPACT_FILL, 0.2)
                .dashed("15, 10"),
            tooltip: Some(Tooltip::hover(impact_tooltip(sample, radius_m, &affected))),
        });

        out.push(DrawCommand::CircleMarker {
            center,
            radius_px: 20.0,
            style: Style::stroke(Color::WHITE, 5.0).with_fill(IMPACT_FILL, 1.0),
            tooltip: Some(Tooltip::permanent("Coastal arrival").with_offset(0, -25)),
        });

        if self.options.mark_affected_sites {
            for hit in &affected {
                compose_site_marker(center, hit, out);
            }
        }
    }
}

/// Fit the viewport to the filtered steps, if any.
pub fn fit_to_filtered(surface: &mut dyn RenderSurface, series: &DriftSeries, filter: &SiteFilter) {
    let positions: Vec<GeoPoint> = series
        .filtered(filter)
        .iter()
        .map(|s| s.position())
        .collect();
    if let Some(bounds) = GeoBounds::from_points(&positions) {
        surface.fit_bounds(bounds, FIT_PADDING_PX);
    }
}

fn particle_command(p: Particle) -> DrawCommand {
    let style = match p.kind {
        ParticleKind::Primary => p
            .stroke_color
            .map(|c| Style::stroke(c, 0.8))
            .unwrap_or_default()
            .with_fill(p.fill_color, p.fill_opacity),
        ParticleKind::Micro => Style::filled(p.fill_color, p.fill_opacity),
    };
    DrawCommand::CircleMarker {
        center: p.position,
        radius_px: p.radius_px,
        style,
        tooltip: None,
    }
}

fn sample_tooltip(sample: &ConcentrationSample) -> String {
    format!(
        "Sargassum concentration\nArea: {} km²\nDensity: {}%\nLevel: {}",
        sample.area_km2,
        sample.density,
        sample.intensity.label()
    )
}

fn impact_tooltip(sample: &ConcentrationSample, radius_m: f64, affected: &[AffectedSite]) -> String {
    let mut text = format!(
        "Coastal arrival\nImpact area: {} km²\nImpact radius: {:.1} km\nPotentially affected coasts:",
        sample.area_km2,
        radius_m / 1000.0
    );
    if affected.is_empty() {
        text.push_str("\n• Open ocean");
    }
    for hit in affected {
        let _ = write!(
            text,
            "\n• {} ({:.1} km)",
            hit.site.display_name(),
            hit.distance_km
        );
    }
    text
}

/// Triangle pointing at `tip`, coming from `from`.
pub fn arrow_head(from: GeoPoint, tip: GeoPoint) -> [GeoPoint; 3] {
    let angle = (tip.latitude - from.latitude).atan2(tip.longitude - from.longitude);
    let wing = |offset: f64| {
        GeoPoint::new(
            tip.latitude - ARROW_SIZE_DEG * (angle + offset).sin(),
            tip.longitude - ARROW_SIZE_DEG * (angle + offset).cos(),
        )
    };
    [tip, wing(-FRAC_PI_6), wing(FRAC_PI_6)]
}

fn compose_site_marker(center: GeoPoint, hit: &AffectedSite, out: &mut Vec<DrawCommand>) {
    let site_pos = hit.site.position();

    out.push(DrawCommand::CircleMarker {
        center: site_pos,
        radius_px: 15.0,
        style: Style::stroke(Color::WHITE, 4.0).with_fill(IMPACT_STROKE, 1.0),
        tooltip: Some(Tooltip::hover(format!(
            "Affected coast\n{}\n{}\nDistance: {:.1} km",
            hit.site.name, hit.site.region, hit.distance_km
        ))),
    });

    out.push(DrawCommand::LabelMarker {
        position: site_pos,
        text: hit.site.name.clone(),
        style: Style::stroke(Color::WHITE, 2.0).with_fill(IMPACT_STROKE, 1.0),
        tooltip: None,
    });

    out.push(DrawCommand::Polyline {
        points: vec![center, site_pos],
        style: Style::stroke(IMPACT_STROKE, 4.0)
            .with_opacity(0.8)
            .dashed("10, 10"),
        tooltip: None,
    });

    out.push(DrawCommand::Polygon {
        points: arrow_head(center, site_pos).to_vec(),
        style: Style::stroke(IMPACT_STROKE, 2.0).with_fill(IMPACT_STROKE, 1.0),
        tooltip: None,
    });
}
