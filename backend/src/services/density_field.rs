//! Density field generator.
//!
//! Converts a concentration sample into a randomised two-layer particle
//! cloud around its centre. The cloud size grows with the biomass area and
//! the colour darkens with density.
//!
//! The generator is non-deterministic by nature; callers inject the RNG so a
//! seeded [`rand::rngs::StdRng`] gives reproducible frames.

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::f64::consts::TAU;
use std::fmt;

use crate::models::{ConcentrationSample, GeoPoint};

/// Number of particle layers drawn per sample.
pub const LAYER_COUNT: usize = 2;
/// Micro-particles attached to a decorated primary particle.
pub const MICRO_PER_PARTICLE: usize = 3;

/// Particles in layer 0 for a biomass area in km².
pub fn particle_count(area_km2: f64) -> usize {
    if area_km2 <= 0.0 {
        10
    } else if area_km2 < 15.0 {
        80
    } else if area_km2 < 25.0 {
        150
    } else if area_km2 < 30.0 {
        220
    } else if area_km2 < 35.0 {
        300
    } else {
        400
    }
}

/// Radius in metres over which the particles of layer 0 are spread.
pub fn spread_radius_meters(area_km2: f64) -> f64 {
    if area_km2 <= 0.0 {
        100.0
    } else if area_km2 < 15.0 {
        2000.0
    } else if area_km2 < 25.0 {
        2800.0
    } else if area_km2 < 30.0 {
        3200.0
    } else if area_km2 < 35.0 {
        3600.0
    } else {
        4000.0
    }
}

/// RGB colour, serialised as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);

    /// Subtract `amount` from each channel, clamping at 0.
    pub fn darker(self, amount: u8) -> Self {
        Self {
            r: self.r.saturating_sub(amount),
            g: self.g.saturating_sub(amount),
            b: self.b.saturating_sub(amount),
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid colour '{}'", s)))
    }
}

/// Four-band sargassum palette, darkest at density ≥ 80.
pub fn color_for_density(density: u8) -> Color {
    if density < 40 {
        Color::rgb(0x9B, 0x8F, 0x6B)
    } else if density < 60 {
        Color::rgb(0x7A, 0x6E, 0x4E)
    } else if density < 80 {
        Color::rgb(0x5C, 0x50, 0x39)
    } else {
        Color::rgb(0x3E, 0x35, 0x26)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticleKind {
    Primary,
    Micro,
}

/// One rendered dot of a density field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub position: GeoPoint,
    pub radius_px: f64,
    pub fill_color: Color,
    /// Outline colour; micro-particles have no outline
    pub stroke_color: Option<Color>,
    pub fill_opacity: f64,
    pub layer: usize,
    pub kind: ParticleKind,
}

/// Synthesise the particle cloud of one sample.
///
/// Layer `l` holds `particle_count / (l + 1)` particles spread over
/// `spread_radius_m * (1 - 0.2 l)`. About 30 % of the layer-0 particles get
/// three micro-particles next to them.
pub fn generate_field<R: Rng>(
    sample: &ConcentrationSample,
    particle_count: usize,
    spread_radius_m: f64,
    rng: &mut R,
) -> Vec<Particle> {
    let center = sample.position();
    let fill_color = color_for_density(sample.density);
    let stroke_color = fill_color.darker(30);

    let mut particles = Vec::with_capacity(particle_count * 3);

    for layer in 0..LAYER_COUNT {
        let layer_count = particle_count / (layer + 1);
        let layer_radius = spread_radius_m * (1.0 - layer as f64 * 0.2);

        for _ in 0..layer_count {
            let angle = rng.gen::<f64>() * TAU;
            let distance = rng.gen::<f64>() * layer_radius;
            let position =
                center.offset_by_meters(distance * angle.cos(), distance * angle.sin());
            let radius_px = (2 - layer) as f64 * rng.gen_range(6.0..12.0);

            particles.push(Particle {
                position,
                radius_px,
                fill_color,
                stroke_color: Some(stroke_color),
                fill_opacity: rng.gen_range(0.5..0.8),
                layer,
                kind: ParticleKind::Primary,
            });

            if layer == 0 && rng.gen::<f64>() > 0.7 {
                // The micro offset reuses the pixel radius as metres.
                let micro_distance = radius_px * 0.4;
                for _ in 0..MICRO_PER_PARTICLE {
                    let micro_angle = rng.gen::<f64>() * TAU;
                    particles.push(Particle {
                        position: position.offset_by_meters(
                            micro_distance * micro_angle.cos(),
                            micro_distance * micro_angle.sin(),
                        ),
                        radius_px: rng.gen_range(2.0..5.0),
                        fill_color,
                        stroke_color: None,
                        fill_opacity: rng.gen_range(0.4..0.6),
                        layer,
                        kind: ParticleKind::Micro,
                    });
                }
            }
        }
    }

    particles
}
