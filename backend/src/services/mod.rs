//! Service layer: the geospatial derivation and visual-density engine.
//!
//! Services sit between the data source and the render surface. Apart from
//! [`session`], which awaits the provider, they are synchronous and pure.

pub mod adapter;
pub mod animation;
pub mod density_field;
pub mod impact;
pub mod session;
pub mod statistics;

pub use adapter::{adapt, density_for_area, fallback_series, FALLBACK_TAG, PREDICTION_TAG};
pub use animation::{AnimationController, AnimationState, STEP_PERIOD};
pub use density_field::{
    color_for_density, generate_field, particle_count, spread_radius_meters, Color, Particle,
    ParticleKind,
};
pub use impact::{affected_sites, AffectedSite};
pub use session::{load_into, load_series};
pub use statistics::{compute_statistics, DerivedStatistics, RiskTier, SiteRisk};
