//! User filter selections passed through from the UI shell.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::coastal::{CoastalRegistry, CoastalSite};
use super::drift::DriftStep;
use super::geo::GeoPoint;

/// Which steps of a series are shown.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SiteFilter {
    /// Every step is shown
    #[default]
    All,
    /// Only steps whose site tag equals the given tag
    Location { tag: String },
    /// Only steps inside a lat/lon box centred on a coastal site
    Vicinity { center: GeoPoint, radius_deg: f64 },
}

impl SiteFilter {
    /// Interpret a raw selection value: empty means "all sites", anything
    /// else is matched against the steps' site tag.
    pub fn from_selection(selection: &str) -> Self {
        let selection = selection.trim();
        if selection.is_empty() {
            SiteFilter::All
        } else {
            SiteFilter::Location {
                tag: selection.to_string(),
            }
        }
    }

    pub fn vicinity_of(site: &CoastalSite) -> Self {
        SiteFilter::Vicinity {
            center: site.position(),
            radius_deg: site.vicinity_radius_deg,
        }
    }

    /// Vicinity filter for a registered site slug, if the slug is known.
    pub fn vicinity_of_slug(registry: &CoastalRegistry, slug: &str) -> Option<Self> {
        registry.find_by_slug(slug).map(Self::vicinity_of)
    }

    pub fn matches(&self, step: &DriftStep) -> bool {
        match self {
            SiteFilter::All => true,
            SiteFilter::Location { tag } => step.location() == tag,
            SiteFilter::Vicinity { center, radius_deg } => {
                let p = step.position();
                (p.latitude - center.latitude).abs() <= *radius_deg
                    && (p.longitude - center.longitude).abs() <= *radius_deg
            }
        }
    }
}

/// Inclusive date window selected in the UI.
///
/// Samples carry no date, so this range is recorded but has no effect on
/// what is rendered or computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn single_day(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }
}

/// Complete filter state held by the animation controller.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterState {
    pub site: SiteFilter,
    #[serde(default)]
    pub date_range: Option<DateRange>,
}
