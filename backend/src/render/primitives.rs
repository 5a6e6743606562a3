//! Draw commands understood by a [`RenderSurface`](super::RenderSurface).

use serde::{Deserialize, Serialize};

use crate::models::GeoPoint;
use crate::services::density_field::Color;

/// Where a tooltip opens relative to its shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    #[default]
    Top,
    Bottom,
    Left,
    Right,
    Center,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tooltip {
    /// Plain text, one line per `\n`
    pub content: String,
    pub placement: Placement,
    /// Shown without hovering
    pub permanent: bool,
    /// Pixel offset from the anchor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_px: Option<(i32, i32)>,
}

impl Tooltip {
    pub fn hover(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            placement: Placement::Top,
            permanent: false,
            offset_px: None,
        }
    }

    pub fn permanent(content: impl Into<String>) -> Self {
        Self {
            permanent: true,
            ..Self::hover(content)
        }
    }

    pub fn with_offset(mut self, x: i32, y: i32) -> Self {
        self.offset_px = Some((x, y));
        self
    }
}

/// Visual style of a shape. `None` colours are transparent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub stroke: Option<Color>,
    pub weight: f64,
    pub opacity: f64,
    pub fill: Option<Color>,
    pub fill_opacity: f64,
    /// Dash pattern in pixels, e.g. `"10, 10"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dash_array: Option<String>,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            stroke: None,
            weight: 0.0,
            opacity: 1.0,
            fill: None,
            fill_opacity: 0.0,
            dash_array: None,
        }
    }
}

impl Style {
    pub fn stroke(color: Color, weight: f64) -> Self {
        Self {
            stroke: Some(color),
            weight,
            ..Default::default()
        }
    }

    pub fn filled(color: Color, fill_opacity: f64) -> Self {
        Self {
            fill: Some(color),
            fill_opacity,
            ..Default::default()
        }
    }

    pub fn with_fill(mut self, color: Color, fill_opacity: f64) -> Self {
        self.fill = Some(color);
        self.fill_opacity = fill_opacity;
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn dashed(mut self, pattern: &str) -> Self {
        self.dash_array = Some(pattern.to_string());
        self
    }

    /// Fully transparent, used for hover anchors.
    pub fn invisible() -> Self {
        Self {
            opacity: 0.0,
            ..Default::default()
        }
    }
}

/// One shape to draw at geographic coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum DrawCommand {
    Polyline {
        points: Vec<GeoPoint>,
        style: Style,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tooltip: Option<Tooltip>,
    },
    /// Circle with a radius in screen pixels
    CircleMarker {
        center: GeoPoint,
        radius_px: f64,
        style: Style,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tooltip: Option<Tooltip>,
    },
    /// Circle with a radius in metres on the ground
    Circle {
        center: GeoPoint,
        radius_m: f64,
        style: Style,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tooltip: Option<Tooltip>,
    },
    Polygon {
        points: Vec<GeoPoint>,
        style: Style,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tooltip: Option<Tooltip>,
    },
    LabelMarker {
        position: GeoPoint,
        text: String,
        style: Style,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tooltip: Option<Tooltip>,
    },
}

impl DrawCommand {
    pub fn tooltip(&self) -> Option<&Tooltip> {
        match self {
            DrawCommand::Polyline { tooltip, .. }
            | DrawCommand::CircleMarker { tooltip, .. }
            | DrawCommand::Circle { tooltip, .. }
            | DrawCommand::Polygon { tooltip, .. }
            | DrawCommand::LabelMarker { tooltip, .. } => tooltip.as_ref(),
        }
    }
}
