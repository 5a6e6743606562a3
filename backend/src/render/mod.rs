//! Map rendering: what to draw, never how pixels are produced.

pub mod primitives;
pub mod scene;
pub mod surface;

pub use primitives::{DrawCommand, Placement, Style, Tooltip};
pub use scene::{arrow_head, fit_to_filtered, RenderOptions, SceneComposer, FIT_PADDING_PX};
pub use surface::{NullSurface, Recording, RecordingSurface, RenderSurface};
