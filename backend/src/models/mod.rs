pub mod coastal;
pub mod drift;
pub mod filter;
pub mod geo;

pub use coastal::*;
pub use drift::*;
pub use filter::*;
pub use geo::*;
