pub mod marker;
pub mod store;

pub use marker::{Glyph, Marker, MarkerCategory, MarkerId};
pub use store::MarkerStore;
