//! Viewer-wide defaults. These seed [`crate::core::config::ViewConfig`];
//! the transform engine itself only ever reads the values it was built with.

/// Smallest allowed zoom scale.
pub const MIN_SCALE: f64 = 0.5;

/// Largest allowed zoom scale.
pub const MAX_SCALE: f64 = 4.0;

/// Scale change per wheel delta unit (`-deltaY * sensitivity`).
pub const ZOOM_SENSITIVITY: f64 = 0.001;

/// Multiplicative step used by the +/- zoom buttons.
pub const ZOOM_STEP: f64 = 1.2;

/// Marker glyph edge length at scale 1.0, in pixels.
pub const BASE_MARKER_PX: f64 = 48.0;

/// Marker glyphs never shrink below this edge length, in pixels.
pub const MIN_MARKER_PX: f64 = 32.0;

/// Height of the pin tip drawn under the marker glyph.
pub const PIN_HEIGHT_PX: f64 = 8.0;

/// Share of the marker size used by the category glyph.
pub const GLYPH_RATIO: f64 = 0.6;

/// Pointer travel (pixels) still counted as a click. Zero means any move is a drag.
pub const CLICK_TOLERANCE_PX: f64 = 0.0;

/// Background image reference used when no scene supplies one.
pub const DEFAULT_BACKGROUND: &str = "./map.jpg";
