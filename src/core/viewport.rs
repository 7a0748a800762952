use crate::core::config::ViewConfig;
use crate::core::geo::{Coordinates, Point, Size, PERCENT_MAX};
use crate::Result;
use serde::{Deserialize, Serialize};

/// Pan and zoom of the map content relative to the viewport container
///
/// Content is laid out with its top-left corner at `(pan_x, pan_y)` and
/// scaled by `scale` about that corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub scale: f64,
    pub pan_x: f64,
    pub pan_y: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            scale: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }
}

impl ViewState {
    pub fn new(scale: f64, pan_x: f64, pan_y: f64) -> Self {
        Self {
            scale,
            pan_x,
            pan_y,
        }
    }

    pub fn pan(&self) -> Point {
        Point::new(self.pan_x, self.pan_y)
    }

    /// True when this is the reset state `{scale: 1, pan: (0, 0)}`
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }
}

/// Point that stays fixed on screen while the scale changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoomAnchor {
    /// The content under the container center stays under the center
    #[default]
    Center,
    /// The pan offset is left untouched, so the content origin stays fixed.
    /// Matches a top-left transform origin whose wheel handler never
    /// touches the pan.
    Origin,
}

/// Coordinate transform engine: owns the [`ViewState`] and maps between
/// screen space (container pixels) and content space (percentages).
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    state: ViewState,
    size: Size,
    config: ViewConfig,
    zoom_anchor: ZoomAnchor,
}

impl Viewport {
    /// Creates a viewport with the default configuration
    pub fn new(size: Size) -> Self {
        Self {
            state: ViewState::default(),
            size,
            config: ViewConfig::default(),
            zoom_anchor: ZoomAnchor::default(),
        }
    }

    /// Creates a viewport with a caller-supplied configuration, validating it first
    pub fn with_config(size: Size, config: ViewConfig) -> Result<Self> {
        config.validate()?;
        let mut viewport = Self {
            state: ViewState::default(),
            size,
            config,
            zoom_anchor: ZoomAnchor::default(),
        };
        viewport.state.scale = viewport.config.clamp_scale(1.0);
        Ok(viewport)
    }

    pub fn set_zoom_anchor(&mut self, anchor: ZoomAnchor) {
        self.zoom_anchor = anchor;
    }

    pub fn zoom_anchor(&self) -> ZoomAnchor {
        self.zoom_anchor
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn scale(&self) -> f64 {
        self.state.scale
    }

    pub fn pan(&self) -> Point {
        self.state.pan()
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Sets the container size. Pan and scale are left untouched.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// Forward transform: content-space percentages to a screen point.
    ///
    /// `screen = pan + (percent / 100 * extent) * scale` on each axis.
    pub fn content_to_screen(&self, coords: Coordinates) -> Point {
        let fraction = coords.as_fraction();
        Point::new(
            self.state.pan_x + fraction.x * self.size.width * self.state.scale,
            self.state.pan_y + fraction.y * self.size.height * self.state.scale,
        )
    }

    /// Screen point to unscaled content pixels, `(screen - pan) / scale`.
    pub fn screen_to_local(&self, point: Point) -> Point {
        point.subtract(&self.state.pan()).multiply(1.0 / self.state.scale)
    }

    /// Inverse transform: a screen point to content-space percentages,
    /// clamped to `[0, 100]` so nothing can leave the image bounds.
    pub fn screen_to_content(&self, point: Point) -> Coordinates {
        let local = self.screen_to_local(point);
        let percent = |value: f64, extent: f64| {
            if extent > 0.0 {
                value / extent * PERCENT_MAX
            } else {
                0.0
            }
        };
        Coordinates::clamped(
            percent(local.x, self.size.width),
            percent(local.y, self.size.height),
        )
    }

    /// Marker glyph size at the current scale:
    /// `max(min_marker_px, base_marker_px / sqrt(scale))`.
    pub fn marker_size(&self) -> f64 {
        (self.config.base_marker_px / self.state.scale.sqrt()).max(self.config.min_marker_px)
    }

    /// Sets the scale, clamped into the configured range and applied about
    /// the zoom anchor. Returns whether the view changed.
    pub fn set_scale(&mut self, scale: f64) -> bool {
        if !scale.is_finite() {
            return false;
        }
        let new_scale = self.config.clamp_scale(scale);
        let old_scale = self.state.scale;
        if (new_scale - old_scale).abs() < f64::EPSILON {
            return false;
        }

        if self.zoom_anchor == ZoomAnchor::Center {
            let center = self.size.center();
            let local = self.screen_to_local(center);
            self.state.pan_x = center.x - local.x * new_scale;
            self.state.pan_y = center.y - local.y * new_scale;
        }
        self.state.scale = new_scale;
        true
    }

    /// Wheel zoom: `scale + (-delta_y * zoom_sensitivity)`, clamped.
    pub fn zoom_by_wheel(&mut self, delta_y: f64) -> bool {
        if !delta_y.is_finite() {
            return false;
        }
        self.set_scale(self.state.scale - delta_y * self.config.zoom_sensitivity)
    }

    /// Zoom-in button: multiplies the scale by `zoom_step`.
    pub fn zoom_in(&mut self) -> bool {
        self.set_scale(self.state.scale * self.config.zoom_step)
    }

    /// Zoom-out button: divides the scale by `zoom_step`.
    pub fn zoom_out(&mut self) -> bool {
        self.set_scale(self.state.scale / self.config.zoom_step)
    }

    /// Anchor for a pan gesture starting at `pointer`: `pointer - pan`.
    pub fn pan_anchor(&self, pointer: Point) -> Point {
        pointer.subtract(&self.state.pan())
    }

    /// Moves the content so that `anchor` (captured by [`Self::pan_anchor`])
    /// stays under `pointer`: `pan = pointer - anchor`.
    pub fn pan_with_anchor(&mut self, pointer: Point, anchor: Point) -> bool {
        let pan = pointer.subtract(&anchor);
        self.set_pan(pan)
    }

    /// Sets the pan offset directly; non-finite offsets are ignored.
    pub fn set_pan(&mut self, pan: Point) -> bool {
        if !pan.is_finite() || pan == self.state.pan() {
            return false;
        }
        self.state.pan_x = pan.x;
        self.state.pan_y = pan.y;
        true
    }

    /// Resets to `{scale: 1, pan: (0, 0)}`. A configured scale range that
    /// excludes 1.0 resets to the nearest bound instead.
    pub fn reset(&mut self) -> bool {
        let target = ViewState {
            scale: self.config.clamp_scale(1.0),
            ..ViewState::default()
        };
        let changed = self.state != target;
        self.state = target;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn viewport() -> Viewport {
        Viewport::new(Size::new(800.0, 600.0))
    }

    #[test]
    fn test_forward_transform() {
        let mut vp = viewport();
        vp.set_pan(Point::new(10.0, 20.0));
        vp.set_zoom_anchor(ZoomAnchor::Origin);
        vp.set_scale(2.0);

        let screen = vp.content_to_screen(Coordinates::new(50.0, 25.0));
        assert!((screen.x - (10.0 + 400.0 * 2.0)).abs() < EPS);
        assert!((screen.y - (20.0 + 150.0 * 2.0)).abs() < EPS);
    }

    #[test]
    fn test_inverse_is_clamped() {
        let vp = viewport();
        let coords = vp.screen_to_content(Point::new(-80.0, 660.0));
        assert_eq!(coords, Coordinates::new(0.0, 100.0));
    }

    #[test]
    fn test_inverse_with_empty_container_is_finite() {
        let vp = Viewport::new(Size::new(0.0, 0.0));
        let coords = vp.screen_to_content(Point::new(100.0, 100.0));
        assert_eq!(coords, Coordinates::new(0.0, 0.0));
    }

    #[test]
    fn test_wheel_zoom_clamps() {
        let mut vp = viewport();
        for _ in 0..50 {
            vp.zoom_by_wheel(-10_000.0);
        }
        assert_eq!(vp.scale(), 4.0);

        for _ in 0..50 {
            vp.zoom_by_wheel(10_000.0);
        }
        assert_eq!(vp.scale(), 0.5);
    }

    #[test]
    fn test_wheel_zoom_ignores_nan() {
        let mut vp = viewport();
        assert!(!vp.zoom_by_wheel(f64::NAN));
        assert_eq!(vp.state(), ViewState::default());
    }

    #[test]
    fn test_center_anchor_keeps_center_content_fixed() {
        let mut vp = viewport();
        vp.set_pan(Point::new(-37.0, 12.0));
        let center = vp.size().center();
        let before = vp.screen_to_local(center);

        assert!(vp.zoom_by_wheel(-500.0));
        let after = vp.screen_to_local(center);

        assert!((vp.scale() - 1.5).abs() < EPS);
        assert!((before.x - after.x).abs() < EPS);
        assert!((before.y - after.y).abs() < EPS);
    }

    #[test]
    fn test_origin_anchor_leaves_pan_alone() {
        let mut vp = viewport();
        vp.set_zoom_anchor(ZoomAnchor::Origin);
        vp.set_pan(Point::new(5.0, 6.0));
        vp.zoom_in();
        assert!((vp.scale() - 1.2).abs() < EPS);
        assert_eq!(vp.pan(), Point::new(5.0, 6.0));
        vp.zoom_out();
        assert!((vp.scale() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_pan_anchor_law() {
        let mut vp = viewport();
        let anchor = vp.pan_anchor(Point::new(100.0, 100.0));
        assert!(vp.pan_with_anchor(Point::new(150.0, 130.0), anchor));
        assert_eq!(vp.pan(), Point::new(50.0, 30.0));
    }

    #[test]
    fn test_marker_size_shrinks_with_floor() {
        let mut vp = viewport();
        assert_eq!(vp.marker_size(), 48.0);
        vp.set_scale(4.0);
        assert_eq!(vp.marker_size(), 32.0);
        vp.set_scale(0.5);
        assert!((vp.marker_size() - 48.0 / 0.5_f64.sqrt()).abs() < EPS);
    }

    #[test]
    fn test_reset() {
        let mut vp = viewport();
        vp.set_scale(3.0);
        vp.set_pan(Point::new(1.0, 2.0));
        assert!(vp.reset());
        assert_eq!(vp.state(), ViewState::default());
        assert!(!vp.reset());
    }

    #[test]
    fn test_with_config_validates() {
        let bad = ViewConfig::default().with_scale_limits(-1.0, 2.0);
        assert!(Viewport::with_config(Size::new(10.0, 10.0), bad).is_err());

        let narrow = ViewConfig::default().with_scale_limits(2.0, 3.0);
        let vp = Viewport::with_config(Size::new(10.0, 10.0), narrow).unwrap();
        assert_eq!(vp.scale(), 2.0);
    }
}
