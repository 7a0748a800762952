use crate::{
    core::{
        geo::{Point, Size},
        map::{MapViewer, MarkerFace, RenderFrame, RenderedMarker},
    },
    input::{InputEvent, MouseEventType, RawPointerInput, WheelEvent},
    layers::marker::Glyph,
    prelude::HashMap,
    ui::style::MapStyle,
};
use egui::{
    pos2, vec2, Align2, Color32, CursorIcon, FontId, Painter, Pos2, Rect, Response, Sense, Shape,
    Stroke, TextureId, Ui, Vec2, Widget,
};

/// Immediate-mode map widget over a [`MapViewer`].
///
/// Translates egui pointer and scroll input into viewer input, then paints
/// the background and the markers from [`MapViewer::render_frame`].
///
/// ```rust,ignore
/// ui.add(fablemap::MapView::new(&mut viewer).background(texture.id()));
/// ```
pub struct MapView<'a> {
    viewer: &'a mut MapViewer,
    background: Option<TextureId>,
    images: Option<&'a HashMap<String, TextureId>>,
    size: Option<Vec2>,
    style: MapStyle,
}

impl<'a> MapView<'a> {
    pub fn new(viewer: &'a mut MapViewer) -> Self {
        Self {
            viewer,
            background: None,
            images: None,
            size: None,
            style: MapStyle::default(),
        }
    }

    /// Texture drawn under the markers
    pub fn background(mut self, texture: TextureId) -> Self {
        self.background = Some(texture);
        self
    }

    /// Textures for marker image references, used while images are shown
    pub fn images(mut self, images: &'a HashMap<String, TextureId>) -> Self {
        self.images = Some(images);
        self
    }

    /// Set the widget size (otherwise uses available space)
    pub fn size(mut self, size: Vec2) -> Self {
        self.size = Some(size);
        self
    }

    pub fn style(mut self, style: MapStyle) -> Self {
        self.style = style;
        self
    }

    fn handle_input(&mut self, ui: &Ui, rect: Rect, response: &Response) -> bool {
        let to_local =
            |pos: Pos2| Point::new((pos.x - rect.min.x) as f64, (pos.y - rect.min.y) as f64);
        let (pressed, released, button_down, pointer_pos, has_pointer, scroll) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.primary_down(),
                i.pointer.interact_pos(),
                i.pointer.has_pointer(),
                i.raw_scroll_delta.y,
            )
        });

        let mut changed = false;
        let mouse = |event_type, position: Point, target| RawPointerInput::Mouse {
            event_type,
            position,
            target,
        };

        if let Some(pos) = pointer_pos {
            let local = to_local(pos);
            if pressed && response.hovered() {
                let target = self.viewer.hit_test(local);
                changed |= self.viewer.handle_raw(mouse(MouseEventType::Down, local, target));
            }
            // Press and release can land in the same frame
            if !self.viewer.gesture().is_idle() {
                let event_type = if released || !button_down {
                    MouseEventType::Up
                } else {
                    MouseEventType::Move
                };
                changed |= self.viewer.handle_raw(mouse(event_type, local, None));
            }
        } else if !self.viewer.gesture().is_idle() && (!has_pointer || !button_down) {
            changed |= self
                .viewer
                .handle_raw(mouse(MouseEventType::Leave, Point::default(), None));
        }

        // egui reports upward scrolling as positive; wheel deltas grow downward
        if response.hovered() && scroll != 0.0 {
            changed |= self
                .viewer
                .handle_input(InputEvent::Wheel(WheelEvent::new(-scroll as f64)));
        }

        changed
    }

    fn paint_background(&self, painter: &Painter, rect: Rect, frame: &RenderFrame) {
        painter.rect_filled(rect, 0.0, self.style.backdrop);
        let min = rect.min + vec2(frame.view.pan_x as f32, frame.view.pan_y as f32);
        let content = Rect::from_min_size(min, rect.size() * frame.view.scale as f32);
        match self.background {
            Some(texture) => {
                let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
                painter.image(texture, content, uv, Color32::WHITE);
            }
            None => {
                painter.rect_filled(content, 0.0, self.style.parchment);
                painter.text(
                    content.center(),
                    Align2::CENTER_CENTER,
                    frame.background.as_str(),
                    FontId::proportional(14.0),
                    self.style.leather,
                );
            }
        }
    }

    fn paint_marker(&self, painter: &Painter, rect: Rect, marker: &RenderedMarker) {
        let offset = rect.min.to_vec2();
        let anchor = pos2(marker.anchor.x as f32, marker.anchor.y as f32) + offset;
        let center = marker.glyph_center();
        let center = pos2(center.x as f32, center.y as f32) + offset;
        let radius = (marker.size / 2.0) as f32;
        let (fill, ring, glyph_color) = self.style.marker_colors(marker.selected);

        // Pin
        painter.add(Shape::convex_polygon(
            vec![
                center + vec2(-radius * 0.4, radius * 0.8),
                center + vec2(radius * 0.4, radius * 0.8),
                anchor,
            ],
            ring,
            Stroke::NONE,
        ));
        painter.circle(center, radius, fill, Stroke::new(2.0, ring));

        let glyph_size = Glyph::size_for(marker.size) as f32;
        match &marker.face {
            MarkerFace::Image(reference) => {
                match self.images.and_then(|images| images.get(reference)) {
                    Some(texture) => {
                        let inner = Rect::from_center_size(center, Vec2::splat(radius * 1.6));
                        let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
                        painter.image(*texture, inner, uv, Color32::WHITE);
                    }
                    None => {
                        let initial = marker.title.chars().next().unwrap_or('?').to_string();
                        painter.text(
                            center,
                            Align2::CENTER_CENTER,
                            initial,
                            FontId::proportional(glyph_size),
                            glyph_color,
                        );
                    }
                }
            }
            MarkerFace::Glyph(glyph) => {
                painter.text(
                    center,
                    Align2::CENTER_CENTER,
                    glyph.symbol(),
                    FontId::proportional(glyph_size),
                    glyph_color,
                );
            }
        }

        // Title tag under the pin tip
        let galley = painter.layout_no_wrap(
            marker.title.clone(),
            FontId::proportional(11.0),
            self.style.parchment,
        );
        let tag = Rect::from_center_size(
            anchor + vec2(0.0, 4.0 + galley.size().y / 2.0),
            galley.size() + vec2(8.0, 4.0),
        );
        painter.rect_filled(tag, 3.0, self.style.label_background);
        painter.galley(tag.min + vec2(4.0, 2.0), galley, self.style.parchment);
    }

    fn paint_banner(&self, painter: &Painter, rect: Rect) {
        let banner = Rect::from_center_size(
            pos2(rect.center().x, rect.max.y - 40.0),
            vec2(320.0_f32.min(rect.width()), 28.0),
        );
        painter.rect_filled(banner, 6.0, self.style.banner);
        painter.text(
            banner.center(),
            Align2::CENTER_CENTER,
            "Edit mode: drag markers to move them",
            FontId::proportional(13.0),
            Color32::WHITE,
        );
    }
}

impl Widget for MapView<'_> {
    fn ui(mut self, ui: &mut Ui) -> Response {
        let desired_size = self.size.unwrap_or_else(|| ui.available_size());
        let (rect, mut response) = ui.allocate_exact_size(desired_size, Sense::click_and_drag());

        let mut changed = self
            .viewer
            .resize(Size::new(rect.width() as f64, rect.height() as f64));
        changed |= self.handle_input(ui, rect, &response);

        let frame = self.viewer.render_frame();
        let painter = ui.painter_at(rect);
        self.paint_background(&painter, rect, &frame);
        for marker in &frame.markers {
            self.paint_marker(&painter, rect, marker);
        }
        if frame.edit_mode {
            self.paint_banner(&painter, rect);
        }

        if frame.interacting {
            ui.ctx().set_cursor_icon(CursorIcon::Grabbing);
        } else if response.hovered() {
            let hovered_marker = response
                .hover_pos()
                .map(|pos| Point::new((pos.x - rect.min.x) as f64, (pos.y - rect.min.y) as f64))
                .and_then(|local| frame.hit_test(local));
            let icon = match (hovered_marker, frame.edit_mode) {
                (Some(_), true) => CursorIcon::Move,
                (Some(_), false) => CursorIcon::PointingHand,
                (None, _) => CursorIcon::Grab,
            };
            ui.ctx().set_cursor_icon(icon);
        }

        if changed {
            response.mark_changed();
            ui.ctx().request_repaint();
        }
        response
    }
}
