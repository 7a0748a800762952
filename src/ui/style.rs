use egui::Color32;

/// Colors used by the map widget and panels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapStyle {
    pub backdrop: Color32,
    pub parchment: Color32,
    pub gold: Color32,
    pub leather: Color32,
    pub leather_dark: Color32,
    pub label_background: Color32,
    pub banner: Color32,
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            backdrop: Color32::from_rgb(43, 29, 20),
            parchment: Color32::from_rgb(244, 228, 188),
            gold: Color32::from_rgb(212, 175, 55),
            leather: Color32::from_rgb(139, 90, 43),
            leather_dark: Color32::from_rgb(74, 44, 17),
            label_background: Color32::from_black_alpha(180),
            banner: Color32::from_rgba_unmultiplied(153, 27, 27, 220),
        }
    }
}

impl MapStyle {
    /// Fill, ring and glyph colors for a marker circle
    pub fn marker_colors(&self, selected: bool) -> (Color32, Color32, Color32) {
        if selected {
            (self.gold, self.parchment, self.leather_dark)
        } else {
            (self.leather_dark, self.gold, self.gold)
        }
    }
}
