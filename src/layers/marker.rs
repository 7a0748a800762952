use crate::core::constants::GLYPH_RATIO;
use crate::core::geo::Coordinates;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Unique marker identity
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkerId(String);

impl MarkerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for MarkerId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MarkerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for MarkerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerCategory {
    City,
    Dungeon,
    Forest,
    Landmark,
}

impl MarkerCategory {
    /// Icon drawn inside the marker when images are hidden
    pub fn glyph(&self) -> Glyph {
        match self {
            MarkerCategory::City => Glyph::Castle,
            MarkerCategory::Forest => Glyph::Trees,
            MarkerCategory::Dungeon => Glyph::Skull,
            MarkerCategory::Landmark => Glyph::Pin,
        }
    }
}

impl fmt::Display for MarkerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkerCategory::City => write!(f, "city"),
            MarkerCategory::Dungeon => write!(f, "dungeon"),
            MarkerCategory::Forest => write!(f, "forest"),
            MarkerCategory::Landmark => write!(f, "landmark"),
        }
    }
}

/// Category icons; the presentation layer picks the actual artwork.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Glyph {
    Castle,
    Trees,
    Skull,
    Pin,
}

impl Glyph {
    /// Glyph edge length for a marker of `marker_size` pixels
    pub fn size_for(marker_size: f64) -> f64 {
        marker_size * GLYPH_RATIO
    }

    /// Single-character fallback usable with any font
    pub fn symbol(&self) -> &'static str {
        match self {
            Glyph::Castle => "♜",
            Glyph::Trees => "♣",
            Glyph::Skull => "☠",
            Glyph::Pin => "⚑",
        }
    }
}

/// A point of interest on the map.
///
/// Only `coordinates` ever changes after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    pub id: MarkerId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Opaque image reference, resolved by the host
    #[serde(default)]
    pub image_url: String,
    pub coordinates: Coordinates,
    #[serde(rename = "type", alias = "category")]
    pub category: MarkerCategory,
}

impl Marker {
    pub fn new(
        id: impl Into<MarkerId>,
        title: impl Into<String>,
        category: MarkerCategory,
        coordinates: Coordinates,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            image_url: String::new(),
            coordinates,
            category,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_image(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }

    pub fn position(&self) -> Coordinates {
        self.coordinates
    }

    pub fn set_position(&mut self, coordinates: Coordinates) {
        self.coordinates = coordinates;
    }
}
