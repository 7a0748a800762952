//! In-memory marker list
//!
//! The store keeps markers in their seed order (which is also draw order)
//! and an id index for lookups. Coordinates are the only mutable field and
//! are written without validation: clamping is the transform engine's job.

use crate::{
    core::geo::Coordinates,
    layers::marker::{Marker, MarkerId},
    prelude::HashMap,
    MapError, Result,
};

#[derive(Debug, Clone, Default)]
pub struct MarkerStore {
    markers: Vec<Marker>,
    index: HashMap<MarkerId, usize>,
}

impl MarkerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from a seed list, rejecting duplicate ids and
    /// coordinates outside `[0, 100]`.
    pub fn from_markers(markers: Vec<Marker>) -> Result<Self> {
        let mut index = HashMap::default();
        for (position, marker) in markers.iter().enumerate() {
            if !marker.coordinates.is_valid() {
                return Err(MapError::InvalidCoordinates {
                    id: marker.id.to_string(),
                    x: marker.coordinates.x,
                    y: marker.coordinates.y,
                });
            }
            if index.insert(marker.id.clone(), position).is_some() {
                return Err(MapError::DuplicateMarker(marker.id.to_string()));
            }
        }
        Ok(Self { markers, index })
    }

    /// Replaces the coordinates of marker `id`. Returns `false` (and changes
    /// nothing) when no such marker exists.
    pub fn update(&mut self, id: &str, x: f64, y: f64) -> bool {
        match self.index.get(id) {
            Some(&position) => {
                self.markers[position].set_position(Coordinates::new(x, y));
                true
            }
            None => {
                log::warn!("ignoring position update for unknown marker {id}");
                false
            }
        }
    }

    /// Markers in render order
    pub fn list(&self) -> &[Marker] {
        &self.markers
    }

    pub fn get(&self, id: &str) -> Option<&Marker> {
        self.index.get(id).map(|&position| &self.markers[position])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Marker> {
        self.markers.iter()
    }
}
