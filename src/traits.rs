//! Seams to collaborators outside the viewer core

use crate::layers::marker::{Marker, MarkerId};
use std::sync::{Arc, Mutex, PoisonError};

/// Persistence collaborator for marker positions.
///
/// `marker_moved` fires for every live position update during a drag;
/// `commit` fires when edit mode is switched off, with the full list.
pub trait PositionSink: Send {
    fn marker_moved(&mut self, _id: &MarkerId, _x: f64, _y: f64) {}

    fn commit(&mut self, markers: &[Marker]);
}

/// Sink that only writes the committed positions to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogPositionSink;

impl PositionSink for LogPositionSink {
    fn commit(&mut self, markers: &[Marker]) {
        log::info!("positions saved for {} markers", markers.len());
        for marker in markers {
            log::debug!(
                "  {} -> ({:.2}, {:.2})",
                marker.id,
                marker.coordinates.x,
                marker.coordinates.y
            );
        }
    }
}

/// Sink that keeps the last committed snapshot in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryPositionSink {
    pub moves: usize,
    pub last_commit: Option<Vec<Marker>>,
}

impl PositionSink for MemoryPositionSink {
    fn marker_moved(&mut self, _id: &MarkerId, _x: f64, _y: f64) {
        self.moves += 1;
    }

    fn commit(&mut self, markers: &[Marker]) {
        self.last_commit = Some(markers.to_vec());
    }
}

/// Lets a host keep a handle on a sink it hands to the viewer.
impl<T: PositionSink> PositionSink for Arc<Mutex<T>> {
    fn marker_moved(&mut self, id: &MarkerId, x: f64, y: f64) {
        let mut sink = self.lock().unwrap_or_else(PoisonError::into_inner);
        sink.marker_moved(id, x, y);
    }

    fn commit(&mut self, markers: &[Marker]) {
        let mut sink = self.lock().unwrap_or_else(PoisonError::into_inner);
        sink.commit(markers);
    }
}
