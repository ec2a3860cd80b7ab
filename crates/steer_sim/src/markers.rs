//! Marker board: the rendering side of a bot
//!
//! Stands in for a material swap. Records the last marker applied to each
//! entity so the host can report it.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use steer_ai::{Marker, Renderer};
use steer_core::EntityId;

#[derive(Debug, Default)]
struct Board {
    current: HashMap<EntityId, Marker>,
    changes: u64,
}

#[derive(Debug, Clone, Default)]
pub struct MarkerBoard {
    board: Arc<Mutex<Board>>,
}

impl MarkerBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn marker_of(&self, entity: EntityId) -> Option<Marker> {
        self.board.lock().current.get(&entity).cloned()
    }

    /// Total markers applied, across all entities
    pub fn changes(&self) -> u64 {
        self.board.lock().changes
    }
}

impl Renderer for MarkerBoard {
    fn apply_marker(&mut self, entity: EntityId, marker: &Marker) {
        log::debug!("Entity {} marker -> {}", entity, marker);
        let mut board = self.board.lock();
        board.current.insert(entity, marker.clone());
        board.changes += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_marker_wins() {
        let board = MarkerBoard::new();
        let mut sink = board.clone();
        let entity = EntityId::new(1, 0);

        sink.apply_marker(entity, &Marker::new("idle"));
        sink.apply_marker(entity, &Marker::new("chase"));

        assert_eq!(board.marker_of(entity), Some(Marker::new("chase")));
        assert_eq!(board.changes(), 2);
        assert_eq!(board.marker_of(EntityId::new(2, 0)), None);
    }
}
