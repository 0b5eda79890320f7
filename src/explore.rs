use std::collections::HashSet;

use crate::tile::Coord;

/// Fog-of-war ledger. Append-only for the lifetime of a session: once a
/// coordinate is revealed it never returns to fog.
#[derive(Default)]
pub struct ExplorationLedger {
    revealed: HashSet<Coord>,
}

impl ExplorationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reveal a coordinate and its four orthogonal neighbors (cross pattern,
    /// not a radius disk). Returns the coordinates newly uncovered by this
    /// call so the caller can sync tile flags.
    pub fn reveal(&mut self, center: Coord) -> Vec<Coord> {
        let mut fresh = Vec::with_capacity(5);
        if self.revealed.insert(center) {
            fresh.push(center);
        }
        for neighbor in center.orthogonal_neighbors() {
            if self.revealed.insert(neighbor) {
                fresh.push(neighbor);
            }
        }
        fresh
    }

    pub fn is_explored(&self, coord: Coord) -> bool {
        self.revealed.contains(&coord)
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.len()
    }
}
