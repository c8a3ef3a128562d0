//! Flight plan: the vectors staged for the current turn
//!
//! Resultant and projected position are derived on demand, never cached.

use glam::DVec2;

use super::state::Vector;
use crate::geometry::add;

/// Ordered staged vectors for one turn
#[derive(Debug, Clone, Default)]
pub struct FlightPlan {
    entries: Vec<Vector>,
    /// Uniqueness token for re-keyed entries; never reset
    next_token: u64,
}

impl FlightPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a copy of `vector` under a fresh instance id
    ///
    /// Staging the same card twice yields two distinct entries.
    pub fn stage(&mut self, vector: &Vector) -> &Vector {
        let token = self.next_token;
        self.next_token += 1;

        let mut entry = vector.clone();
        entry.id = format!("{}-{}", vector.id, token);
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    /// Remove the last staged vector (no-op when empty)
    pub fn undo(&mut self) -> Option<Vector> {
        self.entries.pop()
    }

    /// Drop every staged vector
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[Vector] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all staged displacements; pure rotations add nothing
    pub fn resultant(&self) -> DVec2 {
        self.entries.iter().fold(DVec2::ZERO, |acc, v| {
            if v.is_pure_rotation() {
                acc
            } else {
                add(acc, v.displacement())
            }
        })
    }

    /// Where the ship ends up if the plan is flown without collision
    pub fn projected_position(&self, ship_position: DVec2) -> DVec2 {
        add(ship_position, self.resultant())
    }
}
