//! Best-effort placement that never overlaps an already placed box.

use serde::{Deserialize, Serialize};

use crate::geometry::{Position, Rect, Size};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CollisionConfig {
    /// Added to every side of both boxes before testing.
    pub padding: f64,
    pub max_attempts: usize,
    pub vertical_increment: f64,
    pub horizontal_increment: f64,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            padding: 20.0,
            max_attempts: 20,
            vertical_increment: 150.0,
            horizontal_increment: 120.0,
        }
    }
}

impl CollisionConfig {
    pub fn collides(&self, candidate: &Rect, placed: &[Rect]) -> bool {
        placed
            .iter()
            .any(|other| candidate.collides_padded(other, self.padding))
    }

    /// Find a spot for a box of `size` near `initial`.
    ///
    /// Tries `initial`, then walks down, then sideways, then diagonally. If
    /// the attempt budget runs out, the box goes below everything placed.
    pub fn find_position(&self, initial: Position, size: Size, placed: &[Rect]) -> Position {
        let mut position = initial;

        for attempt in 0..self.max_attempts {
            if !self.collides(&Rect::new(position, size), placed) {
                return position;
            }
            let sign = if attempt % 2 == 0 { 1.0 } else { -1.0 };
            if attempt < 5 {
                position.y += self.vertical_increment;
            } else if attempt < 10 {
                position.x += sign * self.horizontal_increment;
            } else {
                position.y += self.vertical_increment * 0.5;
                position.x += sign * self.horizontal_increment * 0.5;
            }
        }
        if !self.collides(&Rect::new(position, size), placed) {
            return position;
        }

        let fallback = self.fallback(initial, placed);
        tracing::debug!(
            "No free slot near ({:.0}, {:.0}) after {} attempts, placing at ({:.0}, {:.0})",
            initial.x,
            initial.y,
            self.max_attempts,
            fallback.x,
            fallback.y
        );
        fallback
    }

    fn fallback(&self, initial: Position, placed: &[Rect]) -> Position {
        let attempt_y = initial.y + self.max_attempts as f64 * self.vertical_increment;
        let clear_y = placed
            .iter()
            .map(|r| r.bottom() + 2.0 * self.padding + 1.0)
            .fold(f64::NEG_INFINITY, f64::max);
        Position::new(
            initial.x + self.horizontal_increment,
            attempt_y.max(clear_y),
        )
    }
}
