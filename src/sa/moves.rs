//! Segment moves on a circular tour.
//!
//! Positions are taken modulo the tour length, so a segment may wrap past
//! the end of the buffer. Moves are applied in place with ring-index
//! arithmetic; the buffer is never rotated as a whole.

use rand::Rng;

/// A local perturbation of a tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Reverse the `len` cities starting at position `start`.
    Reverse { start: usize, len: usize },

    /// Cut the `len` cities starting at `start` and reinsert them after the
    /// next `shift` cities of the remainder.
    Relocate {
        start: usize,
        len: usize,
        shift: usize,
    },
}

impl Move {
    /// Draws a move for a tour of `n` cities.
    ///
    /// The kind is an unbiased coin flip; `start` and `len` are uniform in
    /// `0..n`. A relocation shift is uniform over the insertion points that
    /// change the cycle, or 0 when no such point exists.
    pub fn random<R: Rng>(n: usize, rng: &mut R) -> Self {
        let start = rng.random_range(0..n);
        let len = rng.random_range(0..n);
        if rng.random_bool(0.5) {
            Move::Reverse { start, len }
        } else {
            let rest = n - len;
            let shift = if rest >= 2 {
                rng.random_range(1..rest)
            } else {
                0
            };
            Move::Relocate { start, len, shift }
        }
    }

    /// Applies the move to `tour` in place.
    ///
    /// # Complexity
    /// O(len) for a reversal, O(len + shift) for a relocation.
    ///
    /// # Panics
    /// Panics (debug builds) if the segment and shift do not fit in the tour.
    pub fn apply(&self, tour: &mut [usize]) {
        let n = tour.len();
        match *self {
            Move::Reverse { start, len } => {
                debug_assert!(len <= n);
                reverse_ring(tour, start, len);
            }
            Move::Relocate { start, len, shift } => {
                debug_assert!(len + shift <= n);
                // rotate the window [segment | next `shift` cities] left by len
                reverse_ring(tour, start, len);
                reverse_ring(tour, start + len, shift);
                reverse_ring(tour, start, len + shift);
            }
        }
    }
}

/// Reverses the circular range of `len` positions beginning at `start`.
fn reverse_ring(tour: &mut [usize], start: usize, len: usize) {
    let n = tour.len();
    if n == 0 {
        return;
    }
    for i in 0..len / 2 {
        tour.swap((start + i) % n, (start + len - 1 - i) % n);
    }
}
