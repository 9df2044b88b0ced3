//! Debounce decision logic
//!
//! The timing half of debouncing (waiting for a quiet window) belongs to
//! whoever owns the pin and a timer. This module holds the decision half:
//! which value is stable, whether a burst is in progress, and whether a
//! settled burst produced a real transition.
//!
//! # Algorithm
//!
//! 1. Every raw edge marks the input as settling ([`Debouncer::on_edge`])
//! 2. The caller waits until the debounce window passes with no new edge
//! 3. The caller samples the pin and calls [`Debouncer::settle`]
//! 4. A transition is reported only if the sample differs from the
//!    previous stable value
//!
//! Edges within a burst are never counted or averaged: only the level at
//! settle time matters.

/// Debounce state for one input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Debouncer {
    /// Last stabilized level
    stable: bool,
    /// Raw edges seen since the last settle
    pending_edges: u32,
}

impl Debouncer {
    /// Create a debouncer whose initial stable level is `initial`
    pub const fn new(initial: bool) -> Self {
        Self {
            stable: initial,
            pending_edges: 0,
        }
    }

    /// Last stabilized level
    pub const fn stable(&self) -> bool {
        self.stable
    }

    /// Check if a burst of edges is waiting to settle
    pub const fn is_settling(&self) -> bool {
        self.pending_edges > 0
    }

    /// Raw edges seen since the last settle
    pub const fn pending_edges(&self) -> u32 {
        self.pending_edges
    }

    /// Record a raw edge
    pub fn on_edge(&mut self) {
        self.pending_edges = self.pending_edges.saturating_add(1);
    }

    /// Adopt the level sampled after the quiet window
    ///
    /// Returns the new stable level if it differs from the previous one,
    /// or `None` if the burst was a glitch that ended where it started.
    pub fn settle(&mut self, level: bool) -> Option<bool> {
        self.pending_edges = 0;

        if level == self.stable {
            return None;
        }

        self.stable = level;
        Some(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let debouncer = Debouncer::new(true);
        assert!(debouncer.stable());
        assert!(!debouncer.is_settling());
    }

    #[test]
    fn test_burst_collapses_to_final_level() {
        let mut debouncer = Debouncer::new(false);

        // false -> true -> false -> true within one window
        debouncer.on_edge();
        debouncer.on_edge();
        debouncer.on_edge();
        assert!(debouncer.is_settling());
        assert_eq!(debouncer.pending_edges(), 3);

        assert_eq!(debouncer.settle(true), Some(true));
        assert!(debouncer.stable());
        assert!(!debouncer.is_settling());
    }

    #[test]
    fn test_glitch_is_ignored() {
        let mut debouncer = Debouncer::new(false);

        // false -> true -> false within one window
        debouncer.on_edge();
        debouncer.on_edge();

        assert_eq!(debouncer.settle(false), None);
        assert!(!debouncer.stable());
    }

    #[test]
    fn test_reports_each_transition_once() {
        let mut debouncer = Debouncer::new(false);

        debouncer.on_edge();
        assert_eq!(debouncer.settle(true), Some(true));

        // Same level again is not a transition
        debouncer.on_edge();
        assert_eq!(debouncer.settle(true), None);

        debouncer.on_edge();
        assert_eq!(debouncer.settle(false), Some(false));
    }
}
