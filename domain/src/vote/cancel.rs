//! Majority-threshold cancellation tracking
//!
//! Cancellation is a toggle per voter, active while a strict majority of
//! all distinct voting-phase participants has it set. The participant
//! denominator grows as new voters join, so the gate must be re-checked
//! after every vote anywhere in the phase, not only after cancel toggles.

use crate::core::ids::UserId;
use std::collections::HashSet;

/// Tracks which voters currently want the session cancelled
#[derive(Debug, Clone, Default)]
pub struct CancelGate {
    cancel_voters: HashSet<UserId>,
}

impl CancelGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the voter's cancel flag; returns whether it is now set
    pub fn toggle(&mut self, voter: UserId) -> bool {
        if self.cancel_voters.remove(&voter) {
            false
        } else {
            self.cancel_voters.insert(voter);
            true
        }
    }

    pub fn cancel_count(&self) -> usize {
        self.cancel_voters.len()
    }

    /// Whether cancellation is active for the given participant count
    ///
    /// `total_participants` is the number of distinct voters who cast any
    /// vote in the phase (topic, count, or cancel). Active iff the cancel
    /// count strictly exceeds half of that.
    pub fn is_cancelled(&self, total_participants: usize) -> bool {
        !self.cancel_voters.is_empty() && self.cancel_voters.len() * 2 > total_participants
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_with_five_participants() {
        let mut gate = CancelGate::new();

        gate.toggle(UserId(1));
        gate.toggle(UserId(2));
        assert!(!gate.is_cancelled(5));

        gate.toggle(UserId(3));
        assert!(gate.is_cancelled(5));

        // Un-toggling back to 2 releases the gate
        gate.toggle(UserId(3));
        assert!(!gate.is_cancelled(5));
    }

    #[test]
    fn test_empty_gate_never_cancelled() {
        let gate = CancelGate::new();
        assert!(!gate.is_cancelled(0));
        assert!(!gate.is_cancelled(4));
    }

    #[test]
    fn test_denominator_growth_deactivates() {
        let mut gate = CancelGate::new();
        gate.toggle(UserId(1));
        gate.toggle(UserId(2));

        // 2 of 3 participants is a strict majority
        assert!(gate.is_cancelled(3));
        // A new voter joining elsewhere raises the denominator to 4
        assert!(!gate.is_cancelled(4));
    }

    #[test]
    fn test_toggle_reports_new_state() {
        let mut gate = CancelGate::new();
        assert!(gate.toggle(UserId(7)));
        assert!(!gate.toggle(UserId(7)));
        assert_eq!(gate.cancel_count(), 0);
    }
}
