//! Counting observer for understanding how much restructuring a workload does.

use std::fmt;

use super::event::{Direction, Event, Imbalance, Observer};

/// Tallies rotations, rebalances and search visits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RotationStats {
    pub left_rotations: u64,
    pub right_rotations: u64,
    pub left_left: u64,
    pub left_right: u64,
    pub right_right: u64,
    pub right_left: u64,
    pub visits: u64,
}

impl RotationStats {
    pub fn new() -> RotationStats {
        return RotationStats::default();
    }

    pub fn rotations(&self) -> u64 {
        return self.left_rotations + self.right_rotations;
    }

    pub fn rebalances(&self) -> u64 {
        return self.left_left + self.left_right + self.right_right + self.right_left;
    }

    pub fn reset(&mut self) {
        *self = RotationStats::default();
    }
}

impl<K> Observer<K> for RotationStats {
    fn observe(&mut self, event: Event<&K>) {
        match event {
            Event::Rotation { direction: Direction::Left, .. } => self.left_rotations += 1,
            Event::Rotation { direction: Direction::Right, .. } => self.right_rotations += 1,
            Event::Rebalance { case, .. } => match case {
                Imbalance::LeftLeft => self.left_left += 1,
                Imbalance::LeftRight => self.left_right += 1,
                Imbalance::RightRight => self.right_right += 1,
                Imbalance::RightLeft => self.right_left += 1,
            },
            Event::Visit { .. } => self.visits += 1,
            _ => {}
        }
    }
}

impl fmt::Display for RotationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(
            f,
            "Rotations: {} ({} left, {} right), Rebalances: LL {} LR {} RR {} RL {}, Visits: {}",
            self.rotations(),
            self.left_rotations,
            self.right_rotations,
            self.left_left,
            self.left_right,
            self.right_right,
            self.right_left,
            self.visits,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_rotation_counts_once_per_turn() {
        let mut stats = RotationStats::new();
        let observer: &mut dyn Observer<i32> = &mut stats;
        observer.observe(Event::Rebalance { case: Imbalance::LeftRight, at: &3 });
        observer.observe(Event::Rotation { direction: Direction::Left, pivot: &1 });
        observer.observe(Event::Rotation { direction: Direction::Right, pivot: &3 });

        assert_eq!(stats.rebalances(), 1);
        assert_eq!(stats.left_right, 1);
        assert_eq!(stats.rotations(), 2);

        stats.reset();
        assert_eq!(stats, RotationStats::default());
    }
}
