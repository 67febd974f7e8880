use crate::RngState;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const N_DICE: usize = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiceError {
    #[error("die value {0} outside 1..=6")]
    FaceOutOfRange(u8),
}

/// Five dice, each always in `1..=6` once rolled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceSet {
    values: [u8; N_DICE],
}

impl DiceSet {
    pub fn rolled(rng: &mut RngState) -> Self {
        let mut dice = Self { values: [1; N_DICE] };
        dice.roll_all(rng);
        dice
    }

    pub fn from_values(values: [u8; N_DICE]) -> Result<Self, DiceError> {
        if let Some(bad) = values.iter().copied().find(|v| !(1..=6).contains(v)) {
            return Err(DiceError::FaceOutOfRange(bad));
        }
        Ok(Self { values })
    }

    pub fn values(&self) -> [u8; N_DICE] {
        self.values
    }

    pub fn sum(&self) -> u32 {
        self.values.iter().map(|v| *v as u32).sum()
    }

    /// Occurrences per face; index 0 is unused.
    pub fn face_counts(&self) -> [u8; 7] {
        let mut counts = [0u8; 7];
        for value in self.values {
            counts[value as usize] += 1;
        }
        counts
    }

    pub fn roll_all(&mut self, rng: &mut RngState) {
        for value in &mut self.values {
            *value = rng.roll_die();
        }
    }

    /// Rerolls only the listed positions. Positions past the last die are ignored.
    pub fn reroll_selected(&mut self, indices: &[usize], rng: &mut RngState) {
        let mut selected = [false; N_DICE];
        for idx in indices {
            if let Some(flag) = selected.get_mut(*idx) {
                *flag = true;
            }
        }
        for (value, reroll) in self.values.iter_mut().zip(selected) {
            if reroll {
                *value = rng.roll_die();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roll_all_stays_in_face_range() {
        let mut rng = RngState::from_seed(11);
        let mut dice = DiceSet::rolled(&mut rng);
        for _ in 0..200 {
            dice.roll_all(&mut rng);
            assert!(dice.values().iter().all(|v| (1..=6).contains(v)));
        }
    }

    #[test]
    fn reroll_selected_leaves_other_positions() {
        let mut rng = RngState::from_seed(5);
        let start = DiceSet::from_values([1, 2, 3, 4, 5]).unwrap();
        for _ in 0..50 {
            let mut dice = start;
            dice.reroll_selected(&[1, 3], &mut rng);
            let values = dice.values();
            assert_eq!(values[0], 1);
            assert_eq!(values[2], 3);
            assert_eq!(values[4], 5);
        }
    }

    #[test]
    fn reroll_with_no_indices_is_noop() {
        let mut rng = RngState::from_seed(5);
        let mut dice = DiceSet::from_values([6, 6, 1, 2, 3]).unwrap();
        dice.reroll_selected(&[], &mut rng);
        assert_eq!(dice.values(), [6, 6, 1, 2, 3]);
    }

    #[test]
    fn from_values_rejects_bad_faces() {
        assert_eq!(
            DiceSet::from_values([0, 1, 2, 3, 4]),
            Err(DiceError::FaceOutOfRange(0))
        );
        assert_eq!(
            DiceSet::from_values([1, 2, 3, 4, 7]),
            Err(DiceError::FaceOutOfRange(7))
        );
    }

    #[test]
    fn face_counts_tally() {
        let dice = DiceSet::from_values([2, 2, 5, 2, 5]).unwrap();
        let counts = dice.face_counts();
        assert_eq!(counts[2], 3);
        assert_eq!(counts[5], 2);
        assert_eq!(dice.sum(), 16);
    }
}
