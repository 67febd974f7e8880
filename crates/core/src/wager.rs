use crate::{RngState, WagerConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WagerError {
    #[error("invalid player index {0}")]
    InvalidPlayer(usize),
    #[error("wager for player {0} already settled")]
    AlreadySettled(usize),
}

/// One of the two anonymous options offered by the wager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WagerPick {
    First,
    Second,
}

impl WagerPick {
    pub fn from_choice(choice: i64) -> Option<Self> {
        match choice {
            1 => Some(WagerPick::First),
            2 => Some(WagerPick::Second),
            _ => None,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            WagerPick::First => 1,
            WagerPick::Second => 2,
        }
    }

    pub fn other(self) -> Self {
        match self {
            WagerPick::First => WagerPick::Second,
            WagerPick::Second => WagerPick::First,
        }
    }

    fn draw(rng: &mut RngState) -> Self {
        if rng.range_inclusive(1, 2) == 1 {
            WagerPick::First
        } else {
            WagerPick::Second
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WagerOutcome {
    pub stake: u32,
    pub pick: Option<WagerPick>,
    pub winning: Option<WagerPick>,
    pub delta: i64,
}

impl WagerOutcome {
    pub fn declined() -> Self {
        Self {
            stake: 0,
            pick: None,
            winning: None,
            delta: 0,
        }
    }

    pub fn opted_in(&self) -> bool {
        self.pick.is_some()
    }

    pub fn won(&self) -> bool {
        self.delta > 0
    }
}

#[derive(Debug, Clone)]
pub struct WagerMiniGame {
    config: WagerConfig,
}

impl WagerMiniGame {
    pub fn new(config: WagerConfig) -> Self {
        Self { config }
    }

    pub fn draw_stake(&self, rng: &mut RngState) -> u32 {
        rng.range_inclusive(1, self.config.max_stake.max(1))
    }

    /// Draws the winning option independently of `pick` and signs the stake.
    pub fn settle(&self, stake: u32, pick: WagerPick, rng: &mut RngState) -> WagerOutcome {
        let winning = WagerPick::draw(rng);
        let stake_points = i64::from(stake);
        let delta = if pick == winning {
            stake_points
        } else {
            -stake_points
        };
        WagerOutcome {
            stake,
            pick: Some(pick),
            winning: Some(winning),
            delta,
        }
    }
}

/// Per-player outcomes; each is written once and then frozen.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WagerBook {
    outcomes: Vec<Option<WagerOutcome>>,
}

impl WagerBook {
    pub fn new(players: usize) -> Self {
        Self {
            outcomes: vec![None; players],
        }
    }

    pub fn record(&mut self, player: usize, outcome: WagerOutcome) -> Result<(), WagerError> {
        let slot = self
            .outcomes
            .get_mut(player)
            .ok_or(WagerError::InvalidPlayer(player))?;
        if slot.is_some() {
            return Err(WagerError::AlreadySettled(player));
        }
        *slot = Some(outcome);
        Ok(())
    }

    pub fn outcome(&self, player: usize) -> Option<&WagerOutcome> {
        self.outcomes.get(player)?.as_ref()
    }

    pub fn delta(&self, player: usize) -> i64 {
        self.outcome(player).map(|outcome| outcome.delta).unwrap_or(0)
    }

    pub fn is_settled(&self, player: usize) -> bool {
        self.outcome(player).is_some()
    }
}
