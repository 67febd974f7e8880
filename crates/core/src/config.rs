use crate::N_SELECTABLE;
use serde::{Deserialize, Serialize};

pub const MAX_SUPPORTED_PLAYERS: usize = 4;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BonusEventConfig {
    pub spawn_chance: f64,
    pub tick_ms: u64,
    pub step: i32,
    pub start: i32,
    /// The token expires once its position passes this value.
    pub bound: i32,
    pub catch_bonus: u32,
}

impl Default for BonusEventConfig {
    fn default() -> Self {
        Self {
            spawn_chance: 0.2,
            tick_ms: 20,
            step: 5,
            start: -20,
            bound: 355,
            catch_bonus: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WagerConfig {
    pub max_stake: u32,
}

impl Default for WagerConfig {
    fn default() -> Self {
        Self { max_stake: 40 }
    }
}

/// Rules of one game. Fields missing from a config file take the classic values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub rounds: u8,
    pub min_players: usize,
    pub max_players: usize,
    pub rerolls_per_turn: u8,
    pub upper_bonus_threshold: i64,
    pub upper_bonus: i64,
    pub multiplier: u32,
    pub bonus_event: BonusEventConfig,
    pub wager: WagerConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rounds: 13,
            min_players: 1,
            max_players: MAX_SUPPORTED_PLAYERS,
            rerolls_per_turn: 2,
            upper_bonus_threshold: 63,
            upper_bonus: 35,
            multiplier: 2,
            bonus_event: BonusEventConfig::default(),
            wager: WagerConfig::default(),
        }
    }
}

impl GameConfig {
    pub fn accepts_player_count(&self, count: usize) -> bool {
        (self.min_players..=self.max_players).contains(&count)
    }

    /// First rule the engine cannot run with, if any. Loaders add their own
    /// range checks on top.
    pub fn rule_violation(&self) -> Option<&'static str> {
        if self.rounds == 0 || self.rounds as usize > N_SELECTABLE {
            return Some("rounds must be between 1 and 13");
        }
        if self.multiplier < 1 {
            return Some("multiplier must be at least 1");
        }
        if self.bonus_event.step <= 0 {
            return Some("bonus_event.step must be positive");
        }
        if self.bonus_event.bound <= self.bonus_event.start {
            return Some("bonus_event.bound must be above start");
        }
        if self.wager.max_stake == 0 {
            return Some("wager.max_stake must be positive");
        }
        None
    }

    pub fn upper_bonus_for(&self, upper_subtotal: i64) -> i64 {
        if upper_subtotal >= self.upper_bonus_threshold {
            self.upper_bonus
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_break_no_rule() {
        assert_eq!(GameConfig::default().rule_violation(), None);
    }

    #[test]
    fn stalled_token_and_dead_multiplier_are_caught() {
        let mut config = GameConfig::default();
        config.bonus_event.step = 0;
        assert_eq!(
            config.rule_violation(),
            Some("bonus_event.step must be positive")
        );
        let config = GameConfig {
            multiplier: 0,
            ..GameConfig::default()
        };
        assert_eq!(config.rule_violation(), Some("multiplier must be at least 1"));
    }
}
