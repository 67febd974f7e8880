use crate::{GameConfig, ScoreSheet, WagerBook};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerTotals {
    pub upper_subtotal: i64,
    pub upper_bonus: i64,
    pub lower_subtotal: i64,
    pub wager: i64,
    pub grand_total: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standings {
    pub totals: Vec<PlayerTotals>,
    pub winners: Vec<usize>,
    pub top_score: i64,
}

impl Standings {
    pub fn is_tie(&self) -> bool {
        self.winners.len() > 1
    }
}

pub fn player_totals(
    sheet: &ScoreSheet,
    wagers: &WagerBook,
    config: &GameConfig,
    player: usize,
) -> PlayerTotals {
    let upper_subtotal = sheet.upper_subtotal(player);
    let upper_bonus = config.upper_bonus_for(upper_subtotal);
    let lower_subtotal = sheet.lower_subtotal(player);
    let wager = wagers.delta(player);
    PlayerTotals {
        upper_subtotal,
        upper_bonus,
        lower_subtotal,
        wager,
        grand_total: upper_subtotal + upper_bonus + lower_subtotal + wager,
    }
}

/// Totals for every player; all players sharing the top grand total win.
pub fn aggregate(sheet: &ScoreSheet, wagers: &WagerBook, config: &GameConfig) -> Standings {
    let totals: Vec<PlayerTotals> = (0..sheet.players())
        .map(|player| player_totals(sheet, wagers, config, player))
        .collect();
    let top_score = totals
        .iter()
        .map(|totals| totals.grand_total)
        .max()
        .unwrap_or(0);
    let winners = totals
        .iter()
        .enumerate()
        .filter(|(_, totals)| totals.grand_total == top_score)
        .map(|(player, _)| player)
        .collect();
    Standings {
        totals,
        winners,
        top_score,
    }
}
