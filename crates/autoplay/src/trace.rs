use crate::AutoplayError;
use fivedice_core::{Event, Standings, TokenState, TurnOutcome};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SummaryStats {
    pub event_count: usize,
    pub tokens_spawned: u32,
    pub tokens_caught: u32,
    pub multipliers_used: u32,
    pub rejected_selections: u32,
    pub wagers_played: u32,
    pub wall_time_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoplayResult {
    pub seed: u64,
    pub players: Vec<String>,
    pub standings: Standings,
    pub turns: Vec<TurnOutcome>,
    #[serde(default)]
    pub events: Vec<Event>,
    pub summary: SummaryStats,
}

impl AutoplayResult {
    pub fn to_text_report(&self) -> String {
        let mut lines = vec![
            format!("seed: {}", self.seed),
            format!(
                "summary: events={} tokens={}/{} caught multipliers={} wagers={} wall_ms={}",
                self.summary.event_count,
                self.summary.tokens_caught,
                self.summary.tokens_spawned,
                self.summary.multipliers_used,
                self.summary.wagers_played,
                self.summary.wall_time_ms
            ),
            String::new(),
            "standings:".to_string(),
        ];
        for (player, totals) in self.standings.totals.iter().enumerate() {
            let marker = if self.standings.winners.contains(&player) {
                "*"
            } else {
                " "
            };
            lines.push(format!(
                " {marker} {:<12} upper {:>3} bonus {:>2} lower {:>3} wager {:>+3} total {:>4}",
                self.player_name(player),
                totals.upper_subtotal,
                totals.upper_bonus,
                totals.lower_subtotal,
                totals.wager,
                totals.grand_total
            ));
        }
        lines.push(String::new());
        lines.push("turns:".to_string());
        for turn in &self.turns {
            let mut detail = format!(
                "  r{:>2} {:<12} {:?} -> {:<15} base {:>2} total {:>3}",
                turn.round + 1,
                self.player_name(turn.player),
                turn.dice,
                turn.category.display_name(),
                turn.score.base,
                turn.score.total
            );
            if turn.score.doubled {
                detail.push_str(" x2");
            }
            match turn.token {
                Some(TokenState::Caught) => detail.push_str(" +token"),
                Some(state) => detail.push_str(&format!(" token {state:?}")),
                None => {}
            }
            lines.push(detail);
        }
        lines.join("\n")
    }

    fn player_name(&self, player: usize) -> &str {
        self.players.get(player).map(String::as_str).unwrap_or("?")
    }
}

pub fn write_json(path: &Path, result: &AutoplayResult) -> Result<(), AutoplayError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let body = serde_json::to_string_pretty(result)?;
    fs::write(path, body)?;
    Ok(())
}

pub fn write_text(path: &Path, result: &AutoplayResult) -> Result<(), AutoplayError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, result.to_text_report())?;
    Ok(())
}
