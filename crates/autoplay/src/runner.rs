use crate::{AutoplayConfig, AutoplayError, AutoplayResult, GreedyPlayer, SummaryStats};
use fivedice_core::{setup_players, Event, RoundEngine, TokenState};
use std::time::Instant;

/// Plays one complete seeded game with every seat driven by [`GreedyPlayer`].
pub fn run_autoplay(config: &AutoplayConfig) -> Result<AutoplayResult, AutoplayError> {
    if !config.game.accepts_player_count(config.players) {
        return Err(AutoplayError::InvalidConfig(format!(
            "{} players outside {}..={}",
            config.players, config.game.min_players, config.game.max_players
        )));
    }
    let started = Instant::now();
    let mut bot = GreedyPlayer::new(config);
    let players = setup_players(&mut bot, &config.game)?;
    let names = players.iter().map(|player| player.name.clone()).collect();
    let mut engine = RoundEngine::new(config.game.clone(), players, config.seed)?;
    let (turns, standings) = engine.play(&mut bot)?;
    let events: Vec<Event> = engine.events.drain().collect();
    let summary = summarize(&events, started.elapsed().as_millis() as u64);
    log::info!(
        "autoplay seed {} finished: winners {:?} at {}",
        config.seed,
        standings.winners,
        standings.top_score
    );
    Ok(AutoplayResult {
        seed: config.seed,
        players: names,
        standings,
        turns,
        events,
        summary,
    })
}

fn summarize(events: &[Event], wall_time_ms: u64) -> SummaryStats {
    let mut summary = SummaryStats {
        wall_time_ms,
        ..SummaryStats::default()
    };
    for event in events {
        match event {
            Event::BonusTokenSpawned { .. } => summary.tokens_spawned += 1,
            Event::BonusTokenResolved {
                state: TokenState::Caught,
                ..
            } => summary.tokens_caught += 1,
            Event::CategoryScored { doubled: true, .. } => summary.multipliers_used += 1,
            Event::CategoryRejected { .. } => summary.rejected_selections += 1,
            Event::WagerSettled { stake, .. } if *stake > 0 => summary.wagers_played += 1,
            _ => {}
        }
    }
    summary.event_count = events.len();
    summary
}
