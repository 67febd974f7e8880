use anyhow::{bail, Context};
use fivedice_core::{GameConfig, MAX_SUPPORTED_PLAYERS, N_SELECTABLE};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "assets/game.json";

pub fn load_game_config(path: &Path) -> anyhow::Result<GameConfig> {
    let config: GameConfig = load_json(path)?;
    validate_config(&config).with_context(|| format!("validate {}", path.display()))?;
    Ok(config)
}

/// Loads `path` when it exists, otherwise returns the built-in rules.
pub fn load_game_config_or_default(path: &Path) -> anyhow::Result<GameConfig> {
    if path.exists() {
        load_game_config(path)
    } else {
        Ok(GameConfig::default())
    }
}

pub fn parse_game_config(raw: &str) -> anyhow::Result<GameConfig> {
    let config: GameConfig = serde_json::from_str(raw).context("parse game config")?;
    validate_config(&config)?;
    Ok(config)
}

pub fn validate_config(config: &GameConfig) -> anyhow::Result<()> {
    if config.rounds == 0 || config.rounds as usize > N_SELECTABLE {
        bail!("rounds must be between 1 and {N_SELECTABLE}, got {}", config.rounds);
    }
    if config.min_players == 0 {
        bail!("min_players must be at least 1");
    }
    if config.min_players > config.max_players {
        bail!(
            "min_players {} exceeds max_players {}",
            config.min_players,
            config.max_players
        );
    }
    if config.max_players > MAX_SUPPORTED_PLAYERS {
        bail!(
            "max_players {} exceeds the supported {MAX_SUPPORTED_PLAYERS}",
            config.max_players
        );
    }
    if config.multiplier < 1 {
        bail!("multiplier must be at least 1");
    }
    if config.upper_bonus < 0 {
        bail!("upper_bonus cannot be negative");
    }

    let bonus = &config.bonus_event;
    if !(0.0..=1.0).contains(&bonus.spawn_chance) {
        bail!("bonus_event.spawn_chance {} outside 0..=1", bonus.spawn_chance);
    }
    if bonus.tick_ms == 0 {
        bail!("bonus_event.tick_ms must be positive");
    }
    if bonus.step <= 0 {
        bail!("bonus_event.step must be positive");
    }
    if bonus.bound <= bonus.start {
        bail!(
            "bonus_event.bound {} must be above start {}",
            bonus.bound,
            bonus.start
        );
    }

    if config.wager.max_stake == 0 {
        bail!("wager.max_stake must be positive");
    }
    Ok(())
}

fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        validate_config(&GameConfig::default()).unwrap();
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = parse_game_config(r#"{ "rounds": 5, "bonus_event": { "spawn_chance": 0.5 } }"#)
            .unwrap();
        assert_eq!(config.rounds, 5);
        assert_eq!(config.bonus_event.spawn_chance, 0.5);
        assert_eq!(config.bonus_event.catch_bonus, 10);
        assert_eq!(config.wager.max_stake, 40);
        assert_eq!(config.max_players, 4);
    }

    #[test]
    fn rejects_bad_values() {
        for raw in [
            r#"{ "rounds": 0 }"#,
            r#"{ "rounds": 14 }"#,
            r#"{ "min_players": 0 }"#,
            r#"{ "min_players": 3, "max_players": 2 }"#,
            r#"{ "max_players": 5 }"#,
            r#"{ "multiplier": 0 }"#,
            r#"{ "bonus_event": { "spawn_chance": 1.5 } }"#,
            r#"{ "bonus_event": { "tick_ms": 0 } }"#,
            r#"{ "bonus_event": { "step": 0 } }"#,
            r#"{ "bonus_event": { "start": 10, "bound": 10 } }"#,
            r#"{ "wager": { "max_stake": 0 } }"#,
        ] {
            assert!(parse_game_config(raw).is_err(), "accepted {raw}");
        }
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = parse_game_config("{ rounds: }").unwrap_err();
        assert!(err.to_string().contains("parse game config"));
    }
}
