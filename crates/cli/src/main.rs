mod terminal;

use anyhow::{bail, Context};
use fivedice_autoplay::{run_autoplay, write_json, write_text, AutoplayConfig};
use fivedice_core::{setup_players, GameConfig, GameError, RoundEngine};
use fivedice_data::{load_game_config, load_game_config_or_default, DEFAULT_CONFIG_PATH};
use std::io;
use std::path::{Path, PathBuf};
use terminal::TerminalFrontend;

const DEFAULT_RUN_SEED: u64 = 0xC0FFEE;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct CliOptions {
    auto: bool,
    seed: Option<u64>,
    config: Option<PathBuf>,
    players: Option<usize>,
    trace: Option<PathBuf>,
}

fn parse_cli_options(args: &[String]) -> CliOptions {
    let mut options = CliOptions::default();
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--auto" => options.auto = true,
            "--seed" => {
                if let Some(value) = args.get(idx + 1) {
                    options.seed = value.parse::<u64>().ok();
                    idx += 1;
                }
            }
            "--config" => {
                if let Some(value) = args.get(idx + 1) {
                    options.config = Some(PathBuf::from(value));
                    idx += 1;
                }
            }
            "--players" => {
                if let Some(value) = args.get(idx + 1) {
                    options.players = value.parse::<usize>().ok();
                    idx += 1;
                }
            }
            "--trace" => {
                if let Some(value) = args.get(idx + 1) {
                    options.trace = Some(PathBuf::from(value));
                    idx += 1;
                }
            }
            other => log::warn!("ignoring unknown argument {other}"),
        }
        idx += 1;
    }
    options
}

fn main() {
    env_logger::init();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_cli_options(&args);
    if let Err(err) = run(&options) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(options: &CliOptions) -> anyhow::Result<()> {
    let config = match options.config.as_deref() {
        Some(path) => load_game_config(path)?,
        None => load_game_config_or_default(Path::new(DEFAULT_CONFIG_PATH))?,
    };
    let seed = options.seed.unwrap_or(DEFAULT_RUN_SEED);
    if options.auto {
        run_auto(config, seed, options)
    } else {
        run_interactive(config, seed)
    }
}

fn run_auto(game: GameConfig, seed: u64, options: &CliOptions) -> anyhow::Result<()> {
    let defaults = AutoplayConfig::default();
    let players = options.players.unwrap_or(defaults.players.min(game.max_players));
    if !game.accepts_player_count(players) {
        bail!(
            "--players {players} outside {}..={}",
            game.min_players,
            game.max_players
        );
    }
    let config = AutoplayConfig {
        seed,
        players,
        game,
        ..defaults
    };
    let result = run_autoplay(&config).context("autoplay")?;
    println!("{}", result.to_text_report());
    if let Some(path) = options.trace.as_deref() {
        let written = if path.extension().is_some_and(|ext| ext == "json") {
            write_json(path, &result)
        } else {
            write_text(path, &result)
        };
        written.with_context(|| format!("write {}", path.display()))?;
        println!("trace written to {}", path.display());
    }
    Ok(())
}

fn run_interactive(config: GameConfig, seed: u64) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut frontend = TerminalFrontend::new(stdin.lock(), io::stdout());
    frontend.banner();
    let players = match setup_players(&mut frontend, &config) {
        Ok(players) => players,
        Err(GameError::InputClosed(_)) => return Ok(()),
        Err(err) => return Err(err.into()),
    };
    frontend.set_players(&players);
    let mut engine = RoundEngine::new(config, players, seed)?;
    match engine.play(&mut frontend) {
        Ok(_) => Ok(()),
        Err(GameError::InputClosed(_)) => {
            println!("Game abandoned.");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn defaults_without_flags() {
        assert_eq!(parse_cli_options(&[]), CliOptions::default());
    }

    #[test]
    fn parses_every_flag() {
        let options = parse_cli_options(&args(&[
            "--auto",
            "--seed",
            "42",
            "--config",
            "rules.json",
            "--players",
            "3",
            "--trace",
            "out/game.json",
        ]));
        assert!(options.auto);
        assert_eq!(options.seed, Some(42));
        assert_eq!(options.config, Some(PathBuf::from("rules.json")));
        assert_eq!(options.players, Some(3));
        assert_eq!(options.trace, Some(PathBuf::from("out/game.json")));
    }

    #[test]
    fn bad_numbers_are_dropped() {
        let options = parse_cli_options(&args(&["--seed", "abc", "--players"]));
        assert_eq!(options.seed, None);
        assert_eq!(options.players, None);
    }
}
