use fivedice_core::GameConfig;
use fivedice_data::{load_game_config, load_game_config_or_default};
use std::path::PathBuf;

fn assets_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("assets")
}

#[test]
fn shipped_config_matches_classic_rules() {
    let config = load_game_config(&assets_root().join("game.json")).expect("load config");
    assert_eq!(config, GameConfig::default());
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let config = load_game_config_or_default(&assets_root().join("missing.json")).expect("default");
    assert_eq!(config, GameConfig::default());
}

#[test]
fn missing_file_is_an_error_when_required() {
    let err = load_game_config(&assets_root().join("missing.json")).unwrap_err();
    assert!(err.to_string().starts_with("read "));
}
