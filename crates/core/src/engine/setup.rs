use super::GameError;
use crate::{AudioCue, Cue, GameConfig, Player, Prompt, PromptDialog, PromptKind};

/// Asks for a player count inside the configured range, then one name per
/// player. Out-of-range counts are re-prompted; blank names fall back to
/// `Player N`.
pub fn setup_players<F: PromptDialog + AudioCue + ?Sized>(
    dialog: &mut F,
    config: &GameConfig,
) -> Result<Vec<Player>, GameError> {
    let count_prompt = Prompt::new(
        PromptKind::PlayerCount,
        format!(
            "Enter number of players ({}-{}):",
            config.min_players, config.max_players
        ),
    );
    let count = loop {
        let raw = dialog.read_int(&count_prompt)?;
        if raw < config.min_players as i64 {
            dialog.play(Cue::InvalidInput);
            dialog.show_error(&format!(
                "At least {} player should play",
                config.min_players
            ));
        } else if raw > config.max_players as i64 {
            dialog.play(Cue::InvalidInput);
            dialog.show_error(&format!(
                "At most {} players can play",
                config.max_players
            ));
        } else {
            break raw as usize;
        }
    };

    let mut players = Vec::with_capacity(count);
    for index in 0..count {
        let prompt = Prompt::new(
            PromptKind::PlayerName { index },
            format!("Player {} name:", index + 1),
        );
        let name = dialog.read_line(&prompt)?;
        let name = name.trim();
        let name = if name.is_empty() {
            format!("Player {}", index + 1)
        } else {
            name.to_string()
        };
        players.push(Player::new(index, name));
    }
    log::info!(
        "players: {}",
        players
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    Ok(players)
}
