//! Collaborator seams. The engine drives these; rendering, prompting and sound
//! live behind them.

use crate::{Category, CatchHandle, DiceSet, Player};
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("input closed")]
pub struct InputClosed;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    CategorySatisfied,
    CategoryUnsatisfied,
    InvalidInput,
    GameWon,
}

/// What a dialog prompt is asking for, alongside its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    PlayerCount,
    PlayerName { index: usize },
    WagerOptIn { player: usize },
    WagerPick { player: usize, stake: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub text: String,
}

impl Prompt {
    pub fn new(kind: PromptKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnCommand {
    Select(Category),
    RequestMultiplier,
    CatchToken,
}

/// Read-only snapshot handed to input waits.
#[derive(Debug, Clone)]
pub struct TurnView<'a> {
    pub round: u8,
    pub player: &'a Player,
    pub dice: DiceSet,
    pub rerolls_left: u8,
    pub open_categories: Vec<Category>,
    pub multiplier_available: bool,
    pub multiplier_requested: bool,
    pub token: Option<CatchHandle>,
}

pub trait Display {
    fn show_dice(&mut self, dice: &DiceSet);
    fn show_message(&mut self, text: &str);
    fn update_score_cell(&mut self, category: Category, player: usize, value: i64);
    /// Final row below the sheet: the player's bonus-game delta, zero when declined.
    fn update_wager_cell(&mut self, player: usize, value: i64);
}

pub trait TurnInput {
    fn wait_for_roll_confirmation(&mut self, player: &Player) -> Result<(), InputClosed>;
    /// Zero-based dice positions to reroll; empty keeps every die.
    fn wait_for_reroll_selection(&mut self, view: &TurnView<'_>) -> Result<Vec<usize>, InputClosed>;
    fn wait_for_category_command(&mut self, view: &TurnView<'_>) -> Result<TurnCommand, InputClosed>;
}

pub trait PromptDialog {
    fn read_int(&mut self, prompt: &Prompt) -> Result<i64, InputClosed>;
    fn read_line(&mut self, prompt: &Prompt) -> Result<String, InputClosed>;
    fn show_error(&mut self, text: &str);
}

/// Fire-and-forget; implementations must not block.
pub trait AudioCue {
    fn play(&mut self, cue: Cue);
}

pub trait Frontend: Display + TurnInput + PromptDialog + AudioCue {}

impl<T: Display + TurnInput + PromptDialog + AudioCue> Frontend for T {}
