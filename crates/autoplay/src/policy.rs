use crate::AutoplayConfig;
use fivedice_core::{
    score, AudioCue, Category, Cue, DiceSet, Display, InputClosed, Player, Prompt, PromptDialog,
    PromptKind, RngState, TurnCommand, TurnInput, TurnView,
};

// Categories with a fixed payout; a roll already paying one is kept whole.
const MADE_HANDS: [Category; 4] = [
    Category::FullHouse,
    Category::SmallStraight,
    Category::LargeStraight,
    Category::AllSame,
];

/// Positions to reroll: every die that does not show the most common face.
/// Ties between faces go to the higher face. Returns nothing to reroll when
/// the dice already pay an open fixed-payout category.
pub fn reroll_plan(dice: &DiceSet, open: &[Category]) -> Vec<usize> {
    let made = MADE_HANDS.iter().any(|category| {
        open.contains(category) && score(*category, dice).map_or(false, |value| value > 0)
    });
    if made {
        return Vec::new();
    }
    let counts = dice.face_counts();
    let mut keep = 6u8;
    for face in (1..=6u8).rev() {
        if counts[face as usize] > counts[keep as usize] {
            keep = face;
        }
    }
    dice.values()
        .iter()
        .enumerate()
        .filter(|(_, value)| **value != keep)
        .map(|(idx, _)| idx)
        .collect()
}

/// Highest raw score among `open`, earliest in sheet order on ties.
pub fn best_category(dice: &DiceSet, open: &[Category]) -> Option<(Category, u32)> {
    let mut best: Option<(Category, u32)> = None;
    for category in open {
        let Ok(value) = score(*category, dice) else {
            continue;
        };
        match best {
            Some((_, top)) if top >= value => {}
            _ => best = Some((*category, value)),
        }
    }
    best
}

/// Frontend that plays every seat with the greedy policy.
#[derive(Debug)]
pub struct GreedyPlayer {
    players: usize,
    catch_chance: f64,
    multiplier_threshold: u32,
    wager_opt_in: f64,
    rng: RngState,
    catch_tried: bool,
    messages: usize,
    cues: Vec<Cue>,
}

impl GreedyPlayer {
    pub fn new(config: &AutoplayConfig) -> Self {
        Self {
            players: config.players,
            catch_chance: config.catch_chance,
            multiplier_threshold: config.multiplier_threshold,
            wager_opt_in: config.wager_opt_in,
            rng: RngState::from_seed(config.seed.rotate_left(17) ^ 0x5EED),
            catch_tried: false,
            messages: 0,
            cues: Vec::new(),
        }
    }

    pub fn messages_seen(&self) -> usize {
        self.messages
    }

    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }
}

impl Display for GreedyPlayer {
    fn show_dice(&mut self, dice: &DiceSet) {
        log::trace!("bot sees {:?}", dice.values());
    }

    fn show_message(&mut self, text: &str) {
        self.messages += 1;
        log::trace!("bot message: {text}");
    }

    fn update_score_cell(&mut self, _category: Category, _player: usize, _value: i64) {}

    fn update_wager_cell(&mut self, _player: usize, _value: i64) {}
}

impl TurnInput for GreedyPlayer {
    fn wait_for_roll_confirmation(&mut self, _player: &Player) -> Result<(), InputClosed> {
        self.catch_tried = false;
        Ok(())
    }

    fn wait_for_reroll_selection(&mut self, view: &TurnView<'_>) -> Result<Vec<usize>, InputClosed> {
        Ok(reroll_plan(&view.dice, &view.open_categories))
    }

    fn wait_for_category_command(&mut self, view: &TurnView<'_>) -> Result<TurnCommand, InputClosed> {
        if let Some(token) = view.token.as_ref() {
            if !self.catch_tried && token.is_falling() {
                self.catch_tried = true;
                if self.rng.chance(self.catch_chance) {
                    return Ok(TurnCommand::CatchToken);
                }
            }
        }
        let (category, value) = best_category(&view.dice, &view.open_categories).ok_or(InputClosed)?;
        let last_chance = view.open_categories.len() == 1 && value > 0;
        if view.multiplier_available
            && !view.multiplier_requested
            && (value >= self.multiplier_threshold || last_chance)
        {
            return Ok(TurnCommand::RequestMultiplier);
        }
        Ok(TurnCommand::Select(category))
    }
}

impl PromptDialog for GreedyPlayer {
    fn read_int(&mut self, prompt: &Prompt) -> Result<i64, InputClosed> {
        let answer = match prompt.kind {
            PromptKind::PlayerCount => self.players as i64,
            PromptKind::WagerOptIn { .. } => {
                if self.rng.chance(self.wager_opt_in) {
                    1
                } else {
                    2
                }
            }
            PromptKind::WagerPick { .. } => i64::from(self.rng.range_inclusive(1, 2)),
            PromptKind::PlayerName { .. } => return Err(InputClosed),
        };
        Ok(answer)
    }

    fn read_line(&mut self, prompt: &Prompt) -> Result<String, InputClosed> {
        match prompt.kind {
            PromptKind::PlayerName { index } => Ok(format!("Bot {}", index + 1)),
            _ => Err(InputClosed),
        }
    }

    fn show_error(&mut self, text: &str) {
        log::debug!("bot error: {text}");
    }
}

impl AudioCue for GreedyPlayer {
    fn play(&mut self, cue: Cue) {
        self.cues.push(cue);
    }
}
