use crate::{
    BonusEventCoordinator, BonusLedger, Category, DiceSet, EventBus, GameConfig, InputClosed,
    Phase, Player, RngState, ScoreSheet, ScoringError, SheetError, Standings, WagerBook,
    WagerError, WagerMiniGame,
};
use thiserror::Error;

mod finish;
mod setup;
mod turn;

pub use setup::setup_players;
pub use turn::{TurnOutcome, TurnScore};

#[derive(Debug, Error)]
pub enum GameError {
    #[error("category {0:?} cannot be selected")]
    IllegalCategory(Category),
    #[error("invalid phase: {0:?}")]
    InvalidPhase(Phase),
    #[error("player count {count} outside {min}..={max}")]
    PlayerCount { count: usize, min: usize, max: usize },
    #[error("invalid player index {0}")]
    InvalidPlayer(usize),
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
    #[error("sheet error: {0}")]
    Sheet(#[from] SheetError),
    #[error("scoring error: {0}")]
    Scoring(#[from] ScoringError),
    #[error("wager error: {0}")]
    Wager(#[from] WagerError),
    #[error(transparent)]
    InputClosed(#[from] InputClosed),
}

/// Drives rounds of turns over a fixed set of players and owns every piece of
/// mutable game state except a live token's terminal transition.
#[derive(Debug)]
pub struct RoundEngine {
    pub config: GameConfig,
    pub players: Vec<Player>,
    pub rng: RngState,
    pub events: EventBus,
    sheet: ScoreSheet,
    ledger: BonusLedger,
    wagers: WagerBook,
    dice: DiceSet,
    phase: Phase,
    round: u8,
    coordinator: BonusEventCoordinator,
    wager_game: WagerMiniGame,
    standings: Option<Standings>,
}

impl RoundEngine {
    pub fn new(config: GameConfig, players: Vec<Player>, seed: u64) -> Result<Self, GameError> {
        if !config.accepts_player_count(players.len()) {
            return Err(GameError::PlayerCount {
                count: players.len(),
                min: config.min_players,
                max: config.max_players,
            });
        }
        if let Some(rule) = config.rule_violation() {
            return Err(GameError::InvalidConfig(rule));
        }
        let count = players.len();
        let mut rng = RngState::from_seed(seed);
        let dice = DiceSet::rolled(&mut rng);
        let coordinator = BonusEventCoordinator::new(config.bonus_event.clone());
        let wager_game = WagerMiniGame::new(config.wager.clone());
        log::info!("new game: {count} players, {} rounds, seed {seed}", config.rounds);
        Ok(Self {
            config,
            players,
            rng,
            events: EventBus::default(),
            sheet: ScoreSheet::new(count),
            ledger: BonusLedger::new(count),
            wagers: WagerBook::new(count),
            dice,
            phase: Phase::Rounds,
            round: 0,
            coordinator,
            wager_game,
            standings: None,
        })
    }

    pub fn sheet(&self) -> &ScoreSheet {
        &self.sheet
    }

    pub fn ledger(&self) -> &BonusLedger {
        &self.ledger
    }

    pub fn wagers(&self) -> &WagerBook {
        &self.wagers
    }

    pub fn dice(&self) -> &DiceSet {
        &self.dice
    }

    /// Replaces the held dice, for scripted setups and replays.
    pub fn set_dice(&mut self, dice: DiceSet) {
        self.dice = dice;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn round(&self) -> u8 {
        self.round
    }

    pub fn standings(&self) -> Option<&Standings> {
        self.standings.as_ref()
    }

    pub fn bonus_token_live(&self) -> bool {
        self.coordinator.is_live()
    }

    pub fn player_name(&self, player: usize) -> &str {
        self.players
            .get(player)
            .map(|p| p.name.as_str())
            .unwrap_or("?")
    }
}
