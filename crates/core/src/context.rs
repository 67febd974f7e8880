use crate::{LiveToken, TokenState};

/// State scoped to a single turn. Dropping it withdraws any token still falling.
#[derive(Debug)]
pub struct TurnContext {
    pub round: u8,
    pub player: usize,
    pub rerolls_left: u8,
    pub multiplier_requested: bool,
    pub(crate) token: Option<LiveToken>,
}

impl TurnContext {
    pub fn new(round: u8, player: usize, rerolls: u8) -> Self {
        Self {
            round,
            player,
            rerolls_left: rerolls,
            multiplier_requested: false,
            token: None,
        }
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<&LiveToken> {
        self.token.as_ref()
    }

    /// Forces the turn's token into a terminal state and returns it.
    pub fn withdraw_token(&mut self) -> Option<(u64, TokenState)> {
        let token = self.token.take()?;
        let id = token.id();
        Some((id, token.resolve()))
    }
}
