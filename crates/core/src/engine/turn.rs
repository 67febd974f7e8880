use super::{GameError, RoundEngine};
use crate::{
    score, Category, Cue, Event, Frontend, LiveToken, Phase, TokenState, TurnCommand,
    TurnContext, TurnView, N_DICE,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnScore {
    pub base: u32,
    pub doubled: bool,
    pub catch_bonus: u32,
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOutcome {
    pub round: u8,
    pub player: usize,
    pub category: Category,
    pub dice: [u8; N_DICE],
    pub score: TurnScore,
    pub token: Option<TokenState>,
    pub rejected: u32,
}

impl RoundEngine {
    pub fn play_rounds<F: Frontend + ?Sized>(
        &mut self,
        frontend: &mut F,
    ) -> Result<Vec<TurnOutcome>, GameError> {
        let mut outcomes = Vec::new();
        while self.phase == Phase::Rounds {
            outcomes.extend(self.play_round(frontend)?);
        }
        Ok(outcomes)
    }

    pub fn play_round<F: Frontend + ?Sized>(
        &mut self,
        frontend: &mut F,
    ) -> Result<Vec<TurnOutcome>, GameError> {
        if self.phase != Phase::Rounds {
            return Err(GameError::InvalidPhase(self.phase));
        }
        let mut outcomes = Vec::with_capacity(self.players.len());
        for player in 0..self.players.len() {
            outcomes.push(self.play_turn(player, frontend)?);
        }
        self.round += 1;
        if self.round >= self.config.rounds {
            self.phase = Phase::Wager;
        }
        Ok(outcomes)
    }

    pub fn play_turn<F: Frontend + ?Sized>(
        &mut self,
        player: usize,
        frontend: &mut F,
    ) -> Result<TurnOutcome, GameError> {
        if self.phase != Phase::Rounds {
            return Err(GameError::InvalidPhase(self.phase));
        }
        if player >= self.players.len() {
            return Err(GameError::InvalidPlayer(player));
        }
        let mut ctx = TurnContext::new(self.round, player, self.config.rerolls_per_turn);
        self.events.push(Event::TurnStarted {
            round: self.round,
            player,
        });

        frontend.show_message(&format!(
            "{}'s turn. Roll the dice.",
            self.player_name(player)
        ));
        frontend.wait_for_roll_confirmation(&self.players[player])?;
        self.dice.roll_all(&mut self.rng);
        self.publish_dice(player, 0, frontend);

        while ctx.rerolls_left > 0 {
            frontend.show_message("Select the dice you wish to re-roll.");
            let indices = frontend.wait_for_reroll_selection(&self.view(&ctx))?;
            self.dice.reroll_selected(&indices, &mut self.rng);
            ctx.rerolls_left -= 1;
            let reroll = self.config.rerolls_per_turn - ctx.rerolls_left;
            self.publish_dice(player, reroll, frontend);
        }

        frontend.show_message("Select a category for this roll.");
        self.roll_for_token(&mut ctx, frontend);

        let mut rejected = 0;
        let category = loop {
            let command = frontend.wait_for_category_command(&self.view(&ctx))?;
            match command {
                TurnCommand::Select(category) => {
                    if !category.is_selectable() {
                        return Err(GameError::IllegalCategory(category));
                    }
                    if self.sheet.is_used(player, category) {
                        rejected += 1;
                        self.events.push(Event::CategoryRejected { player, category });
                        frontend.play(Cue::InvalidInput);
                        frontend.show_error(
                            "This category has already been used. Choose a different one.",
                        );
                        continue;
                    }
                    break category;
                }
                TurnCommand::RequestMultiplier => self.request_multiplier(&mut ctx, frontend),
                TurnCommand::CatchToken => catch_token(&ctx, frontend),
            }
        };

        // Commit point: the token is settled before anything reads it.
        let token = ctx.withdraw_token().map(|(id, state)| {
            self.events.push(Event::BonusTokenResolved {
                player,
                token: id,
                state,
            });
            match state {
                TokenState::Caught => frontend.show_message("You caught it!"),
                _ => frontend.show_message("You lost it."),
            }
            state
        });

        let score = self.apply_score(player, category, ctx.multiplier_requested, token)?;
        if score.base != 0 {
            frontend.play(Cue::CategorySatisfied);
        } else {
            frontend.play(Cue::CategoryUnsatisfied);
        }
        self.publish_scores(player, category, score.total, frontend);

        Ok(TurnOutcome {
            round: ctx.round,
            player,
            category,
            dice: self.dice.values(),
            score,
            token,
            rejected,
        })
    }

    /// Scores `category` for the held dice and writes it to the sheet.
    ///
    /// A used category is rejected before anything changes, including the
    /// multiplier ledger. The multiplier doubles the raw score; a caught token
    /// adds its bonus afterwards.
    pub fn apply_score(
        &mut self,
        player: usize,
        category: Category,
        multiplier_requested: bool,
        token: Option<TokenState>,
    ) -> Result<TurnScore, GameError> {
        if !category.is_selectable() {
            return Err(GameError::IllegalCategory(category));
        }
        self.sheet.check_open(player, category)?;
        let base = score(category, &self.dice)?;
        let doubled = multiplier_requested && self.ledger.try_consume(player);
        let mut total = if doubled {
            base.saturating_mul(self.config.multiplier)
        } else {
            base
        };
        let caught = token == Some(TokenState::Caught);
        let catch_bonus = if caught {
            self.config.bonus_event.catch_bonus
        } else {
            0
        };
        total = total.saturating_add(catch_bonus);
        self.sheet.record(player, category, total)?;

        self.events.push(Event::CategoryScored {
            player,
            category,
            base,
            doubled,
            caught,
            total,
        });
        log::info!(
            "player {player} scored {total} in {} (base {base}, doubled {doubled}, caught {caught})",
            category.id()
        );
        Ok(TurnScore {
            base,
            doubled,
            catch_bonus,
            total,
        })
    }

    fn view(&self, ctx: &TurnContext) -> TurnView<'_> {
        TurnView {
            round: ctx.round,
            player: &self.players[ctx.player],
            dice: self.dice,
            rerolls_left: ctx.rerolls_left,
            open_categories: self.sheet.open_categories(ctx.player),
            multiplier_available: self.ledger.is_available(ctx.player),
            multiplier_requested: ctx.multiplier_requested,
            token: ctx.token().map(LiveToken::handle),
        }
    }

    fn publish_dice<F: Frontend + ?Sized>(&mut self, player: usize, reroll: u8, frontend: &mut F) {
        let values = self.dice.values();
        log::debug!("player {player} dice {values:?} (reroll {reroll})");
        self.events.push(Event::DiceRolled {
            player,
            values,
            reroll,
        });
        frontend.show_dice(&self.dice);
    }

    fn publish_scores<F: Frontend + ?Sized>(
        &self,
        player: usize,
        category: Category,
        total: u32,
        frontend: &mut F,
    ) {
        let upper = self.sheet.upper_subtotal(player);
        let lower = self.sheet.lower_subtotal(player);
        frontend.update_score_cell(category, player, i64::from(total));
        frontend.update_score_cell(Category::UpperSubtotal, player, upper);
        frontend.update_score_cell(Category::LowerSubtotal, player, lower);
        frontend.update_score_cell(Category::GrandTotal, player, upper + lower);
    }

    fn roll_for_token<F: Frontend + ?Sized>(&mut self, ctx: &mut TurnContext, frontend: &mut F) {
        match self.coordinator.maybe_spawn(ctx, &mut self.rng) {
            Ok(Some(handle)) => {
                self.events.push(Event::BonusTokenSpawned {
                    player: ctx.player,
                    token: handle.id(),
                });
                frontend.show_message(&format!(
                    "A bonus token is falling! Catch it before choosing a category for +{} points.",
                    self.config.bonus_event.catch_bonus
                ));
            }
            Ok(None) => {}
            Err(err) => log::warn!("bonus token not started: {err}"),
        }
    }

    fn request_multiplier<F: Frontend + ?Sized>(&mut self, ctx: &mut TurnContext, frontend: &mut F) {
        let granted = self.ledger.is_available(ctx.player);
        self.events.push(Event::MultiplierRequested {
            player: ctx.player,
            granted,
        });
        if granted {
            ctx.multiplier_requested = true;
            frontend.show_message(&format!(
                "Bonus armed: this turn's score is multiplied by {}.",
                self.config.multiplier
            ));
        } else {
            frontend.play(Cue::InvalidInput);
            frontend.show_error(&format!(
                "No bonuses left for {}",
                self.player_name(ctx.player)
            ));
        }
    }
}

fn catch_token<F: Frontend + ?Sized>(ctx: &TurnContext, frontend: &mut F) {
    let Some(token) = ctx.token() else {
        frontend.show_error("There is no bonus token to catch.");
        return;
    };
    if !token.handle().catch() {
        frontend.show_error("Too late, the token is gone.");
    }
}
