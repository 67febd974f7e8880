use super::{GameError, RoundEngine, TurnOutcome};
use crate::{
    aggregate, Category, Cue, Event, Frontend, Phase, Prompt, PromptKind, Standings,
    WagerError, WagerOutcome, WagerPick,
};

impl RoundEngine {
    /// Plays every remaining phase to completion.
    pub fn play<F: Frontend + ?Sized>(
        &mut self,
        frontend: &mut F,
    ) -> Result<(Vec<TurnOutcome>, Standings), GameError> {
        let outcomes = self.play_rounds(frontend)?;
        self.run_wagers(frontend)?;
        let standings = self.finish(frontend)?;
        Ok((outcomes, standings))
    }

    pub fn run_wagers<F: Frontend + ?Sized>(&mut self, frontend: &mut F) -> Result<(), GameError> {
        if self.phase != Phase::Wager {
            return Err(GameError::InvalidPhase(self.phase));
        }
        for player in 0..self.players.len() {
            if !self.wagers.is_settled(player) {
                self.run_wager_for(player, frontend)?;
            }
        }
        self.phase = Phase::Results;
        Ok(())
    }

    pub fn run_wager_for<F: Frontend + ?Sized>(
        &mut self,
        player: usize,
        frontend: &mut F,
    ) -> Result<WagerOutcome, GameError> {
        if self.phase != Phase::Wager {
            return Err(GameError::InvalidPhase(self.phase));
        }
        if player >= self.players.len() {
            return Err(GameError::InvalidPlayer(player));
        }
        if self.wagers.is_settled(player) {
            return Err(WagerError::AlreadySettled(player).into());
        }
        let name = self.player_name(player).to_string();
        let opt_in = Prompt::new(
            PromptKind::WagerOptIn { player },
            format!("{name}, do you want to play the bonus game? 1) yes 2) no"),
        );
        let outcome = match read_choice(frontend, &opt_in)? {
            WagerPick::Second => WagerOutcome::declined(),
            WagerPick::First => {
                let stake = self.wager_game.draw_stake(&mut self.rng);
                frontend.show_message(&format!(
                    "Two balls are hidden. Pick the right one and win {stake} points; pick wrong and lose {stake}."
                ));
                let pick_prompt = Prompt::new(
                    PromptKind::WagerPick { player, stake },
                    "Choose a ball: 1 or 2",
                );
                let pick = read_choice(frontend, &pick_prompt)?;
                let outcome = self.wager_game.settle(stake, pick, &mut self.rng);
                if outcome.won() {
                    frontend.show_message(&format!("Congratulations! You won {stake} points."));
                } else {
                    frontend.show_message(&format!(
                        "Sorry, the winning ball was {}. You lost {stake} points.",
                        pick.other().number()
                    ));
                }
                outcome
            }
        };
        self.wagers.record(player, outcome)?;
        self.events.push(Event::WagerSettled {
            player,
            stake: outcome.stake,
            delta: outcome.delta,
        });
        log::info!(
            "player {player} wager: stake {}, delta {}",
            outcome.stake,
            outcome.delta
        );
        Ok(outcome)
    }

    /// Aggregates the final sheet and wagers and announces the winners.
    pub fn finish<F: Frontend + ?Sized>(&mut self, frontend: &mut F) -> Result<Standings, GameError> {
        if self.phase != Phase::Results {
            return Err(GameError::InvalidPhase(self.phase));
        }
        let standings = aggregate(&self.sheet, &self.wagers, &self.config);
        for (player, totals) in standings.totals.iter().enumerate() {
            frontend.update_score_cell(Category::UpperSubtotal, player, totals.upper_subtotal);
            frontend.update_score_cell(Category::UpperBonus, player, totals.upper_bonus);
            frontend.update_score_cell(Category::LowerSubtotal, player, totals.lower_subtotal);
            frontend.update_score_cell(Category::GrandTotal, player, totals.grand_total);
            frontend.update_wager_cell(player, totals.wager);
            frontend.show_message(&format!(
                "{} bonus game: {:+}",
                self.player_name(player),
                totals.wager
            ));
        }

        let names: Vec<&str> = standings
            .winners
            .iter()
            .map(|&player| self.player_name(player))
            .collect();
        let message = if standings.is_tie() {
            format!(
                "It's a tie! {} share the win with {} points.",
                names.join(" and "),
                standings.top_score
            )
        } else {
            format!(
                "Congratulations, {}! You won with a total score of {}.",
                names.join(", "),
                standings.top_score
            )
        };
        frontend.show_message(&message);
        frontend.play(Cue::GameWon);

        self.events.push(Event::GameFinished {
            winners: standings.winners.clone(),
            top_score: standings.top_score,
        });
        log::info!(
            "game finished: winners {:?} with {}",
            standings.winners,
            standings.top_score
        );
        self.phase = Phase::Finished;
        self.standings = Some(standings.clone());
        Ok(standings)
    }
}

/// Re-prompts until the answer is 1 or 2.
fn read_choice<F: Frontend + ?Sized>(
    frontend: &mut F,
    prompt: &Prompt,
) -> Result<WagerPick, GameError> {
    loop {
        if let Some(choice) = WagerPick::from_choice(frontend.read_int(prompt)?) {
            return Ok(choice);
        }
        frontend.play(Cue::InvalidInput);
        frontend.show_error("Please enter 1 or 2.");
    }
}
