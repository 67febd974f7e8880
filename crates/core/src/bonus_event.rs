//! Timed, catchable bonus token.
//!
//! A spawned token falls on its own worker thread until exactly one of three
//! terminal signals claims it: a catch from the player, expiry past the visible
//! bound, or withdrawal when the turn commits a category. The claim is a single
//! compare-and-set out of `Falling`; losers are no-ops. The winner publishes the
//! terminal state on a one-shot channel read back by the turn when it resolves.

use crate::{BonusEventConfig, RngState, TurnContext};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicU8, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use thiserror::Error;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenState {
    Falling = 0,
    Caught = 1,
    Expired = 2,
    Withdrawn = 3,
}

impl TokenState {
    fn from_raw(raw: u8) -> Self {
        match raw {
            1 => TokenState::Caught,
            2 => TokenState::Expired,
            3 => TokenState::Withdrawn,
            _ => TokenState::Falling,
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, TokenState::Falling)
    }
}

#[derive(Debug, Error)]
pub enum BonusEventError {
    #[error("a bonus token is already live")]
    AlreadyLive,
    #[error("failed to start token worker: {0}")]
    Spawn(#[from] std::io::Error),
}

#[derive(Debug)]
struct TokenShared {
    state: AtomicU8,
    position: AtomicI32,
    bound: i32,
    notify: Sender<TokenState>,
}

impl TokenShared {
    fn state(&self) -> TokenState {
        TokenState::from_raw(self.state.load(Ordering::Acquire))
    }

    fn finalize(&self, terminal: TokenState) -> bool {
        let claimed = self
            .state
            .compare_exchange(
                TokenState::Falling as u8,
                terminal as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok();
        if claimed {
            // Capacity one and a single successful claimant, so this never fails.
            let _ = self.notify.try_send(terminal);
        }
        claimed
    }
}

/// Cloneable, thread-safe handle a frontend uses to catch the token.
#[derive(Debug, Clone)]
pub struct CatchHandle {
    id: u64,
    shared: Arc<TokenShared>,
}

impl CatchHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns true only if this call moved the token from falling to caught.
    pub fn catch(&self) -> bool {
        let caught = self.shared.finalize(TokenState::Caught);
        if caught {
            log::debug!("bonus token {} caught", self.id);
        } else {
            log::debug!(
                "bonus token {} catch ignored, already {:?}",
                self.id,
                self.shared.state()
            );
        }
        caught
    }

    pub fn state(&self) -> TokenState {
        self.shared.state()
    }

    pub fn is_falling(&self) -> bool {
        self.state() == TokenState::Falling
    }

    pub fn position(&self) -> i32 {
        self.shared.position.load(Ordering::Acquire)
    }

    pub fn bound(&self) -> i32 {
        self.shared.bound
    }
}

/// Owner side of a spawned token, held by the turn context.
#[derive(Debug)]
pub struct LiveToken {
    id: u64,
    shared: Arc<TokenShared>,
    outcome: Receiver<TokenState>,
    stop: Option<Sender<()>>,
    worker: Option<JoinHandle<()>>,
    live: Arc<AtomicBool>,
}

impl LiveToken {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn handle(&self) -> CatchHandle {
        CatchHandle {
            id: self.id,
            shared: Arc::clone(&self.shared),
        }
    }

    pub fn state(&self) -> TokenState {
        self.shared.state()
    }

    /// Withdraws the token if it is still falling, stops the worker and returns
    /// whichever terminal state won.
    pub fn resolve(mut self) -> TokenState {
        self.shutdown();
        let shared = Arc::clone(&self.shared);
        let state = self
            .outcome
            .recv()
            .unwrap_or_else(|_| shared.state());
        log::debug!("bonus token {} resolved as {:?}", self.id, state);
        state
    }

    fn shutdown(&mut self) {
        self.shared.finalize(TokenState::Withdrawn);
        drop(self.stop.take());
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::warn!("bonus token {} worker panicked", self.id);
            }
        }
        self.live.store(false, Ordering::Release);
    }
}

impl Drop for LiveToken {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[derive(Debug)]
pub struct BonusEventCoordinator {
    config: BonusEventConfig,
    live: Arc<AtomicBool>,
    next_id: u64,
}

impl BonusEventCoordinator {
    pub fn new(config: BonusEventConfig) -> Self {
        Self {
            config,
            live: Arc::new(AtomicBool::new(false)),
            next_id: 1,
        }
    }

    pub fn config(&self) -> &BonusEventConfig {
        &self.config
    }

    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    /// Rolls the per-turn spawn chance and spawns only when nothing is live.
    pub fn maybe_spawn(
        &mut self,
        ctx: &mut TurnContext,
        rng: &mut RngState,
    ) -> Result<Option<CatchHandle>, BonusEventError> {
        if !rng.chance(self.config.spawn_chance) {
            return Ok(None);
        }
        match self.spawn(ctx) {
            Ok(handle) => Ok(Some(handle)),
            Err(BonusEventError::AlreadyLive) => {
                log::debug!("bonus token roll skipped, one is already live");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    pub fn spawn(&mut self, ctx: &mut TurnContext) -> Result<CatchHandle, BonusEventError> {
        if ctx.token.is_some() {
            return Err(BonusEventError::AlreadyLive);
        }
        if self
            .live
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(BonusEventError::AlreadyLive);
        }

        let id = self.next_id;
        self.next_id += 1;
        let (notify, outcome) = bounded(1);
        let shared = Arc::new(TokenShared {
            state: AtomicU8::new(TokenState::Falling as u8),
            position: AtomicI32::new(self.config.start),
            bound: self.config.bound,
            notify,
        });
        let (stop_tx, stop_rx) = bounded::<()>(0);
        let interval = Duration::from_millis(self.config.tick_ms.max(1));
        let step = self.config.step;
        let worker_shared = Arc::clone(&shared);
        let spawned = thread::Builder::new()
            .name(format!("bonus-token-{id}"))
            .spawn(move || fall(worker_shared, step, interval, stop_rx));
        let worker = match spawned {
            Ok(worker) => worker,
            Err(err) => {
                self.live.store(false, Ordering::Release);
                return Err(err.into());
            }
        };

        log::debug!(
            "bonus token {id} spawned for player {} in round {}",
            ctx.player,
            ctx.round
        );
        let token = LiveToken {
            id,
            shared,
            outcome,
            stop: Some(stop_tx),
            worker: Some(worker),
            live: Arc::clone(&self.live),
        };
        let handle = token.handle();
        ctx.token = Some(token);
        Ok(handle)
    }
}

fn fall(shared: Arc<TokenShared>, step: i32, interval: Duration, stop: Receiver<()>) {
    loop {
        match stop.recv_timeout(interval) {
            Err(RecvTimeoutError::Timeout) => {
                if shared.state().is_terminal() {
                    break;
                }
                let position = shared.position.fetch_add(step, Ordering::AcqRel) + step;
                if position > shared.bound {
                    if shared.finalize(TokenState::Expired) {
                        log::debug!("bonus token expired at {position}");
                    }
                    break;
                }
            }
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn frozen() -> BonusEventConfig {
        BonusEventConfig {
            spawn_chance: 1.0,
            tick_ms: 60_000,
            ..BonusEventConfig::default()
        }
    }

    fn fast_expiry() -> BonusEventConfig {
        BonusEventConfig {
            spawn_chance: 1.0,
            tick_ms: 1,
            step: 5,
            start: 0,
            bound: 10,
            catch_bonus: 10,
        }
    }

    fn wait_until_terminal(handle: &CatchHandle) -> TokenState {
        let deadline = Instant::now() + Duration::from_secs(5);
        while handle.is_falling() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(2));
        }
        handle.state()
    }

    #[test]
    fn commit_while_falling_withdraws() {
        let mut coordinator = BonusEventCoordinator::new(frozen());
        let mut ctx = TurnContext::new(0, 0, 2);
        let handle = coordinator.spawn(&mut ctx).unwrap();
        assert!(handle.is_falling());
        assert!(coordinator.is_live());

        let (_, state) = ctx.withdraw_token().unwrap();
        assert_eq!(state, TokenState::Withdrawn);
        assert!(!handle.catch());
        assert_eq!(handle.state(), TokenState::Withdrawn);
        assert!(!coordinator.is_live());
    }

    #[test]
    fn catch_before_commit_is_kept() {
        let mut coordinator = BonusEventCoordinator::new(frozen());
        let mut ctx = TurnContext::new(0, 0, 2);
        let handle = coordinator.spawn(&mut ctx).unwrap();
        assert!(handle.catch());
        assert!(!handle.catch());
        let (_, state) = ctx.withdraw_token().unwrap();
        assert_eq!(state, TokenState::Caught);
    }

    #[test]
    fn expiry_wins_and_late_catch_is_ignored() {
        let mut coordinator = BonusEventCoordinator::new(fast_expiry());
        let mut ctx = TurnContext::new(0, 0, 2);
        let handle = coordinator.spawn(&mut ctx).unwrap();
        assert_eq!(wait_until_terminal(&handle), TokenState::Expired);
        assert!(handle.position() > handle.bound());
        assert!(!handle.catch());
        let (_, state) = ctx.withdraw_token().unwrap();
        assert_eq!(state, TokenState::Expired);
    }

    #[test]
    fn only_one_token_live_at_a_time() {
        let mut coordinator = BonusEventCoordinator::new(frozen());
        let mut first = TurnContext::new(0, 0, 2);
        let mut second = TurnContext::new(0, 1, 2);
        coordinator.spawn(&mut first).unwrap();
        assert!(matches!(
            coordinator.spawn(&mut first),
            Err(BonusEventError::AlreadyLive)
        ));
        assert!(matches!(
            coordinator.spawn(&mut second),
            Err(BonusEventError::AlreadyLive)
        ));
        let mut rng = RngState::from_seed(1);
        assert!(coordinator.maybe_spawn(&mut second, &mut rng).unwrap().is_none());

        first.withdraw_token();
        assert!(coordinator.spawn(&mut second).is_ok());
    }

    #[test]
    fn dropping_the_turn_withdraws_the_token() {
        let mut coordinator = BonusEventCoordinator::new(frozen());
        let mut ctx = TurnContext::new(2, 0, 2);
        let handle = coordinator.spawn(&mut ctx).unwrap();
        drop(ctx);
        assert_eq!(handle.state(), TokenState::Withdrawn);
        assert!(!coordinator.is_live());
    }

    #[test]
    fn spawn_chance_gates_spawning() {
        let mut rng = RngState::from_seed(9);
        let mut never = BonusEventCoordinator::new(BonusEventConfig {
            spawn_chance: 0.0,
            ..frozen()
        });
        for _ in 0..32 {
            let mut ctx = TurnContext::new(0, 0, 2);
            assert!(never.maybe_spawn(&mut ctx, &mut rng).unwrap().is_none());
            assert!(!ctx.has_token());
        }

        let mut always = BonusEventCoordinator::new(frozen());
        let mut ctx = TurnContext::new(0, 0, 2);
        assert!(always.maybe_spawn(&mut ctx, &mut rng).unwrap().is_some());
        assert!(ctx.has_token());
    }

    #[test]
    fn racing_signals_finalize_exactly_once() {
        for _ in 0..20 {
            let mut coordinator = BonusEventCoordinator::new(frozen());
            let mut ctx = TurnContext::new(0, 0, 2);
            let handle = coordinator.spawn(&mut ctx).unwrap();
            let catchers: Vec<_> = (0..4)
                .map(|_| {
                    let handle = handle.clone();
                    thread::spawn(move || handle.catch())
                })
                .collect();
            let (_, state) = ctx.withdraw_token().unwrap();
            let wins = catchers
                .into_iter()
                .map(|worker| worker.join().unwrap())
                .filter(|won| *won)
                .count();
            match state {
                TokenState::Caught => assert_eq!(wins, 1),
                TokenState::Withdrawn => assert_eq!(wins, 0),
                other => panic!("unexpected terminal state {other:?}"),
            }
            assert_eq!(handle.state(), state);
        }
    }
}
