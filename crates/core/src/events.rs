use crate::{Category, TokenState, N_DICE};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    TurnStarted {
        round: u8,
        player: usize,
    },
    DiceRolled {
        player: usize,
        values: [u8; N_DICE],
        reroll: u8,
    },
    BonusTokenSpawned {
        player: usize,
        token: u64,
    },
    BonusTokenResolved {
        player: usize,
        token: u64,
        state: TokenState,
    },
    CategoryRejected {
        player: usize,
        category: Category,
    },
    MultiplierRequested {
        player: usize,
        granted: bool,
    },
    CategoryScored {
        player: usize,
        category: Category,
        base: u32,
        doubled: bool,
        caught: bool,
        total: u32,
    },
    WagerSettled {
        player: usize,
        stake: u32,
        delta: i64,
    },
    GameFinished {
        winners: Vec<usize>,
        top_score: i64,
    },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }
}
