use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Phase {
    Rounds,
    Wager,
    Results,
    Finished,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    pub index: usize,
    pub name: String,
}

impl Player {
    pub fn new(index: usize, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
        }
    }

    pub fn named_list<S: AsRef<str>>(names: &[S]) -> Vec<Player> {
        names
            .iter()
            .enumerate()
            .map(|(index, name)| Player::new(index, name.as_ref()))
            .collect()
    }
}
