use crate::{Category, Section, N_SELECTABLE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SheetError {
    #[error("invalid player index {0}")]
    InvalidPlayer(usize),
    #[error("category {0:?} is not selectable")]
    NotSelectable(Category),
    #[error("category {category:?} already used by player {player}")]
    AlreadyUsed { player: usize, category: Category },
}

/// Selectable category scores per player. Each cell is written at most once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSheet {
    rows: Vec<[Option<u32>; N_SELECTABLE]>,
}

impl ScoreSheet {
    pub fn new(players: usize) -> Self {
        Self {
            rows: vec![[None; N_SELECTABLE]; players],
        }
    }

    pub fn players(&self) -> usize {
        self.rows.len()
    }

    pub fn get(&self, player: usize, category: Category) -> Option<u32> {
        let slot = category.slot()?;
        self.rows.get(player)?[slot]
    }

    pub fn is_used(&self, player: usize, category: Category) -> bool {
        self.get(player, category).is_some()
    }

    /// Checks that `record` would succeed without touching the sheet.
    pub fn check_open(&self, player: usize, category: Category) -> Result<usize, SheetError> {
        let row = self
            .rows
            .get(player)
            .ok_or(SheetError::InvalidPlayer(player))?;
        let slot = category
            .slot()
            .ok_or(SheetError::NotSelectable(category))?;
        if row[slot].is_some() {
            return Err(SheetError::AlreadyUsed { player, category });
        }
        Ok(slot)
    }

    pub fn record(&mut self, player: usize, category: Category, value: u32) -> Result<(), SheetError> {
        let slot = self.check_open(player, category)?;
        self.rows[player][slot] = Some(value);
        Ok(())
    }

    pub fn open_categories(&self, player: usize) -> Vec<Category> {
        Category::SELECTABLE
            .into_iter()
            .filter(|category| !self.is_used(player, *category))
            .collect()
    }

    pub fn used_count(&self, player: usize) -> usize {
        self.rows
            .get(player)
            .map(|row| row.iter().filter(|cell| cell.is_some()).count())
            .unwrap_or(0)
    }

    pub fn is_complete(&self) -> bool {
        self.rows
            .iter()
            .all(|row| row.iter().all(|cell| cell.is_some()))
    }

    pub fn section_total(&self, player: usize, section: Section) -> i64 {
        let Some(row) = self.rows.get(player) else {
            return 0;
        };
        Category::SELECTABLE
            .iter()
            .zip(row.iter())
            .filter(|(category, _)| category.section() == Some(section))
            .filter_map(|(_, cell)| *cell)
            .map(i64::from)
            .sum()
    }

    pub fn upper_subtotal(&self, player: usize) -> i64 {
        self.section_total(player, Section::Upper)
    }

    pub fn lower_subtotal(&self, player: usize) -> i64 {
        self.section_total(player, Section::Lower)
    }
}
