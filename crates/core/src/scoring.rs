use crate::{Category, DiceSet, N_DICE, N_SELECTABLE};
use thiserror::Error;

pub const FULL_HOUSE_SCORE: u32 = 25;
pub const SMALL_STRAIGHT_SCORE: u32 = 30;
pub const LARGE_STRAIGHT_SCORE: u32 = 40;
pub const ALL_SAME_SCORE: u32 = 50;

// Straights are matched against exact dice order, forward or reversed.
const LARGE_STRAIGHTS: [[u8; N_DICE]; 4] = [
    [1, 2, 3, 4, 5],
    [2, 3, 4, 5, 6],
    [5, 4, 3, 2, 1],
    [6, 5, 4, 3, 2],
];

const SMALL_STRAIGHTS: [[u8; 4]; 6] = [
    [1, 2, 3, 4],
    [2, 3, 4, 5],
    [3, 4, 5, 6],
    [4, 3, 2, 1],
    [5, 4, 3, 2],
    [6, 5, 4, 3],
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoringError {
    #[error("category {0:?} is derived and cannot be scored")]
    NotSelectable(Category),
}

/// Raw score of `category` for `dice`.
pub fn score(category: Category, dice: &DiceSet) -> Result<u32, ScoringError> {
    let values = dice.values();
    let value = match category {
        Category::Ones
        | Category::Twos
        | Category::Threes
        | Category::Fours
        | Category::Fives
        | Category::Sixes => {
            let face = category
                .face()
                .ok_or(ScoringError::NotSelectable(category))?;
            face_sum(&values, face)
        }
        Category::ThreeOfAKind => of_a_kind(dice, 3),
        Category::FourOfAKind => of_a_kind(dice, 4),
        Category::FullHouse => {
            if is_full_house(dice) {
                FULL_HOUSE_SCORE
            } else {
                0
            }
        }
        Category::SmallStraight => {
            if is_small_straight(&values) {
                SMALL_STRAIGHT_SCORE
            } else {
                0
            }
        }
        Category::LargeStraight => {
            if is_large_straight(&values) {
                LARGE_STRAIGHT_SCORE
            } else {
                0
            }
        }
        Category::AllSame => {
            if values.iter().all(|v| *v == values[0]) {
                ALL_SAME_SCORE
            } else {
                0
            }
        }
        Category::SumAll => dice.sum(),
        Category::UpperSubtotal
        | Category::UpperBonus
        | Category::LowerSubtotal
        | Category::GrandTotal => return Err(ScoringError::NotSelectable(category)),
    };
    Ok(value)
}

/// Raw scores for every selectable category, in sheet order.
pub fn score_row(dice: &DiceSet) -> [u32; N_SELECTABLE] {
    let mut row = [0u32; N_SELECTABLE];
    for (slot, category) in Category::SELECTABLE.iter().enumerate() {
        row[slot] = score(*category, dice).unwrap_or(0);
    }
    row
}

fn face_sum(values: &[u8; N_DICE], face: u8) -> u32 {
    values
        .iter()
        .filter(|v| **v == face)
        .map(|v| *v as u32)
        .sum()
}

fn of_a_kind(dice: &DiceSet, needed: u8) -> u32 {
    if dice.face_counts().iter().any(|count| *count >= needed) {
        dice.sum()
    } else {
        0
    }
}

fn is_full_house(dice: &DiceSet) -> bool {
    let counts = dice.face_counts();
    let triple = counts.iter().any(|count| *count == 3);
    let pair = counts.iter().any(|count| *count == 2);
    triple && pair
}

fn is_small_straight(values: &[u8; N_DICE]) -> bool {
    let head = &values[..N_DICE - 1];
    let tail = &values[1..];
    SMALL_STRAIGHTS
        .iter()
        .any(|run| head == run.as_slice() || tail == run.as_slice())
}

fn is_large_straight(values: &[u8; N_DICE]) -> bool {
    LARGE_STRAIGHTS.iter().any(|run| run == values)
}
