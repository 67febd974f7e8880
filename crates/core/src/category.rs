use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    Upper,
    Lower,
}

/// Rows of the score sheet, in sheet order. Subtotal, bonus and total rows are
/// derived and never selectable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Ones,
    Twos,
    Threes,
    Fours,
    Fives,
    Sixes,
    UpperSubtotal,
    UpperBonus,
    ThreeOfAKind,
    FourOfAKind,
    FullHouse,
    SmallStraight,
    LargeStraight,
    AllSame,
    SumAll,
    LowerSubtotal,
    GrandTotal,
}

pub const N_SELECTABLE: usize = 13;

impl Category {
    pub const ALL: [Category; 17] = [
        Category::Ones,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
        Category::UpperSubtotal,
        Category::UpperBonus,
        Category::ThreeOfAKind,
        Category::FourOfAKind,
        Category::FullHouse,
        Category::SmallStraight,
        Category::LargeStraight,
        Category::AllSame,
        Category::SumAll,
        Category::LowerSubtotal,
        Category::GrandTotal,
    ];

    pub const SELECTABLE: [Category; N_SELECTABLE] = [
        Category::Ones,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
        Category::ThreeOfAKind,
        Category::FourOfAKind,
        Category::FullHouse,
        Category::SmallStraight,
        Category::LargeStraight,
        Category::AllSame,
        Category::SumAll,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Category::Ones => "ones",
            Category::Twos => "twos",
            Category::Threes => "threes",
            Category::Fours => "fours",
            Category::Fives => "fives",
            Category::Sixes => "sixes",
            Category::UpperSubtotal => "upper_subtotal",
            Category::UpperBonus => "upper_bonus",
            Category::ThreeOfAKind => "three_kind",
            Category::FourOfAKind => "four_kind",
            Category::FullHouse => "full_house",
            Category::SmallStraight => "small_straight",
            Category::LargeStraight => "large_straight",
            Category::AllSame => "yahtzee",
            Category::SumAll => "chance",
            Category::LowerSubtotal => "lower_subtotal",
            Category::GrandTotal => "total",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Category::Ones => "Ones",
            Category::Twos => "Twos",
            Category::Threes => "Threes",
            Category::Fours => "Fours",
            Category::Fives => "Fives",
            Category::Sixes => "Sixes",
            Category::UpperSubtotal => "Upper Score",
            Category::UpperBonus => "Upper Bonus",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::FourOfAKind => "Four of a Kind",
            Category::FullHouse => "Full House",
            Category::SmallStraight => "Small Straight",
            Category::LargeStraight => "Large Straight",
            Category::AllSame => "Yahtzee",
            Category::SumAll => "Chance",
            Category::LowerSubtotal => "Lower Score",
            Category::GrandTotal => "Total",
        }
    }

    pub fn from_id(id: &str) -> Option<Category> {
        let id = id.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|category| category.id() == id)
    }

    /// Position among the selectable rows, `None` for derived rows.
    pub fn slot(self) -> Option<usize> {
        Self::SELECTABLE.iter().position(|category| *category == self)
    }

    pub fn from_slot(slot: usize) -> Option<Category> {
        Self::SELECTABLE.get(slot).copied()
    }

    pub fn is_selectable(self) -> bool {
        self.slot().is_some()
    }

    pub fn section(self) -> Option<Section> {
        match self {
            Category::Ones
            | Category::Twos
            | Category::Threes
            | Category::Fours
            | Category::Fives
            | Category::Sixes => Some(Section::Upper),
            Category::ThreeOfAKind
            | Category::FourOfAKind
            | Category::FullHouse
            | Category::SmallStraight
            | Category::LargeStraight
            | Category::AllSame
            | Category::SumAll => Some(Section::Lower),
            Category::UpperSubtotal
            | Category::UpperBonus
            | Category::LowerSubtotal
            | Category::GrandTotal => None,
        }
    }

    /// Face value counted by the single-face rows.
    pub fn face(self) -> Option<u8> {
        match self {
            Category::Ones => Some(1),
            Category::Twos => Some(2),
            Category::Threes => Some(3),
            Category::Fours => Some(4),
            Category::Fives => Some(5),
            Category::Sixes => Some(6),
            _ => None,
        }
    }
}
