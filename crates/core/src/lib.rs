//! Core game logic. Keep this crate free of IO and platform concerns.

pub mod bonus_event;
pub mod category;
pub mod config;
pub mod context;
pub mod dice;
pub mod engine;
pub mod events;
pub mod frontend;
pub mod ledger;
pub mod results;
pub mod rng;
pub mod scoring;
pub mod sheet;
pub mod state;
pub mod wager;

pub use bonus_event::*;
pub use category::*;
pub use config::*;
pub use context::*;
pub use dice::*;
pub use engine::*;
pub use events::*;
pub use frontend::*;
pub use ledger::*;
pub use results::*;
pub use rng::*;
pub use scoring::*;
pub use sheet::*;
pub use state::*;
pub use wager::*;
