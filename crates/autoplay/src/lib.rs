//! Seeded bot games driven through the core engine's frontend seams.

mod config;
mod error;
mod policy;
mod runner;
mod trace;

pub use config::*;
pub use error::*;
pub use policy::*;
pub use runner::*;
pub use trace::*;
