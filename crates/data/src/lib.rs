//! Loading and validation for game configuration files.

pub mod load;

pub use load::*;
