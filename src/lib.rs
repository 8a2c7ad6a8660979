pub mod changelog;
pub mod cli;
pub mod command;
pub mod error;
pub mod forge;
pub mod repo;

pub use cli::Args;
pub use error::{GhchError, Result};

#[cfg(test)]
pub mod test_helpers;
