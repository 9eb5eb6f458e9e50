//! fonttrim command-line interface.

pub mod cli;

pub use cli::Cli;
