pub mod args;
pub mod commands;

pub use args::{Cli, ColorMode, Commands, OutputFormat};
