pub mod circleci;
pub mod cli;
pub mod config;
pub mod duration;
pub mod error;
pub mod git;
pub mod output;
pub mod project;
