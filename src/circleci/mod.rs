//! CircleCI v1.1 API client and response types

mod client;
pub mod types;

pub use client::{CircleClient, DEFAULT_HOST};
pub use types::*;
