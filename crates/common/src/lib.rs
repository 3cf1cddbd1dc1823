//! Shared runtime helpers for the gift store workspace.

pub mod env;
pub mod utils;
