//! Shared helpers for the leaf commands.

pub mod args;
pub mod json;
