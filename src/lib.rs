#![deny(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

//! chirp: a command-line client for the Twitter API.
//!
//! The [`command`] module is a small self-contained dispatch framework; the
//! [`cli`] module assembles the chirp command tree on top of it, with the
//! [`api`], [`config`], and [`util`] modules supplying the pieces the leaf
//! commands share.

pub mod api;
pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod logging;
pub mod util;

pub use error::{ChirpError, Result};
