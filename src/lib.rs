//! ultifocus - UltiFocus lock mode for the terminal
//!
//! The focus-lock core (device classification, mobile optimizations, the
//! lock controller and the countdown view) is host-agnostic: host effects
//! go through the [`platform::Platform`] trait. The binary hosts sessions in
//! a crossterm terminal.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod features;
pub mod output;
pub mod platform;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::FocusError;
pub use features::focus::{FocusLock, LockOptions, SessionTimerView};
