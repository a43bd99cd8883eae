//! Command-line interface for ultifocus.

pub mod args;
pub mod commands;
