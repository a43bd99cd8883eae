//! Feature implementations for ultifocus.
//!
//! - Focus lock sessions and the countdown view
//! - Mobile device optimizations (wake lock, haptics, orientation)

pub mod focus;
pub mod mobile;
