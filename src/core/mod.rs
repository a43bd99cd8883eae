//! Core abstractions for ultifocus.
//!
//! Device classification and clock sources shared by the lock controller
//! and the timer view.

mod clock;
mod device;

pub use clock::{Clock, ManualClock, SystemClock};
pub use device::{DeviceCapabilities, DeviceInfo, EffectivenessRating, UNKNOWN};
