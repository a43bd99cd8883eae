//! Mobile-specific lock support.
//!
//! Wake lock, haptics, orientation, and scroll/selection suppression.

mod optimizer;

pub use optimizer::{MobileOptimizer, VibrationKind, VIBRATE_LONG, VIBRATE_MEDIUM, VIBRATE_SHORT};
