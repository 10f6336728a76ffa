//! Rotating loading captions.
//!
//! Shown while a generation is in flight, purely for perceived progress.
//! The rotation has no effect on the underlying request.

use std::time::Duration;

/// The fixed caption rotation, cycled in order.
pub const LOADING_CAPTIONS: [&str; 6] = [
    "Channeling Aether...",
    "Consulting the Elder Dragons...",
    "Shuffling the Multiverse...",
    "Igniting the Spark...",
    "Summoning the Great Creator...",
    "Forging Artifacts in the Blind Eternities...",
];

/// Interval between caption changes.
pub const CAPTION_INTERVAL: Duration = Duration::from_millis(2500);
