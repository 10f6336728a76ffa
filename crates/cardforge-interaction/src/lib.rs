//! Provider layer for CardForge.
//!
//! This crate talks to the generative services over REST and exposes the
//! orchestrator that turns a theme into a complete forged card. The
//! provider seams are traits so the orchestrator can be exercised against
//! mock implementations.

pub mod card_art_agent;
pub mod card_text_agent;
pub mod forge;

pub use card_art_agent::{CardArtAgent, CardArtGenerator};
pub use card_text_agent::{CardTextAgent, CardTextGenerator};
pub use forge::{ART_STYLE_DIRECTIVE, CardForge};
