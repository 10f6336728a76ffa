//! Application layer for CardForge.
//!
//! This crate owns the session state machine that coordinates user
//! submissions with the generation orchestrator, and the cosmetic loading
//! captions the front-end rotates while a forge is in flight.

pub mod captions;
pub mod session;

pub use captions::{CAPTION_INTERVAL, LOADING_CAPTIONS};
pub use session::{Effect, GENERIC_FAILURE_MESSAGE, Phase, SessionEvent, SessionState};
