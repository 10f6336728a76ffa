//! Session state machine.
//!
//! The controller's mutable state lives in one explicit struct, and every
//! change goes through a single reducer. The reducer enforces the
//! transitions itself: a submission while a generation is in flight is a
//! no-op here, not merely a disabled control in the presentation layer.

use serde::{Deserialize, Serialize};

use cardforge_core::card::ForgedCard;
use cardforge_core::error::ForgeError;

use crate::captions::LOADING_CAPTIONS;

/// The fixed user-facing failure message. The underlying cause is logged,
/// never shown.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "Generation failed. Please check your prompt and try again.";

/// Logical phase of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// No result, no error, nothing in flight.
    Idle,
    /// Exactly one generation is in flight.
    Loading,
    /// The latest generation succeeded and its card is current.
    Ready,
    /// The latest generation failed; the previous card (if any) is kept.
    Failed,
}

/// Events the session reducer understands.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// The user submitted a theme.
    Submit(String),
    /// The in-flight generation finished with a card.
    Succeeded(ForgedCard),
    /// The in-flight generation failed; the cause is for the log only.
    Failed(ForgeError),
    /// Caption rotation tick.
    Tick,
}

/// What the caller must do after applying an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Start a generation for this theme.
    StartGeneration(String),
}

/// The single mutable session state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// The last submitted theme.
    pub theme: String,
    /// The last successful result. Survives later failures.
    pub card: Option<ForgedCard>,
    pub phase: Phase,
    /// The user-facing error message, set only in `Failed`.
    pub error: Option<String>,
    caption_idx: usize,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            theme: String::new(),
            card: None,
            phase: Phase::Idle,
            error: None,
            caption_idx: 0,
        }
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    /// The caption to show for the current tick.
    pub fn caption(&self) -> &'static str {
        LOADING_CAPTIONS[self.caption_idx % LOADING_CAPTIONS.len()]
    }

    /// Applies one event and returns the effect the caller must run.
    pub fn apply(&mut self, event: SessionEvent) -> Effect {
        match event {
            SessionEvent::Submit(theme) => {
                if self.phase == Phase::Loading {
                    // One generation at a time; late submissions are dropped.
                    return Effect::None;
                }
                let trimmed = theme.trim();
                if trimmed.is_empty() {
                    return Effect::None;
                }
                self.theme = trimmed.to_string();
                self.phase = Phase::Loading;
                self.error = None;
                self.caption_idx = 0;
                Effect::StartGeneration(self.theme.clone())
            }
            SessionEvent::Succeeded(card) => {
                if self.phase != Phase::Loading {
                    return Effect::None;
                }
                self.card = Some(card);
                self.phase = Phase::Ready;
                self.error = None;
                Effect::None
            }
            SessionEvent::Failed(cause) => {
                if self.phase != Phase::Loading {
                    return Effect::None;
                }
                tracing::warn!(error = %cause, "generation failed");
                self.phase = Phase::Failed;
                self.error = Some(GENERIC_FAILURE_MESSAGE.to_string());
                Effect::None
            }
            SessionEvent::Tick => {
                if self.phase == Phase::Loading {
                    self.caption_idx = (self.caption_idx + 1) % LOADING_CAPTIONS.len();
                }
                Effect::None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardforge_core::card::{ArtHandle, CardColor, CardRarity, CardRecord};

    fn forged() -> ForgedCard {
        ForgedCard {
            card: CardRecord {
                name: "Gloom Warden".to_string(),
                mana_cost: "{1}{B}".to_string(),
                type_line: "Creature — Spirit".to_string(),
                rarity: CardRarity::Uncommon,
                rules_text: "Deathtouch".to_string(),
                flavor_text: None,
                power: Some("1".to_string()),
                toughness: Some("2".to_string()),
                color_identity: CardColor::Black,
                art_prompt: "a spirit in mist".to_string(),
            },
            art: ArtHandle::from_bytes("image/jpeg", b"art"),
        }
    }

    #[test]
    fn test_empty_or_whitespace_submit_is_a_no_op() {
        let mut state = SessionState::new();

        assert_eq!(state.apply(SessionEvent::Submit("".to_string())), Effect::None);
        assert_eq!(state.apply(SessionEvent::Submit("   ".to_string())), Effect::None);
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state, SessionState::new());
    }

    #[test]
    fn test_valid_submit_enters_loading_synchronously() {
        let mut state = SessionState::new();

        let effect = state.apply(SessionEvent::Submit("a gothic vampire".to_string()));

        assert_eq!(effect, Effect::StartGeneration("a gothic vampire".to_string()));
        assert_eq!(state.phase, Phase::Loading);
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_submit_while_loading_is_dropped() {
        let mut state = SessionState::new();
        state.apply(SessionEvent::Submit("first".to_string()));

        let effect = state.apply(SessionEvent::Submit("second".to_string()));

        assert_eq!(effect, Effect::None);
        assert_eq!(state.theme, "first");
    }

    #[test]
    fn test_success_replaces_card_and_clears_error() {
        let mut state = SessionState::new();
        state.apply(SessionEvent::Submit("theme".to_string()));

        state.apply(SessionEvent::Succeeded(forged()));

        assert_eq!(state.phase, Phase::Ready);
        assert!(state.card.is_some());
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_failure_sets_generic_message_and_keeps_last_card() {
        let mut state = SessionState::new();
        state.apply(SessionEvent::Submit("first".to_string()));
        state.apply(SessionEvent::Succeeded(forged()));

        state.apply(SessionEvent::Submit("second".to_string()));
        state.apply(SessionEvent::Failed(ForgeError::provider("boom")));

        assert_eq!(state.phase, Phase::Failed);
        assert_eq!(state.error.as_deref(), Some(GENERIC_FAILURE_MESSAGE));
        // Last good result stays addressable underneath the error banner
        assert_eq!(state.card, Some(forged()));
    }

    #[test]
    fn test_resubmit_after_failure_clears_error() {
        let mut state = SessionState::new();
        state.apply(SessionEvent::Submit("first".to_string()));
        state.apply(SessionEvent::Failed(ForgeError::provider("boom")));

        let effect = state.apply(SessionEvent::Submit("retry".to_string()));

        assert_eq!(effect, Effect::StartGeneration("retry".to_string()));
        assert_eq!(state.phase, Phase::Loading);
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_completion_events_outside_loading_are_ignored() {
        let mut state = SessionState::new();

        assert_eq!(state.apply(SessionEvent::Succeeded(forged())), Effect::None);
        assert_eq!(state.card, None);

        assert_eq!(
            state.apply(SessionEvent::Failed(ForgeError::provider("late"))),
            Effect::None
        );
        assert_eq!(state.error, None);
        assert_eq!(state.phase, Phase::Idle);
    }

    #[test]
    fn test_tick_rotates_captions_only_while_loading() {
        let mut state = SessionState::new();

        let idle_caption = state.caption();
        state.apply(SessionEvent::Tick);
        assert_eq!(state.caption(), idle_caption);

        state.apply(SessionEvent::Submit("theme".to_string()));
        let first = state.caption();
        state.apply(SessionEvent::Tick);
        assert_ne!(state.caption(), first);

        // The rotation wraps around to the start
        for _ in 0..LOADING_CAPTIONS.len() - 1 {
            state.apply(SessionEvent::Tick);
        }
        assert_eq!(state.caption(), first);
    }

    #[test]
    fn test_submit_trims_the_theme() {
        let mut state = SessionState::new();

        let effect = state.apply(SessionEvent::Submit("  a tide leviathan  ".to_string()));

        assert_eq!(effect, Effect::StartGeneration("a tide leviathan".to_string()));
        assert_eq!(state.theme, "a tide leviathan");
    }
}
