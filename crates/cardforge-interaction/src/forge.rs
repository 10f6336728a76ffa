//! Generation orchestrator.
//!
//! Runs the two provider steps in sequence (structured card text, then
//! the illustration derived from it) and merges them into one
//! [`ForgedCard`]. The pair is atomic: if either step fails, the whole
//! forge fails and nothing partial escapes.

use cardforge_core::card::ForgedCard;
use cardforge_core::config::ForgeConfig;
use cardforge_core::error::ForgeError;

use crate::card_art_agent::{CardArtAgent, CardArtGenerator};
use crate::card_text_agent::{CardTextAgent, CardTextGenerator};

/// Fixed style directive prefixed to every art prompt.
pub const ART_STYLE_DIRECTIVE: &str =
    "Collectible card game art style, professional digital painting, high fantasy: ";

/// Orchestrates the text and image generation steps.
pub struct CardForge<T, A> {
    text: T,
    art: A,
}

impl CardForge<CardTextAgent, CardArtAgent> {
    /// Wires up the live Gemini/Imagen agents for a configuration.
    ///
    /// The key is passed through as-is; an invalid or empty key surfaces
    /// as a provider failure on the first call.
    pub fn from_config(config: &ForgeConfig, api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        Self {
            text: CardTextAgent::new(api_key.clone(), config.text_model.clone()),
            art: CardArtAgent::new(api_key, config.image_model.clone()),
        }
    }
}

impl<T, A> CardForge<T, A>
where
    T: CardTextGenerator,
    A: CardArtGenerator,
{
    pub fn new(text: T, art: A) -> Self {
        Self { text, art }
    }

    /// Forges a card for a theme.
    ///
    /// Single attempt per step, strictly sequential: the image prompt is
    /// derived from the generated card, so the art call never starts if
    /// the text call failed.
    pub async fn forge(&self, theme: &str) -> Result<ForgedCard, ForgeError> {
        let card = self.text.generate_card(theme).await?;
        tracing::info!(name = %card.name, color = %card.color_identity, "card text forged");

        let art_prompt = format!("{ART_STYLE_DIRECTIVE}{}", card.art_prompt);
        let art = self.art.generate_art(&art_prompt).await?;

        Ok(ForgedCard { card, art })
    }
}
