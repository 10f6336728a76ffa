//! Card text generation via the Gemini REST API.
//!
//! Submits the user's theme with a strict JSON response schema and parses
//! the single returned object into a [`CardRecord`]. No retries: one
//! attempt per call, any failure propagates.

use async_trait::async_trait;
use cardforge_core::card::CardRecord;
use cardforge_core::error::ForgeError;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

pub(crate) const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Provider seam for the text-generation step.
#[async_trait]
pub trait CardTextGenerator: Send + Sync {
    /// Produces a structured card for the given theme.
    async fn generate_card(&self, theme: &str) -> Result<CardRecord, ForgeError>;
}

/// Gemini-backed implementation of [`CardTextGenerator`].
#[derive(Clone)]
pub struct CardTextAgent {
    client: Client,
    api_key: String,
    model: String,
}

impl CardTextAgent {
    /// Creates a new agent with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    async fn send_request(&self, body: &GenerateContentRequest) -> Result<String, ForgeError> {
        let url = format!(
            "{}/{model}:generateContent?key={api_key}",
            BASE_URL,
            model = self.model,
            api_key = self.api_key
        );

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|err| ForgeError::provider(format!("Gemini request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| ForgeError::provider(format!("Failed to parse Gemini response: {err}")))?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl CardTextGenerator for CardTextAgent {
    async fn generate_card(&self, theme: &str) -> Result<CardRecord, ForgeError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: forge_instruction(theme),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: card_response_schema(),
            },
        };

        let text = self.send_request(&request).await?;
        tracing::debug!(model = %self.model, bytes = text.len(), "card text received");

        // Malformed JSON or a schema violation is a hard failure of the
        // whole generation; no repair attempt.
        let card: CardRecord = serde_json::from_str(&text)?;
        Ok(card)
    }
}

/// Builds the fixed instruction embedding the user's theme.
fn forge_instruction(theme: &str) -> String {
    format!(
        "Create a unique, mechanically balanced collectible card based on the theme: \"{theme}\". \
         The rules text should follow established card-game phrasing. \
         Ensure the color identity matches the card's mechanics."
    )
}

/// The strict output schema for the card object.
///
/// Every `CardRecord` field appears by wire name; the two enumerations are
/// constrained to their closed value sets.
fn card_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "name": { "type": "STRING" },
            "manaCost": { "type": "STRING", "description": "e.g., {2}{W}{U}" },
            "typeLine": { "type": "STRING", "description": "e.g., Legendary Creature — Human Wizard" },
            "rarity": {
                "type": "STRING",
                "enum": ["Common", "Uncommon", "Rare", "Mythic Rare"]
            },
            "rulesText": { "type": "STRING" },
            "flavorText": { "type": "STRING" },
            "power": { "type": "STRING", "description": "Optional for creatures" },
            "toughness": { "type": "STRING", "description": "Optional for creatures" },
            "colorIdentity": {
                "type": "STRING",
                "enum": ["White", "Blue", "Black", "Red", "Green", "Multicolor", "Colorless"]
            },
            "artPrompt": {
                "type": "STRING",
                "description": "A highly detailed visual description for image generation."
            }
        },
        "required": ["name", "manaCost", "typeLine", "rarity", "rulesText", "colorIdentity", "artPrompt"]
    })
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

fn extract_text_response(response: GenerateContentResponse) -> Result<String, ForgeError> {
    response
        .candidates
        .and_then(|mut candidates| candidates.pop())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        .ok_or_else(|| {
            ForgeError::missing_content("Gemini returned no text in the response candidates")
        })
}

pub(crate) fn map_http_error(status: StatusCode, body: String) -> ForgeError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    ForgeError::provider_status(status.as_u16(), message)
}
