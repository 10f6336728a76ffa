//! Card illustration via the Imagen REST API.
//!
//! Requests exactly one square image for a prompt and exposes the returned
//! payload as a self-contained data URI.

use async_trait::async_trait;
use cardforge_core::card::ArtHandle;
use cardforge_core::error::ForgeError;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::card_text_agent::{BASE_URL, map_http_error};

const OUTPUT_MIME_TYPE: &str = "image/jpeg";

/// Provider seam for the image-generation step.
#[async_trait]
pub trait CardArtGenerator: Send + Sync {
    /// Produces one illustration for the given prompt.
    async fn generate_art(&self, prompt: &str) -> Result<ArtHandle, ForgeError>;
}

/// Imagen-backed implementation of [`CardArtGenerator`].
#[derive(Clone)]
pub struct CardArtAgent {
    client: Client,
    api_key: String,
    model: String,
}

impl CardArtAgent {
    /// Creates a new agent with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }
}

#[async_trait]
impl CardArtGenerator for CardArtAgent {
    async fn generate_art(&self, prompt: &str) -> Result<ArtHandle, ForgeError> {
        let url = format!(
            "{}/{model}:predict?key={api_key}",
            BASE_URL,
            model = self.model,
            api_key = self.api_key
        );

        let request = PredictRequest {
            instances: vec![Instance {
                prompt: prompt.to_string(),
            }],
            parameters: PredictParameters {
                sample_count: 1,
                aspect_ratio: "1:1".to_string(),
                output_mime_type: OUTPUT_MIME_TYPE.to_string(),
            },
        };

        let response = self
            .client
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(|err| ForgeError::provider(format!("Imagen request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Imagen error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: PredictResponse = response
            .json()
            .await
            .map_err(|err| ForgeError::provider(format!("Failed to parse Imagen response: {err}")))?;

        let handle = extract_image(parsed)?;
        tracing::debug!(model = %self.model, "card art received");
        Ok(handle)
    }
}

#[derive(Serialize)]
struct PredictRequest {
    instances: Vec<Instance>,
    parameters: PredictParameters,
}

#[derive(Serialize)]
struct Instance {
    prompt: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PredictParameters {
    sample_count: u32,
    aspect_ratio: String,
    output_mime_type: String,
}

#[derive(Deserialize)]
struct PredictResponse {
    predictions: Option<Vec<Prediction>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    bytes_base64_encoded: Option<String>,
    mime_type: Option<String>,
}

fn extract_image(response: PredictResponse) -> Result<ArtHandle, ForgeError> {
    let prediction = response
        .predictions
        .and_then(|mut predictions| predictions.pop())
        .ok_or_else(|| ForgeError::missing_content("Imagen returned no predictions"))?;

    let encoded = prediction
        .bytes_base64_encoded
        .filter(|data| !data.is_empty())
        .ok_or_else(|| ForgeError::missing_content("Imagen prediction carried no image bytes"))?;

    let mime_type = prediction
        .mime_type
        .unwrap_or_else(|| OUTPUT_MIME_TYPE.to_string());

    Ok(ArtHandle::from_base64(&mime_type, &encoded))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_image_builds_data_uri() {
        let response = PredictResponse {
            predictions: Some(vec![Prediction {
                bytes_base64_encoded: Some("cGl4ZWxz".to_string()),
                mime_type: Some("image/jpeg".to_string()),
            }]),
        };
        let handle = extract_image(response).unwrap();
        assert_eq!(handle.as_str(), "data:image/jpeg;base64,cGl4ZWxz");
        assert_eq!(handle.decode_bytes().unwrap(), b"pixels");
    }

    #[test]
    fn test_extract_image_defaults_mime_type() {
        let response = PredictResponse {
            predictions: Some(vec![Prediction {
                bytes_base64_encoded: Some("cGl4ZWxz".to_string()),
                mime_type: None,
            }]),
        };
        let handle = extract_image(response).unwrap();
        assert!(handle.as_str().starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn test_missing_predictions_is_an_error() {
        assert!(matches!(
            extract_image(PredictResponse { predictions: None }),
            Err(ForgeError::MissingContent(_))
        ));
    }

    #[test]
    fn test_empty_payload_is_an_error() {
        let response = PredictResponse {
            predictions: Some(vec![Prediction {
                bytes_base64_encoded: Some(String::new()),
                mime_type: None,
            }]),
        };
        assert!(matches!(
            extract_image(response),
            Err(ForgeError::MissingContent(_))
        ));
    }
}
