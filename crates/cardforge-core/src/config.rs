//! Runtime configuration for the forge.

use serde::{Deserialize, Serialize};

/// Environment variable holding the Gemini API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Default text-generation model.
pub const DEFAULT_TEXT_MODEL: &str = "gemini-3-flash-preview";

/// Default image-generation model.
pub const DEFAULT_IMAGE_MODEL: &str = "imagen-4.0-generate-001";

/// Default per-generation timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 90;

/// Model and timing configuration for a forge session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgeConfig {
    pub text_model: String,
    pub image_model: String,
    pub timeout_secs: u64,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ForgeConfig {
    /// Overrides the text model after construction.
    pub fn with_text_model(mut self, model: impl Into<String>) -> Self {
        self.text_model = model.into();
        self
    }

    /// Overrides the image model after construction.
    pub fn with_image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = model.into();
        self
    }

    /// Overrides the per-generation timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Reads the API key from the process environment.
///
/// A missing or empty key is reported as `None` rather than an error: the
/// credential is only validated by the provider itself, so its absence
/// surfaces as a generation failure, not a startup check.
pub fn api_key_from_env() -> Option<String> {
    std::env::var(API_KEY_ENV)
        .ok()
        .filter(|key| !key.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ForgeConfig::default();
        assert_eq!(config.text_model, DEFAULT_TEXT_MODEL);
        assert_eq!(config.image_model, DEFAULT_IMAGE_MODEL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_builder_overrides() {
        let config = ForgeConfig::default()
            .with_text_model("gemini-2.5-flash")
            .with_image_model("imagen-next")
            .with_timeout_secs(10);
        assert_eq!(config.text_model, "gemini-2.5-flash");
        assert_eq!(config.image_model, "imagen-next");
        assert_eq!(config.timeout_secs, 10);
    }
}
