//! Card domain model.
//!
//! This module contains the structured description of a forged card as the
//! text-generation provider returns it, plus the merged result type that
//! pairs a card with its illustration.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ForgeError;

/// Rarity tier of a card.
///
/// The wire labels are part of the provider contract: the response schema
/// constrains the `rarity` field to exactly these strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardRarity {
    Common,
    Uncommon,
    Rare,
    #[serde(rename = "Mythic Rare")]
    Mythic,
}

impl CardRarity {
    /// Human-readable label, identical to the wire form.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Common => "Common",
            Self::Uncommon => "Uncommon",
            Self::Rare => "Rare",
            Self::Mythic => "Mythic Rare",
        }
    }

    /// Single-character glyph shown next to the type line.
    ///
    /// Mythic is pinned to `M` rather than deriving from its label; every
    /// other tier uses the first character of its label.
    pub fn glyph(&self) -> char {
        match self {
            Self::Mythic => 'M',
            other => other.label().chars().next().unwrap_or('?'),
        }
    }
}

impl fmt::Display for CardRarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Color identity of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardColor {
    White,
    Blue,
    Black,
    Red,
    Green,
    Multicolor,
    Colorless,
}

impl CardColor {
    pub fn label(&self) -> &'static str {
        match self {
            Self::White => "White",
            Self::Blue => "Blue",
            Self::Black => "Black",
            Self::Red => "Red",
            Self::Green => "Green",
            Self::Multicolor => "Multicolor",
            Self::Colorless => "Colorless",
        }
    }
}

impl fmt::Display for CardColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The structured description of a generated card.
///
/// Field names on the wire are camelCase; this is the exact shape the
/// text-generation schema requests. `power` and `toughness` stay textual
/// since card games use non-numeric values such as `*`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    pub name: String,
    /// Compact cost notation, e.g. `{2}{W}{U}`.
    pub mana_cost: String,
    /// e.g. "Legendary Creature — Human Wizard"
    pub type_line: String,
    pub rarity: CardRarity,
    /// Rules text; may contain embedded line breaks.
    pub rules_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flavor_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toughness: Option<String>,
    pub color_identity: CardColor,
    /// Natural-language illustration description. Consumed by the image
    /// step only, never displayed.
    pub art_prompt: String,
}

/// A displayable reference to a card illustration.
///
/// Either a self-contained data URI built from raw image bytes, or a URL
/// passed through from the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtHandle(String);

const DATA_URI_PREFIX: &str = "data:";

impl ArtHandle {
    /// Wraps raw image bytes as a self-contained data URI.
    pub fn from_bytes(mime_type: &str, bytes: &[u8]) -> Self {
        let encoded = BASE64_STANDARD.encode(bytes);
        Self(format!("{DATA_URI_PREFIX}{mime_type};base64,{encoded}"))
    }

    /// Wraps an already base64-encoded payload, as the image provider
    /// returns it, without a decode round-trip.
    pub fn from_base64(mime_type: &str, encoded: &str) -> Self {
        Self(format!("{DATA_URI_PREFIX}{mime_type};base64,{encoded}"))
    }

    /// Passes a provider-hosted URL through unchanged.
    pub fn from_url(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_data_uri(&self) -> bool {
        self.0.starts_with(DATA_URI_PREFIX)
    }

    /// Recovers the raw image bytes from a data URI handle.
    ///
    /// Returns a serialization error for URL handles or malformed URIs;
    /// callers that can only paint local bytes use this to decide whether
    /// to fall back to a placeholder.
    pub fn decode_bytes(&self) -> Result<Vec<u8>, ForgeError> {
        let payload = self
            .0
            .strip_prefix(DATA_URI_PREFIX)
            .and_then(|rest| rest.split_once(";base64,"))
            .map(|(_mime, data)| data)
            .ok_or_else(|| ForgeError::Serialization {
                format: "data URI".to_string(),
                message: "handle is not a base64 data URI".to_string(),
            })?;
        Ok(BASE64_STANDARD.decode(payload)?)
    }
}

impl fmt::Display for ArtHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A card paired with its illustration.
///
/// Constructed atomically by the generation orchestrator: there is never a
/// card without art or art without a card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForgedCard {
    pub card: CardRecord,
    pub art: ArtHandle,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> CardRecord {
        CardRecord {
            name: "Ember Seer".to_string(),
            mana_cost: "{1}{R}".to_string(),
            type_line: "Creature — Elemental Shaman".to_string(),
            rarity: CardRarity::Rare,
            rules_text: "When Ember Seer enters, it deals 1 damage to any target.".to_string(),
            flavor_text: None,
            power: Some("2".to_string()),
            toughness: Some("1".to_string()),
            color_identity: CardColor::Red,
            art_prompt: "an elemental shaman wreathed in embers".to_string(),
        }
    }

    #[test]
    fn test_rarity_glyph() {
        assert_eq!(CardRarity::Common.glyph(), 'C');
        assert_eq!(CardRarity::Uncommon.glyph(), 'U');
        assert_eq!(CardRarity::Rare.glyph(), 'R');
        // Mythic is special-cased, not derived from "Mythic Rare"
        assert_eq!(CardRarity::Mythic.glyph(), 'M');
    }

    #[test]
    fn test_rarity_wire_labels() {
        assert_eq!(
            serde_json::to_string(&CardRarity::Mythic).unwrap(),
            "\"Mythic Rare\""
        );
        let parsed: CardRarity = serde_json::from_str("\"Mythic Rare\"").unwrap();
        assert_eq!(parsed, CardRarity::Mythic);
    }

    #[test]
    fn test_card_record_wire_shape() {
        let json = r#"{
            "name": "Ember Seer",
            "manaCost": "{1}{R}",
            "typeLine": "Creature — Elemental Shaman",
            "rarity": "Rare",
            "rulesText": "Haste",
            "colorIdentity": "Red",
            "artPrompt": "an elemental shaman"
        }"#;
        let record: CardRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.name, "Ember Seer");
        assert_eq!(record.color_identity, CardColor::Red);
        assert_eq!(record.flavor_text, None);
        assert_eq!(record.power, None);
    }

    #[test]
    fn test_record_rejects_unknown_enum_values() {
        let json = r#"{
            "name": "Void Thing",
            "manaCost": "{3}",
            "typeLine": "Artifact",
            "rarity": "Legendary",
            "rulesText": "",
            "colorIdentity": "Colorless",
            "artPrompt": "a void thing"
        }"#;
        assert!(serde_json::from_str::<CardRecord>(json).is_err());
    }

    #[test]
    fn test_art_handle_round_trip() {
        let bytes = b"\xff\xd8\xff\xe0 not a real jpeg";
        let handle = ArtHandle::from_bytes("image/jpeg", bytes);
        assert!(handle.is_data_uri());
        assert!(handle.as_str().starts_with("data:image/jpeg;base64,"));
        assert_eq!(handle.decode_bytes().unwrap(), bytes);
    }

    #[test]
    fn test_art_handle_url_does_not_decode() {
        let handle = ArtHandle::from_url("https://example.com/art.png");
        assert!(!handle.is_data_uri());
        assert!(handle.decode_bytes().is_err());
    }

    #[test]
    fn test_forged_card_holds_both_halves() {
        let forged = ForgedCard {
            card: sample_record(),
            art: ArtHandle::from_bytes("image/jpeg", b"art"),
        };
        assert_eq!(forged.card.rarity, CardRarity::Rare);
        assert!(forged.art.is_data_uri());
    }
}
