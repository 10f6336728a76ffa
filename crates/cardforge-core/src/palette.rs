//! Display palettes for card frames and rarity accents.
//!
//! Pure lookup tables from the categorical card attributes to display
//! treatments. Values are fixed; nothing here depends on the theme the
//! user typed or on the generated content beyond the enums themselves.

use serde::{Deserialize, Serialize};

use crate::card::{CardColor, CardRarity};

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Frame treatment for one color identity.
///
/// `background_accent` is the second gradient stop; only the multicolor
/// frame uses one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FramePalette {
    pub background: Rgb,
    pub border: Rgb,
    pub text: Rgb,
    pub background_accent: Option<Rgb>,
}

const LIGHT_TEXT: Rgb = Rgb(0xf3, 0xf4, 0xf6);
const DARK_TEXT: Rgb = Rgb(0x11, 0x18, 0x27);

/// The light treatment shared by white and colorless frames, and the
/// defensive default for anything outside the enumeration.
const LIGHT_FRAME: FramePalette = FramePalette {
    background: Rgb(0xf2, 0xf1, 0xe6),
    border: Rgb(0xd9, 0xd5, 0xc1),
    text: DARK_TEXT,
    background_accent: None,
};

/// Resolves a color identity to its frame treatment.
///
/// White and colorless share the light treatment; black is the single dark
/// treatment; multicolor carries a gradient (two background stops). All
/// other identities get a distinct tinted frame.
pub fn frame_palette(color: CardColor) -> FramePalette {
    match color {
        CardColor::White | CardColor::Colorless => LIGHT_FRAME,
        CardColor::Blue => FramePalette {
            background: Rgb(0xd1, 0xe4, 0xf3),
            border: Rgb(0x92, 0xb2, 0xca),
            text: DARK_TEXT,
            background_accent: None,
        },
        CardColor::Black => FramePalette {
            background: Rgb(0x3e, 0x3e, 0x3e),
            border: Rgb(0x1a, 0x1a, 0x1a),
            text: LIGHT_TEXT,
            background_accent: None,
        },
        CardColor::Red => FramePalette {
            background: Rgb(0xf4, 0xd9, 0xc9),
            border: Rgb(0xd3, 0x94, 0x7b),
            text: DARK_TEXT,
            background_accent: None,
        },
        CardColor::Green => FramePalette {
            background: Rgb(0xd8, 0xe5, 0xd1),
            border: Rgb(0x9e, 0xb7, 0x93),
            text: DARK_TEXT,
            background_accent: None,
        },
        CardColor::Multicolor => FramePalette {
            background: Rgb(0xe5, 0xd0, 0x98),
            border: Rgb(0xb0, 0x8e, 0x42),
            text: DARK_TEXT,
            background_accent: Some(Rgb(0xc9, 0xa7, 0x5d)),
        },
    }
}

/// Resolves a loosely-typed color label, falling back to the light default
/// for anything outside the enumeration.
///
/// The enum itself is closed; this entry point exists for display paths
/// that handle labels before (or without) strict parsing.
pub fn frame_palette_for_label(label: &str) -> FramePalette {
    match label.trim().to_ascii_lowercase().as_str() {
        "white" => frame_palette(CardColor::White),
        "blue" => frame_palette(CardColor::Blue),
        "black" => frame_palette(CardColor::Black),
        "red" => frame_palette(CardColor::Red),
        "green" => frame_palette(CardColor::Green),
        "multicolor" => frame_palette(CardColor::Multicolor),
        "colorless" => frame_palette(CardColor::Colorless),
        _ => LIGHT_FRAME,
    }
}

const COMMON_ACCENT: Rgb = Rgb(0x00, 0x00, 0x00);

/// Resolves a rarity to the accent color used for its glyph.
pub fn rarity_accent(rarity: CardRarity) -> Rgb {
    match rarity {
        CardRarity::Common => COMMON_ACCENT,
        CardRarity::Uncommon => Rgb(0x94, 0xa3, 0xb8),
        CardRarity::Rare => Rgb(0xf5, 0x9e, 0x0b),
        CardRarity::Mythic => Rgb(0xea, 0x58, 0x0c),
    }
}

/// Label-based rarity accent lookup with the common treatment as fallback.
pub fn rarity_accent_for_label(label: &str) -> Rgb {
    match label.trim().to_ascii_lowercase().as_str() {
        "common" => rarity_accent(CardRarity::Common),
        "uncommon" => rarity_accent(CardRarity::Uncommon),
        "rare" => rarity_accent(CardRarity::Rare),
        "mythic rare" | "mythic" => rarity_accent(CardRarity::Mythic),
        _ => COMMON_ACCENT,
    }
}
