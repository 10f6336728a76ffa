//! Cost-notation tokenizer.
//!
//! Parses the compact brace-delimited cost notation (e.g. `{2}{W}{U}`)
//! into an ordered sequence of display symbols. Tokenizing is lenient:
//! text outside well-formed braces is ignored, and an input with no
//! tokens yields an empty sequence rather than an error.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::palette::Rgb;

static COST_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([^{}]+)\}").expect("cost token pattern is valid"));

/// Display treatment of one cost symbol.
///
/// The five single-letter color symbols get fixed chip colors; everything
/// else (numerals, hybrid and colorless markers) shares the generic chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymbolTreatment {
    White,
    Blue,
    Black,
    Red,
    Green,
    Generic,
}

impl SymbolTreatment {
    /// Resolves the letter content of a token, case-insensitively.
    pub fn for_content(content: &str) -> Self {
        match content.trim().to_ascii_uppercase().as_str() {
            "W" => Self::White,
            "U" => Self::Blue,
            "B" => Self::Black,
            "R" => Self::Red,
            "G" => Self::Green,
            _ => Self::Generic,
        }
    }

    /// Chip background color.
    pub fn chip(&self) -> Rgb {
        match self {
            Self::White => Rgb(0xf8, 0xf6, 0xd8),
            Self::Blue => Rgb(0xc1, 0xd7, 0xe9),
            Self::Black => Rgb(0xba, 0xb1, 0xab),
            Self::Red => Rgb(0xe4, 0x99, 0x77),
            Self::Green => Rgb(0xa3, 0xc0, 0x95),
            Self::Generic => Rgb(0xcc, 0xc2, 0xc0),
        }
    }

    /// Chip text color. Black mana is the one dark chip with light text.
    pub fn chip_text(&self) -> Rgb {
        match self {
            Self::Black => Rgb(0xff, 0xff, 0xff),
            _ => Rgb(0x00, 0x00, 0x00),
        }
    }
}

/// One parsed cost symbol: the uppercased token content plus its treatment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostSymbol {
    pub text: String,
    pub treatment: SymbolTreatment,
}

impl CostSymbol {
    fn from_content(content: &str) -> Self {
        Self {
            text: content.trim().to_ascii_uppercase(),
            treatment: SymbolTreatment::for_content(content),
        }
    }

    /// Renders the symbol back to its notation form.
    pub fn notation(&self) -> String {
        format!("{{{}}}", self.text)
    }
}

/// Tokenizes a cost-notation string into its symbols, in source order,
/// preserving duplicates.
pub fn tokenize(notation: &str) -> Vec<CostSymbol> {
    COST_TOKEN
        .captures_iter(notation)
        .map(|caps| CostSymbol::from_content(&caps[1]))
        .collect()
}
