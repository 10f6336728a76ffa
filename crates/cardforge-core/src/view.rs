//! Card view composition.
//!
//! `CardView` is the renderable form of a forged card: every display
//! region resolved from the record and its palettes, with no terminal or
//! pixel concerns. Composition is a pure function of the record and the
//! art handle; painting it is the front-end's job.

use serde::{Deserialize, Serialize};

use crate::card::{ArtHandle, CardRarity, CardRecord, ForgedCard};
use crate::cost::{self, CostSymbol};
use crate::palette::{self, FramePalette, Rgb};

/// A fully resolved card visual, region by region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardView {
    /// Frame treatment from the card's color identity.
    pub frame: FramePalette,
    /// Header region: card name next to the tokenized cost.
    pub name: String,
    pub cost: Vec<CostSymbol>,
    /// Art region. Fills the available space, cropped to fit rather than
    /// letterboxed.
    pub art: ArtHandle,
    /// Type row: type line plus the rarity glyph in its accent color.
    pub type_line: String,
    pub rarity_glyph: char,
    pub rarity_accent: Rgb,
    /// Text box: rules text, with flavor text in a separated sub-region
    /// when present.
    pub rules_text: String,
    pub flavor_text: Option<String>,
    /// Power/toughness badge at the lower corner. Present when either
    /// value is; a missing side renders as empty next to the slash.
    pub stats_badge: Option<String>,
    /// Decorative seal carried by the two highest rarities only.
    pub foil_seal: bool,
}

impl CardView {
    /// Composes the view for a record and its illustration.
    pub fn compose(card: &CardRecord, art: ArtHandle) -> Self {
        let stats_badge = if card.power.is_some() || card.toughness.is_some() {
            Some(format!(
                "{}/{}",
                card.power.as_deref().unwrap_or(""),
                card.toughness.as_deref().unwrap_or("")
            ))
        } else {
            None
        };

        Self {
            frame: palette::frame_palette(card.color_identity),
            name: card.name.clone(),
            cost: cost::tokenize(&card.mana_cost),
            art,
            type_line: card.type_line.clone(),
            rarity_glyph: card.rarity.glyph(),
            rarity_accent: palette::rarity_accent(card.rarity),
            rules_text: card.rules_text.clone(),
            flavor_text: card.flavor_text.clone(),
            stats_badge,
            foil_seal: matches!(card.rarity, CardRarity::Rare | CardRarity::Mythic),
        }
    }
}

impl From<&ForgedCard> for CardView {
    fn from(forged: &ForgedCard) -> Self {
        Self::compose(&forged.card, forged.art.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CardColor;

    fn record(rarity: CardRarity) -> CardRecord {
        CardRecord {
            name: "Cinder Wyrm".to_string(),
            mana_cost: "{2}{R}{R}".to_string(),
            type_line: "Creature — Dragon".to_string(),
            rarity,
            rules_text: "Flying, haste".to_string(),
            flavor_text: Some("It remembers the first fire.".to_string()),
            power: Some("4".to_string()),
            toughness: Some("3".to_string()),
            color_identity: CardColor::Red,
            art_prompt: "a dragon of cinders".to_string(),
        }
    }

    fn art() -> ArtHandle {
        ArtHandle::from_bytes("image/jpeg", b"pixels")
    }

    #[test]
    fn test_compose_resolves_all_regions() {
        let view = CardView::compose(&record(CardRarity::Rare), art());
        assert_eq!(view.frame, palette::frame_palette(CardColor::Red));
        assert_eq!(view.cost.len(), 3);
        assert_eq!(view.rarity_glyph, 'R');
        assert_eq!(view.stats_badge.as_deref(), Some("4/3"));
        assert_eq!(view.flavor_text.as_deref(), Some("It remembers the first fire."));
    }

    #[test]
    fn test_badge_absent_without_power_and_toughness() {
        let mut r = record(CardRarity::Common);
        r.power = None;
        r.toughness = None;
        let view = CardView::compose(&r, art());
        assert_eq!(view.stats_badge, None);
    }

    #[test]
    fn test_badge_keeps_slash_when_one_side_missing() {
        let mut r = record(CardRarity::Common);
        r.toughness = None;
        let view = CardView::compose(&r, art());
        assert_eq!(view.stats_badge.as_deref(), Some("4/"));

        r.power = None;
        r.toughness = Some("5".to_string());
        let view = CardView::compose(&r, art());
        assert_eq!(view.stats_badge.as_deref(), Some("/5"));
    }

    #[test]
    fn test_foil_seal_for_top_rarities_only() {
        assert!(!CardView::compose(&record(CardRarity::Common), art()).foil_seal);
        assert!(!CardView::compose(&record(CardRarity::Uncommon), art()).foil_seal);
        assert!(CardView::compose(&record(CardRarity::Rare), art()).foil_seal);
        assert!(CardView::compose(&record(CardRarity::Mythic), art()).foil_seal);
    }

    #[test]
    fn test_regions_do_not_depend_on_art_handle() {
        let a = CardView::compose(&record(CardRarity::Rare), art());
        let b = CardView::compose(
            &record(CardRarity::Rare),
            ArtHandle::from_url("https://example.com/other.png"),
        );
        assert_eq!(a.frame, b.frame);
        assert_eq!(a.cost, b.cost);
        assert_eq!(a.stats_badge, b.stats_badge);
    }
}
