//! Terminal card painter.
//!
//! Turns a composed [`CardView`] into ANSI truecolor output: a framed
//! card with the name and cost chips up top, the illustration painted as
//! half-block cells in the middle, the type line and rarity glyph below
//! it, and the text box and stats badge at the bottom. Painting never
//! fails: art that cannot be decoded degrades to a placeholder region.

use colored::Colorize;
use image::imageops::FilterType;

use cardforge_core::card::ArtHandle;
use cardforge_core::palette::{FramePalette, Rgb};
use cardforge_core::view::CardView;

/// Interior width of the card in terminal columns.
const CARD_WIDTH: usize = 42;

/// Art region height in terminal rows. Each row paints two pixel rows.
const ART_ROWS: u32 = 10;

/// Paints a full card to a multi-line ANSI string.
pub fn paint_card(view: &CardView) -> String {
    let mut lines = Vec::new();
    let frame = &view.frame;

    lines.push(edge(frame, '┌', '┐'));

    // Header: name left, cost chips right
    let chips: Vec<String> = view
        .cost
        .iter()
        .map(|sym| {
            let bg = sym.treatment.chip();
            let fg = sym.treatment.chip_text();
            format!(
                "{}",
                format!(" {} ", sym.text)
                    .truecolor(fg.0, fg.1, fg.2)
                    .on_truecolor(bg.0, bg.1, bg.2)
            )
        })
        .collect();
    let chips_width: usize = view.cost.iter().map(|sym| sym.text.len() + 2).sum();
    let name = truncate(&view.name, CARD_WIDTH.saturating_sub(chips_width + 1));
    let pad = CARD_WIDTH.saturating_sub(name.chars().count() + chips_width);
    let header = format!(
        "{}{}{}",
        paint_text(frame, &name, true),
        paint_text(frame, &" ".repeat(pad), false),
        chips.concat()
    );
    lines.push(boxed(frame, header));

    // Art region, cropped to fill
    match paint_art(&view.art, CARD_WIDTH as u32, ART_ROWS) {
        Some(rows) => {
            for row in rows {
                lines.push(boxed(frame, row));
            }
        }
        None => {
            for line in placeholder_art(frame) {
                lines.push(boxed(frame, line));
            }
        }
    }

    // Type row: type line left, rarity glyph right in its accent color
    let type_line = truncate(&view.type_line, CARD_WIDTH - 2);
    let pad = CARD_WIDTH.saturating_sub(type_line.chars().count() + 1);
    let accent = view.rarity_accent;
    let type_row = format!(
        "{}{}{}",
        paint_text(frame, &type_line, true),
        paint_text(frame, &" ".repeat(pad), false),
        format!("{}", view.rarity_glyph)
            .truecolor(accent.0, accent.1, accent.2)
            .on_truecolor(frame.background.0, frame.background.1, frame.background.2)
            .bold()
    );
    lines.push(boxed(frame, type_row));

    lines.push(divider(frame));

    // Text box: rules text, then flavor text in a separated sub-region.
    // The second gradient stop, when present, tints the lower card.
    let lower_bg = frame.background_accent.unwrap_or(frame.background);
    for line in wrap(&view.rules_text, CARD_WIDTH - 2) {
        lines.push(boxed(frame, paint_lower(frame, lower_bg, &pad_to(&line, CARD_WIDTH), false)));
    }
    if let Some(flavor) = &view.flavor_text {
        lines.push(boxed(frame, paint_lower(frame, lower_bg, &pad_to("", CARD_WIDTH), false)));
        for line in wrap(flavor, CARD_WIDTH - 2) {
            lines.push(boxed(frame, paint_lower(frame, lower_bg, &pad_to(&line, CARD_WIDTH), true)));
        }
    }

    // Stats badge, right-aligned in its own row
    if let Some(badge) = &view.stats_badge {
        let badge_text = format!("[{badge}]");
        let pad = CARD_WIDTH.saturating_sub(badge_text.chars().count());
        let row = format!(
            "{}{}",
            paint_lower(frame, lower_bg, &" ".repeat(pad), false),
            format!("{}", badge_text)
                .truecolor(frame.text.0, frame.text.1, frame.text.2)
                .on_truecolor(lower_bg.0, lower_bg.1, lower_bg.2)
                .bold()
        );
        lines.push(boxed(frame, row));
    }

    lines.push(edge(frame, '└', '┘'));

    // Foil seal under the frame for the two highest rarities
    if view.foil_seal {
        let seal = format!(
            "{}{}{}",
            "▬▬".truecolor(0x93, 0xc5, 0xfd),
            "▬▬".truecolor(0xd8, 0xb4, 0xfe),
            "▬▬".truecolor(0x86, 0xef, 0xac)
        );
        let pad = (CARD_WIDTH + 2).saturating_sub(6) / 2;
        lines.push(format!("{}{}", " ".repeat(pad), seal));
    }

    lines.join("\n")
}

/// Central crop rectangle `(x, y, w, h)` matching the target aspect ratio.
///
/// The returned rectangle always covers the full target after scaling;
/// the overflowing dimension is trimmed evenly on both sides.
pub(crate) fn crop_to_fill(src_w: u32, src_h: u32, dst_w: u32, dst_h: u32) -> (u32, u32, u32, u32) {
    if src_w as u64 * dst_h as u64 > dst_w as u64 * src_h as u64 {
        // Source is wider than the target: trim width
        let w = ((src_h as u64 * dst_w as u64) / dst_h as u64).max(1) as u32;
        ((src_w - w) / 2, 0, w, src_h)
    } else {
        // Source is taller (or equal): trim height
        let h = ((src_w as u64 * dst_h as u64) / dst_w as u64).max(1) as u32;
        (0, (src_h - h) / 2, src_w, h)
    }
}

/// Paints the illustration into `cols` x `rows` terminal cells using
/// upper-half-block characters (two pixel rows per cell row).
///
/// Returns `None` when the handle is not a decodable local image; the
/// caller falls back to a placeholder instead of failing the card.
fn paint_art(art: &ArtHandle, cols: u32, rows: u32) -> Option<Vec<String>> {
    let bytes = art.decode_bytes().ok()?;
    let img = image::load_from_memory(&bytes).ok()?;

    let (x, y, w, h) = crop_to_fill(img.width(), img.height(), cols, rows * 2);
    let scaled = img
        .crop_imm(x, y, w, h)
        .resize_exact(cols, rows * 2, FilterType::Triangle)
        .to_rgb8();

    let mut lines = Vec::with_capacity(rows as usize);
    for row in 0..rows {
        let mut line = String::new();
        for col in 0..cols {
            let top = scaled.get_pixel(col, row * 2);
            let bottom = scaled.get_pixel(col, row * 2 + 1);
            line.push_str(&format!(
                "{}",
                "▀".truecolor(top[0], top[1], top[2])
                    .on_truecolor(bottom[0], bottom[1], bottom[2])
            ));
        }
        lines.push(line);
    }
    Some(lines)
}

fn placeholder_art(frame: &FramePalette) -> Vec<String> {
    let mut lines = Vec::with_capacity(ART_ROWS as usize);
    for row in 0..ART_ROWS {
        let content = if row == ART_ROWS / 2 {
            center("· illustration unavailable ·", CARD_WIDTH)
        } else {
            " ".repeat(CARD_WIDTH)
        };
        lines.push(format!(
            "{}",
            content
                .truecolor(frame.border.0, frame.border.1, frame.border.2)
                .on_truecolor(0x10, 0x10, 0x10)
        ));
    }
    lines
}

fn paint_text(frame: &FramePalette, text: &str, bold: bool) -> String {
    let styled = text
        .truecolor(frame.text.0, frame.text.1, frame.text.2)
        .on_truecolor(frame.background.0, frame.background.1, frame.background.2);
    let styled = if bold { styled.bold() } else { styled };
    format!("{styled}")
}

fn paint_lower(frame: &FramePalette, bg: Rgb, text: &str, italic: bool) -> String {
    let styled = text
        .truecolor(frame.text.0, frame.text.1, frame.text.2)
        .on_truecolor(bg.0, bg.1, bg.2);
    let styled = if italic { styled.italic() } else { styled };
    format!("{styled}")
}

fn boxed(frame: &FramePalette, content: String) -> String {
    let b = frame.border;
    let bar = format!("{}", "│".truecolor(b.0, b.1, b.2));
    format!("{bar}{content}{bar}")
}

fn edge(frame: &FramePalette, left: char, right: char) -> String {
    let b = frame.border;
    format!(
        "{}",
        format!("{left}{}{right}", "─".repeat(CARD_WIDTH)).truecolor(b.0, b.1, b.2)
    )
}

fn divider(frame: &FramePalette) -> String {
    let b = frame.border;
    format!(
        "{}",
        format!("├{}┤", "─".repeat(CARD_WIDTH)).truecolor(b.0, b.1, b.2)
    )
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}

fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return truncate(text, width);
    }
    let left = (width - len) / 2;
    let right = width - len - left;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

fn pad_to(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!(" {}{}", text, " ".repeat(width.saturating_sub(len + 1)))
}

/// Wraps text to `width` columns, preserving embedded line breaks.
/// Words longer than the width are hard-split so the frame stays aligned.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for raw_line in text.lines() {
        let mut current = String::new();
        for word in raw_line.split_whitespace() {
            let mut word = word.to_string();
            while word.chars().count() > width {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let head: String = word.chars().take(width).collect();
                let tail: String = word.chars().skip(width).collect();
                lines.push(head);
                word = tail;
            }
            let needed = if current.is_empty() {
                word.chars().count()
            } else {
                current.chars().count() + 1 + word.chars().count()
            };
            if needed > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&word);
        }
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
