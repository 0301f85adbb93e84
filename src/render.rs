// src/render.rs
use printpdf::path::PaintMode;
use printpdf::{BuiltinFont, Mm, PdfDocument, Rect};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{BingoError, Result};
use crate::models::BingoCard;

const PAGE_MM: f32 = 127.0; // 5in square
const MARGIN_MM: f32 = 6.0;
const CELL_PAD_MM: f32 = 2.0;
const MAX_FONT_PT: f32 = 14.0;
const MIN_FONT_PT: f32 = 5.0;
const PT_TO_MM: f32 = 0.352_778;
// Helvetica averages a little over half an em per glyph
const AVG_GLYPH_EM: f32 = 0.56;

/// Lay the card out as an evenly spaced grid filling one square page.
pub fn render_card_pdf(card: &BingoCard, title: &str) -> Result<Vec<u8>> {
    let n_rows = card.rows.len();
    let n_cols = card.columns();
    if card.is_empty() || n_cols == 0 {
        return Err(BingoError::Render("card has no cells".to_string()));
    }

    let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_MM), Mm(PAGE_MM), "Card");
    let layer = doc.get_page(page).get_layer(layer);
    let font = doc.add_builtin_font(BuiltinFont::Helvetica)?;

    let cell_w = (PAGE_MM - 2.0 * MARGIN_MM) / n_cols as f32;
    let cell_h = (PAGE_MM - 2.0 * MARGIN_MM) / n_rows as f32;
    layer.set_outline_thickness(1.0);

    for (i, row) in card.rows.iter().enumerate() {
        // PDF y grows upwards; row 0 is the top row
        let top = PAGE_MM - MARGIN_MM - i as f32 * cell_h;
        for j in 0..n_cols {
            let left = MARGIN_MM + j as f32 * cell_w;
            layer.add_rect(
                Rect::new(Mm(left), Mm(top - cell_h), Mm(left + cell_w), Mm(top))
                    .with_mode(PaintMode::Stroke),
            );

            let word = row.get(j).map(String::as_str).unwrap_or("");
            if word.is_empty() {
                continue;
            }
            let size = fit_font_size(word, cell_w - 2.0 * CELL_PAD_MM);
            let text_w = text_width_mm(word, size);
            let x = left + (cell_w - text_w) / 2.0;
            let y = top - cell_h / 2.0 - size * PT_TO_MM * 0.35;
            layer.use_text(word, size, Mm(x), Mm(y), &font);
        }
    }

    let bytes = doc.save_to_bytes()?;
    debug!(
        "Rendered card PDF - rows={}, cols={}, bytes={}",
        n_rows,
        n_cols,
        bytes.len()
    );
    Ok(bytes)
}

/// Render fully in memory, then overwrite `path`.
pub fn write_card_pdf(card: &BingoCard, path: &Path) -> Result<()> {
    let bytes = render_card_pdf(card, "Sermon Bingo")?;
    ensure_parent(path)?;
    fs::write(path, bytes)?;
    Ok(())
}

pub fn write_card_json(card: &BingoCard, path: &Path) -> Result<()> {
    ensure_parent(path)?;
    fs::write(path, serde_json::to_vec_pretty(card)?)?;
    Ok(())
}

pub fn render_card_text(card: &BingoCard) -> String {
    let width = card.cells().map(|c| c.chars().count()).max().unwrap_or(0).max(1);
    let mut out = String::new();
    for row in &card.rows {
        let cells: Vec<String> = (0..card.columns())
            .map(|j| {
                let word = row.get(j).map(String::as_str).unwrap_or("");
                let shown = if word.is_empty() { "·" } else { word };
                format!("{:^width$}", shown, width = width)
            })
            .collect();
        out.push_str(&format!("| {} |\n", cells.join(" | ")));
    }
    out
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

fn text_width_mm(word: &str, size_pt: f32) -> f32 {
    word.chars().count() as f32 * size_pt * AVG_GLYPH_EM * PT_TO_MM
}

fn fit_font_size(word: &str, avail_mm: f32) -> f32 {
    let at_max = text_width_mm(word, MAX_FONT_PT);
    if at_max <= avail_mm {
        return MAX_FONT_PT;
    }
    (MAX_FONT_PT * avail_mm / at_max).max(MIN_FONT_PT)
}
