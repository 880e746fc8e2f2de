//! Block layout: wrapping, pagination, and page decorations.
//!
//! Turns an ordered [`Block`] list into per-page lists of draw commands.
//! Pages are A4 with fixed margins; the logo (when present) is drawn
//! identically on every page, centered horizontally inside the top margin
//! band with its aspect ratio preserved.
//!
//! Text width is estimated from character count. Helvetica averages about
//! half an em per glyph at body sizes, which keeps wrapped lines safely
//! inside the content box without loading font metrics.

use crate::assets::ContractAssets;
use crate::blocks::{Block, SignatureBlock};
use crate::draw::{self, DrawCmd, ImageSlot, PlacedImage};

pub const PAGE_WIDTH: f32 = 595.0;
pub const PAGE_HEIGHT: f32 = 842.0;
pub const MARGIN: f32 = 72.0;
pub const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;

pub const TITLE_SIZE: f32 = 16.0;
pub const HEADING_SIZE: f32 = 11.0;
pub const BODY_SIZE: f32 = 10.0;

const LINE_FACTOR: f32 = 1.45;
const CHAR_WIDTH_RATIO: f32 = 0.5;

/// Target logo height inside the top margin band.
const LOGO_HEIGHT: f32 = 36.0;
/// Target height for the signature image on the lender line.
const SIGNATURE_IMAGE_HEIGHT: f32 = 28.0;
/// Target height for the stamp icon.
const STAMP_HEIGHT: f32 = 24.0;
/// Total vertical room reserved for a signature block.
const SIGNATURE_BLOCK_HEIGHT: f32 = 42.0;

/// One laid-out page: draw commands in paint order.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub commands: Vec<DrawCmd>,
}

/// Estimated width of `text` at `size` points.
pub fn estimate_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * CHAR_WIDTH_RATIO
}

/// Greedy word wrap against an estimated width limit.
///
/// A single word wider than `max_width` gets its own (overflowing) line
/// rather than being split mid-word.
pub fn wrap_text(text: &str, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if !current.is_empty() && estimate_width(&candidate, size) > max_width {
            lines.push(current);
            current = word.to_string();
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Lay out blocks into pages.
pub fn paginate(blocks: &[Block], assets: &ContractAssets, stamp_y_offset: f32) -> Vec<Page> {
    let mut paginator = Paginator::new(assets, stamp_y_offset);
    for block in blocks {
        paginator.push(block);
    }
    paginator.finish()
}

struct Paginator<'a> {
    assets: &'a ContractAssets,
    stamp_y_offset: f32,
    pages: Vec<Page>,
    current: Vec<DrawCmd>,
    cursor: f32,
    page_has_content: bool,
}

impl<'a> Paginator<'a> {
    fn new(assets: &'a ContractAssets, stamp_y_offset: f32) -> Self {
        let mut paginator = Self {
            assets,
            stamp_y_offset,
            pages: Vec::new(),
            current: Vec::new(),
            cursor: PAGE_HEIGHT - MARGIN,
            page_has_content: false,
        };
        paginator.start_page();
        paginator
    }

    fn start_page(&mut self) {
        self.current = page_decorations(self.assets);
        self.cursor = PAGE_HEIGHT - MARGIN;
        self.page_has_content = false;
    }

    fn break_page(&mut self) {
        let commands = std::mem::take(&mut self.current);
        self.pages.push(Page { commands });
        self.start_page();
    }

    /// Break the page if `needed` points of height no longer fit.
    ///
    /// Never breaks an empty page: an element taller than the content box
    /// is emitted anyway rather than looping forever.
    fn ensure_room(&mut self, needed: f32) {
        if self.page_has_content && self.cursor - needed < MARGIN {
            self.break_page();
        }
    }

    fn emit_line(&mut self, text: &str, size: f32, bold: bool, x: f32) {
        let line_height = size * LINE_FACTOR;
        self.ensure_room(line_height);
        self.cursor -= size;
        self.current.push(DrawCmd::Text {
            x,
            y: self.cursor,
            size,
            bold,
            text: text.to_string(),
        });
        self.cursor -= line_height - size;
        self.page_has_content = true;
    }

    fn push(&mut self, block: &Block) {
        match block {
            Block::Title(text) => {
                for line in wrap_text(text, TITLE_SIZE, CONTENT_WIDTH) {
                    let width = estimate_width(&line, TITLE_SIZE);
                    let x = (MARGIN + (CONTENT_WIDTH - width) / 2.0).max(MARGIN);
                    self.emit_line(&line, TITLE_SIZE, true, x);
                }
            }
            Block::Heading(text) => {
                for line in wrap_text(text, HEADING_SIZE, CONTENT_WIDTH) {
                    self.emit_line(&line, HEADING_SIZE, true, MARGIN);
                }
            }
            Block::Paragraph(text) => {
                for line in wrap_text(text, BODY_SIZE, CONTENT_WIDTH) {
                    self.emit_line(&line, BODY_SIZE, false, MARGIN);
                }
            }
            Block::Spacer(gap) => {
                if self.page_has_content && self.cursor - gap < MARGIN {
                    self.break_page();
                } else {
                    self.cursor -= gap;
                }
            }
            Block::Signature(block) => self.push_signature(block),
        }
    }

    fn push_signature(&mut self, block: &SignatureBlock) {
        self.ensure_room(SIGNATURE_BLOCK_HEIGHT);
        self.cursor -= BODY_SIZE;

        let signature = if block.with_signature {
            self.assets.signature.as_ref().map(|asset| {
                let (width, height) = asset.scaled_to_height(SIGNATURE_IMAGE_HEIGHT);
                PlacedImage {
                    slot: ImageSlot::Signature,
                    width,
                    height,
                }
            })
        } else {
            None
        };
        let stamp = if block.with_stamp {
            self.assets.stamp.as_ref().map(|asset| {
                let (width, height) = asset.scaled_to_height(STAMP_HEIGHT);
                PlacedImage {
                    slot: ImageSlot::Stamp,
                    width,
                    height,
                }
            })
        } else {
            None
        };

        let label_width = estimate_width(&block.label, BODY_SIZE);
        self.current.extend(draw::signature_commands(
            &block.label,
            MARGIN,
            self.cursor,
            CONTENT_WIDTH,
            label_width,
            BODY_SIZE,
            signature,
            stamp,
            self.stamp_y_offset,
        ));

        self.cursor -= SIGNATURE_BLOCK_HEIGHT - BODY_SIZE;
        self.page_has_content = true;
    }

    fn finish(mut self) -> Vec<Page> {
        if self.page_has_content || self.pages.is_empty() {
            let commands = std::mem::take(&mut self.current);
            self.pages.push(Page { commands });
        }
        self.pages
    }
}

/// Per-page decorations: the logo, centered horizontally in the top
/// margin band, aspect preserved, clamped to the content width.
fn page_decorations(assets: &ContractAssets) -> Vec<DrawCmd> {
    let Some(logo) = assets.logo.as_ref() else {
        return Vec::new();
    };

    let (mut width, mut height) = logo.scaled_to_height(LOGO_HEIGHT);
    if width > CONTENT_WIDTH {
        (width, height) = logo.scaled_to_width(CONTENT_WIDTH);
    }

    vec![DrawCmd::Image {
        slot: ImageSlot::Logo,
        x: (PAGE_WIDTH - width) / 2.0,
        y: PAGE_HEIGHT - MARGIN + (MARGIN - height) / 2.0,
        width,
        height,
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::ImageAsset;
    use image::RgbImage;

    fn assets_with_logo(width: u32, height: u32) -> ContractAssets {
        ContractAssets {
            logo: Some(ImageAsset::from_rgb(RgbImage::new(width, height))),
            signature: None,
            stamp: None,
        }
    }

    #[test]
    fn test_wrap_text_respects_width() {
        let text = "una frase abbastanza lunga da dover andare a capo almeno una volta";
        let lines = wrap_text(text, BODY_SIZE, 120.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(estimate_width(line, BODY_SIZE) <= 120.0, "line too wide: {line}");
        }
        // No words lost or reordered
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn test_wrap_text_single_long_word_overflows() {
        let lines = wrap_text("parolunga", BODY_SIZE, 10.0);
        assert_eq!(lines, vec!["parolunga".to_string()]);
    }

    #[test]
    fn test_wrap_text_empty() {
        assert!(wrap_text("   ", BODY_SIZE, 100.0).is_empty());
    }

    #[test]
    fn test_single_paragraph_single_page() {
        let blocks = vec![Block::Paragraph("Breve.".to_string())];
        let pages = paginate(&blocks, &ContractAssets::none(), 0.0);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].commands.len(), 1);
    }

    #[test]
    fn test_many_paragraphs_break_pages() {
        let paragraph = "Riga di testo che occupa spazio verticale nel documento.";
        let blocks: Vec<Block> = (0..120)
            .map(|_| Block::Paragraph(paragraph.to_string()))
            .collect();
        let pages = paginate(&blocks, &ContractAssets::none(), 0.0);
        assert!(pages.len() > 1, "expected a page break, got {}", pages.len());

        // Nothing may be painted below the bottom margin.
        for page in &pages {
            for cmd in &page.commands {
                if let DrawCmd::Text { y, .. } = cmd {
                    assert!(*y >= MARGIN - f32::EPSILON);
                }
            }
        }
    }

    #[test]
    fn test_logo_repeats_on_every_page() {
        let assets = assets_with_logo(200, 50);
        let paragraph = "Riga di testo che occupa spazio verticale nel documento.";
        let blocks: Vec<Block> = (0..120)
            .map(|_| Block::Paragraph(paragraph.to_string()))
            .collect();
        let pages = paginate(&blocks, &assets, 0.0);
        assert!(pages.len() > 1);

        let mut first_logo: Option<DrawCmd> = None;
        for page in &pages {
            let logo = page
                .commands
                .iter()
                .find(|c| matches!(c, DrawCmd::Image { slot: ImageSlot::Logo, .. }))
                .expect("logo missing from a page");
            match first_logo.as_ref() {
                None => first_logo = Some(logo.clone()),
                Some(first) => assert_eq!(logo, first, "logo placement differs between pages"),
            }
        }
    }

    #[test]
    fn test_logo_in_top_band_and_aspect_preserved() {
        let assets = assets_with_logo(200, 50);
        let pages = paginate(&[Block::Paragraph("x".to_string())], &assets, 0.0);

        match &pages[0].commands[0] {
            DrawCmd::Image { x, y, width, height, .. } => {
                // 200x50 at height 36 -> width 144
                assert_eq!(*height, 36.0);
                assert_eq!(*width, 144.0);
                // Centered: (595 - 144) / 2
                assert_eq!(*x, (PAGE_WIDTH - 144.0) / 2.0);
                // Inside the top margin band
                assert!(*y >= PAGE_HEIGHT - MARGIN);
                assert!(*y + *height <= PAGE_HEIGHT);
            }
            other => panic!("expected the logo image first, got {other:?}"),
        }
    }

    #[test]
    fn test_wide_logo_clamped_to_content_width() {
        // 2000x100 at height 36 would be 720pt wide; must clamp.
        let assets = assets_with_logo(2000, 100);
        let pages = paginate(&[Block::Paragraph("x".to_string())], &assets, 0.0);
        match &pages[0].commands[0] {
            DrawCmd::Image { width, .. } => assert_eq!(*width, CONTENT_WIDTH),
            other => panic!("expected the logo image first, got {other:?}"),
        }
    }

    #[test]
    fn test_spacer_near_bottom_breaks_page() {
        let blocks = vec![
            Block::Paragraph("Testo.".to_string()),
            Block::Spacer(10_000.0),
            Block::Paragraph("Dopo.".to_string()),
        ];
        let pages = paginate(&blocks, &ContractAssets::none(), 0.0);
        assert_eq!(pages.len(), 2);
    }

    #[test]
    fn test_title_is_centered_and_bold() {
        let pages = paginate(
            &[Block::Title("Contratto".to_string())],
            &ContractAssets::none(),
            0.0,
        );
        match &pages[0].commands[0] {
            DrawCmd::Text { x, bold, size, .. } => {
                assert!(*bold);
                assert_eq!(*size, TITLE_SIZE);
                assert!(*x > MARGIN);
            }
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn test_signature_block_emits_label_and_line() {
        let blocks = vec![Block::Signature(SignatureBlock::plain("Firma del Cliente"))];
        let pages = paginate(&blocks, &ContractAssets::none(), 0.0);
        let cmds = &pages[0].commands;
        assert!(matches!(cmds[0], DrawCmd::Text { bold: true, .. }));
        assert!(matches!(cmds[1], DrawCmd::Line { .. }));
    }

    #[test]
    fn test_signature_images_skipped_without_assets() {
        // Even when the block requests both decorations, absent assets
        // mean no image commands.
        let blocks = vec![Block::Signature(SignatureBlock::countersigned(
            "Per l'Istituto",
        ))];
        let pages = paginate(&blocks, &ContractAssets::none(), 0.0);
        assert!(
            !pages[0]
                .commands
                .iter()
                .any(|c| matches!(c, DrawCmd::Image { .. }))
        );
    }
}
