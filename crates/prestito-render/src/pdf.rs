//! lopdf backend: executes laid-out draw commands into PDF bytes.
//!
//! Text uses the built-in Helvetica pair with WinAnsi encoding, which
//! covers the Italian accented characters and the euro sign without
//! embedding a font program. Images are embedded once as DCTDecode
//! XObjects and referenced from every page that draws them.
//!
//! Output is fully deterministic for a given record and asset set: object
//! numbering follows insertion order and nothing here reads clocks or
//! randomness.

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat, dictionary};
use prestito_core::engine::ContractRenderer;
use prestito_types::contract::ContractRecord;
use prestito_types::error::RenderError;

use crate::assets::ContractAssets;
use crate::compose;
use crate::draw::{DrawCmd, ImageSlot};
use crate::layout::{self, PAGE_HEIGHT, PAGE_WIDTH, Page};

const FONT_REGULAR: &str = "F1";
const FONT_BOLD: &str = "F2";

/// Renderer tuning knobs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Vertical offset applied to the stamp relative to the signature
    /// line, in points (negative moves it down).
    pub stamp_y_offset: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            stamp_y_offset: -4.0,
        }
    }
}

/// The production [`ContractRenderer`]: record in, PDF bytes out.
pub struct PdfRenderer {
    assets: ContractAssets,
    options: RenderOptions,
}

impl PdfRenderer {
    pub fn new(assets: ContractAssets) -> Self {
        Self::with_options(assets, RenderOptions::default())
    }

    pub fn with_options(assets: ContractAssets, options: RenderOptions) -> Self {
        Self { assets, options }
    }

    /// Render one contract to PDF bytes.
    ///
    /// Fails atomically: any assembly error surfaces as a [`RenderError`]
    /// and no partial byte stream escapes.
    pub fn render_record(&self, record: &ContractRecord) -> Result<Vec<u8>, RenderError> {
        let blocks = compose::contract_blocks(record);
        let pages = layout::paginate(&blocks, &self.assets, self.options.stamp_y_offset);
        write_pdf(&pages, &self.assets)
    }
}

impl ContractRenderer for PdfRenderer {
    fn render(&self, record: &ContractRecord) -> Result<Vec<u8>, RenderError> {
        self.render_record(record)
    }
}

/// Map text to WinAnsi (CP-1252) bytes.
///
/// ASCII passes through; Latin-1 letters map one-to-one; the euro sign and
/// the common typographic punctuation live in the 0x80-0x9F window.
/// Anything else degrades to `?` rather than corrupting the stream.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20ac}' => 0x80, // €
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201c}' => 0x93,
            '\u{201d}' => 0x94,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            c if (c as u32) < 0x80 => c as u8,
            c if (0xA0..=0xFF).contains(&(c as u32)) => c as u32 as u8,
            _ => b'?',
        })
        .collect()
}

/// Register every present asset as an image XObject.
fn register_images(
    doc: &mut Document,
    assets: &ContractAssets,
) -> Result<Vec<(ImageSlot, &'static str, ObjectId)>, RenderError> {
    let slots = [
        (ImageSlot::Logo, "Im0", assets.logo.as_ref()),
        (ImageSlot::Signature, "Im1", assets.signature.as_ref()),
        (ImageSlot::Stamp, "Im2", assets.stamp.as_ref()),
    ];

    let mut registered = Vec::new();
    for (slot, name, asset) in slots {
        let Some(asset) = asset else { continue };
        let jpeg = asset.to_jpeg()?;
        let id = doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => asset.width_px() as i64,
                "Height" => asset.height_px() as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "Filter" => "DCTDecode",
            },
            jpeg,
        ));
        registered.push((slot, name, id));
    }
    Ok(registered)
}

fn xobject_name(slot: ImageSlot, registered: &[(ImageSlot, &'static str, ObjectId)]) -> Option<&'static str> {
    registered
        .iter()
        .find(|(s, _, _)| *s == slot)
        .map(|(_, name, _)| *name)
}

/// Translate one page of draw commands into content-stream operations.
fn page_operations(
    commands: &[DrawCmd],
    registered: &[(ImageSlot, &'static str, ObjectId)],
) -> Vec<Operation> {
    let mut ops = Vec::new();
    for command in commands {
        match command {
            DrawCmd::Text {
                x,
                y,
                size,
                bold,
                text,
            } => {
                let font = if *bold { FONT_BOLD } else { FONT_REGULAR };
                ops.push(Operation::new("BT", vec![]));
                ops.push(Operation::new("Tf", vec![font.into(), (*size).into()]));
                ops.push(Operation::new("Td", vec![(*x).into(), (*y).into()]));
                ops.push(Operation::new(
                    "Tj",
                    vec![Object::String(
                        encode_win_ansi(text),
                        StringFormat::Literal,
                    )],
                ));
                ops.push(Operation::new("ET", vec![]));
            }
            DrawCmd::Line {
                x1,
                y1,
                x2,
                y2,
                width,
            } => {
                ops.push(Operation::new("w", vec![(*width).into()]));
                ops.push(Operation::new("m", vec![(*x1).into(), (*y1).into()]));
                ops.push(Operation::new("l", vec![(*x2).into(), (*y2).into()]));
                ops.push(Operation::new("S", vec![]));
            }
            DrawCmd::Image {
                slot,
                x,
                y,
                width,
                height,
            } => {
                // Layout only places images whose asset exists, but an
                // unregistered slot is still skipped rather than breaking
                // the whole document.
                let Some(name) = xobject_name(*slot, registered) else {
                    continue;
                };
                ops.push(Operation::new("q", vec![]));
                ops.push(Operation::new(
                    "cm",
                    vec![
                        (*width).into(),
                        0f32.into(),
                        0f32.into(),
                        (*height).into(),
                        (*x).into(),
                        (*y).into(),
                    ],
                ));
                ops.push(Operation::new("Do", vec![name.into()]));
                ops.push(Operation::new("Q", vec![]));
            }
        }
    }
    ops
}

fn font_resources() -> Dictionary {
    dictionary! {
        FONT_REGULAR => dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        },
        FONT_BOLD => dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Bold",
            "Encoding" => "WinAnsiEncoding",
        },
    }
}

fn write_pdf(pages: &[Page], assets: &ContractAssets) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.5");
    doc.trailer
        .set("Creator", Object::string_literal("prestito"));

    let pages_id = doc.add_object(dictionary! {
        "Type" => "Pages",
        "Kids" => Vec::<Object>::new(),
        "Count" => 0,
    });
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let registered = register_images(&mut doc, assets)?;

    for page in pages {
        let content = Content {
            operations: page_operations(&page.commands, &registered),
        };
        let encoded = content
            .encode()
            .map_err(|e| RenderError::ContentEncoding(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(Dictionary::new(), encoded));

        let mut resources = dictionary! {
            "Font" => font_resources(),
        };
        if !registered.is_empty() {
            let mut xobjects = Dictionary::new();
            for (_, name, id) in &registered {
                xobjects.set(*name, Object::Reference(*id));
            }
            resources.set("XObject", xobjects);
        }

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Resources" => resources,
            "MediaBox" => vec![0f32.into(), 0f32.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
            "Contents" => content_id,
        });

        push_page(&mut doc, pages_id, page_id)?;
    }

    set_page_count(&mut doc, pages_id, pages.len())?;

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| RenderError::Write(e.to_string()))?;
    Ok(bytes)
}

fn push_page(doc: &mut Document, pages_id: ObjectId, page_id: ObjectId) -> Result<(), RenderError> {
    let pages_dict = doc
        .get_object_mut(pages_id)
        .and_then(Object::as_dict_mut)
        .map_err(|e| RenderError::PageTree(e.to_string()))?;
    let kids = pages_dict
        .get_mut(b"Kids")
        .and_then(Object::as_array_mut)
        .map_err(|e| RenderError::PageTree(e.to_string()))?;
    kids.push(Object::Reference(page_id));
    Ok(())
}

fn set_page_count(doc: &mut Document, pages_id: ObjectId, count: usize) -> Result<(), RenderError> {
    let pages_dict = doc
        .get_object_mut(pages_id)
        .and_then(Object::as_dict_mut)
        .map_err(|e| RenderError::PageTree(e.to_string()))?;
    pages_dict.set("Count", count as i64);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::ImageAsset;
    use chrono::NaiveDate;
    use image::{Rgb, RgbImage};
    use prestito_core::contract::{CompletedLoan, build_contract_record};
    use rust_decimal::Decimal;

    fn sample_record() -> ContractRecord {
        let loan = CompletedLoan {
            customer_name: "Mario Rossi".to_string(),
            principal: Decimal::new(500_000, 2),
            term_months: 36,
            nominal_rate: Decimal::new(786, 2),
            apr: Decimal::new(830, 2),
            monthly_payment: Decimal::new(15_636, 2),
        };
        build_contract_record(&loan, NaiveDate::from_ymd_opt(2025, 3, 14).unwrap())
    }

    fn full_assets() -> ContractAssets {
        let mut logo = RgbImage::new(120, 40);
        for pixel in logo.pixels_mut() {
            *pixel = Rgb([20, 60, 130]);
        }
        ContractAssets {
            logo: Some(ImageAsset::from_rgb(logo)),
            signature: Some(ImageAsset::from_rgb(RgbImage::new(90, 30))),
            stamp: Some(ImageAsset::from_rgb(RgbImage::new(32, 32))),
        }
    }

    #[test]
    fn test_encode_win_ansi() {
        assert_eq!(encode_win_ansi("abc"), b"abc".to_vec());
        assert_eq!(encode_win_ansi("\u{20ac}"), vec![0x80]);
        assert_eq!(encode_win_ansi("\u{e8}"), vec![0xE8]); // è
        assert_eq!(encode_win_ansi("\u{ab}x\u{bb}"), vec![0xAB, b'x', 0xBB]);
        assert_eq!(encode_win_ansi("\u{4e16}"), vec![b'?']); // outside WinAnsi
    }

    #[test]
    fn test_render_without_assets() {
        let renderer = PdfRenderer::new(ContractAssets::none());
        let bytes = renderer.render_record(&sample_record()).unwrap();

        assert!(bytes.starts_with(b"%PDF-"));
        let doc = Document::load_mem(&bytes).unwrap();
        assert!(!doc.get_pages().is_empty());
    }

    #[test]
    fn test_render_with_all_assets() {
        let renderer = PdfRenderer::new(full_assets());
        let bytes = renderer.render_record(&sample_record()).unwrap();

        assert!(bytes.starts_with(b"%PDF-"));
        let doc = Document::load_mem(&bytes).unwrap();
        assert!(!doc.get_pages().is_empty());
    }

    #[test]
    fn test_missing_assets_degrade_gracefully() {
        // Same record renders in both configurations; page structure
        // matches, only the embedded images differ.
        let record = sample_record();
        let bare = PdfRenderer::new(ContractAssets::none())
            .render_record(&record)
            .unwrap();
        let full = PdfRenderer::new(full_assets())
            .render_record(&record)
            .unwrap();

        let bare_doc = Document::load_mem(&bare).unwrap();
        let full_doc = Document::load_mem(&full).unwrap();
        assert_eq!(bare_doc.get_pages().len(), full_doc.get_pages().len());
        assert!(full.len() > bare.len());
    }

    #[test]
    fn test_render_is_byte_identical() {
        let record = sample_record();

        let renderer = PdfRenderer::new(ContractAssets::none());
        assert_eq!(
            renderer.render_record(&record).unwrap(),
            renderer.render_record(&record).unwrap()
        );

        let renderer = PdfRenderer::new(full_assets());
        assert_eq!(
            renderer.render_record(&record).unwrap(),
            renderer.render_record(&record).unwrap()
        );
    }

    #[test]
    fn test_different_records_render_differently() {
        let renderer = PdfRenderer::new(ContractAssets::none());
        let a = renderer.render_record(&sample_record()).unwrap();

        let mut other = sample_record();
        other.customer_name = "Luigi Verdi".to_string();
        let b = renderer.render_record(&other).unwrap();

        assert_ne!(a, b);
    }
}
