//! Primitive draw commands and the signature-block geometry.
//!
//! `DrawCmd` is the whole vocabulary the PDF backend understands: text at
//! a position, a stroked line, an image in a rectangle. Coordinates are
//! PDF points with the origin at the bottom-left of the page.

/// Which registered image asset an [`DrawCmd::Image`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageSlot {
    Logo,
    Signature,
    Stamp,
}

/// One primitive drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Text {
        x: f32,
        y: f32,
        size: f32,
        bold: bool,
        text: String,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        width: f32,
    },
    Image {
        slot: ImageSlot,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

/// An image already resolved to target dimensions (points), aspect ratio
/// applied by the caller from the source asset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedImage {
    pub slot: ImageSlot,
    pub width: f32,
    pub height: f32,
}

/// Gap between the label text and the start of the signature line.
const LABEL_GAP: f32 = 6.0;

/// Clearance between the stamp and the right end of the line.
const STAMP_RIGHT_PAD: f32 = 2.0;

/// Build the draw commands for one signature block.
///
/// Layout: a bold label at `(x, baseline_y)`, then a horizontal rule from
/// just after the label to `x + available_width`. The optional signature
/// image is centered on the rule, both horizontally and vertically; the
/// optional stamp sits near the rule's right edge, raised or lowered by
/// `stamp_y_offset`. Absent images simply produce no commands.
pub fn signature_commands(
    label: &str,
    x: f32,
    baseline_y: f32,
    available_width: f32,
    label_width: f32,
    size: f32,
    signature: Option<PlacedImage>,
    stamp: Option<PlacedImage>,
    stamp_y_offset: f32,
) -> Vec<DrawCmd> {
    let mut commands = vec![DrawCmd::Text {
        x,
        y: baseline_y,
        size,
        bold: true,
        text: label.to_string(),
    }];

    let line_start = x + label_width + LABEL_GAP;
    let line_end = x + available_width;
    if line_end <= line_start {
        // Label ate the whole width; nothing to rule or decorate.
        return commands;
    }

    commands.push(DrawCmd::Line {
        x1: line_start,
        y1: baseline_y,
        x2: line_end,
        y2: baseline_y,
        width: 0.75,
    });

    if let Some(img) = signature {
        let line_len = line_end - line_start;
        commands.push(DrawCmd::Image {
            slot: img.slot,
            x: line_start + (line_len - img.width) / 2.0,
            y: baseline_y - img.height / 2.0,
            width: img.width,
            height: img.height,
        });
    }

    if let Some(img) = stamp {
        commands.push(DrawCmd::Image {
            slot: img.slot,
            x: line_end - img.width - STAMP_RIGHT_PAD,
            y: baseline_y - img.height / 2.0 + stamp_y_offset,
            width: img.width,
            height: img.height,
        });
    }

    commands
}
