//! Document block model.
//!
//! A document is an ordered list of blocks appended in reading order; the
//! layout stage decides where pages break. Blocks know nothing about
//! coordinates or the PDF format.

/// One flow element of the document.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Centered document title.
    Title(String),
    /// Bold section heading.
    Heading(String),
    /// Body text, wrapped to the content width.
    Paragraph(String),
    /// Vertical gap in points.
    Spacer(f32),
    /// A signature line with optional image decorations.
    Signature(SignatureBlock),
}

/// A labeled signature line.
///
/// The flags request the corresponding image asset; whether it is actually
/// drawn depends on the asset being present at render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureBlock {
    pub label: String,
    /// Draw the handwritten signature image on the line.
    pub with_signature: bool,
    /// Draw the stamp near the right edge of the line.
    pub with_stamp: bool,
}

impl SignatureBlock {
    /// A bare line for a handwritten signature.
    pub fn plain(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            with_signature: false,
            with_stamp: false,
        }
    }

    /// A line pre-signed with the lender's signature image and stamp.
    pub fn countersigned(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            with_signature: true,
            with_stamp: true,
        }
    }
}
