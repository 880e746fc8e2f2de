//! PDF rendering for Prestito contracts.
//!
//! The pipeline is split into library-independent stages: a
//! [`blocks::Block`] list describes the document in order, [`layout`]
//! turns blocks into per-page lists of primitive [`draw::DrawCmd`]s, and
//! [`pdf`] executes those commands against lopdf. Only the last stage
//! knows anything about the PDF format.
//!
//! Image assets are optional at every level: a contract renders with the
//! full brand kit, a partial one, or none at all.

pub mod assets;
pub mod blocks;
pub mod compose;
pub mod draw;
pub mod layout;
pub mod pdf;

pub use assets::ContractAssets;
pub use pdf::{PdfRenderer, RenderOptions};
