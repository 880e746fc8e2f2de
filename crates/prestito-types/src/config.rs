//! Configuration types for Prestito.
//!
//! `BotConfig` represents the top-level `config.toml` that controls the
//! conversation flow variant, rate/term defaults, image asset paths, and
//! the transport bind address. All fields have sensible defaults so an
//! empty (or missing) file yields a working bot.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use std::path::PathBuf;

/// Which conversation flow the bot runs.
///
/// The short flow asks for name and amount only, filling term and rates
/// from [`RateDefaults`]. The extended flow additionally prompts for the
/// term, the TAN, and the TAEG.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowVariant {
    Short,
    Extended,
}

impl Default for FlowVariant {
    fn default() -> Self {
        FlowVariant::Short
    }
}

/// Defaults applied when the flow does not collect a value, or when the
/// lenient percentage parser falls back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateDefaults {
    /// Annual nominal rate (TAN), percent.
    #[serde(default = "default_nominal_rate")]
    pub nominal_rate: Decimal,

    /// Annual percentage rate (TAEG), percent.
    #[serde(default = "default_apr")]
    pub apr: Decimal,

    /// Loan term in months.
    #[serde(default = "default_term_months")]
    pub term_months: u32,
}

fn default_nominal_rate() -> Decimal {
    Decimal::new(786, 2) // 7.86
}

fn default_apr() -> Decimal {
    Decimal::new(830, 2) // 8.30
}

fn default_term_months() -> u32 {
    36
}

impl Default for RateDefaults {
    fn default() -> Self {
        Self {
            nominal_rate: default_nominal_rate(),
            apr: default_apr(),
            term_months: default_term_months(),
        }
    }
}

/// Paths to the optional image assets embedded in rendered documents.
///
/// All three are optional: a missing asset is skipped at render time, so a
/// contract can be generated without the full brand kit present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetPaths {
    /// Primary logo, drawn in the top band of every page.
    #[serde(default)]
    pub logo: Option<PathBuf>,

    /// Handwritten signature image placed on the lender signature line.
    #[serde(default)]
    pub signature: Option<PathBuf>,

    /// Secondary icon (e.g. a stamp) placed near the right edge of the
    /// lender signature line.
    #[serde(default)]
    pub stamp: Option<PathBuf>,
}

/// Top-level configuration, loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BotConfig {
    #[serde(default)]
    pub flow: FlowVariant,

    #[serde(default)]
    pub defaults: RateDefaults,

    #[serde(default)]
    pub assets: AssetPaths,

    #[serde(default)]
    pub transport: TransportConfig,
}

/// Transport adapter settings.
///
/// The API token itself is environment-provided and never serialized; only
/// the bind address lives in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}
