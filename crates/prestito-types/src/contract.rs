//! Render-ready contract record.
//!
//! A `ContractRecord` is the finalized, immutable view built from a
//! completed session plus fixed boilerplate. It is created once per
//! successful completion, consumed immediately by the renderer, and never
//! persisted.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A numbered contract section with a heading and body text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    pub title: String,
    pub body: String,
}

/// Finalized data for one contract document.
///
/// Every field is fully populated; validation happened upstream while the
/// session was being collected. The record plus the static image assets
/// fully determine the rendered bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractRecord {
    pub customer_name: String,
    /// Fixed counterparty identity.
    pub lender_name: String,
    pub lender_registration: String,
    pub principal: Decimal,
    pub term_months: u32,
    /// Annual nominal rate (TAN), percent.
    pub nominal_rate: Decimal,
    /// Annual percentage rate (TAEG), percent.
    pub apr: Decimal,
    pub monthly_payment: Decimal,
    pub contract_date: NaiveDate,
    /// Preformatted place-and-date line, e.g. `Milano, 14 marzo 2025`.
    pub place_and_date: String,
    /// Output filename, derived from the customer name.
    pub filename: String,
    /// Document title line.
    pub title: String,
    /// Seven numbered sections of boilerplate and interpolated text.
    pub clauses: Vec<Clause>,
}
