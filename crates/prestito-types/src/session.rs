//! Loan session and conversation state types.
//!
//! A `LoanSession` accumulates user inputs over the course of one guided
//! conversation. Fields are optional until collected; the session is
//! converted into an immutable [`crate::contract::ContractRecord`] only at
//! generation time, and cleared on reset, cancellation, or completion.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Which input the conversation is currently waiting for.
///
/// Exactly one state is active per session at any time. Every state has a
/// successor on valid input, a self-loop on invalid input (re-prompt), and
/// a transition back to `Idle` on cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationState {
    Idle,
    AwaitingName,
    AwaitingAmount,
    AwaitingDuration,
    AwaitingNominalRate,
    AwaitingApr,
}

impl ConversationState {
    /// Whether the session is at rest (no conversation in progress).
    pub fn is_idle(&self) -> bool {
        matches!(self, ConversationState::Idle)
    }
}

impl fmt::Display for ConversationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConversationState::Idle => "idle",
            ConversationState::AwaitingName => "awaiting_name",
            ConversationState::AwaitingAmount => "awaiting_amount",
            ConversationState::AwaitingDuration => "awaiting_duration",
            ConversationState::AwaitingNominalRate => "awaiting_nominal_rate",
            ConversationState::AwaitingApr => "awaiting_apr",
        };
        write!(f, "{s}")
    }
}

impl FromStr for ConversationState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "idle" => Ok(ConversationState::Idle),
            "awaiting_name" => Ok(ConversationState::AwaitingName),
            "awaiting_amount" => Ok(ConversationState::AwaitingAmount),
            "awaiting_duration" => Ok(ConversationState::AwaitingDuration),
            "awaiting_nominal_rate" => Ok(ConversationState::AwaitingNominalRate),
            "awaiting_apr" => Ok(ConversationState::AwaitingApr),
            other => Err(format!("invalid conversation state: '{other}'")),
        }
    }
}

impl Default for ConversationState {
    fn default() -> Self {
        ConversationState::Idle
    }
}

/// In-memory record of one user's in-progress conversation.
///
/// Held only for the conversation's lifetime; never persisted. Derived
/// fields (`monthly_payment`) are populated only once all their inputs
/// are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanSession {
    /// Customer full name, trimmed, non-empty once collected.
    pub customer_name: Option<String>,
    /// Loan principal in euros, two fractional digits.
    pub amount: Option<Decimal>,
    pub term_months: Option<u32>,
    /// Annual nominal rate (TAN) as a percentage.
    pub nominal_rate: Option<Decimal>,
    /// Annual percentage rate (TAEG); collected but not part of the
    /// payment formula.
    pub apr: Option<Decimal>,
    /// Derived monthly payment, set during generation.
    pub monthly_payment: Option<Decimal>,
}

impl LoanSession {
    /// Reset every collected field.
    pub fn clear(&mut self) {
        *self = LoanSession::default();
    }

    /// Whether the mandatory inputs (name, amount) have been collected.
    pub fn has_required_inputs(&self) -> bool {
        self.customer_name.is_some() && self.amount.is_some()
    }
}
