//! Business logic for Prestito: input parsing, payment computation,
//! contract assembly, and the conversation state machine.
//!
//! This crate is transport-agnostic and renderer-agnostic. The engine talks
//! to the PDF backend through the [`engine::ContractRenderer`] trait and
//! returns outbound messages as values, so the whole conversation flow is
//! unit-testable without a live transport.

pub mod contract;
pub mod conversation;
pub mod engine;
pub mod finance;
pub mod input;
