//! Shared domain types for Prestito.
//!
//! This crate contains the core domain types used across the Prestito
//! workspace: loan sessions, conversation states, contract records, money
//! helpers, configuration, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, rust_decimal, chrono,
//! thiserror.

pub mod config;
pub mod contract;
pub mod error;
pub mod money;
pub mod session;
