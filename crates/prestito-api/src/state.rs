//! Application state wiring the engine to its concrete renderer.
//!
//! The engine is generic over [`prestito_core::engine::ContractRenderer`];
//! AppState pins it to the lopdf-backed [`PdfRenderer`] and holds the
//! optional transport token.

use std::sync::Arc;

use prestito_core::engine::ConversationEngine;
use prestito_render::{ContractAssets, PdfRenderer};
use prestito_types::config::BotConfig;
use secrecy::SecretString;

use crate::config;

/// The engine generic pinned to the production renderer.
pub type ConcreteEngine = ConversationEngine<PdfRenderer>;

/// Shared application state for the HTTP handlers and the console chat.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ConcreteEngine>,
    /// Bearer token required on inbound transport requests; `None` leaves
    /// the endpoint open (local development).
    pub api_token: Option<Arc<SecretString>>,
}

impl AppState {
    /// Wire the engine: load whatever image assets exist and pin the
    /// PDF renderer.
    pub fn new(config: &BotConfig) -> Self {
        let assets = ContractAssets::load(&config.assets);
        let renderer = PdfRenderer::new(assets);
        let engine = ConversationEngine::new(config, renderer);

        Self {
            engine: Arc::new(engine),
            api_token: config::api_token_from_env().map(Arc::new),
        }
    }
}
