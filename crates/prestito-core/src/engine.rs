//! Conversation engine: wires the state machine, calculator, builder, and
//! renderer together behind one `handle_message` entry point.
//!
//! The engine owns the session registry and executes the effects returned
//! by [`crate::conversation::transition`]. Rendering happens behind the
//! [`ContractRenderer`] trait so the engine can be tested without a PDF
//! backend, and so the backend lives in its own crate.
//!
//! Error policy: input validation never escapes the state machine (it
//! re-prompts); generation failures are logged with their cause and turned
//! into a single generic user-facing message, after which the session
//! returns to idle. A failure in one session never takes the process down.

use chrono::Utc;
use prestito_types::config::{BotConfig, FlowVariant, RateDefaults};
use prestito_types::contract::ContractRecord;
use prestito_types::error::{FinanceError, RenderError};
use prestito_types::session::{ConversationState, LoanSession};
use thiserror::Error;

use crate::contract::{self, CompletedLoan};
use crate::conversation::machine::{self, Effect, prompts};
use crate::conversation::registry::SessionRegistry;
use crate::finance;

/// Renderer seam: turns a finalized record into document bytes.
pub trait ContractRenderer: Send + Sync {
    fn render(&self, record: &ContractRecord) -> Result<Vec<u8>, RenderError>;
}

/// An outbound message for the transport to deliver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    /// Plain text: prompt, error, or acknowledgment.
    Text(String),
    /// A file attachment.
    Document { filename: String, bytes: Vec<u8> },
}

/// Why a generation attempt failed. Internal: the user always sees the
/// same generic message, this only feeds the log.
#[derive(Debug, Error)]
enum GenerateError {
    #[error("session is missing required inputs")]
    IncompleteSession,

    #[error(transparent)]
    Finance(#[from] FinanceError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Drives all conversations for one bot instance.
pub struct ConversationEngine<R> {
    registry: SessionRegistry,
    flow: FlowVariant,
    defaults: RateDefaults,
    renderer: R,
}

impl<R: ContractRenderer> ConversationEngine<R> {
    pub fn new(config: &BotConfig, renderer: R) -> Self {
        Self {
            registry: SessionRegistry::new(),
            flow: config.flow,
            defaults: config.defaults.clone(),
            renderer,
        }
    }

    /// Handle one inbound text event for a chat.
    ///
    /// Fully processes the event (parse, validate, advance, generate) and
    /// returns the outbound messages, in order. Events for the same chat
    /// are serialized by the registry's per-entry lock.
    pub fn handle_message(&self, chat_id: &str, text: &str) -> Vec<Outbound> {
        let event = machine::parse_event(text);

        let outbound = self.registry.with_entry(chat_id, |entry| {
            let (next, effects) =
                machine::transition(entry.state, &mut entry.session, event, self.flow, &self.defaults);
            entry.state = next;

            let mut outbound = Vec::with_capacity(effects.len());
            for effect in effects {
                match effect {
                    Effect::Reply(text) => outbound.push(Outbound::Text(text)),
                    Effect::GenerateContract => {
                        outbound.push(self.generate(chat_id, &mut entry.session));
                    }
                }
            }
            outbound
        });

        // A conversation back at rest with nothing collected is over;
        // drop its registry entry.
        self.registry.prune_idle(chat_id);
        outbound
    }

    /// Current conversation state for a chat.
    pub fn state_of(&self, chat_id: &str) -> ConversationState {
        self.registry.state_of(chat_id)
    }

    /// Number of chats with live registry entries.
    pub fn active_sessions(&self) -> usize {
        self.registry.len()
    }

    /// Run the generation pipeline and clear the session either way.
    fn generate(&self, chat_id: &str, session: &mut LoanSession) -> Outbound {
        let result = self.try_generate(session);
        session.clear();

        match result {
            Ok(outbound) => {
                tracing::info!(chat_id, "contract generated");
                outbound
            }
            Err(err) => {
                tracing::error!(chat_id, error = %err, "contract generation failed");
                Outbound::Text(prompts::GENERATION_FAILED.to_string())
            }
        }
    }

    fn try_generate(&self, session: &mut LoanSession) -> Result<Outbound, GenerateError> {
        let customer_name = session
            .customer_name
            .clone()
            .ok_or(GenerateError::IncompleteSession)?;
        let principal = session.amount.ok_or(GenerateError::IncompleteSession)?;

        // The short flow never asked for these; fill from configuration.
        let term_months = session.term_months.unwrap_or(self.defaults.term_months);
        let nominal_rate = session.nominal_rate.unwrap_or(self.defaults.nominal_rate);
        let apr = session.apr.unwrap_or(self.defaults.apr);

        let monthly_payment = finance::monthly_payment(principal, term_months, nominal_rate)?;
        session.monthly_payment = Some(monthly_payment);

        let loan = CompletedLoan {
            customer_name,
            principal,
            term_months,
            nominal_rate,
            apr,
            monthly_payment,
        };
        let record = contract::build_contract_record(&loan, Utc::now().date_naive());
        let bytes = self.renderer.render(&record)?;

        Ok(Outbound::Document {
            filename: record.filename,
            bytes,
        })
    }
}
