//! Conversation state machine.
//!
//! `transition` is a pure function from (state, session, event) to the next
//! state plus a list of effects. Effects are values -- messages to send,
//! or the instruction to generate the contract -- executed by the engine,
//! never invoked inline. This keeps every transition synchronously
//! unit-testable without a live transport.
//!
//! Transitions are total: every state has a successor on valid input, a
//! self-loop (re-prompt) on invalid input, and a reset on `/start` or
//! `/cancel`.

use prestito_types::config::{FlowVariant, RateDefaults};
use prestito_types::session::{ConversationState, LoanSession};

use crate::input;

/// User-facing prompt and acknowledgment texts.
pub mod prompts {
    use prestito_types::money::format_percent;
    use rust_decimal::Decimal;

    pub const WELCOME: &str = "Benvenuto! Inserisci nome e cognome del cliente:";
    pub const EMPTY_NAME: &str = "Il nome non pu\u{f2} essere vuoto, riprova:";
    pub const ASK_AMOUNT: &str = "Inserisci importo (\u{20ac}):";
    pub const INVALID_AMOUNT: &str = "Importo non valido, riprova:";
    pub const ASK_DURATION: &str = "Inserisci durata (mesi):";
    pub const INVALID_DURATION: &str =
        "Durata non valida, inserisci un numero intero di mesi:";
    pub const CANCELLED: &str = "Operazione annullata.";
    pub const IDLE_HINT: &str = "Usa /start per creare un nuovo contratto.";
    pub const GENERATION_FAILED: &str =
        "Non \u{e8} stato possibile generare il documento. Riprova pi\u{f9} tardi.";

    /// TAN prompt, showing the default applied on empty input.
    pub fn ask_nominal_rate(default: Decimal) -> String {
        format!("Inserisci TAN (invio per usare {}):", format_percent(default))
    }

    /// TAEG prompt, showing the default applied on empty input.
    pub fn ask_apr(default: Decimal) -> String {
        format!("Inserisci TAEG (invio per usare {}):", format_percent(default))
    }
}

/// An inbound conversation event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// `/start` control command.
    Start,
    /// `/cancel` control command.
    Cancel,
    /// Any other text message.
    Text(String),
}

/// A side effect requested by a transition.
///
/// At most one outbound message and one session mutation happen per
/// transition; generation additionally runs the calculator, builder, and
/// renderer synchronously in the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send a text message (prompt, error, or acknowledgment).
    Reply(String),
    /// All inputs are collected: generate and deliver the contract.
    GenerateContract,
}

/// Classify raw transport text into a conversation event.
pub fn parse_event(text: &str) -> Event {
    match text.trim() {
        "/start" => Event::Start,
        "/cancel" => Event::Cancel,
        other => Event::Text(other.to_string()),
    }
}

/// Advance the conversation by one event.
///
/// Mutates at most one session field; returns the successor state and the
/// effects to execute. `/start` and `/cancel` are handled uniformly from
/// every state.
pub fn transition(
    state: ConversationState,
    session: &mut LoanSession,
    event: Event,
    flow: FlowVariant,
    defaults: &RateDefaults,
) -> (ConversationState, Vec<Effect>) {
    match event {
        Event::Start => {
            session.clear();
            (
                ConversationState::AwaitingName,
                vec![Effect::Reply(prompts::WELCOME.to_string())],
            )
        }
        Event::Cancel => {
            session.clear();
            (
                ConversationState::Idle,
                vec![Effect::Reply(prompts::CANCELLED.to_string())],
            )
        }
        Event::Text(text) => handle_text(state, session, &text, flow, defaults),
    }
}

fn handle_text(
    state: ConversationState,
    session: &mut LoanSession,
    text: &str,
    flow: FlowVariant,
    defaults: &RateDefaults,
) -> (ConversationState, Vec<Effect>) {
    match state {
        ConversationState::Idle => (
            ConversationState::Idle,
            vec![Effect::Reply(prompts::IDLE_HINT.to_string())],
        ),

        ConversationState::AwaitingName => {
            let name = text.trim();
            if name.is_empty() {
                return (state, vec![Effect::Reply(prompts::EMPTY_NAME.to_string())]);
            }
            session.customer_name = Some(name.to_string());
            (
                ConversationState::AwaitingAmount,
                vec![Effect::Reply(prompts::ASK_AMOUNT.to_string())],
            )
        }

        ConversationState::AwaitingAmount => match input::parse_currency(text) {
            Ok(amount) => {
                session.amount = Some(amount);
                match flow {
                    FlowVariant::Short => {
                        (ConversationState::Idle, vec![Effect::GenerateContract])
                    }
                    FlowVariant::Extended => (
                        ConversationState::AwaitingDuration,
                        vec![Effect::Reply(prompts::ASK_DURATION.to_string())],
                    ),
                }
            }
            Err(_) => (
                state,
                vec![Effect::Reply(prompts::INVALID_AMOUNT.to_string())],
            ),
        },

        ConversationState::AwaitingDuration => match input::parse_term(text) {
            Ok(months) => {
                session.term_months = Some(months);
                (
                    ConversationState::AwaitingNominalRate,
                    vec![Effect::Reply(prompts::ask_nominal_rate(
                        defaults.nominal_rate,
                    ))],
                )
            }
            Err(_) => (
                state,
                vec![Effect::Reply(prompts::INVALID_DURATION.to_string())],
            ),
        },

        ConversationState::AwaitingNominalRate => {
            // Lenient by design: malformed input falls back to the default.
            session.nominal_rate = Some(input::parse_rate_or_default(
                text,
                defaults.nominal_rate,
            ));
            (
                ConversationState::AwaitingApr,
                vec![Effect::Reply(prompts::ask_apr(defaults.apr))],
            )
        }

        ConversationState::AwaitingApr => {
            session.apr = Some(input::parse_rate_or_default(text, defaults.apr));
            (ConversationState::Idle, vec![Effect::GenerateContract])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn defaults() -> RateDefaults {
        RateDefaults::default()
    }

    fn text(s: &str) -> Event {
        Event::Text(s.to_string())
    }

    #[test]
    fn test_parse_event_control_commands() {
        assert_eq!(parse_event("/start"), Event::Start);
        assert_eq!(parse_event("  /cancel "), Event::Cancel);
        assert_eq!(parse_event("ciao"), Event::Text("ciao".to_string()));
        // A command with trailing words is just text.
        assert_eq!(
            parse_event("/start adesso"),
            Event::Text("/start adesso".to_string())
        );
    }

    #[test]
    fn test_start_clears_and_prompts_for_name() {
        let mut session = LoanSession {
            customer_name: Some("Vecchio Cliente".to_string()),
            ..LoanSession::default()
        };
        let (state, effects) = transition(
            ConversationState::AwaitingAmount,
            &mut session,
            Event::Start,
            FlowVariant::Short,
            &defaults(),
        );
        assert_eq!(state, ConversationState::AwaitingName);
        assert_eq!(
            effects,
            vec![Effect::Reply(prompts::WELCOME.to_string())]
        );
        assert_eq!(session, LoanSession::default());
    }

    #[test]
    fn test_name_then_amount_short_flow_generates() {
        let mut session = LoanSession::default();

        let (state, _) = transition(
            ConversationState::Idle,
            &mut session,
            Event::Start,
            FlowVariant::Short,
            &defaults(),
        );
        let (state, effects) = transition(
            state,
            &mut session,
            text("Mario Rossi"),
            FlowVariant::Short,
            &defaults(),
        );
        assert_eq!(state, ConversationState::AwaitingAmount);
        assert_eq!(
            effects,
            vec![Effect::Reply(prompts::ASK_AMOUNT.to_string())]
        );
        assert_eq!(session.customer_name.as_deref(), Some("Mario Rossi"));

        let (state, effects) = transition(
            state,
            &mut session,
            text("5000"),
            FlowVariant::Short,
            &defaults(),
        );
        assert_eq!(state, ConversationState::Idle);
        assert_eq!(effects, vec![Effect::GenerateContract]);
        assert_eq!(session.amount, Some(dec("5000.00")));
    }

    #[test]
    fn test_invalid_amount_reprompts_without_advancing() {
        let mut session = LoanSession {
            customer_name: Some("Mario Rossi".to_string()),
            ..LoanSession::default()
        };
        let (state, effects) = transition(
            ConversationState::AwaitingAmount,
            &mut session,
            text("abc"),
            FlowVariant::Short,
            &defaults(),
        );
        assert_eq!(state, ConversationState::AwaitingAmount);
        assert_eq!(
            effects,
            vec![Effect::Reply(prompts::INVALID_AMOUNT.to_string())]
        );
        assert_eq!(session.amount, None);
    }

    #[test]
    fn test_empty_name_reprompts() {
        let mut session = LoanSession::default();
        let (state, effects) = transition(
            ConversationState::AwaitingName,
            &mut session,
            text("   "),
            FlowVariant::Short,
            &defaults(),
        );
        assert_eq!(state, ConversationState::AwaitingName);
        assert_eq!(
            effects,
            vec![Effect::Reply(prompts::EMPTY_NAME.to_string())]
        );
        assert!(session.customer_name.is_none());
    }

    #[test]
    fn test_cancel_resets_from_any_state() {
        for state in [
            ConversationState::AwaitingName,
            ConversationState::AwaitingAmount,
            ConversationState::AwaitingDuration,
            ConversationState::AwaitingNominalRate,
            ConversationState::AwaitingApr,
        ] {
            let mut session = LoanSession {
                customer_name: Some("Mario Rossi".to_string()),
                amount: Some(dec("100.00")),
                ..LoanSession::default()
            };
            let (next, effects) = transition(
                state,
                &mut session,
                Event::Cancel,
                FlowVariant::Extended,
                &defaults(),
            );
            assert_eq!(next, ConversationState::Idle, "from {state}");
            assert_eq!(
                effects,
                vec![Effect::Reply(prompts::CANCELLED.to_string())]
            );
            assert_eq!(session, LoanSession::default());
        }
    }

    #[test]
    fn test_extended_flow_walks_all_states() {
        let mut session = LoanSession::default();
        let d = defaults();
        let flow = FlowVariant::Extended;

        let (state, _) =
            transition(ConversationState::Idle, &mut session, Event::Start, flow, &d);
        let (state, _) = transition(state, &mut session, text("Anna Bianchi"), flow, &d);
        let (state, effects) = transition(state, &mut session, text("12000"), flow, &d);
        assert_eq!(state, ConversationState::AwaitingDuration);
        assert_eq!(
            effects,
            vec![Effect::Reply(prompts::ASK_DURATION.to_string())]
        );

        let (state, _) = transition(state, &mut session, text("48"), flow, &d);
        assert_eq!(state, ConversationState::AwaitingNominalRate);
        assert_eq!(session.term_months, Some(48));

        let (state, _) = transition(state, &mut session, text("6,5"), flow, &d);
        assert_eq!(state, ConversationState::AwaitingApr);
        assert_eq!(session.nominal_rate, Some(dec("6.5")));

        let (state, effects) = transition(state, &mut session, text(""), flow, &d);
        assert_eq!(state, ConversationState::Idle);
        assert_eq!(effects, vec![Effect::GenerateContract]);
        // Empty TAEG fell back to the default
        assert_eq!(session.apr, Some(dec("8.30")));
        assert_eq!(session.amount, Some(dec("12000.00")));
    }

    #[test]
    fn test_invalid_duration_reprompts() {
        let mut session = LoanSession::default();
        let (state, effects) = transition(
            ConversationState::AwaitingDuration,
            &mut session,
            text("tre anni"),
            FlowVariant::Extended,
            &defaults(),
        );
        assert_eq!(state, ConversationState::AwaitingDuration);
        assert_eq!(
            effects,
            vec![Effect::Reply(prompts::INVALID_DURATION.to_string())]
        );
    }

    #[test]
    fn test_malformed_rate_substitutes_default() {
        let mut session = LoanSession::default();
        let (state, _) = transition(
            ConversationState::AwaitingNominalRate,
            &mut session,
            text("boh"),
            FlowVariant::Extended,
            &defaults(),
        );
        assert_eq!(state, ConversationState::AwaitingApr);
        assert_eq!(session.nominal_rate, Some(dec("7.86")));
    }

    #[test]
    fn test_idle_text_gets_hint() {
        let mut session = LoanSession::default();
        let (state, effects) = transition(
            ConversationState::Idle,
            &mut session,
            text("ciao"),
            FlowVariant::Short,
            &defaults(),
        );
        assert_eq!(state, ConversationState::Idle);
        assert_eq!(
            effects,
            vec![Effect::Reply(prompts::IDLE_HINT.to_string())]
        );
    }

    #[test]
    fn test_rate_prompts_show_defaults() {
        assert_eq!(
            prompts::ask_nominal_rate(dec("7.86")),
            "Inserisci TAN (invio per usare 7,86%):"
        );
        assert_eq!(
            prompts::ask_apr(dec("8.30")),
            "Inserisci TAEG (invio per usare 8,30%):"
        );
    }
}
