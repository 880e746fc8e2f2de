//! The guided conversation: state machine and session registry.

pub mod machine;
pub mod registry;

pub use machine::{Effect, Event, parse_event, transition};
pub use registry::{SessionEntry, SessionRegistry};
