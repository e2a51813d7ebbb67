//! AI business advisor.
//!
//! Two halves: a prompt builder that embeds the current business and
//! calendar figures into a system prompt, and a relay that forwards a
//! conversation to a hosted model and streams the reply back. The relay is
//! pass-through: deltas are delivered in arrival order, with explicit
//! start/end/error signals and no retry.

pub mod prompt;
pub mod relay;

pub use prompt::{build_system_prompt, PredefinedPrompt, PREDEFINED_PROMPTS};
pub use relay::{collect_reply, AdvisorRelay, ChatMessage, ChatRole, RelayEvent};
