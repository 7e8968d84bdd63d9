// core logic - risk flagging, providers, and the relay that ties them together

pub mod ai;
mod helplines;
mod persona;
mod relay;
mod risk;
mod types;

pub use helplines::{HELPLINES, Helpline};
pub use persona::{DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_TEMPERATURE, PersonaConfig};
pub use relay::{ChatRelay, FALLBACK_REPLY, Outcome, Relayed};
pub use risk::RiskClassifier;
pub use types::{ChatRequest, ChatResponse, ProviderRequest, Speaker, Turn};
