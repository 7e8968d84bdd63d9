// solace library - supportive chat relay with risk flagging

mod chat;
pub mod cli;
pub mod config;
pub mod core;
mod error;
mod server;

pub use crate::core::{ChatRelay, ChatRequest, ChatResponse, RiskClassifier, Turn};
pub use error::Error;
pub use server::Server;
