//! Client for the hosted text-generation model used for AI predictions,
//! forecast insights, and chat.

pub mod client;
pub mod prompts;
pub mod types;

pub use client::{AiClient, AiError};
pub use types::{AiInsight, ChatMessage, Sender};
