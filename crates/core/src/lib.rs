//! Core logic of the color advisor: prompt building, the retrying model
//! client, the chat orchestrator and the analysis extractor.

#![deny(missing_docs)]
#![deny(clippy::missing_safety_doc)]

#[macro_use]
extern crate tracing;

mod advisor;
pub mod analysis;
pub mod conversation;
mod error;
mod model_client;
mod prompt;
mod retry;

pub use advisor::{Advisor, AdvisorBuilder, ChatReply};
pub use analysis::{ANALYSIS_SENTINEL, AnalysisResult, Season};
pub use conversation::{ConversationTurn, Role};
pub use error::{AnalysisError, ChatError, ErrorCode};
pub use prompt::{DEFAULT_PERSONA, build_prompt};
pub use retry::RetryPolicy;
