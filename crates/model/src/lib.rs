//! An abstraction layer for the completion models behind the advisor.
//!
//! This crate establishes a unified protocol for the advisor to talk to
//! the supported LLM vendors, so that the conversation logic can switch
//! between them without modifying the core codebase.
//!
//! Types in this crate don't define any behavior, instead they are the
//! constraints that the implementors should adhere to. Retrying, prompt
//! building and response interpretation live in the core crate.

#![deny(missing_docs)]

mod error;
mod provider;
mod request;
mod response;

pub use error::*;
pub use provider::*;
pub use request::*;
pub use response::*;
