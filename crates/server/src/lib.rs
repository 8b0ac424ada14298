//! HTTP boundary of the color advisor: routes, bearer-token auth, season
//! persistence and configuration.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

pub mod auth;
pub mod config;
pub mod error;
pub mod response;
pub mod routes;
pub mod state;
pub mod store;

pub use config::{Config, ProviderKind};
pub use state::AppState;
