//! Domain-based type organization
//!
//! Types are organized by domain to match the structure in `update/`:
//! - auth: Login form, credentials and session handoff
//! - config: Connection configuration form and payload
//! - screen: Mounted screen and its form state
//! - common: Shared types (errors, API address, submission guard)

pub mod auth;
pub mod common;
pub mod config;
pub mod screen;

pub use auth::*;
pub use common::*;
pub use config::*;
pub use screen::*;
