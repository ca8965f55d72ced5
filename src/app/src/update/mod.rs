mod auth;
mod config;
mod ui;

use crux_core::Command;

use crate::events::Event;
use crate::model::Model;
use crate::Effect;

/// Alert titles and generic messages shown by the submitters
pub const CONFIG_FAILED_TITLE: &str = "Configuration failed";
pub const CONNECTION_FAILED: &str = "Connection failed";
pub const LOGIN_FAILED_TITLE: &str = "Login failed";
pub const NETWORK_ERROR: &str = "Network error";
pub const VALIDATION_TITLE: &str = "Error";

/// Main update dispatcher - routes events to domain-specific handlers
pub fn update(event: Event, model: &mut Model) -> Command<Effect, Event> {
    match event {
        Event::Config(event) => config::handle(event, model),
        Event::Auth(event) => auth::handle(event, model),
        Event::Ui(event) => ui::handle(event, model),
    }
}
