use log::info;
use serde::{Deserialize, Serialize};

use crux_core::{render::render, Command};

use crate::events::Event;
use crate::types::*;
use crate::Effect;

/// Application Model - the complete state
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Model {
    /// Mounted screen and its form state
    pub screen: Screen,
    /// Instance of the mounted screen, changes on every navigation
    pub screen_id: ScreenId,
    pub guard: SubmissionGuard,

    // UI state
    pub alert: Option<Alert>,
    pub notice: Option<Alert>,
}

impl Model {
    /// Unmount the current screen and mount `screen` as a new instance.
    ///
    /// The guard of the new instance starts out idle.
    pub fn navigate(&mut self, screen: Screen) {
        info!("navigating from {} to {}", self.screen.name(), screen.name());
        self.screen = screen;
        self.screen_id = self.screen_id.next();
        self.guard = SubmissionGuard::default();
    }

    /// Whether an event stamped with `screen` belongs to the mounted instance
    pub fn is_current(&self, screen: ScreenId) -> bool {
        self.screen_id == screen
    }

    pub fn config_form_mut(&mut self) -> Option<&mut ConfigForm> {
        match &mut self.screen {
            Screen::Config(form) => Some(form),
            _ => None,
        }
    }

    pub fn login_form_mut(&mut self) -> Option<&mut LoginForm> {
        match &mut self.screen {
            Screen::Login(form) => Some(form),
            _ => None,
        }
    }

    /// Session handed to the step after login, if it was reached
    pub fn session(&self) -> Option<&Session> {
        match &self.screen {
            Screen::Totp(session) => Some(session),
            _ => None,
        }
    }

    /// Start a request (guard enters `Submitting`, clears alert and notice)
    pub fn start_loading(&mut self) {
        self.guard.begin();
        self.alert = None;
        self.notice = None;
    }

    /// Request settled successfully
    pub fn stop_loading(&mut self) {
        self.guard.settle();
        self.alert = None;
    }

    /// Show an alert and settle the guard
    pub fn set_error(&mut self, alert: Alert) {
        self.guard.settle();
        self.alert = Some(alert);
    }

    /// Set an error alert, settle the guard, and return a render command
    pub fn set_error_and_render(&mut self, alert: Alert) -> Command<Effect, Event> {
        self.set_error(alert);
        render()
    }

    pub fn clear_error(&mut self) {
        self.alert = None;
    }
}
