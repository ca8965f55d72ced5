use serde::{Deserialize, Serialize};

use super::auth::{LoginForm, Session};
use super::config::ConfigForm;

/// Currently mounted screen together with its local form state.
///
/// Form state lives inside the variant, so leaving a screen drops it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Screen {
    Config(ConfigForm),
    Login(LoginForm),
    /// Placeholder for the one-time password step; only receives the handoff
    Totp(Session),
}

impl Default for Screen {
    fn default() -> Self {
        Screen::Config(ConfigForm::default())
    }
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Config(_) => "config",
            Screen::Login(_) => "login",
            Screen::Totp(_) => "totp",
        }
    }
}
