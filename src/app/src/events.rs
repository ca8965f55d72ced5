use serde::{Deserialize, Serialize};

use crate::types::*;

/// Configuration screen events
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ConfigEvent {
    SetApiHost(String),
    SetDbKind(DbKind),
    SetDbPath(String),
    SetHost(String),
    SetUser(String),
    SetPassword(String),
    SetPort(String),
    SetDatabase(String),
    Submit,

    // HTTP responses (internal events, skipped from serialization)
    #[serde(skip)]
    SubmitResponse {
        screen: ScreenId,
        api_host: String,
        result: Result<(), SubmitError>,
    },
}

/// Login screen events
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum AuthEvent {
    SetUsername(String),
    SetPassword(String),
    Submit,

    #[serde(skip)]
    LoginResponse {
        screen: ScreenId,
        api_host: String,
        result: Result<TokenResponse, SubmitError>,
    },
}

/// UI actions independent of a particular form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum UiEvent {
    DismissAlert,
    DismissNotice,
    /// Leave the current screen for the previous step
    Back,
}

/// Events that can happen in the app
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Event {
    Config(ConfigEvent),
    Auth(AuthEvent),
    Ui(UiEvent),
}
