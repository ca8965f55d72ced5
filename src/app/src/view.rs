//! View model rendered by shells
//!
//! Secrets never leave the core through the view: passwords are masked and
//! the session token is omitted.

use serde::{Deserialize, Serialize};

use crate::model::Model;
use crate::types::*;

/// Entry of the database type picker
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DbTypeOption {
    pub label: String,
    pub value: DbKind,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ScreenView {
    Config {
        api_host: String,
        db_kind: DbKind,
        db_types: Vec<DbTypeOption>,
        /// Present for the local-file store only
        db_path: Option<String>,
        /// Present for networked stores only
        networked: Option<NetworkedFieldsView>,
    },
    Login {
        api_host: String,
        username: String,
        password: String,
    },
    Totp {
        api_host: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NetworkedFieldsView {
    pub host: String,
    pub user: String,
    pub password: String,
    pub port: String,
    /// Port used when the field is left blank
    pub port_placeholder: String,
    pub database: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ViewModel {
    pub screen: ScreenView,
    pub screen_id: ScreenId,
    pub submit_enabled: bool,
    pub busy: bool,
    pub alert: Option<Alert>,
    pub notice: Option<Alert>,
}

pub fn view(model: &Model) -> ViewModel {
    let screen = match &model.screen {
        Screen::Config(form) => config_view(form),
        Screen::Login(form) => ScreenView::Login {
            api_host: form.api_host.clone(),
            username: form.username.clone(),
            password: mask(&form.password),
        },
        Screen::Totp(session) => ScreenView::Totp {
            api_host: session.api_host.clone(),
        },
    };

    ViewModel {
        screen,
        screen_id: model.screen_id,
        submit_enabled: model.guard.can_submit() && !matches!(model.screen, Screen::Totp(_)),
        busy: model.guard.is_busy(),
        alert: model.alert.clone(),
        notice: model.notice.clone(),
    }
}

fn config_view(form: &ConfigForm) -> ScreenView {
    let networked = form.db_kind.is_networked().then(|| NetworkedFieldsView {
        host: form.host.clone(),
        user: form.user.clone(),
        password: mask(&form.password),
        port: form.port.clone(),
        port_placeholder: default_port(form.db_kind)
            .map(|port| port.to_string())
            .unwrap_or_default(),
        database: form.database.clone(),
    });

    ScreenView::Config {
        api_host: form.api_host.clone(),
        db_kind: form.db_kind,
        db_types: DbKind::ALL
            .into_iter()
            .map(|kind| DbTypeOption {
                label: kind.label().to_string(),
                value: kind,
            })
            .collect(),
        db_path: (!form.db_kind.is_networked()).then(|| form.db_path.clone()),
        networked,
    }
}

fn mask(secret: &str) -> String {
    "*".repeat(secret.chars().count())
}
