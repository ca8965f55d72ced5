//! Plain text rendering of the view model

use authenticator_mobile_core::{Alert, ScreenView, ViewModel};
use std::fmt::Write;

/// Render `view` as the text block printed after every change
pub fn render(view: &ViewModel) -> String {
    let mut out = String::new();

    match &view.screen {
        ScreenView::Config {
            api_host,
            db_kind,
            db_types,
            db_path,
            networked,
        } => {
            let kinds = db_types
                .iter()
                .map(|option| {
                    let marker = if option.value == *db_kind { "*" } else { " " };
                    format!("[{marker}] {} ({})", option.label, option.value)
                })
                .collect::<Vec<_>>()
                .join("  ");

            out.push_str("== Backend configuration ==\n");
            field(&mut out, "API address", api_host, "");
            field(&mut out, "Database type", &kinds, "");
            if let Some(path) = db_path {
                field(&mut out, "SQLite file", path, "");
            }
            if let Some(fields) = networked {
                field(&mut out, "Host", &fields.host, "");
                field(&mut out, "User", &fields.user, "");
                field(&mut out, "Password", &fields.password, "");
                field(&mut out, "Port", &fields.port, &fields.port_placeholder);
                field(&mut out, "Database", &fields.database, "authenticator");
            }
        }
        ScreenView::Login {
            api_host,
            username,
            password,
        } => {
            out.push_str("== Authenticator login ==\n");
            field(&mut out, "API address", api_host, "");
            field(&mut out, "Username", username, "");
            field(&mut out, "Password", password, "");
        }
        ScreenView::Totp { api_host } => {
            out.push_str("== One-time passwords ==\n");
            field(&mut out, "API address", api_host, "");
            out.push_str("Logged in. One-time password management is not available yet.\n");
        }
    }

    if view.busy {
        out.push_str("... waiting for the backend\n");
    } else if view.submit_enabled {
        out.push_str("(type 'submit' to continue, 'help' for commands)\n");
    }

    if let Some(notice) = &view.notice {
        message(&mut out, "info", notice);
    }
    if let Some(alert) = &view.alert {
        message(&mut out, "error", alert);
    }

    out
}

fn field(out: &mut String, label: &str, value: &str, placeholder: &str) {
    let _ = match (value.is_empty(), placeholder.is_empty()) {
        (true, false) => writeln!(out, "  {label:<14} <{placeholder}>"),
        _ => writeln!(out, "  {label:<14} {value}"),
    };
}

fn message(out: &mut String, kind: &str, alert: &Alert) {
    let _ = writeln!(out, "[{kind}] {}: {} (type 'ok' to dismiss)", alert.title, alert.message);
}
