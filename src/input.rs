//! Line based user input for the terminal shell

use authenticator_mobile_core::{AuthEvent, ConfigEvent, DbKind, Event, ScreenView, UiEvent, ViewModel};

/// What a line of user input asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Dispatch(Event),
    Help,
    Quit,
    /// Nothing typed
    Empty,
}

/// Parse `line` in the context of the rendered view.
///
/// Unknown or malformed commands come back as `Err` with a hint for the user;
/// they never reach the core.
pub fn parse(view: &ViewModel, line: &str) -> Result<Input, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Input::Empty);
    }

    let (command, argument) = match line.split_once(char::is_whitespace) {
        Some((command, argument)) => (command, argument.trim()),
        None => (line, ""),
    };

    match command {
        "help" | "?" => return Ok(Input::Help),
        "quit" | "exit" => return Ok(Input::Quit),
        "ok" => return Ok(dismiss(view)),
        "back" => return Ok(Input::Dispatch(Event::Ui(UiEvent::Back))),
        _ => {}
    }

    let event = match &view.screen {
        ScreenView::Config { .. } => config_event(command, argument)?,
        ScreenView::Login { .. } => auth_event(command, argument)?,
        ScreenView::Totp { .. } => return Err(unknown(command)),
    };

    Ok(Input::Dispatch(event))
}

/// Commands available on `screen`, one per line
pub fn help(screen: &ScreenView) -> &'static str {
    match screen {
        ScreenView::Config { .. } => {
            "api <url>        backend API address\n\
             type <kind>      sqlite, mysql or postgres\n\
             path <file>      SQLite database file\n\
             host <host>      database host\n\
             user <name>      database user\n\
             password <pw>    database password\n\
             port <port>      database port\n\
             database <name>  database name\n\
             submit           save the configuration\n\
             ok               dismiss the current message\n\
             quit             leave"
        }
        ScreenView::Login { .. } => {
            "username <name>  login name\n\
             password <pw>    login password\n\
             submit           log in\n\
             back             return to the configuration\n\
             ok               dismiss the current message\n\
             quit             leave"
        }
        ScreenView::Totp { .. } => {
            "back             return to the login\n\
             ok               dismiss the current message\n\
             quit             leave"
        }
    }
}

/// Alerts are dismissed before notices
fn dismiss(view: &ViewModel) -> Input {
    if view.alert.is_some() {
        Input::Dispatch(Event::Ui(UiEvent::DismissAlert))
    } else if view.notice.is_some() {
        Input::Dispatch(Event::Ui(UiEvent::DismissNotice))
    } else {
        Input::Empty
    }
}

fn config_event(command: &str, argument: &str) -> Result<Event, String> {
    let event = match command {
        "api" => ConfigEvent::SetApiHost(argument.to_string()),
        "type" => ConfigEvent::SetDbKind(argument.parse::<DbKind>()?),
        "path" => ConfigEvent::SetDbPath(argument.to_string()),
        "host" => ConfigEvent::SetHost(argument.to_string()),
        "user" => ConfigEvent::SetUser(argument.to_string()),
        "password" => ConfigEvent::SetPassword(argument.to_string()),
        "port" => ConfigEvent::SetPort(argument.to_string()),
        "database" => ConfigEvent::SetDatabase(argument.to_string()),
        "submit" => ConfigEvent::Submit,
        _ => return Err(unknown(command)),
    };

    Ok(Event::Config(event))
}

fn auth_event(command: &str, argument: &str) -> Result<Event, String> {
    let event = match command {
        "username" => AuthEvent::SetUsername(argument.to_string()),
        "password" => AuthEvent::SetPassword(argument.to_string()),
        "submit" => AuthEvent::Submit,
        _ => return Err(unknown(command)),
    };

    Ok(Event::Auth(event))
}

fn unknown(command: &str) -> String {
    format!("unknown command '{command}', type 'help' for a list")
}

#[cfg(test)]
mod tests {
    use super::*;
    use authenticator_mobile_core::{Alert, App, LoginForm, Model, Screen};
    use crux_core::App as _;

    fn config_screen() -> ViewModel {
        App.view(&Model::default())
    }

    fn login_screen() -> ViewModel {
        let mut model = Model::default();
        model.navigate(Screen::Login(LoginForm::default()));
        App.view(&model)
    }

    #[test]
    fn config_commands_map_to_config_events() {
        assert_eq!(
            parse(&config_screen(), "api http://10.0.0.2:8000"),
            Ok(Input::Dispatch(Event::Config(ConfigEvent::SetApiHost(
                "http://10.0.0.2:8000".to_string()
            ))))
        );
        assert_eq!(
            parse(&config_screen(), "type postgres"),
            Ok(Input::Dispatch(Event::Config(ConfigEvent::SetDbKind(DbKind::Postgres))))
        );
        assert_eq!(
            parse(&config_screen(), "  submit  "),
            Ok(Input::Dispatch(Event::Config(ConfigEvent::Submit)))
        );
    }

    #[test]
    fn argument_may_be_blank_to_clear_a_field() {
        assert_eq!(
            parse(&config_screen(), "port"),
            Ok(Input::Dispatch(Event::Config(ConfigEvent::SetPort(String::new()))))
        );
    }

    #[test]
    fn password_depends_on_screen() {
        assert_eq!(
            parse(&login_screen(), "password s3cret with spaces"),
            Ok(Input::Dispatch(Event::Auth(AuthEvent::SetPassword(
                "s3cret with spaces".to_string()
            ))))
        );
        assert_eq!(
            parse(&config_screen(), "password pw"),
            Ok(Input::Dispatch(Event::Config(ConfigEvent::SetPassword(
                "pw".to_string()
            ))))
        );
    }

    #[test]
    fn ok_dismisses_alert_before_notice() {
        let model = Model {
            alert: Some(Alert::new("Login failed", "Network error")),
            notice: Some(Alert::new("Configuration saved", "You can now log in.")),
            ..Default::default()
        };
        let notice_only = Model {
            alert: None,
            ..model.clone()
        };

        assert_eq!(
            parse(&App.view(&model), "ok"),
            Ok(Input::Dispatch(Event::Ui(UiEvent::DismissAlert)))
        );
        assert_eq!(
            parse(&App.view(&notice_only), "ok"),
            Ok(Input::Dispatch(Event::Ui(UiEvent::DismissNotice)))
        );
        assert_eq!(parse(&config_screen(), "ok"), Ok(Input::Empty));
    }

    #[test]
    fn unknown_commands_are_not_dispatched() {
        assert!(parse(&login_screen(), "host db").is_err());
        assert!(parse(&config_screen(), "type oracle").is_err());
    }

    #[test]
    fn shell_commands_work_everywhere() {
        for screen in [config_screen(), login_screen()] {
            assert_eq!(parse(&screen, "quit"), Ok(Input::Quit));
            assert_eq!(parse(&screen, "help"), Ok(Input::Help));
            assert_eq!(parse(&screen, ""), Ok(Input::Empty));
            assert_eq!(
                parse(&screen, "back"),
                Ok(Input::Dispatch(Event::Ui(UiEvent::Back)))
            );
        }
    }
}
