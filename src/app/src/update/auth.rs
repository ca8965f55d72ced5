use log::{debug, info, warn};

use crux_core::{render::render, Command};

use crate::events::{AuthEvent, Event};
use crate::model::Model;
use crate::types::{Alert, ApiHost, Screen, Session, TokenResponse};
use crate::{unauth_post, update_field, Effect};

use super::{LOGIN_FAILED_TITLE, NETWORK_ERROR, VALIDATION_TITLE};

/// Handle login screen events
pub fn handle(event: AuthEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        AuthEvent::SetUsername(username) => match model.login_form_mut() {
            Some(form) => update_field!(form.username, username),
            None => Command::done(),
        },

        AuthEvent::SetPassword(password) => match model.login_form_mut() {
            Some(form) => update_field!(form.password, password),
            None => Command::done(),
        },

        AuthEvent::Submit => handle_submit(model),

        AuthEvent::LoginResponse {
            screen,
            api_host,
            result,
        } => {
            if !model.is_current(screen) {
                debug!("discarding login response for unmounted screen {screen}");
                return Command::done();
            }

            match result {
                Ok(token) => {
                    info!("login succeeded against {api_host}");
                    model.stop_loading();
                    model.navigate(Screen::Totp(Session {
                        token: token.access_token,
                        api_host,
                    }));
                    render()
                }
                Err(e) => {
                    warn!("login failed: {e}");
                    model.set_error_and_render(Alert::new(
                        LOGIN_FAILED_TITLE,
                        e.alert_message(NETWORK_ERROR),
                    ))
                }
            }
        }
    }
}

fn handle_submit(model: &mut Model) -> Command<Effect, Event> {
    if !model.guard.can_submit() {
        debug!("login submit ignored: request in flight");
        return Command::done();
    }

    let Some(form) = model.login_form_mut() else {
        debug!("ignoring login submit outside the login screen");
        return Command::done();
    };

    let credentials = match form.credentials() {
        Ok(credentials) => credentials,
        Err(e) => {
            return model.set_error_and_render(Alert::new(VALIDATION_TITLE, e.alert_message("")));
        }
    };

    let api_host = match ApiHost::parse(&form.api_host) {
        Ok(api_host) => api_host,
        Err(e) => {
            warn!("login rejected locally: {e}");
            return model
                .set_error_and_render(Alert::new(LOGIN_FAILED_TITLE, e.alert_message(NETWORK_ERROR)));
        }
    };

    debug!("submitting login for {} to {api_host}", credentials.username);
    unauth_post!(Auth, AuthEvent, model, &api_host, "/login", LoginResponse, LOGIN_FAILED_TITLE,
        body_json: &credentials,
        expect_json: TokenResponse
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LoginForm, SubmitError};
    use crux_http::protocol::{HttpRequest, HttpResponse, HttpResult};
    use serde_json::json;

    fn login_model(username: &str, password: &str) -> Model {
        let mut model = Model::default();
        model.navigate(Screen::Login(LoginForm {
            username: username.to_string(),
            password: password.to_string(),
            ..LoginForm::new("http://192.168.0.100:8000")
        }));
        model
    }

    fn http_request(cmd: &mut Command<Effect, Event>) -> crux_core::Request<HttpRequest> {
        cmd.effects()
            .find_map(Effect::into_http)
            .expect("expected an http effect")
    }

    #[test]
    fn empty_credentials_never_reach_the_network() {
        for (username, password) in [("", "secret"), ("admin", ""), ("", "")] {
            let mut model = login_model(username, password);

            let mut cmd = handle(AuthEvent::Submit, &mut model);

            assert!(cmd.effects().all(|effect| !effect.is_http()));
            assert!(!model.guard.is_busy());
            assert_eq!(
                model.alert,
                Some(Alert::new(VALIDATION_TITLE, "Fill in username and password"))
            );
        }
    }

    #[test]
    fn submit_enters_submitting_and_posts_credentials() {
        let mut model = login_model("admin", "admin");

        let mut cmd = handle(AuthEvent::Submit, &mut model);

        assert!(model.guard.is_busy());
        let request = http_request(&mut cmd);
        assert_eq!(request.operation.method, "POST");
        assert_eq!(request.operation.url, "http://192.168.0.100:8000/login");
        let body: serde_json::Value = serde_json::from_slice(&request.operation.body).unwrap();
        assert_eq!(body, json!({ "username": "admin", "password": "admin" }));
    }

    #[test]
    fn second_submit_while_in_flight_is_ignored() {
        let mut model = login_model("admin", "admin");
        let mut first = handle(AuthEvent::Submit, &mut model);

        let mut second = handle(AuthEvent::Submit, &mut model);

        assert!(second.is_done());
        assert_eq!(first.effects().filter(Effect::is_http).count(), 1);
        assert!(model.guard.is_busy());
    }

    #[test]
    fn token_is_handed_to_next_step() {
        let mut model = login_model("admin", "admin");
        let mut cmd = handle(AuthEvent::Submit, &mut model);
        let mut request = http_request(&mut cmd);

        request
            .resolve(HttpResult::Ok(
                HttpResponse::ok().json(json!({ "access_token": "abc" })).build(),
            ))
            .expect("resolve login request");
        let Some(Event::Auth(event)) = cmd.events().next() else {
            panic!("expected a login response");
        };
        let _ = handle(event, &mut model);

        assert_eq!(
            model.session(),
            Some(&Session {
                token: "abc".to_string(),
                api_host: "http://192.168.0.100:8000".to_string(),
            })
        );
        assert!(!model.guard.is_busy());
    }

    #[test]
    fn rejected_login_shows_detail_and_returns_to_idle() {
        let mut model = login_model("admin", "wrong");
        let screen = model.screen_id;
        let _ = handle(AuthEvent::Submit, &mut model);

        let _ = handle(
            AuthEvent::LoginResponse {
                screen,
                api_host: "http://192.168.0.100:8000".to_string(),
                result: Err(SubmitError::Rejected {
                    status: 401,
                    detail: Some("bad credentials".to_string()),
                }),
            },
            &mut model,
        );

        assert!(model.guard.can_submit());
        assert_eq!(model.alert.as_ref().unwrap().message, "bad credentials");
        assert!(matches!(model.screen, Screen::Login(_)));
    }

    #[test]
    fn transport_failure_shows_network_error() {
        let mut model = login_model("admin", "admin");
        let screen = model.screen_id;
        let _ = handle(AuthEvent::Submit, &mut model);

        let _ = handle(
            AuthEvent::LoginResponse {
                screen,
                api_host: "http://192.168.0.100:8000".to_string(),
                result: Err(SubmitError::Transport("IO error: refused".to_string())),
            },
            &mut model,
        );

        assert_eq!(
            model.alert,
            Some(Alert::new(LOGIN_FAILED_TITLE, NETWORK_ERROR))
        );
    }

    #[test]
    fn late_login_response_after_leaving_is_discarded() {
        let mut model = login_model("admin", "admin");
        let screen = model.screen_id;
        let _ = handle(AuthEvent::Submit, &mut model);
        model.navigate(Screen::Config(Default::default()));

        let mut cmd = handle(
            AuthEvent::LoginResponse {
                screen,
                api_host: "http://192.168.0.100:8000".to_string(),
                result: Ok(TokenResponse {
                    access_token: "late".to_string(),
                    token_type: None,
                }),
            },
            &mut model,
        );

        assert!(cmd.is_done());
        assert!(model.session().is_none());
    }
}
