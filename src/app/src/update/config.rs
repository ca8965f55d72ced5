use log::{debug, info, warn};

use crux_core::{render::render, Command};

use crate::events::{ConfigEvent, Event};
use crate::model::Model;
use crate::types::{Alert, ApiHost, ConfigForm, LoginForm, Screen};
use crate::{unauth_post, update_field, Effect};

use super::{CONFIG_FAILED_TITLE, CONNECTION_FAILED};

/// Handle configuration screen events
pub fn handle(event: ConfigEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        ConfigEvent::Submit => handle_submit(model),
        ConfigEvent::SubmitResponse {
            screen,
            api_host,
            result,
        } => {
            if !model.is_current(screen) {
                debug!("discarding configuration response for unmounted screen {screen}");
                return Command::done();
            }

            match result {
                Ok(()) => {
                    info!("backend configured at {api_host}");
                    model.stop_loading();
                    model.notice = Some(Alert::new("Configuration saved", "You can now log in."));
                    model.navigate(Screen::Login(LoginForm::new(api_host)));
                    render()
                }
                Err(e) => {
                    warn!("configuration failed: {e}");
                    model.set_error_and_render(Alert::new(
                        CONFIG_FAILED_TITLE,
                        e.alert_message(CONNECTION_FAILED),
                    ))
                }
            }
        }
        field => {
            let Some(form) = model.config_form_mut() else {
                debug!("ignoring {field:?} outside the configuration screen");
                return Command::done();
            };
            update_form(form, field)
        }
    }
}

fn update_form(form: &mut ConfigForm, event: ConfigEvent) -> Command<Effect, Event> {
    match event {
        ConfigEvent::SetApiHost(api_host) => update_field!(form.api_host, api_host),
        ConfigEvent::SetDbKind(kind) => update_field!(form.db_kind, kind),
        ConfigEvent::SetDbPath(path) => update_field!(form.db_path, path),
        ConfigEvent::SetHost(host) => update_field!(form.host, host),
        ConfigEvent::SetUser(user) => update_field!(form.user, user),
        ConfigEvent::SetPassword(password) => update_field!(form.password, password),
        ConfigEvent::SetPort(port) => update_field!(form.port, port),
        ConfigEvent::SetDatabase(database) => update_field!(form.database, database),
        ConfigEvent::Submit | ConfigEvent::SubmitResponse { .. } => {
            unreachable!("Non-field event passed to configuration form handler")
        }
    }
}

fn handle_submit(model: &mut Model) -> Command<Effect, Event> {
    if !model.guard.can_submit() {
        debug!("configuration submit ignored: request in flight");
        return Command::done();
    }

    let Some(form) = model.config_form_mut() else {
        debug!("ignoring configuration submit outside the configuration screen");
        return Command::done();
    };

    let prepared = ApiHost::parse(&form.api_host)
        .and_then(|api_host| form.to_payload().map(|payload| (api_host, payload)));

    match prepared {
        Ok((api_host, payload)) => {
            info!("submitting {} configuration to {api_host}", payload.kind());
            unauth_post!(Config, ConfigEvent, model, &api_host, "/config", SubmitResponse, CONFIG_FAILED_TITLE,
                body_json: &payload
            )
        }
        Err(e) => {
            warn!("configuration rejected locally: {e}");
            model.set_error_and_render(Alert::new(
                CONFIG_FAILED_TITLE,
                e.alert_message(CONNECTION_FAILED),
            ))
        }
    }
}
