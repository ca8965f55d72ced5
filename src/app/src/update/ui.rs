use log::debug;

use crux_core::{render::render, Command};

use crate::events::{Event, UiEvent};
use crate::model::Model;
use crate::types::{ConfigForm, LoginForm, Screen};
use crate::{update_field, Effect};

/// Handle UI-related events (dismiss messages, navigate back)
pub fn handle(event: UiEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        UiEvent::DismissAlert => update_field!(model.alert, None),
        UiEvent::DismissNotice => update_field!(model.notice, None),
        UiEvent::Back => {
            let previous = match &model.screen {
                Screen::Config(_) => {
                    debug!("already on the first screen");
                    return Command::done();
                }
                Screen::Login(form) => Screen::Config(ConfigForm::with_api_host(&form.api_host)),
                Screen::Totp(session) => Screen::Login(LoginForm::new(&session.api_host)),
            };

            model.navigate(previous);
            model.clear_error();
            render()
        }
    }
}
