pub mod events;
pub mod http_helpers;
pub mod macros;
pub mod model;
pub mod types;
pub mod update;
pub mod view;


use crux_core::Command;

// Re-export core types
pub use crate::{
    events::{AuthEvent, ConfigEvent, Event, UiEvent},
    http_helpers::{
        build_url, check_response_status, extract_error_detail, map_http_error,
        parse_json_response, process_json_response, process_status_response,
    },
    model::Model,
    types::*,
    view::{ScreenView, ViewModel},
};
pub use crux_http::{
    protocol::{HttpHeader, HttpRequest, HttpResponse, HttpResult},
    HttpError,
};

#[crux_macros::effect]
pub enum Effect {
    Render(crux_core::render::RenderOperation),
    Http(crux_http::protocol::HttpRequest),
}

pub type HttpCmd = crux_http::Http<Effect, Event>;

/// The Core application
#[derive(Default)]
pub struct App;

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Effect = Effect;

    fn update(&self, event: Self::Event, model: &mut Self::Model) -> Command<Effect, Event> {
        update::update(event, model)
    }

    fn view(&self, model: &Self::Model) -> Self::ViewModel {
        view::view(model)
    }
}
