//! Device operation and network reconfiguration core.
//!
//! [`App`] is a Crux app: `update` maps one [`Event`] and the [`Model`] to a
//! [`Command`] describing what the shell has to do next (HTTP, channel
//! subscriptions, timers, redirects, render). [`Core`] is a native shell
//! around it with a virtual clock for timers and view subscribers.

pub mod acknowledgement;
pub mod commands;
pub mod config;
pub mod events;
pub mod http_helpers;
pub mod macros;
pub mod model;
pub mod runtime;
pub mod timer;
pub mod types;
pub mod update;
pub mod view;

#[cfg(test)]
mod testing;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

use crux_core::Command;

pub use crate::{
    acknowledgement::{AcknowledgementKind, AcknowledgementTracker, SignalSource},
    commands::{
        CentrifugoOperation, CentrifugoOutput, RedirectOperation, TimerId, TimerOperation,
    },
    config::{ConfigError, CoreConfig},
    events::{AuthEvent, DeviceEvent, Event, UiEvent, WebSocketEvent},
    http_helpers::{
        build_url, check_response_status, extract_string_response, handle_auth_error,
        handle_request_error, map_http_error, parse_json_response, process_json_response,
        process_status_response, process_string_response, HttpError, BASE_URL,
    },
    model::Model,
    runtime::{Core, RuntimeError, SubscriptionId, ViewSubscriber},
    timer::TimerManager,
    types::*,
    view::ViewModel,
};

#[crux_macros::effect(typegen)]
pub enum Effect {
    Render(crux_core::render::RenderOperation),
    Http(crux_http::protocol::HttpRequest),
    Centrifugo(CentrifugoOperation),
    Timer(TimerOperation),
    Redirect(RedirectOperation),
}

pub type CentrifugoCmd = crate::commands::centrifugo::Centrifugo<Effect, Event>;
pub type HttpCmd = crux_http::command::Http<Effect, Event>;
pub type RedirectCmd = crate::commands::redirect::Redirect<Effect, Event>;
pub type TimerCmd = crate::commands::timer::Timer<Effect, Event>;

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
