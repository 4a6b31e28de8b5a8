use crux_core::{render::render, Command};

use crate::commands::CentrifugoOutput;
use crate::events::{Event, WebSocketEvent};
use crate::model::Model;
use crate::parse_ods_update;
use crate::types::ods::{
    ChannelName, OdsFactoryReset, OdsNetworkStatus, OdsOnlineStatus, OdsSystemInfo, OdsTimeouts,
    OdsUpdateValidationStatus,
};
use crate::types::{
    FactoryReset, NetworkStatus, OnlineStatus, SystemInfo, Timeouts, UpdateValidationStatus,
};
use crate::update::device::{
    handle_network_status_update, observe_factory_reset, observe_update_validation,
};
use crate::update_field;
use crate::{CentrifugoCmd, Effect};

fn centrifugo_response(output: CentrifugoOutput) -> Event {
    Event::WebSocket(WebSocketEvent::CentrifugoResponse(output))
}

/// Subscribe to every known channel, each followed by a history replay
fn subscribe_all(history_limit: u32) -> Command<Effect, Event> {
    Command::all(ChannelName::ALL.into_iter().flat_map(|channel| {
        [
            CentrifugoCmd::subscribe(channel)
                .build()
                .then_send(centrifugo_response),
            CentrifugoCmd::history(channel, history_limit)
                .build()
                .then_send(centrifugo_response),
        ]
    }))
}

fn unsubscribe_all() -> Command<Effect, Event> {
    Command::all(ChannelName::ALL.into_iter().map(|channel| {
        CentrifugoCmd::unsubscribe(channel)
            .build()
            .then_send(centrifugo_response)
    }))
}

/// Handle WebSocket and Centrifugo-related events
pub fn handle(event: WebSocketEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        WebSocketEvent::SubscribeToChannels => subscribe_all(model.config.channel_history_limit),
        WebSocketEvent::UnsubscribeFromChannels => unsubscribe_all(),
        WebSocketEvent::ChannelMessage { channel, data } => {
            handle_channel_message(&channel, &data, model)
        }
        WebSocketEvent::CentrifugoResponse(output) => handle_centrifugo_output(output, model),
        WebSocketEvent::Connected => update_field!(model.is_connected, true),
        WebSocketEvent::Disconnected => update_field!(model.is_connected, false),
    }
}

fn handle_centrifugo_output(output: CentrifugoOutput, model: &mut Model) -> Command<Effect, Event> {
    match output {
        CentrifugoOutput::HistoryResult {
            channel,
            data: Some(data),
        } => handle_channel_message(&channel, &data, model),
        CentrifugoOutput::HistoryResult {
            channel,
            data: None,
        } => {
            log::debug!("no history on {channel}");
            Command::done()
        }
        CentrifugoOutput::Subscribed { channel } => {
            log::debug!("subscribed to {channel}");
            Command::done()
        }
        CentrifugoOutput::Unsubscribed { channel } => {
            log::debug!("unsubscribed from {channel}");
            Command::done()
        }
        CentrifugoOutput::Error { message } => {
            log::warn!("centrifugo: {message}");
            Command::done()
        }
    }
}

/// Replayed history and live publications are handled alike; every payload
/// replaces the previous value.
fn handle_channel_message(channel: &str, data: &str, model: &mut Model) -> Command<Effect, Event> {
    let Some(channel) = ChannelName::parse(channel) else {
        log::warn!("message on unknown channel {channel}");
        return Command::done();
    };

    match channel {
        ChannelName::OnlineStatus => {
            if let Some(status) = parse_ods_update!(data, OdsOnlineStatus, OnlineStatus) {
                return update_field!(model.online_status, Some(status));
            }
        }
        ChannelName::SystemInfo => {
            if let Some(info) = parse_ods_update!(data, OdsSystemInfo, SystemInfo) {
                return update_field!(model.system_info, Some(info));
            }
        }
        ChannelName::Timeouts => {
            if let Some(timeouts) = parse_ods_update!(data, OdsTimeouts, Timeouts) {
                return update_field!(model.timeouts, Some(timeouts));
            }
        }
        ChannelName::NetworkStatusV1 => {
            if let Some(status) = parse_ods_update!(data, OdsNetworkStatus, NetworkStatus) {
                return handle_network_status_update(status, model);
            }
        }
        ChannelName::FactoryResetV1 => {
            if let Some(reset) = parse_ods_update!(data, OdsFactoryReset, FactoryReset) {
                observe_factory_reset(&reset, model);
                model.factory_reset = Some(reset);
                return render();
            }
        }
        ChannelName::UpdateValidationStatusV1 => {
            if let Some(status) =
                parse_ods_update!(data, OdsUpdateValidationStatus, UpdateValidationStatus)
            {
                observe_update_validation(&status, model);
                model.update_validation_status = Some(status);
                return render();
            }
        }
    }
    Command::done()
}
