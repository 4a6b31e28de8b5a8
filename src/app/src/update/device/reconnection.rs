use crux_core::{render::render, Command};

use crate::acknowledgement::SignalSource;
use crate::commands::TimerId;
use crate::events::Event;
use crate::http_get;
use crate::http_helpers::{build_url, HttpError};
use crate::model::Model;
use crate::types::{DeviceOperation, DeviceOperationState, HealthcheckInfo, UpdateOutcome};
use crate::{Effect, TimerCmd};

/// Leaving the awaiting states always stops both reconnection timers
fn cancel_reconnection_timers() -> Command<Effect, Event> {
    Command::all([
        TimerCmd::cancel(TimerId::ReconnectionCheck),
        TimerCmd::cancel(TimerId::ReconnectionTimeout),
    ])
}

fn describe_timeout(timeout_ms: u64) -> String {
    let secs = timeout_ms / 1000;
    let span = if secs >= 60 && secs % 60 == 0 {
        format!("{} minutes", secs / 60)
    } else {
        format!("{secs} seconds")
    };
    format!("Device did not come back online after {span}. Please check the device manually.")
}

/// Poll tick: healthcheck against the device's own origin
pub fn handle_reconnection_check_tick(model: &mut Model) -> Command<Effect, Event> {
    if !model.device_operation_state.is_awaiting_reconnection() {
        log::warn!(
            "stale reconnection tick in {:?}",
            model.device_operation_state
        );
        return Command::done();
    }

    model.reconnection_attempt += 1;
    http_get!(Device, DeviceEvent, build_url("/healthcheck"), ReconnectionCheckResponse, "Healthcheck",
        expect_json: HealthcheckInfo)
}

/// Deadline of the running operation passed without a successful reconnect
pub fn handle_reconnection_timeout(model: &mut Model) -> Command<Effect, Event> {
    let state = &model.device_operation_state;
    let Some(operation) = state
        .operation()
        .filter(|_| state.is_awaiting_reconnection())
    else {
        log::warn!("stale reconnection timeout in {state:?}");
        return Command::done();
    };

    let reason = describe_timeout(operation.timeout_ms(&model.config));
    log::info!(
        "{operation:?} timed out after {} attempts",
        model.reconnection_attempt
    );

    model.device_overlay.set_text(reason.clone());
    model.device_overlay.set_timed_out();
    model.device_operation_state = DeviceOperationState::ReconnectionFailed { operation, reason };

    Command::all([render(), cancel_reconnection_timers()])
}

/// Result of a reconnection healthcheck.
///
/// Failures of any kind mean "still down". Success only counts once the
/// device has been seen offline; for updates the validation must also have
/// reached a terminal status.
pub fn handle_reconnection_check_response(
    result: Result<HealthcheckInfo, HttpError>,
    model: &mut Model,
) -> Command<Effect, Event> {
    let state = &model.device_operation_state;
    let Some(operation) = state
        .operation()
        .filter(|_| state.is_awaiting_reconnection())
    else {
        log::debug!("ignoring late reconnection healthcheck");
        return Command::done();
    };

    let info = match result {
        Ok(info) => info,
        Err(e) => {
            log::debug!("device still unreachable: {e}");
            model.device_went_offline = true;
            model.device_operation_state = DeviceOperationState::WaitingReconnection {
                operation,
                attempt: model.reconnection_attempt,
            };
            return render();
        }
    };

    model
        .acknowledgements
        .observe_healthcheck(&info, SignalSource::Live);
    let outcome = info.update_validation_status.outcome();
    model.healthcheck = Some(info);

    if !model.device_went_offline {
        log::debug!("device answered but has not gone down yet");
        return render();
    }
    if operation == DeviceOperation::Update && outcome.is_none() {
        log::debug!("device is back, update validation still running");
        return render();
    }

    log::info!(
        "{operation:?} completed after {} attempts",
        model.reconnection_attempt
    );
    model.device_operation_state = DeviceOperationState::ReconnectionSuccessful {
        operation,
        update_rolled_back: outcome == Some(UpdateOutcome::RolledBack),
    };
    // the restarted backend no longer knows our token
    model.invalidate_session();
    model.device_overlay.clear();

    Command::all([render(), cancel_reconnection_timers()])
}

pub fn handle_dismiss_operation_result(model: &mut Model) -> Command<Effect, Event> {
    if !model.device_operation_state.is_terminal() {
        log::warn!(
            "nothing to dismiss in {:?}",
            model.device_operation_state
        );
        return Command::done();
    }
    model.device_operation_state = DeviceOperationState::Idle;
    model.device_overlay.clear();
    render()
}
