use crux_core::{render::render, Command};
use serde_valid::Validate;

use crate::acknowledgement::{AcknowledgementKind, SignalSource};
use crate::auth_post;
use crate::commands::TimerId;
use crate::config::countdown_seconds;
use crate::events::Event;
use crate::handle_response;
use crate::http_helpers::HttpError;
use crate::model::Model;
use crate::types::{
    DeviceOperation, DeviceOperationState, FactoryResetMode, FactoryResetRequest,
    HealthcheckInfo, LoadUpdateRequest, OverlaySpinnerState, RunUpdateRequest, UpdateManifest,
    UploadState,
};
use crate::{Effect, TimerCmd};

/// A reboot, factory reset or update is still waiting for the device.
/// Reports the rejection on the model.
fn reject_if_busy(model: &mut Model, requested: DeviceOperation) -> bool {
    let state = &model.device_operation_state;
    let active = state
        .operation()
        .filter(|_| state.is_awaiting_reconnection());

    match active {
        Some(active) => {
            log::warn!("{requested:?} rejected while {active:?} is in progress");
            model.set_error(format!(
                "{} is not possible while {} is in progress",
                requested.label(),
                active.label()
            ));
            true
        }
        None => false,
    }
}

pub fn handle_reboot(model: &mut Model) -> Command<Effect, Event> {
    if reject_if_busy(model, DeviceOperation::Reboot) {
        return render();
    }
    auth_post!(Device, DeviceEvent, model, "/reboot", RebootResponse, "Reboot")
}

pub fn handle_factory_reset_request(
    mode: String,
    preserve: Vec<String>,
    model: &mut Model,
) -> Command<Effect, Event> {
    if reject_if_busy(model, DeviceOperation::FactoryReset) {
        return render();
    }
    let mode = match FactoryResetMode::try_from(mode.as_str()) {
        Ok(mode) => mode,
        Err(e) => {
            model.set_error(e);
            return render();
        }
    };
    let request = FactoryResetRequest { mode, preserve };
    auth_post!(Device, DeviceEvent, model, "/factory-reset", FactoryResetResponse, "Factory reset",
        body_json: &request)
}

pub fn handle_load_update(file_path: String, model: &mut Model) -> Command<Effect, Event> {
    let request = LoadUpdateRequest { file_path };
    if let Err(e) = request.validate() {
        model.set_error(format!("Invalid update file: {e}"));
        return render();
    }
    auth_post!(Device, DeviceEvent, model, "/update/load", LoadUpdateResponse, "Load update",
        body_json: &request,
        expect_json: UpdateManifest)
}

pub fn handle_load_update_response(
    result: Result<UpdateManifest, HttpError>,
    model: &mut Model,
) -> Command<Effect, Event> {
    handle_response!(model, result, {
        on_success: |model, manifest| {
            model.update_manifest = Some(manifest);
        },
    })
}

pub fn handle_run_update(
    validate_iothub_connection: bool,
    model: &mut Model,
) -> Command<Effect, Event> {
    if reject_if_busy(model, DeviceOperation::Update) {
        return render();
    }
    let request = RunUpdateRequest {
        validate_iothub_connection,
    };
    auth_post!(Device, DeviceEvent, model, "/update/run", RunUpdateResponse, "Run update",
        body_json: &request)
}

fn overlay_for(operation: DeviceOperation, timeout_ms: u64) -> OverlaySpinnerState {
    let (title, text) = match operation {
        DeviceOperation::Reboot => (
            "Device is rebooting",
            "Waiting for the device to come back online",
        ),
        DeviceOperation::FactoryReset => (
            "The device will be reset to factory settings",
            "Waiting for the device to come back online",
        ),
        DeviceOperation::Update => (
            "Installing update",
            "The device restarts and validates the new image",
        ),
    };
    OverlaySpinnerState::new(title)
        .with_text(text)
        .with_countdown(countdown_seconds(timeout_ms))
}

/// Enter the operation's initial state and start reconnection polling
fn start_operation(model: &mut Model, operation: DeviceOperation) -> Command<Effect, Event> {
    let timeout_ms = operation.timeout_ms(&model.config);

    log::info!("{operation:?} accepted, awaiting reconnection for {timeout_ms}ms");
    model.device_operation_state = DeviceOperationState::started(operation);
    model.reconnection_attempt = 0;
    model.device_went_offline = false;
    model.device_overlay = overlay_for(operation, timeout_ms);

    match operation {
        DeviceOperation::FactoryReset => model
            .acknowledgements
            .begin_cycle(AcknowledgementKind::FactoryResetResult),
        DeviceOperation::Update => model
            .acknowledgements
            .begin_cycle(AcknowledgementKind::UpdateValidation),
        DeviceOperation::Reboot => {}
    }

    Command::all([
        render(),
        TimerCmd::schedule_interval(
            TimerId::ReconnectionCheck,
            model.config.reconnection_poll_interval_ms,
        ),
        TimerCmd::schedule_timeout(TimerId::ReconnectionTimeout, timeout_ms),
    ])
}

/// Response to a reboot, factory reset or run-update command.
///
/// A dropped connection counts as accepted: the device may go down before
/// it manages to answer.
pub fn handle_device_operation_response(
    result: Result<(), HttpError>,
    model: &mut Model,
    operation: DeviceOperation,
) -> Command<Effect, Event> {
    model.stop_loading();

    match result {
        Ok(()) => {
            model.success_message = Some(format!("{} initiated", operation.label()));
            start_operation(model, operation)
        }
        Err(e) if e.is_transport() => {
            log::info!("{operation:?} response lost: {e}");
            model.success_message =
                Some(format!("{} initiated (connection lost)", operation.label()));
            start_operation(model, operation)
        }
        Err(e) => {
            model.handle_http_error(e);
            model.device_overlay.clear();
            render()
        }
    }
}

/// Startup healthcheck; its acknowledgement fields are a snapshot
pub fn handle_healthcheck_response(
    result: Result<HealthcheckInfo, HttpError>,
    model: &mut Model,
) -> Command<Effect, Event> {
    match result {
        Ok(info) => {
            model
                .acknowledgements
                .observe_healthcheck(&info, SignalSource::Snapshot);
            model.healthcheck = Some(info);
        }
        Err(e) => {
            log::warn!("startup healthcheck failed: {e}");
            return Command::done();
        }
    }
    render()
}

pub fn handle_upload_started(model: &mut Model) -> Command<Effect, Event> {
    model.firmware_upload_state = UploadState::Uploading;
    model.update_manifest = None;
    model.device_overlay = OverlaySpinnerState::new("Uploading firmware").with_progress(0);
    render()
}

pub fn handle_upload_progress(progress: u8, model: &mut Model) -> Command<Effect, Event> {
    if model.firmware_upload_state != UploadState::Uploading {
        return Command::done();
    }
    model.device_overlay.set_progress(progress);
    render()
}

pub fn handle_upload_completed(model: &mut Model) -> Command<Effect, Event> {
    model.firmware_upload_state = UploadState::Completed;
    model.device_overlay.clear();
    render()
}

pub fn handle_upload_failed(error: String, model: &mut Model) -> Command<Effect, Event> {
    log::error!("firmware upload failed: {error}");
    model.firmware_upload_state = UploadState::Failed(error.clone());
    model.device_overlay.clear();
    model.set_error(format!("Upload failed: {error}"));
    render()
}
