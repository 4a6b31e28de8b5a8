use crux_core::{render::render, Command};
use serde_valid::Validate;

use crate::auth_post;
use crate::events::Event;
use crate::http_helpers::HttpError;
use crate::model::Model;
use crate::types::{NetworkFormState, PendingIpChange, SetNetworkConfigResponse};
use crate::Effect;

use super::form::rollback_prompt_for;
use super::verification::enter_waiting_for_new_ip;

const NETWORK_CONFIG_SUCCESS: &str = "Network configuration updated";

/// Submit the edited adapter configuration.
///
/// On the adapter the client is connected through, a pending change needs
/// an explicit answer to the rollback prompt first.
pub fn handle_network_form_submit(
    enable_rollback: Option<bool>,
    model: &mut Model,
) -> Command<Effect, Event> {
    let NetworkFormState::Editing {
        adapter_name,
        form_data,
        original_data,
        dirty,
        ..
    } = &model.network_form_state
    else {
        log::warn!("submit without an edited form");
        return Command::done();
    };

    let errors = form_data.validate_fields();
    if !errors.is_empty() {
        let message = errors.values().cloned().collect::<Vec<_>>().join(", ");
        model.set_error(format!("Invalid network configuration: {message}"));
        return render();
    }

    let is_server_addr = model.is_current_adapter(adapter_name);
    if is_server_addr && *dirty && enable_rollback.is_none() {
        log::warn!("rollback prompt for {adapter_name} not answered");
        model.set_error("Confirm whether automatic rollback should be enabled".to_string());
        return render();
    }

    let request = form_data.to_request(original_data, is_server_addr, enable_rollback);
    if let Err(e) = request.validate() {
        model.set_error(format!("Invalid network configuration: {e}"));
        return render();
    }

    let pending_change = (is_server_addr
        && (request.ip_changed || request.switching_to_dhcp || enable_rollback == Some(true)))
    .then(|| PendingIpChange {
        new_ip: request.ip.clone().unwrap_or_default(),
        switching_to_dhcp: request.switching_to_dhcp,
        rollback_enabled: enable_rollback.unwrap_or(false),
    });
    let submitting = NetworkFormState::Submitting {
        adapter_name: adapter_name.clone(),
        form_data: form_data.clone(),
        original_data: original_data.clone(),
        pending_change,
    };

    model.success_message = None;
    let command = auth_post!(Device, DeviceEvent, model, "/network", SetNetworkConfigResponse, "Set network config",
        body_json: &request,
        expect_json: SetNetworkConfigResponse);
    // only an issued request leaves the model loading
    if model.is_loading {
        model.network_form_state = submitting;
        model.rollback_prompt = None;
    }
    command
}

/// Outcome of `POST /network`. Only a form in `Submitting` is waiting for
/// it; any other form state is left untouched.
pub fn handle_set_network_config_response(
    result: Result<SetNetworkConfigResponse, HttpError>,
    model: &mut Model,
) -> Command<Effect, Event> {
    if !matches!(model.network_form_state, NetworkFormState::Submitting { .. }) {
        log::warn!(
            "network config response without a submitted form: {:?}",
            result.as_ref().map(|_| ())
        );
        return Command::done();
    }
    model.stop_loading();

    let response = match result {
        Ok(response) => response,
        Err(e) => {
            model.handle_http_error(e);
            if let Some(editing) = model.network_form_state.to_editing() {
                model.network_form_state = editing;
            }
            if let NetworkFormState::Editing {
                adapter_name,
                form_data,
                original_data,
                ..
            } = &model.network_form_state
            {
                model.rollback_prompt =
                    rollback_prompt_for(adapter_name, form_data, original_data, model);
            }
            return render();
        }
    };

    let NetworkFormState::Submitting {
        adapter_name,
        form_data,
        pending_change,
        ..
    } = std::mem::take(&mut model.network_form_state)
    else {
        return render();
    };

    // the submitted values are the adapter's state from now on
    model.network_form_state = NetworkFormState::Editing {
        adapter_name,
        original_data: form_data.clone(),
        form_data,
        dirty: false,
        errors: Default::default(),
    };
    model.set_success(NETWORK_CONFIG_SUCCESS);

    match pending_change {
        Some(change) => Command::all([render(), enter_waiting_for_new_ip(change, &response, model)]),
        None => render(),
    }
}
