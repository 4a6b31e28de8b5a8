mod acknowledgement;
mod network;
mod operations;
mod reconnection;

pub use acknowledgement::{observe_factory_reset, observe_update_validation};
pub use network::handle_network_status_update;

use crux_core::Command;

use crate::events::{DeviceEvent, Event};
use crate::model::Model;
use crate::types::DeviceOperation;
use crate::Effect;

/// Handle device operations, network configuration and acknowledgements
pub fn handle(event: DeviceEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        DeviceEvent::Reboot => operations::handle_reboot(model),
        DeviceEvent::FactoryResetRequest { mode, preserve } => {
            operations::handle_factory_reset_request(mode, preserve, model)
        }
        DeviceEvent::LoadUpdate { file_path } => operations::handle_load_update(file_path, model),
        DeviceEvent::RunUpdate {
            validate_iothub_connection,
        } => operations::handle_run_update(validate_iothub_connection, model),

        DeviceEvent::UploadStarted => operations::handle_upload_started(model),
        DeviceEvent::UploadProgress(progress) => operations::handle_upload_progress(progress, model),
        DeviceEvent::UploadCompleted => operations::handle_upload_completed(model),
        DeviceEvent::UploadFailed(error) => operations::handle_upload_failed(error, model),

        DeviceEvent::RebootResponse(result) => {
            operations::handle_device_operation_response(result, model, DeviceOperation::Reboot)
        }
        DeviceEvent::FactoryResetResponse(result) => operations::handle_device_operation_response(
            result,
            model,
            DeviceOperation::FactoryReset,
        ),
        DeviceEvent::RunUpdateResponse(result) => {
            operations::handle_device_operation_response(result, model, DeviceOperation::Update)
        }
        DeviceEvent::LoadUpdateResponse(result) => {
            operations::handle_load_update_response(result, model)
        }
        DeviceEvent::HealthcheckResponse(result) => {
            operations::handle_healthcheck_response(result, model)
        }

        DeviceEvent::ReconnectionCheckTick => reconnection::handle_reconnection_check_tick(model),
        DeviceEvent::ReconnectionTimeout => reconnection::handle_reconnection_timeout(model),
        DeviceEvent::ReconnectionCheckResponse(result) => {
            reconnection::handle_reconnection_check_response(result, model)
        }
        DeviceEvent::DismissOperationResult => reconnection::handle_dismiss_operation_result(model),

        DeviceEvent::NetworkFormStartEdit { adapter_name } => {
            network::handle_network_form_start_edit(adapter_name, model)
        }
        DeviceEvent::NetworkFormUpdate(form_data) => {
            network::handle_network_form_update(form_data, model)
        }
        DeviceEvent::NetworkFormReset => network::handle_network_form_reset(model),
        DeviceEvent::NetworkFormCancel => network::handle_network_form_cancel(model),
        DeviceEvent::NetworkFormSubmit { enable_rollback } => {
            network::handle_network_form_submit(enable_rollback, model)
        }
        DeviceEvent::SetNetworkConfigResponse(result) => {
            network::handle_set_network_config_response(result, model)
        }
        DeviceEvent::ReloadNetwork => network::handle_reload_network(model),
        DeviceEvent::ReloadNetworkResponse(result) => {
            network::handle_reload_network_response(result, model)
        }
        DeviceEvent::NewIpCheckTick => network::handle_new_ip_check_tick(model),
        DeviceEvent::NewIpCheckTimeout => network::handle_new_ip_check_timeout(model),
        DeviceEvent::NewIpCheckResponse(result) => {
            network::handle_new_ip_check_response(result, model)
        }
        DeviceEvent::DismissNetworkChange => network::handle_dismiss_network_change(model),

        DeviceEvent::Acknowledge(kind) => acknowledgement::handle_acknowledge(kind, model),
        DeviceEvent::AcknowledgeResponse { kind, result } => {
            acknowledgement::handle_acknowledge_response(kind, result, model)
        }
    }
}
