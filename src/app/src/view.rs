use serde::{Deserialize, Serialize};

use crate::acknowledgement::AcknowledgementKind;
use crate::model::Model;
use crate::types::*;

/// Terminal notifications the host should currently display
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Notifications {
    pub network_rollback: bool,
    pub factory_reset_result: bool,
    pub update_validation: bool,
}

/// Read-only projection of the model; the session token never leaves the core
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ViewModel {
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub error_message: Option<String>,
    pub success_message: Option<String>,
    pub is_connected: bool,

    pub system_info: Option<SystemInfo>,
    pub network_status: Option<NetworkStatus>,
    pub online_status: Option<OnlineStatus>,
    pub factory_reset: Option<FactoryReset>,
    pub update_validation_status: Option<UpdateValidationStatus>,
    pub update_manifest: Option<UpdateManifest>,
    pub timeouts: Option<Timeouts>,
    pub healthcheck: Option<HealthcheckInfo>,

    pub device_operation_state: DeviceOperationState,
    pub reconnection_attempt: u32,
    pub network_change_state: NetworkChangeState,
    pub network_form_state: NetworkFormState,
    pub rollback_prompt: Option<RollbackPrompt>,
    pub current_adapter_name: Option<String>,
    pub firmware_upload_state: UploadState,
    /// Device overlay if one is up, otherwise the network change overlay
    pub overlay_spinner: OverlaySpinnerState,
    pub notifications: Notifications,
}

pub fn view(model: &Model) -> ViewModel {
    let ack = &model.acknowledgements;

    ViewModel {
        is_authenticated: model.is_authenticated,
        is_loading: model.is_loading,
        error_message: model.error_message.clone(),
        success_message: model.success_message.clone(),
        is_connected: model.is_connected,
        system_info: model.system_info.clone(),
        network_status: model.network_status.clone(),
        online_status: model.online_status.clone(),
        factory_reset: model.factory_reset.clone(),
        update_validation_status: model.update_validation_status.clone(),
        update_manifest: model.update_manifest.clone(),
        timeouts: model.timeouts.clone(),
        healthcheck: model.healthcheck.clone(),
        device_operation_state: model.device_operation_state.clone(),
        reconnection_attempt: model.reconnection_attempt,
        network_change_state: model.network_change_state.clone(),
        network_form_state: model.network_form_state.clone(),
        rollback_prompt: model.rollback_prompt,
        current_adapter_name: model.current_adapter().map(|a| a.name.clone()),
        firmware_upload_state: model.firmware_upload_state.clone(),
        overlay_spinner: model.overlay_spinner().clone(),
        notifications: Notifications {
            network_rollback: ack.should_show(AcknowledgementKind::NetworkRollback),
            factory_reset_result: ack.should_show(AcknowledgementKind::FactoryResetResult),
            update_validation: ack.should_show(AcknowledgementKind::UpdateValidation),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acknowledgement::SignalSource;

    #[test]
    fn view_hides_token_and_projects_notifications() {
        let mut model = Model {
            auth_token: Some("secret-token".to_string()),
            is_authenticated: true,
            ..Default::default()
        };
        model.acknowledgements.observe_indicated(
            AcknowledgementKind::NetworkRollback,
            true,
            SignalSource::Live,
        );

        let view = view(&model);
        let json = serde_json::to_string(&view).unwrap();

        assert!(view.is_authenticated);
        assert!(view.notifications.network_rollback);
        assert!(!view.notifications.update_validation);
        assert!(!json.contains("secret-token"));
    }
}
