use crate::acknowledgement::AcknowledgementTracker;
use crate::config::CoreConfig;
use crate::http_helpers::HttpError;
use crate::types::*;

/// Complete core state, mutated only by the reducer.
///
/// `config` and `acknowledgements` are the reducer's environment. `config`
/// only changes through `Event::Configure`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Model {
    pub config: CoreConfig,
    pub acknowledgements: AcknowledgementTracker,

    // Device state
    pub system_info: Option<SystemInfo>,
    pub network_status: Option<NetworkStatus>,
    pub online_status: Option<OnlineStatus>,
    pub factory_reset: Option<FactoryReset>,
    pub update_validation_status: Option<UpdateValidationStatus>,
    pub update_manifest: Option<UpdateManifest>,
    pub timeouts: Option<Timeouts>,
    pub healthcheck: Option<HealthcheckInfo>,

    // Session
    pub auth_token: Option<String>,
    pub is_authenticated: bool,

    // UI state
    pub is_loading: bool,
    pub error_message: Option<String>,
    pub success_message: Option<String>,
    pub browser_hostname: Option<String>,

    pub is_connected: bool,

    // Device operation (reboot/factory reset/update reconnection)
    pub device_operation_state: DeviceOperationState,
    pub reconnection_attempt: u32,
    pub device_went_offline: bool,

    // Network change safety window and form
    pub network_change_state: NetworkChangeState,
    pub network_form_state: NetworkFormState,
    /// Due before submitting a change on the adapter the client uses
    pub rollback_prompt: Option<RollbackPrompt>,

    pub firmware_upload_state: UploadState,
    /// Overlay of device operations and firmware upload
    pub device_overlay: OverlaySpinnerState,
    /// Overlay of the network change window
    pub network_overlay: OverlaySpinnerState,
}

impl Model {
    pub fn new(config: CoreConfig, acknowledgements: AcknowledgementTracker) -> Self {
        Self {
            config,
            acknowledgements,
            ..Default::default()
        }
    }

    /// Drop the session; the backend restarts or rejected our token
    pub fn invalidate_session(&mut self) {
        self.is_authenticated = false;
        self.auth_token = None;
    }

    pub fn start_loading(&mut self) {
        self.is_loading = true;
        self.error_message = None;
    }

    pub fn stop_loading(&mut self) {
        self.is_loading = false;
        self.error_message = None;
    }

    pub fn set_error(&mut self, error: String) {
        self.is_loading = false;
        self.error_message = Some(error);
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    /// Report a failed request; 401 additionally ends the session
    pub fn handle_http_error(&mut self, error: HttpError) {
        if error.is_unauthorized() {
            log::warn!("session rejected by device: {error}");
            self.invalidate_session();
        }
        self.set_error(error.to_string());
    }

    pub fn set_success(&mut self, message: impl Into<String>) {
        self.is_loading = false;
        self.success_message = Some(message.into());
    }

    /// Overlay shown to the user; a device operation takes precedence
    pub fn overlay_spinner(&self) -> &OverlaySpinnerState {
        if self.device_overlay.is_visible() {
            &self.device_overlay
        } else {
            &self.network_overlay
        }
    }

    /// Adapter the browser is connected through, if it can be determined
    pub fn current_adapter(&self) -> Option<&DeviceNetwork> {
        self.network_status
            .as_ref()?
            .current_connection_adapter(self.browser_hostname.as_deref())
    }

    pub fn is_current_adapter(&self, adapter_name: &str) -> bool {
        self.current_adapter().is_some_and(|a| a.name == adapter_name)
    }
}
