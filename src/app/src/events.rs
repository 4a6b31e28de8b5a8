use serde::{Deserialize, Serialize};
use std::fmt;

use crate::acknowledgement::AcknowledgementKind;
use crate::commands::CentrifugoOutput;
use crate::config::CoreConfig;
use crate::http_helpers::HttpError;
use crate::types::*;

/// Authentication events
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    Login {
        password: String,
    },
    Logout,
    UpdatePassword {
        current: String,
        password: String,
        password_repeat: String,
    },
    LoginResponse(Result<AuthToken, HttpError>),
    LogoutResponse(Result<(), HttpError>),
    UpdatePasswordResponse(Result<(), HttpError>),
}

impl fmt::Debug for AuthEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Login { .. } => f.debug_struct("Login").field("password", &"<redacted>").finish(),
            Self::Logout => write!(f, "Logout"),
            Self::UpdatePassword { .. } => f
                .debug_struct("UpdatePassword")
                .field("current", &"<redacted>")
                .field("password", &"<redacted>")
                .field("password_repeat", &"<redacted>")
                .finish(),
            Self::LoginResponse(result) => f
                .debug_tuple("LoginResponse")
                .field(&result.as_ref().map(|_| "<token>"))
                .finish(),
            Self::LogoutResponse(result) => f.debug_tuple("LogoutResponse").field(result).finish(),
            Self::UpdatePasswordResponse(result) => {
                f.debug_tuple("UpdatePasswordResponse").field(result).finish()
            }
        }
    }
}

/// Device operation, update, network and acknowledgement events
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum DeviceEvent {
    Reboot,
    FactoryResetRequest {
        mode: String,
        preserve: Vec<String>,
    },
    LoadUpdate {
        file_path: String,
    },
    RunUpdate {
        validate_iothub_connection: bool,
    },
    UploadStarted,
    UploadProgress(u8),
    UploadCompleted,
    UploadFailed(String),

    RebootResponse(Result<(), HttpError>),
    FactoryResetResponse(Result<(), HttpError>),
    LoadUpdateResponse(Result<UpdateManifest, HttpError>),
    RunUpdateResponse(Result<(), HttpError>),
    HealthcheckResponse(Result<HealthcheckInfo, HttpError>),

    ReconnectionCheckTick,
    ReconnectionTimeout,
    ReconnectionCheckResponse(Result<HealthcheckInfo, HttpError>),
    DismissOperationResult,

    NetworkFormStartEdit {
        adapter_name: String,
    },
    NetworkFormUpdate(NetworkFormData),
    /// Discard edits and reload the form from the last known adapter state
    NetworkFormReset,
    NetworkFormCancel,
    /// `enable_rollback` answers the rollback prompt when one is due
    NetworkFormSubmit {
        enable_rollback: Option<bool>,
    },
    SetNetworkConfigResponse(Result<SetNetworkConfigResponse, HttpError>),
    /// Ask the device service to re-apply its network configuration
    ReloadNetwork,
    ReloadNetworkResponse(Result<(), HttpError>),
    NewIpCheckTick,
    NewIpCheckTimeout,
    NewIpCheckResponse(Result<(), HttpError>),
    DismissNetworkChange,

    Acknowledge(AcknowledgementKind),
    AcknowledgeResponse {
        kind: AcknowledgementKind,
        result: Result<(), HttpError>,
    },
}

/// Real-time channel events
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum WebSocketEvent {
    SubscribeToChannels,
    UnsubscribeFromChannels,
    /// Live publication on a subscribed channel
    ChannelMessage {
        channel: String,
        data: String,
    },
    /// Shell's answer to a subscribe, unsubscribe or history request
    CentrifugoResponse(CentrifugoOutput),
    Connected,
    Disconnected,
}

/// UI-only events
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum UiEvent {
    ClearError,
    ClearSuccess,
    /// Host name the browser used to reach the device
    SetBrowserHostname(String),
}

/// Everything the reducer reacts to
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum Event {
    Initialize,
    /// Replace the timing configuration; rejected if invalid
    Configure(CoreConfig),
    Auth(AuthEvent),
    Device(DeviceEvent),
    WebSocket(WebSocketEvent),
    Ui(UiEvent),
}
