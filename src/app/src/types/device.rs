use serde::{Deserialize, Serialize};

use crate::config::CoreConfig;

/// Disruptive device operation that ends with the device dropping off the network
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum DeviceOperation {
    Reboot,
    FactoryReset,
    Update,
}

impl DeviceOperation {
    pub fn label(self) -> &'static str {
        match self {
            Self::Reboot => "Reboot",
            Self::FactoryReset => "Factory Reset",
            Self::Update => "Update",
        }
    }

    /// Absolute deadline after which the device is considered lost
    pub fn timeout_ms(self, config: &CoreConfig) -> u64 {
        match self {
            Self::Reboot => config.reboot_timeout_ms,
            Self::FactoryReset => config.factory_reset_timeout_ms,
            Self::Update => config.update_timeout_ms,
        }
    }
}

/// State of long-running device operations (reboot, factory reset, update)
///
/// ```text
/// Idle -> Rebooting | FactoryResetting | Updating      (command accepted)
///      -> WaitingReconnection                          (first failed check)
///      -> ReconnectionSuccessful | ReconnectionFailed  (check ok | deadline)
///      -> Idle                                         (dismissed)
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum DeviceOperationState {
    #[default]
    Idle,
    Rebooting,
    FactoryResetting,
    /// Carries no operation kind; it is always `DeviceOperation::Update`
    Updating,
    WaitingReconnection {
        operation: DeviceOperation,
        attempt: u32,
    },
    ReconnectionSuccessful {
        operation: DeviceOperation,
        /// Only meaningful for updates: the device came back on the previous image
        update_rolled_back: bool,
    },
    ReconnectionFailed {
        operation: DeviceOperation,
        reason: String,
    },
}

impl DeviceOperationState {
    /// Initial state entered once the device accepted the command
    pub fn started(operation: DeviceOperation) -> Self {
        match operation {
            DeviceOperation::Reboot => Self::Rebooting,
            DeviceOperation::FactoryReset => Self::FactoryResetting,
            DeviceOperation::Update => Self::Updating,
        }
    }

    pub fn operation(&self) -> Option<DeviceOperation> {
        match self {
            Self::Idle => None,
            Self::Rebooting => Some(DeviceOperation::Reboot),
            Self::FactoryResetting => Some(DeviceOperation::FactoryReset),
            Self::Updating => Some(DeviceOperation::Update),
            Self::WaitingReconnection { operation, .. }
            | Self::ReconnectionSuccessful { operation, .. }
            | Self::ReconnectionFailed { operation, .. } => Some(*operation),
        }
    }

    /// True while reconnection polling and the deadline timer are running
    pub fn is_awaiting_reconnection(&self) -> bool {
        matches!(
            self,
            Self::Rebooting
                | Self::FactoryResetting
                | Self::Updating
                | Self::WaitingReconnection { .. }
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::ReconnectionSuccessful { .. } | Self::ReconnectionFailed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn started_maps_each_operation_to_its_state() {
        assert_eq!(
            DeviceOperationState::started(DeviceOperation::Reboot),
            DeviceOperationState::Rebooting
        );
        assert_eq!(
            DeviceOperationState::started(DeviceOperation::FactoryReset),
            DeviceOperationState::FactoryResetting
        );
        assert_eq!(
            DeviceOperationState::started(DeviceOperation::Update),
            DeviceOperationState::Updating
        );
    }

    #[test]
    fn operation_survives_waiting_and_terminal_states() {
        let waiting = DeviceOperationState::WaitingReconnection {
            operation: DeviceOperation::FactoryReset,
            attempt: 3,
        };
        let failed = DeviceOperationState::ReconnectionFailed {
            operation: DeviceOperation::Update,
            reason: "timeout".to_string(),
        };

        assert_eq!(waiting.operation(), Some(DeviceOperation::FactoryReset));
        assert_eq!(failed.operation(), Some(DeviceOperation::Update));
        assert_eq!(DeviceOperationState::Idle.operation(), None);
    }

    #[test]
    fn terminal_states_are_not_awaiting_reconnection() {
        let success = DeviceOperationState::ReconnectionSuccessful {
            operation: DeviceOperation::Reboot,
            update_rolled_back: false,
        };

        assert!(success.is_terminal());
        assert!(!success.is_awaiting_reconnection());
        assert!(DeviceOperationState::Rebooting.is_awaiting_reconnection());
        assert!(!DeviceOperationState::Idle.is_awaiting_reconnection());
    }

    #[test]
    fn timeouts_follow_config() {
        let config = CoreConfig::default();

        assert_eq!(DeviceOperation::Reboot.timeout_ms(&config), 300_000);
        assert_eq!(DeviceOperation::FactoryReset.timeout_ms(&config), 600_000);
        assert_eq!(DeviceOperation::Update.timeout_ms(&config), 300_000);
    }
}
