//! Wire format of device-service channel payloads.
//!
//! The device service publishes `snake_case` JSON (and numeric enums for the
//! factory reset result). Everything here is converted into the domain types
//! via `From` before it reaches the model.

use serde::{Deserialize, Serialize};
use serde_repr::Deserialize_repr;

use crate::types::{
    DeviceNetwork, Duration, FactoryReset, FactoryResetResult, FactoryResetStatus,
    InternetProtocol, IpAddress, NetworkStatus, OnlineStatus, OsInfo, SystemInfo, Timeouts,
    UpdateValidationStatus,
};

/// Named channels the core subscribes to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ChannelName {
    OnlineStatus,
    SystemInfo,
    Timeouts,
    NetworkStatusV1,
    FactoryResetV1,
    UpdateValidationStatusV1,
}

impl ChannelName {
    pub const ALL: [ChannelName; 6] = [
        Self::OnlineStatus,
        Self::SystemInfo,
        Self::Timeouts,
        Self::NetworkStatusV1,
        Self::FactoryResetV1,
        Self::UpdateValidationStatusV1,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::OnlineStatus => "OnlineStatus",
            Self::SystemInfo => "SystemInfo",
            Self::Timeouts => "Timeouts",
            Self::NetworkStatusV1 => "NetworkStatusV1",
            Self::FactoryResetV1 => "FactoryResetV1",
            Self::UpdateValidationStatusV1 => "UpdateValidationStatusV1",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct OdsOnlineStatus {
    pub iothub: bool,
}

impl From<OdsOnlineStatus> for OnlineStatus {
    fn from(wire: OdsOnlineStatus) -> Self {
        Self {
            iothub: wire.iothub,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct OdsOsInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct OdsSystemInfo {
    pub os: OdsOsInfo,
    pub azure_sdk_version: String,
    pub omnect_device_service_version: String,
    #[serde(default)]
    pub boot_time: Option<String>,
}

impl From<OdsSystemInfo> for SystemInfo {
    fn from(wire: OdsSystemInfo) -> Self {
        Self {
            os: OsInfo {
                name: wire.os.name,
                version: wire.os.version,
            },
            azure_sdk_version: wire.azure_sdk_version,
            omnect_device_service_version: wire.omnect_device_service_version,
            boot_time: wire.boot_time,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct OdsDuration {
    pub nanos: u32,
    pub secs: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct OdsTimeouts {
    pub wait_online_timeout: OdsDuration,
}

impl From<OdsTimeouts> for Timeouts {
    fn from(wire: OdsTimeouts) -> Self {
        Self {
            wait_online_timeout: Duration {
                nanos: wire.wait_online_timeout.nanos,
                secs: wire.wait_online_timeout.secs,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct OdsIpAddress {
    pub addr: String,
    pub dhcp: bool,
    pub prefix_len: u32,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct OdsInternetProtocol {
    pub addrs: Vec<OdsIpAddress>,
    pub dns: Vec<String>,
    pub gateways: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct OdsDeviceNetwork {
    pub ipv4: OdsInternetProtocol,
    pub mac: String,
    pub name: String,
    pub online: bool,
    #[serde(default)]
    pub file: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct OdsNetworkStatus {
    pub network_status: Vec<OdsDeviceNetwork>,
}

impl From<OdsNetworkStatus> for NetworkStatus {
    fn from(wire: OdsNetworkStatus) -> Self {
        let network_status = wire
            .network_status
            .into_iter()
            .map(|adapter| DeviceNetwork {
                ipv4: InternetProtocol {
                    addrs: adapter
                        .ipv4
                        .addrs
                        .into_iter()
                        .map(|a| IpAddress {
                            addr: a.addr,
                            dhcp: a.dhcp,
                            prefix_len: a.prefix_len,
                        })
                        .collect(),
                    dns: adapter.ipv4.dns,
                    gateways: adapter.ipv4.gateways,
                },
                mac: adapter.mac,
                name: adapter.name,
                online: adapter.online,
                file: adapter.file,
            })
            .collect();

        Self { network_status }
    }
}

/// Numeric result status as published by the device service
#[derive(Debug, Clone, Copy, Deserialize_repr, PartialEq, Eq)]
#[repr(u8)]
pub enum OdsFactoryResetResultStatus {
    ModeSupported = 0,
    ModeUnsupported = 1,
    BackupRestoreError = 2,
    ConfigurationError = 3,
}

impl From<OdsFactoryResetResultStatus> for FactoryResetStatus {
    fn from(wire: OdsFactoryResetResultStatus) -> Self {
        match wire {
            OdsFactoryResetResultStatus::ModeSupported => Self::ModeSupported,
            OdsFactoryResetResultStatus::ModeUnsupported => Self::ModeUnsupported,
            OdsFactoryResetResultStatus::BackupRestoreError => Self::BackupRestoreError,
            OdsFactoryResetResultStatus::ConfigurationError => Self::ConfigurationError,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct OdsFactoryResetResult {
    pub status: OdsFactoryResetResultStatus,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub paths: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct OdsFactoryReset {
    pub keys: Vec<String>,
    #[serde(default)]
    pub result: Option<OdsFactoryResetResult>,
}

impl From<OdsFactoryReset> for FactoryReset {
    fn from(wire: OdsFactoryReset) -> Self {
        Self {
            keys: wire.keys,
            result: wire.result.map(|r| FactoryResetResult {
                status: r.status.into(),
                context: r.context,
                error: r.error,
                paths: r.paths,
            }),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct OdsUpdateValidationStatus {
    pub status: String,
}

impl From<OdsUpdateValidationStatus> for UpdateValidationStatus {
    fn from(wire: OdsUpdateValidationStatus) -> Self {
        Self {
            status: wire.status,
        }
    }
}
