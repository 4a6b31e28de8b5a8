use serde::{Deserialize, Serialize};
use serde_valid::Validate;
use std::collections::BTreeMap;
use std::net::Ipv4Addr;

/// Validate IPv4 address format; empty is accepted for optional fields
pub fn is_valid_ipv4(ip: &str) -> bool {
    ip.is_empty() || ip.parse::<Ipv4Addr>().is_ok()
}

/// Convert CIDR prefix length to dotted decimal subnet mask
pub fn cidr_to_subnet(cidr: u32) -> String {
    if cidr > 32 {
        return String::new();
    }
    let mask = u32::MAX.checked_shl(32 - cidr).unwrap_or(0);
    Ipv4Addr::from(mask).to_string()
}

/// Convert dotted decimal subnet mask to CIDR prefix length
pub fn subnet_to_cidr(subnet: &str) -> Option<u32> {
    let mask = u32::from(subnet.parse::<Ipv4Addr>().ok()?);
    // contiguous ones followed by zeros: the inverted mask plus one is a power of two
    let inverted = !mask;
    if inverted.wrapping_add(1) & inverted == 0 {
        Some(mask.count_ones())
    } else {
        None
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IpAddress {
    pub addr: String,
    pub dhcp: bool,
    pub prefix_len: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InternetProtocol {
    pub addrs: Vec<IpAddress>,
    pub dns: Vec<String>,
    pub gateways: Vec<String>,
}

/// Network adapter as reported by the device
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeviceNetwork {
    pub ipv4: InternetProtocol,
    pub mac: String,
    pub name: String,
    pub online: bool,
    #[serde(default)]
    pub file: Option<String>,
}

/// Adapter list pushed on the `NetworkStatusV1` channel
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStatus {
    pub network_status: Vec<DeviceNetwork>,
}

impl NetworkStatus {
    pub fn adapter(&self, name: &str) -> Option<&DeviceNetwork> {
        self.network_status.iter().find(|a| a.name == name)
    }

    /// Find the adapter the browser reached us through.
    ///
    /// Only literal addresses can be matched; a DNS name yields `None`.
    pub fn current_connection_adapter(
        &self,
        browser_hostname: Option<&str>,
    ) -> Option<&DeviceNetwork> {
        let hostname = browser_hostname?;
        let is_loopback = |addr: &str| addr == "localhost" || addr == "127.0.0.1";

        self.network_status
            .iter()
            .find(|a| a.ipv4.addrs.iter().any(|ip| ip.addr == hostname))
            .or_else(|| {
                if !is_loopback(hostname) {
                    return None;
                }
                self.network_status
                    .iter()
                    .find(|a| a.ipv4.addrs.iter().any(|ip| is_loopback(&ip.addr)))
            })
    }
}

/// Body of `POST /network`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfigRequest {
    pub is_server_addr: bool,
    pub ip_changed: bool,
    #[validate(min_length = 1)]
    pub name: String,
    pub dhcp: bool,
    pub ip: Option<String>,
    pub previous_ip: Option<String>,
    #[validate(maximum = 32)]
    pub netmask: Option<u32>,
    pub gateway: Vec<String>,
    pub dns: Vec<String>,
    /// Operator's answer to the rollback prompt; `None` when no prompt was due
    #[serde(default)]
    pub enable_rollback: Option<bool>,
    #[serde(default)]
    pub switching_to_dhcp: bool,
}

/// Response of `POST /network`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SetNetworkConfigResponse {
    pub rollback_timeout_seconds: u64,
    pub ui_port: u16,
    pub rollback_enabled: bool,
}

/// Editable fields of one adapter
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NetworkFormData {
    pub name: String,
    pub ip_address: String,
    pub dhcp: bool,
    pub subnet_mask: String,
    pub dns: Vec<String>,
    pub gateways: Vec<String>,
}

impl From<&DeviceNetwork> for NetworkFormData {
    fn from(adapter: &DeviceNetwork) -> Self {
        let addr = adapter.ipv4.addrs.first();
        Self {
            name: adapter.name.clone(),
            ip_address: addr.map(|a| a.addr.clone()).unwrap_or_default(),
            dhcp: addr.is_some_and(|a| a.dhcp),
            subnet_mask: cidr_to_subnet(addr.map_or(24, |a| a.prefix_len)),
            dns: adapter.ipv4.dns.clone(),
            gateways: adapter.ipv4.gateways.clone(),
        }
    }
}

impl NetworkFormData {
    /// Per-field validation errors keyed by form field name
    pub fn validate_fields(&self) -> BTreeMap<String, String> {
        let mut errors = BTreeMap::new();

        if !self.dhcp {
            if self.ip_address.is_empty() || !is_valid_ipv4(&self.ip_address) {
                errors.insert("ipAddress".to_string(), "Invalid IPv4-Address".to_string());
            }
            if subnet_to_cidr(&self.subnet_mask).is_none() {
                errors.insert("subnetMask".to_string(), "Invalid Subnet Mask".to_string());
            }
        }
        if !self.gateways.iter().all(|g| is_valid_ipv4(g)) {
            errors.insert("gateways".to_string(), "Invalid Gateway".to_string());
        }
        if !self.dns.iter().all(|d| is_valid_ipv4(d)) {
            errors.insert("dns".to_string(), "Invalid DNS Server".to_string());
        }

        errors
    }

    /// Static to DHCP on the same adapter
    pub fn switches_to_dhcp(&self, original: &Self) -> bool {
        self.dhcp && !original.dhcp
    }

    /// The address the device will answer on changes (static target only)
    pub fn ip_changed(&self, original: &Self) -> bool {
        !self.dhcp && (original.dhcp || self.ip_address != original.ip_address)
    }

    pub fn to_request(
        &self,
        original: &Self,
        is_server_addr: bool,
        enable_rollback: Option<bool>,
    ) -> NetworkConfigRequest {
        NetworkConfigRequest {
            is_server_addr,
            ip_changed: self.ip_changed(original),
            name: self.name.clone(),
            dhcp: self.dhcp,
            ip: (!self.dhcp).then(|| self.ip_address.clone()),
            previous_ip: Some(original.ip_address.clone()).filter(|ip| !ip.is_empty()),
            netmask: if self.dhcp {
                None
            } else {
                subnet_to_cidr(&self.subnet_mask)
            },
            gateway: self.gateways.clone(),
            dns: self.dns.clone(),
            enable_rollback,
            switching_to_dhcp: self.switches_to_dhcp(original),
        }
    }
}

/// Default for the rollback checkbox offered before a change on the adapter
/// the client is connected through.
///
/// Switching to DHCP leaves the new address unknown, so it cannot be verified
/// before the rollback window closes; every other change has a known target.
pub fn default_rollback_enabled(original: &NetworkFormData, edited: &NetworkFormData) -> bool {
    !edited.switches_to_dhcp(original)
}

/// Prompt the operator must answer before a change on the connected adapter
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RollbackPrompt {
    pub default_enabled: bool,
}

/// Reachability change captured at submit time, applied once the device accepts it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PendingIpChange {
    pub new_ip: String,
    pub switching_to_dhcp: bool,
    pub rollback_enabled: bool,
}

/// State of the network form.
///
/// `dirty` is the single arbiter between operator edits and live
/// `NetworkStatusV1` pushes: while set, pushed data never touches `form_data`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum NetworkFormState {
    #[default]
    NotEditing,
    Editing {
        adapter_name: String,
        form_data: NetworkFormData,
        /// Last known adapter state the form is compared against
        original_data: NetworkFormData,
        dirty: bool,
        #[serde(default)]
        errors: BTreeMap<String, String>,
    },
    Submitting {
        adapter_name: String,
        form_data: NetworkFormData,
        original_data: NetworkFormData,
        pending_change: Option<PendingIpChange>,
    },
}

impl NetworkFormState {
    /// Fresh, clean form for an adapter
    pub fn editing(adapter: &DeviceNetwork) -> Self {
        let data = NetworkFormData::from(adapter);
        Self::Editing {
            adapter_name: adapter.name.clone(),
            form_data: data.clone(),
            original_data: data,
            dirty: false,
            errors: BTreeMap::new(),
        }
    }

    pub fn adapter_name(&self) -> Option<&str> {
        match self {
            Self::NotEditing => None,
            Self::Editing { adapter_name, .. } | Self::Submitting { adapter_name, .. } => {
                Some(adapter_name)
            }
        }
    }

    pub fn is_dirty(&self) -> bool {
        matches!(self, Self::Editing { dirty: true, .. })
    }

    /// Back to editing after a rejected submit, keeping the operator's values
    pub fn to_editing(&self) -> Option<Self> {
        if let Self::Submitting {
            adapter_name,
            form_data,
            original_data,
            ..
        } = self
        {
            Some(Self::Editing {
                adapter_name: adapter_name.clone(),
                form_data: form_data.clone(),
                original_data: original_data.clone(),
                dirty: form_data != original_data,
                errors: BTreeMap::new(),
            })
        } else {
            None
        }
    }
}

/// Safety window after a change that altered the client's own reachability
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum NetworkChangeState {
    #[default]
    Idle,
    /// Polling the new address until it answers or the window closes
    WaitingForNewIp {
        new_ip: String,
        ui_port: u16,
        switching_to_dhcp: bool,
    },
    /// Window closed without an answer; needs explicit dismissal
    NewIpTimeout { new_ip: String, ui_port: u16 },
}

impl NetworkChangeState {
    pub fn is_waiting(&self) -> bool {
        matches!(self, Self::WaitingForNewIp { .. })
    }
}
