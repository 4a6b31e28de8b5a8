use serde::{Deserialize, Serialize};
use serde_valid::Validate;

/// Terminal outcome of a firmware update
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum UpdateOutcome {
    Applied,
    /// The new image failed validation and the device booted the previous one
    RolledBack,
}

/// Update validation status, pushed on `UpdateValidationStatusV1` and
/// embedded in the healthcheck payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateValidationStatus {
    pub status: String,
}

impl UpdateValidationStatus {
    pub fn outcome(&self) -> Option<UpdateOutcome> {
        match self.status.as_str() {
            "Succeeded" => Some(UpdateOutcome::Applied),
            "Recovered" => Some(UpdateOutcome::RolledBack),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome().is_some()
    }
}

/// Version compatibility between UI and device service
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VersionInfo {
    pub required: String,
    pub current: String,
    pub mismatch: bool,
}

/// `GET /healthcheck` payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HealthcheckInfo {
    pub version_info: VersionInfo,
    pub update_validation_status: UpdateValidationStatus,
    #[serde(default)]
    pub network_rollback_occurred: bool,
    #[serde(default)]
    pub factory_reset_result_acked: bool,
    #[serde(default)]
    pub update_validation_acked: bool,
}

/// Body of `POST /update/load`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct LoadUpdateRequest {
    #[validate(min_length = 1)]
    pub file_path: String,
}

/// Body of `POST /update/run`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunUpdateRequest {
    pub validate_iothub_connection: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateId {
    pub provider: String,
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Compatibility {
    pub manufacturer: String,
    pub model: String,
    pub compatibilityid: String,
}

/// Update manifest returned by `POST /update/load`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateManifest {
    pub update_id: UpdateId,
    pub is_deployable: bool,
    pub compatibility: Vec<Compatibility>,
    pub created_date_time: String,
    pub manifest_version: String,
}

/// Progress of the multipart upload the host performs against `update/file`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum UploadState {
    #[default]
    Idle,
    Uploading,
    Completed,
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_succeeded_and_recovered_are_terminal() {
        let status = |s: &str| UpdateValidationStatus {
            status: s.to_string(),
        };

        assert_eq!(status("Succeeded").outcome(), Some(UpdateOutcome::Applied));
        assert_eq!(
            status("Recovered").outcome(),
            Some(UpdateOutcome::RolledBack)
        );
        assert!(!status("NoUpdate").is_terminal());
        assert!(!status("ValidatingTrustedUpdate").is_terminal());
    }

    #[test]
    fn healthcheck_uses_camel_case_wire_names() {
        let json = r#"{
            "versionInfo": {"required": ">=1.0", "current": "1.1.0", "mismatch": false},
            "updateValidationStatus": {"status": "Recovered"},
            "networkRollbackOccurred": true,
            "factoryResetResultAcked": false,
            "updateValidationAcked": true
        }"#;

        let info: HealthcheckInfo = serde_json::from_str(json).unwrap();

        assert_eq!(info.version_info.current, "1.1.0");
        assert!(info.network_rollback_occurred);
        assert!(!info.factory_reset_result_acked);
        assert!(info.update_validation_acked);
        assert_eq!(
            info.update_validation_status.outcome(),
            Some(UpdateOutcome::RolledBack)
        );
    }

    #[test]
    fn healthcheck_flags_default_to_false() {
        let json = r#"{
            "versionInfo": {"required": "", "current": "", "mismatch": false},
            "updateValidationStatus": {"status": "NoUpdate"}
        }"#;

        let info: HealthcheckInfo = serde_json::from_str(json).unwrap();

        assert!(!info.network_rollback_occurred);
        assert!(!info.factory_reset_result_acked);
        assert!(!info.update_validation_acked);
    }
}
