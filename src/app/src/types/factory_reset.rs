use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

/// Factory reset operation status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FactoryResetStatus {
    #[default]
    Unknown,
    ModeSupported,
    ModeUnsupported,
    BackupRestoreError,
    ConfigurationError,
}

/// Result of the last factory reset, reported after the device is back
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FactoryResetResult {
    pub status: FactoryResetStatus,
    pub context: Option<String>,
    pub error: String,
    pub paths: Vec<String>,
}

/// Factory reset state pushed on the `FactoryResetV1` channel
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FactoryReset {
    /// Keys that may be preserved across a reset
    pub keys: Vec<String>,
    #[serde(default)]
    pub result: Option<FactoryResetResult>,
}

impl FactoryReset {
    /// A finished reset left a result the operator has to see
    pub fn has_result(&self) -> bool {
        self.result
            .as_ref()
            .is_some_and(|r| r.status != FactoryResetStatus::Unknown)
    }
}

/// Wipe mode understood by the device service
#[derive(Debug, Clone, Copy, Default, Serialize_repr, Deserialize_repr, PartialEq, Eq)]
#[repr(u8)]
pub enum FactoryResetMode {
    #[default]
    Mode1 = 1,
    Mode2 = 2,
    Mode3 = 3,
    Mode4 = 4,
}

impl TryFrom<&str> for FactoryResetMode {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<u8>() {
            Ok(1) => Ok(Self::Mode1),
            Ok(2) => Ok(Self::Mode2),
            Ok(3) => Ok(Self::Mode3),
            Ok(4) => Ok(Self::Mode4),
            Ok(other) => Err(format!("Invalid factory reset mode: {other}")),
            Err(e) => Err(format!("Invalid factory reset mode: {e}")),
        }
    }
}

/// Body of `POST /factory-reset`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FactoryResetRequest {
    pub mode: FactoryResetMode,
    pub preserve: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parses_known_values() {
        assert_eq!(FactoryResetMode::try_from("1"), Ok(FactoryResetMode::Mode1));
        assert_eq!(FactoryResetMode::try_from(" 4 "), Ok(FactoryResetMode::Mode4));
    }

    #[test]
    fn mode_rejects_out_of_range_and_garbage() {
        assert!(FactoryResetMode::try_from("0").is_err());
        assert!(FactoryResetMode::try_from("5").is_err());
        assert!(FactoryResetMode::try_from("wipe").is_err());
    }

    #[test]
    fn request_serializes_mode_as_number() {
        let request = FactoryResetRequest {
            mode: FactoryResetMode::Mode2,
            preserve: vec!["network".to_string()],
        };

        let json = serde_json::to_string(&request).unwrap();

        assert_eq!(json, r#"{"mode":2,"preserve":["network"]}"#);
    }

    #[test]
    fn unknown_status_is_not_a_result() {
        let pending = FactoryReset {
            keys: vec![],
            result: Some(FactoryResetResult::default()),
        };
        let done = FactoryReset {
            keys: vec![],
            result: Some(FactoryResetResult {
                status: FactoryResetStatus::ModeSupported,
                ..Default::default()
            }),
        };

        assert!(!pending.has_result());
        assert!(done.has_result());
        assert!(!FactoryReset::default().has_result());
    }
}
