use serde::{Deserialize, Serialize};

/// Operating system information
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OsInfo {
    pub name: String,
    pub version: String,
}

/// System information pushed on the `SystemInfo` channel
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SystemInfo {
    pub os: OsInfo,
    pub azure_sdk_version: String,
    pub omnect_device_service_version: String,
    pub boot_time: Option<String>,
}

/// Cloud connectivity pushed on the `OnlineStatus` channel
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OnlineStatus {
    pub iothub: bool,
}

/// Duration as reported by the device service
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Duration {
    pub nanos: u32,
    pub secs: u64,
}

/// Timeout configuration pushed on the `Timeouts` channel
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Timeouts {
    pub wait_online_timeout: Duration,
}

/// Blocking overlay shown while a disruptive operation is in flight
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OverlaySpinnerState {
    overlay: bool,
    title: String,
    text: Option<String>,
    timed_out: bool,
    progress: Option<u8>,
    countdown_seconds: Option<u32>,
}

impl OverlaySpinnerState {
    /// Create a visible overlay with the given title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            overlay: true,
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_progress(mut self, progress: u8) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Show a countdown, typically the deadline of the operation's timeout timer
    pub fn with_countdown(mut self, seconds: u32) -> Self {
        self.countdown_seconds = Some(seconds);
        self
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    pub fn set_progress(&mut self, progress: u8) {
        self.progress = Some(progress.min(100));
    }

    /// Switch to the timed-out presentation; the countdown is no longer meaningful
    pub fn set_timed_out(&mut self) {
        self.timed_out = true;
        self.countdown_seconds = None;
    }

    pub fn is_visible(&self) -> bool {
        self.overlay
    }

    /// Reset to the hidden default
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn progress(&self) -> Option<u8> {
        self.progress
    }

    pub fn timed_out(&self) -> bool {
        self.timed_out
    }

    pub fn countdown_seconds(&self) -> Option<u32> {
        self.countdown_seconds
    }
}
