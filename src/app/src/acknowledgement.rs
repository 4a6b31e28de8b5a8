//! Once-per-session suppression of terminal notifications.
//!
//! Each notification can be signalled twice: by the healthcheck snapshot taken
//! at startup and by live channel pushes or later healthchecks that repeat on
//! every reconnect. The tracker merges both and remembers what this session
//! has already dismissed.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::HealthcheckInfo;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AcknowledgementKind {
    NetworkRollback,
    FactoryResetResult,
    UpdateValidation,
}

impl AcknowledgementKind {
    pub const ALL: [AcknowledgementKind; 3] = [
        Self::NetworkRollback,
        Self::FactoryResetResult,
        Self::UpdateValidation,
    ];

    /// Backend endpoint recording the acknowledgement across sessions
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::NetworkRollback => "/ack-rollback",
            Self::FactoryResetResult => "/ack-factory-reset-result",
            Self::UpdateValidation => "/ack-update-validation",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::NetworkRollback => "Acknowledge rollback",
            Self::FactoryResetResult => "Acknowledge factory reset result",
            Self::UpdateValidation => "Acknowledge update validation",
        }
    }
}

/// Where an observation came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SignalSource {
    /// Healthcheck fetched once at startup
    Snapshot,
    /// Channel push or any later healthcheck
    Live,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Observed {
    pub value: bool,
    pub source: SignalSource,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
struct KindState {
    indicated: Option<Observed>,
    backend_acked: Option<Observed>,
    session_acked: bool,
}

/// Latest observation wins, except that a snapshot never replaces a live value
fn record(slot: &mut Option<Observed>, value: bool, source: SignalSource) {
    if matches!(
        (slot.as_ref().map(|o| o.source), source),
        (Some(SignalSource::Live), SignalSource::Snapshot)
    ) {
        log::debug!("ignoring stale snapshot value {value}");
        return;
    }
    *slot = Some(Observed { value, source });
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AcknowledgementTracker {
    kinds: BTreeMap<AcknowledgementKind, KindState>,
}

impl AcknowledgementTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self, kind: AcknowledgementKind) -> Option<&KindState> {
        self.kinds.get(&kind)
    }

    fn state_mut(&mut self, kind: AcknowledgementKind) -> &mut KindState {
        self.kinds.entry(kind).or_default()
    }

    /// A signal says the notification has something to show
    pub fn observe_indicated(&mut self, kind: AcknowledgementKind, value: bool, source: SignalSource) {
        record(&mut self.state_mut(kind).indicated, value, source);
    }

    /// The backend reports whether it already recorded an acknowledgement
    pub fn observe_backend_acked(
        &mut self,
        kind: AcknowledgementKind,
        value: bool,
        source: SignalSource,
    ) {
        record(&mut self.state_mut(kind).backend_acked, value, source);
    }

    /// Fold every acknowledgement relevant field of a healthcheck in
    pub fn observe_healthcheck(&mut self, info: &HealthcheckInfo, source: SignalSource) {
        self.observe_indicated(
            AcknowledgementKind::NetworkRollback,
            info.network_rollback_occurred,
            source,
        );
        self.observe_backend_acked(
            AcknowledgementKind::FactoryResetResult,
            info.factory_reset_result_acked,
            source,
        );
        if info.update_validation_status.is_terminal() {
            self.observe_indicated(AcknowledgementKind::UpdateValidation, true, source);
        }
        self.observe_backend_acked(
            AcknowledgementKind::UpdateValidation,
            info.update_validation_acked,
            source,
        );
    }

    pub fn should_show(&self, kind: AcknowledgementKind) -> bool {
        self.state(kind).is_some_and(|s| {
            s.indicated.is_some_and(|o| o.value)
                && !s.backend_acked.is_some_and(|o| o.value)
                && !s.session_acked
        })
    }

    pub fn is_acknowledged(&self, kind: AcknowledgementKind) -> bool {
        self.state(kind).is_some_and(|s| s.session_acked)
    }

    /// Mark as seen for this session. Returns `true` only on the first call
    /// of a cycle, so callers issue the backend acknowledgement once.
    pub fn acknowledge(&mut self, kind: AcknowledgementKind) -> bool {
        let state = self.state_mut(kind);
        let first = !state.session_acked;
        state.session_acked = true;
        first
    }

    /// A new operation of this kind was started; earlier signals and
    /// acknowledgements no longer describe it
    pub fn begin_cycle(&mut self, kind: AcknowledgementKind) {
        log::debug!("new acknowledgement cycle for {kind:?}");
        self.kinds.insert(kind, KindState::default());
    }
}
