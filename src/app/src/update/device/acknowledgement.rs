use crux_core::{render::render, Command};

use crate::acknowledgement::{AcknowledgementKind, SignalSource};
use crate::events::{DeviceEvent, Event};
use crate::http_helpers::{build_url, process_status_response, HttpError};
use crate::model::Model;
use crate::types::{FactoryReset, UpdateValidationStatus};
use crate::{Effect, HttpCmd};

/// Dismiss a terminal notification. Only the first dismissal of a cycle
/// reaches the backend.
pub fn handle_acknowledge(kind: AcknowledgementKind, model: &mut Model) -> Command<Effect, Event> {
    if !model.acknowledgements.acknowledge(kind) {
        log::debug!("{kind:?} already acknowledged");
        return Command::done();
    }
    model.start_loading();
    Command::all([
        render(),
        HttpCmd::post(build_url(kind.endpoint()))
            .build()
            .then_send(move |result| {
                Event::Device(DeviceEvent::AcknowledgeResponse {
                    kind,
                    result: process_status_response(kind.label(), result),
                })
            }),
    ])
}

pub fn handle_acknowledge_response(
    kind: AcknowledgementKind,
    result: Result<(), HttpError>,
    model: &mut Model,
) -> Command<Effect, Event> {
    model.stop_loading();
    if let Err(e) = result {
        // the session-level acknowledgement stays; only persistence failed
        log::warn!("{}: {e}", kind.label());
    }
    render()
}

/// Live `FactoryResetV1` push
pub fn observe_factory_reset(reset: &FactoryReset, model: &mut Model) {
    model.acknowledgements.observe_indicated(
        AcknowledgementKind::FactoryResetResult,
        reset.has_result(),
        SignalSource::Live,
    );
}

/// Live `UpdateValidationStatusV1` push; only terminal statuses indicate
pub fn observe_update_validation(status: &UpdateValidationStatus, model: &mut Model) {
    if status.is_terminal() {
        model.acknowledgements.observe_indicated(
            AcknowledgementKind::UpdateValidation,
            true,
            SignalSource::Live,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{status, Shell};

    #[test]
    fn acknowledge_posts_once() {
        let mut model = Model::default();
        model.acknowledgements.observe_indicated(
            AcknowledgementKind::NetworkRollback,
            true,
            SignalSource::Snapshot,
        );

        let first = Shell::new(handle_acknowledge(
            AcknowledgementKind::NetworkRollback,
            &mut model,
        ));
        let second = Shell::new(handle_acknowledge(
            AcknowledgementKind::NetworkRollback,
            &mut model,
        ));

        assert_eq!(first.urls(), vec!["https://relative/ack-rollback"]);
        assert!(second.is_empty());
        assert!(!model
            .acknowledgements
            .should_show(AcknowledgementKind::NetworkRollback));
    }

    #[test]
    fn failed_persistence_keeps_session_ack() {
        let mut model = Model::default();
        let mut shell = Shell::new(handle_acknowledge(
            AcknowledgementKind::UpdateValidation,
            &mut model,
        ));

        let events = shell.respond_last(status(500));
        let Some(Event::Device(DeviceEvent::AcknowledgeResponse { kind, result })) =
            events.into_iter().next()
        else {
            panic!("expected acknowledgement response");
        };
        assert_eq!(kind, AcknowledgementKind::UpdateValidation);
        assert!(result.is_err());

        let _command = handle_acknowledge_response(kind, result, &mut model);

        assert!(model
            .acknowledgements
            .is_acknowledged(AcknowledgementKind::UpdateValidation));
        assert!(!model.is_loading);
    }

    #[test]
    fn non_terminal_validation_push_does_not_indicate() {
        let mut model = Model::default();

        observe_update_validation(
            &UpdateValidationStatus {
                status: "NoUpdate".to_string(),
            },
            &mut model,
        );

        assert!(!model
            .acknowledgements
            .should_show(AcknowledgementKind::UpdateValidation));
    }
}
