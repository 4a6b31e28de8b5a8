use crux_core::Command;

use crate::events::{Event, UiEvent};
use crate::model::Model;
use crate::update_field;
use crate::Effect;

/// Handle UI-related events (clear messages, browser context)
pub fn handle(event: UiEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        UiEvent::ClearError => update_field!(model.error_message, None),
        UiEvent::ClearSuccess => update_field!(model.success_message, None),
        UiEvent::SetBrowserHostname(hostname) => {
            update_field!(model.browser_hostname, Some(hostname))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Shell;
    use crate::App;
    use crux_core::testing::AppTester;

    #[test]
    fn clear_messages() {
        let app = AppTester::<App>::default();
        let mut model = Model {
            error_message: Some("error".to_string()),
            success_message: Some("done".to_string()),
            ..Default::default()
        };

        let _command = app.update(Event::Ui(UiEvent::ClearError), &mut model);
        assert_eq!(model.error_message, None);
        assert_eq!(model.success_message.as_deref(), Some("done"));

        let _command = app.update(Event::Ui(UiEvent::ClearSuccess), &mut model);
        assert_eq!(model.success_message, None);
    }

    #[test]
    fn unchanged_field_does_not_render() {
        let mut model = Model::default();

        let shell = Shell::new(handle(UiEvent::ClearError, &mut model));

        assert_eq!(shell.renders, 0);
    }

    #[test]
    fn hostname_is_recorded() {
        let mut model = Model::default();

        let shell = Shell::new(handle(
            UiEvent::SetBrowserHostname("192.0.2.1".to_string()),
            &mut model,
        ));

        assert_eq!(shell.renders, 1);
        assert!(shell.http.is_empty());
        assert_eq!(model.browser_hostname.as_deref(), Some("192.0.2.1"));
    }
}
