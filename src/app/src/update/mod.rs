mod auth;
mod device;
mod ui;
mod websocket;

use crux_core::{render::render, Command};

use crate::config::CoreConfig;
use crate::events::Event;
use crate::http_get;
use crate::http_helpers::build_url;
use crate::model::Model;
use crate::types::HealthcheckInfo;
use crate::Effect;

/// Main update dispatcher - routes events to domain-specific handlers
pub fn update(event: Event, model: &mut Model) -> Command<Effect, Event> {
    match event {
        Event::Initialize => http_get!(
            Device,
            DeviceEvent,
            build_url("/healthcheck"),
            HealthcheckResponse,
            "Healthcheck",
            expect_json: HealthcheckInfo
        ),
        Event::Configure(config) => handle_configure(config, model),
        Event::Auth(event) => auth::handle(event, model),
        Event::Device(event) => device::handle(event, model),
        Event::WebSocket(event) => websocket::handle(event, model),
        Event::Ui(event) => ui::handle(event, model),
    }
}

/// New timings apply to timers scheduled from now on
fn handle_configure(config: CoreConfig, model: &mut Model) -> Command<Effect, Event> {
    match config.check() {
        Ok(()) => {
            log::info!("core configured: {config:?}");
            model.config = config;
        }
        Err(e) => {
            log::error!("{e}");
            model.set_error(e.to_string());
        }
    }
    render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::DeviceEvent;
    use crate::testing::{json, Shell};
    use crate::App;
    use crux_core::testing::AppTester;

    #[test]
    fn initialize_requests_startup_healthcheck() {
        let mut model = Model::default();

        let mut shell = Shell::new(update(Event::Initialize, &mut model));

        assert_eq!(shell.urls(), vec!["https://relative/healthcheck"]);
        assert!(!model.is_loading);

        let events = shell.respond_last(json(&HealthcheckInfo::default()));
        assert_eq!(
            events,
            vec![Event::Device(DeviceEvent::HealthcheckResponse(Ok(
                HealthcheckInfo::default()
            )))]
        );
    }

    #[test]
    fn configure_replaces_timings() {
        let app = AppTester::<App>::default();
        let mut model = Model::default();
        let config = CoreConfig {
            new_ip_timeout_ms: 30_000,
            ..Default::default()
        };

        let _command = app.update(Event::Configure(config.clone()), &mut model);

        assert_eq!(model.config, config);
        assert_eq!(model.error_message, None);
    }

    #[test]
    fn configure_rejects_zero_interval() {
        let app = AppTester::<App>::default();
        let mut model = Model::default();

        let _command = app.update(
            Event::Configure(CoreConfig {
                reconnection_poll_interval_ms: 0,
                ..Default::default()
            }),
            &mut model,
        );

        assert_eq!(model.config, CoreConfig::default());
        assert!(model
            .error_message
            .as_deref()
            .is_some_and(|e| e.starts_with("Invalid core config")));
    }
}
