mod config;
mod form;
mod verification;

pub use config::{handle_network_form_submit, handle_set_network_config_response};
pub use form::{
    handle_network_form_cancel, handle_network_form_reset, handle_network_form_start_edit,
    handle_network_form_update,
};
pub use verification::{
    handle_dismiss_network_change, handle_new_ip_check_response, handle_new_ip_check_timeout,
    handle_new_ip_check_tick,
};

use crux_core::{render::render, Command};

use crate::events::Event;
use crate::http_helpers::HttpError;
use crate::model::Model;
use crate::types::{NetworkFormState, NetworkStatus};
use crate::{auth_post, handle_response, Effect};

/*
  Editing ──submit──▶ Submitting ──rejected──▶ Editing (dirty)
                           │
                        accepted
                           │
         ┌─────────────────┴──────────────────┐
   other adapter /                    client's own adapter
   no address change                           │
         │                                     ▼
        Idle                            WaitingForNewIp
                                               │
                      ┌────────────────────────┴───────┐
               (new IP answers)                    (timeout)
                      │                                │
                      ▼                                ▼
              Idle + redirect                     NewIpTimeout ──dismiss──▶ Idle
*/

/// `NetworkStatusV1` publication: keep a clean form in sync and refresh
/// the rollback prompt, since the client's adapter may have changed.
pub fn handle_network_status_update(
    status: NetworkStatus,
    model: &mut Model,
) -> Command<Effect, Event> {
    model.network_status = Some(status);
    form::refresh_clean_form(model);

    model.rollback_prompt = match &model.network_form_state {
        NetworkFormState::Editing {
            adapter_name,
            form_data,
            original_data,
            ..
        } => form::rollback_prompt_for(adapter_name, form_data, original_data, model),
        _ => model.rollback_prompt,
    };
    render()
}

/// Ask the device service to re-apply its current network configuration
pub fn handle_reload_network(model: &mut Model) -> Command<Effect, Event> {
    auth_post!(Device, DeviceEvent, model, "/reload-network", ReloadNetworkResponse, "Reload network")
}

pub fn handle_reload_network_response(
    result: Result<(), HttpError>,
    model: &mut Model,
) -> Command<Effect, Event> {
    handle_response!(model, result, {
        success_message: "Network reloaded",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ok, status as http_status, Shell};
    use crate::types::{DeviceNetwork, InternetProtocol, IpAddress};
    use crate::App;
    use crux_core::testing::AppTester;

    fn status(ip: &str) -> NetworkStatus {
        NetworkStatus {
            network_status: vec![DeviceNetwork {
                name: "eth0".to_string(),
                online: true,
                ipv4: InternetProtocol {
                    addrs: vec![IpAddress {
                        addr: ip.to_string(),
                        dhcp: false,
                        prefix_len: 24,
                    }],
                    dns: vec![],
                    gateways: vec![],
                },
                ..Default::default()
            }],
        }
    }

    #[test]
    fn status_update_without_form_only_stores_status() {
        let mut model = Model::default();

        let _command = handle_network_status_update(status("192.0.2.1"), &mut model);

        assert_eq!(model.network_status, Some(status("192.0.2.1")));
        assert_eq!(model.network_form_state, NetworkFormState::NotEditing);
    }

    #[test]
    fn status_update_reevaluates_prompt_for_dirty_form() {
        let mut model = Model {
            browser_hostname: Some("192.0.2.1".to_string()),
            ..Default::default()
        };
        let _command = handle_network_status_update(status("198.51.100.1"), &mut model);
        let _command = handle_network_form_start_edit("eth0".to_string(), &mut model);
        let mut edited = match &model.network_form_state {
            NetworkFormState::Editing { form_data, .. } => form_data.clone(),
            other => panic!("expected editing, got {other:?}"),
        };
        edited.dns = vec!["192.0.2.53".to_string()];
        let _command = handle_network_form_update(edited, &mut model);
        assert_eq!(model.rollback_prompt, None);

        // the adapter now carries the address the browser uses
        let _command = handle_network_status_update(status("192.0.2.1"), &mut model);

        assert!(model.network_form_state.is_dirty());
        assert!(model.rollback_prompt.is_some());
        let NetworkFormState::Editing { form_data, .. } = &model.network_form_state else {
            panic!("expected editing");
        };
        assert_eq!(
            form_data.dns,
            vec!["192.0.2.53".to_string()],
            "dirty form keeps its edits"
        );
    }

    mod reload {
        use super::*;

        fn authenticated() -> Model {
            Model {
                auth_token: Some("token".to_string()),
                is_authenticated: true,
                ..Default::default()
            }
        }

        #[test]
        fn reload_posts_with_bearer_token() {
            let mut model = authenticated();

            let shell = Shell::new(handle_reload_network(&mut model));

            assert_eq!(shell.urls(), vec!["https://relative/reload-network"]);
            assert_eq!(shell.header(0, "Authorization"), Some("Bearer token"));
            assert!(model.is_loading);
        }

        #[test]
        fn reload_without_session_reports_error() {
            let mut model = Model::default();

            let shell = Shell::new(handle_reload_network(&mut model));

            assert!(shell.is_empty());
            assert_eq!(
                model.error_message.as_deref(),
                Some("Reload network failed: Not authenticated")
            );
        }

        #[test]
        fn successful_reload_sets_message() {
            let app = AppTester::<App>::default();
            let mut model = authenticated();
            let mut shell = Shell::new(handle_reload_network(&mut model));

            for event in shell.respond_last(ok("")) {
                let _command = app.update(event, &mut model);
            }

            assert!(!model.is_loading);
            assert_eq!(model.success_message.as_deref(), Some("Network reloaded"));
        }

        #[test]
        fn failed_reload_reports_error() {
            let app = AppTester::<App>::default();
            let mut model = authenticated();
            let mut shell = Shell::new(handle_reload_network(&mut model));

            for event in shell.respond_last(http_status(500)) {
                let _command = app.update(event, &mut model);
            }

            assert_eq!(model.success_message, None);
            assert!(model
                .error_message
                .as_deref()
                .is_some_and(|e| e.starts_with("Reload network failed")));
        }
    }
}
