use crux_core::{render::render, Command};

use crate::events::Event;
use crate::model::Model;
use crate::types::{default_rollback_enabled, NetworkFormData, NetworkFormState, RollbackPrompt};
use crate::Effect;

/// Prompt is due for any pending edit on the adapter the client uses
pub(super) fn rollback_prompt_for(
    adapter_name: &str,
    form_data: &NetworkFormData,
    original_data: &NetworkFormData,
    model: &Model,
) -> Option<RollbackPrompt> {
    if form_data == original_data || !model.is_current_adapter(adapter_name) {
        return None;
    }
    Some(RollbackPrompt {
        default_enabled: default_rollback_enabled(original_data, form_data),
    })
}

/// Load the form from the adapter's current state, dropping any edits
fn load_form(adapter_name: &str, model: &mut Model) -> bool {
    let Some(adapter) = model
        .network_status
        .as_ref()
        .and_then(|status| status.adapter(adapter_name))
    else {
        return false;
    };

    model.network_form_state = NetworkFormState::editing(adapter);
    model.rollback_prompt = None;
    true
}

pub fn handle_network_form_start_edit(
    adapter_name: String,
    model: &mut Model,
) -> Command<Effect, Event> {
    if !load_form(&adapter_name, model) {
        log::warn!("edit requested for unknown adapter {adapter_name}");
        model.set_error(format!("Unknown network adapter: {adapter_name}"));
    }
    render()
}

pub fn handle_network_form_update(
    form_data: NetworkFormData,
    model: &mut Model,
) -> Command<Effect, Event> {
    let NetworkFormState::Editing {
        adapter_name,
        original_data,
        ..
    } = &model.network_form_state
    else {
        log::warn!("form update outside of editing");
        return Command::done();
    };

    if *adapter_name != form_data.name {
        log::debug!("ignoring update for inactive adapter {}", form_data.name);
        return Command::done();
    }

    let adapter_name = adapter_name.clone();
    let original_data = original_data.clone();
    let errors = form_data.validate_fields();
    let dirty = form_data != original_data;

    model.rollback_prompt = rollback_prompt_for(&adapter_name, &form_data, &original_data, model);
    model.network_form_state = NetworkFormState::Editing {
        adapter_name,
        form_data,
        original_data,
        dirty,
        errors,
    };
    render()
}

/// Discard edits and reload from the last known adapter state
pub fn handle_network_form_reset(model: &mut Model) -> Command<Effect, Event> {
    let Some(adapter_name) = model.network_form_state.adapter_name().map(str::to_string) else {
        return Command::done();
    };
    if matches!(model.network_form_state, NetworkFormState::Submitting { .. }) {
        log::warn!("cannot discard while submitting");
        return Command::done();
    }
    if !load_form(&adapter_name, model) {
        model.network_form_state = NetworkFormState::NotEditing;
        model.rollback_prompt = None;
    }
    render()
}

pub fn handle_network_form_cancel(model: &mut Model) -> Command<Effect, Event> {
    if matches!(model.network_form_state, NetworkFormState::Submitting { .. }) {
        log::warn!("cannot cancel while submitting");
        return Command::done();
    }
    model.network_form_state = NetworkFormState::NotEditing;
    model.rollback_prompt = None;
    render()
}

/// Live adapter data arrived: a clean form follows it, a dirty one is left alone
pub fn refresh_clean_form(model: &mut Model) {
    let NetworkFormState::Editing {
        adapter_name,
        dirty: false,
        ..
    } = &model.network_form_state
    else {
        return;
    };
    let adapter_name = adapter_name.clone();
    if !load_form(&adapter_name, model) {
        log::warn!("adapter {adapter_name} vanished while editing");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DeviceNetwork, InternetProtocol, IpAddress, NetworkStatus};

    fn adapter(name: &str, ip: &str, dhcp: bool) -> DeviceNetwork {
        DeviceNetwork {
            name: name.to_string(),
            mac: "00:11:22:33:44:55".to_string(),
            online: true,
            file: None,
            ipv4: InternetProtocol {
                addrs: vec![IpAddress {
                    addr: ip.to_string(),
                    dhcp,
                    prefix_len: 24,
                }],
                dns: vec!["192.0.2.53".to_string()],
                gateways: vec!["192.0.2.254".to_string()],
            },
        }
    }

    fn model_with(adapters: Vec<DeviceNetwork>, hostname: Option<&str>) -> Model {
        Model {
            network_status: Some(NetworkStatus {
                network_status: adapters,
            }),
            browser_hostname: hostname.map(str::to_string),
            ..Default::default()
        }
    }

    fn form_data(model: &Model) -> &NetworkFormData {
        match &model.network_form_state {
            NetworkFormState::Editing { form_data, .. } => form_data,
            other => panic!("expected editing, got {other:?}"),
        }
    }

    mod editing {
        use super::*;

        #[test]
        fn start_edit_loads_clean_form() {
            let mut model = model_with(vec![adapter("eth0", "192.0.2.1", false)], None);

            let _command = handle_network_form_start_edit("eth0".to_string(), &mut model);

            assert!(!model.network_form_state.is_dirty());
            assert_eq!(form_data(&model).ip_address, "192.0.2.1");
            assert_eq!(form_data(&model).subnet_mask, "255.255.255.0");
        }

        #[test]
        fn start_edit_for_unknown_adapter_reports_error() {
            let mut model = model_with(vec![], None);

            let _command = handle_network_form_start_edit("eth9".to_string(), &mut model);

            assert_eq!(model.network_form_state, NetworkFormState::NotEditing);
            assert!(model.error_message.is_some());
        }

        #[test]
        fn changed_field_sets_dirty_and_validates() {
            let mut model = model_with(vec![adapter("eth0", "192.0.2.1", false)], None);
            let _command = handle_network_form_start_edit("eth0".to_string(), &mut model);
            let mut edited = form_data(&model).clone();
            edited.ip_address = "192.0.2.999".to_string();

            let _command = handle_network_form_update(edited, &mut model);

            let NetworkFormState::Editing { dirty, errors, .. } = &model.network_form_state else {
                panic!("expected editing");
            };
            assert!(*dirty);
            assert!(errors.contains_key("ipAddress"));
        }

        #[test]
        fn reverting_edit_clears_dirty() {
            let mut model = model_with(vec![adapter("eth0", "192.0.2.1", false)], None);
            let _command = handle_network_form_start_edit("eth0".to_string(), &mut model);
            let original = form_data(&model).clone();
            let mut edited = original.clone();
            edited.dhcp = true;

            let _command = handle_network_form_update(edited, &mut model);
            let _command = handle_network_form_update(original, &mut model);

            assert!(!model.network_form_state.is_dirty());
        }

        #[test]
        fn update_for_other_adapter_is_ignored() {
            let mut model = model_with(
                vec![
                    adapter("eth0", "192.0.2.1", false),
                    adapter("wlan0", "198.51.100.1", false),
                ],
                None,
            );
            let _command = handle_network_form_start_edit("eth0".to_string(), &mut model);
            let other = NetworkFormData::from(&adapter("wlan0", "198.51.100.7", false));

            let _command = handle_network_form_update(other, &mut model);

            assert_eq!(form_data(&model).ip_address, "192.0.2.1");
            assert!(!model.network_form_state.is_dirty());
        }

        #[test]
        fn cancel_leaves_editing() {
            let mut model = model_with(vec![adapter("eth0", "192.0.2.1", false)], None);
            let _command = handle_network_form_start_edit("eth0".to_string(), &mut model);

            let _command = handle_network_form_cancel(&mut model);

            assert_eq!(model.network_form_state, NetworkFormState::NotEditing);
        }
    }

    mod live_updates {
        use super::*;

        #[test]
        fn clean_form_follows_live_data() {
            let mut model = model_with(vec![adapter("eth0", "192.0.2.1", false)], None);
            let _command = handle_network_form_start_edit("eth0".to_string(), &mut model);
            model.network_status = Some(NetworkStatus {
                network_status: vec![adapter("eth0", "192.0.2.50", false)],
            });

            refresh_clean_form(&mut model);

            assert_eq!(form_data(&model).ip_address, "192.0.2.50");
        }

        #[test]
        fn dirty_form_ignores_live_data_until_reset() {
            let mut model = model_with(vec![adapter("eth0", "192.0.2.1", false)], None);
            let _command = handle_network_form_start_edit("eth0".to_string(), &mut model);
            let mut edited = form_data(&model).clone();
            edited.ip_address = "192.0.2.7".to_string();
            let _command = handle_network_form_update(edited, &mut model);
            model.network_status = Some(NetworkStatus {
                network_status: vec![adapter("eth0", "192.0.2.50", false)],
            });

            refresh_clean_form(&mut model);
            assert_eq!(form_data(&model).ip_address, "192.0.2.7");

            let _command = handle_network_form_reset(&mut model);
            assert_eq!(form_data(&model).ip_address, "192.0.2.50");
            assert!(!model.network_form_state.is_dirty());
        }
    }

    mod rollback_prompt {
        use super::*;

        #[test]
        fn no_prompt_for_other_adapter() {
            let mut model = model_with(
                vec![
                    adapter("eth0", "192.0.2.1", false),
                    adapter("eth1", "198.51.100.1", false),
                ],
                Some("192.0.2.1"),
            );
            let _command = handle_network_form_start_edit("eth1".to_string(), &mut model);
            let mut edited = form_data(&model).clone();
            edited.dhcp = true;

            let _command = handle_network_form_update(edited, &mut model);

            assert_eq!(model.rollback_prompt, None);
        }

        #[test]
        fn static_to_dhcp_on_current_adapter_defaults_unchecked() {
            let mut model = model_with(vec![adapter("eth0", "192.0.2.1", false)], Some("192.0.2.1"));
            let _command = handle_network_form_start_edit("eth0".to_string(), &mut model);
            let mut edited = form_data(&model).clone();
            edited.dhcp = true;

            let _command = handle_network_form_update(edited, &mut model);

            assert_eq!(
                model.rollback_prompt,
                Some(RollbackPrompt {
                    default_enabled: false
                })
            );
        }

        #[test]
        fn dhcp_to_static_on_current_adapter_defaults_checked() {
            let mut model = model_with(vec![adapter("eth0", "192.0.2.1", true)], Some("192.0.2.1"));
            let _command = handle_network_form_start_edit("eth0".to_string(), &mut model);
            let mut edited = form_data(&model).clone();
            edited.dhcp = false;

            let _command = handle_network_form_update(edited, &mut model);

            assert_eq!(
                model.rollback_prompt,
                Some(RollbackPrompt {
                    default_enabled: true
                })
            );
        }

        #[test]
        fn unchanged_form_needs_no_prompt() {
            let mut model = model_with(vec![adapter("eth0", "192.0.2.1", false)], Some("192.0.2.1"));
            let _command = handle_network_form_start_edit("eth0".to_string(), &mut model);
            let unchanged = form_data(&model).clone();

            let _command = handle_network_form_update(unchanged, &mut model);

            assert_eq!(model.rollback_prompt, None);
        }
    }
}
