use crux_core::{render::render, Command};

use crate::acknowledgement::AcknowledgementKind;
use crate::commands::TimerId;
use crate::config::countdown_seconds;
use crate::events::Event;
use crate::http_get;
use crate::http_helpers::HttpError;
use crate::model::Model;
use crate::types::{
    NetworkChangeState, OverlaySpinnerState, PendingIpChange, SetNetworkConfigResponse,
};
use crate::{Effect, RedirectCmd, TimerCmd};

fn cancel_new_ip_timers() -> Command<Effect, Event> {
    Command::all([
        TimerCmd::cancel(TimerId::NewIpCheck),
        TimerCmd::cancel(TimerId::NewIpTimeout),
    ])
}

fn overlay_text(switching_to_dhcp: bool, rollback_enabled: bool) -> &'static str {
    match (switching_to_dhcp, rollback_enabled) {
        (true, true) => "Applying network configuration. Find the new IP via DHCP server or console, then log in to prevent automatic rollback.",
        (true, false) => "Network configuration applied. Find the new IP via DHCP server or console.",
        (false, true) => "Applying network configuration. Log in at the new address to confirm the change and prevent automatic rollback.",
        (false, false) => "Network configuration applied. Your connection will be interrupted.",
    }
}

/// Backend accepted a change that moves the client's own address
pub fn enter_waiting_for_new_ip(
    change: PendingIpChange,
    response: &SetNetworkConfigResponse,
    model: &mut Model,
) -> Command<Effect, Event> {
    if response.rollback_enabled {
        model
            .acknowledgements
            .begin_cycle(AcknowledgementKind::NetworkRollback);
    }

    let timeout_ms = model.config.new_ip_timeout_ms;
    log::info!(
        "waiting for {}:{} (dhcp: {})",
        change.new_ip,
        response.ui_port,
        change.switching_to_dhcp
    );

    model.network_overlay = OverlaySpinnerState::new("Applying network settings")
        .with_text(overlay_text(
            change.switching_to_dhcp,
            response.rollback_enabled,
        ))
        .with_countdown(countdown_seconds(timeout_ms));
    model.network_change_state = NetworkChangeState::WaitingForNewIp {
        new_ip: change.new_ip,
        ui_port: response.ui_port,
        switching_to_dhcp: change.switching_to_dhcp,
    };

    Command::all([
        render(),
        TimerCmd::schedule_interval(TimerId::NewIpCheck, model.config.new_ip_poll_interval_ms),
        TimerCmd::schedule_timeout(TimerId::NewIpTimeout, timeout_ms),
    ])
}

/// Poll tick: try the new address directly
pub fn handle_new_ip_check_tick(model: &mut Model) -> Command<Effect, Event> {
    let NetworkChangeState::WaitingForNewIp {
        new_ip,
        ui_port,
        switching_to_dhcp,
    } = &model.network_change_state
    else {
        log::warn!("stale new ip tick in {:?}", model.network_change_state);
        return Command::done();
    };

    // a DHCP lease is unknown to us; only the timeout can end the wait
    if *switching_to_dhcp || new_ip.is_empty() {
        return Command::done();
    }

    http_get!(Device, DeviceEvent, format!("https://{new_ip}:{ui_port}/healthcheck"), NewIpCheckResponse, "New IP healthcheck")
}

/// The first answer from the new address ends the window and redirects
pub fn handle_new_ip_check_response(
    result: Result<(), HttpError>,
    model: &mut Model,
) -> Command<Effect, Event> {
    let NetworkChangeState::WaitingForNewIp {
        new_ip, ui_port, ..
    } = &model.network_change_state
    else {
        log::debug!("ignoring late new ip healthcheck");
        return Command::done();
    };

    if let Err(e) = result {
        log::debug!("new address not reachable yet: {e}");
        return Command::done();
    }

    let target = format!("{new_ip}:{ui_port}");
    log::info!("new address {target} reachable");

    model.network_overlay = OverlaySpinnerState::new("Network settings applied")
        .with_text(format!("Redirecting to new IP: {target}"));
    model.network_change_state = NetworkChangeState::Idle;

    Command::all([
        render(),
        cancel_new_ip_timers(),
        RedirectCmd::to(format!("https://{target}")),
    ])
}

/// Safety window closed without the new address answering
pub fn handle_new_ip_check_timeout(model: &mut Model) -> Command<Effect, Event> {
    let NetworkChangeState::WaitingForNewIp {
        new_ip, ui_port, ..
    } = &model.network_change_state
    else {
        log::warn!("stale new ip timeout in {:?}", model.network_change_state);
        return Command::done();
    };

    log::warn!("new address {new_ip} did not answer in time");
    model.network_change_state = NetworkChangeState::NewIpTimeout {
        new_ip: new_ip.clone(),
        ui_port: *ui_port,
    };
    model
        .network_overlay
        .set_text("Unable to reach new address automatically. Click below to navigate manually.");
    model.network_overlay.set_timed_out();

    Command::all([render(), cancel_new_ip_timers()])
}

pub fn handle_dismiss_network_change(model: &mut Model) -> Command<Effect, Event> {
    match model.network_change_state {
        NetworkChangeState::NewIpTimeout { .. } => {
            model.network_change_state = NetworkChangeState::Idle;
            model.network_overlay.clear();
            render()
        }
        NetworkChangeState::Idle => Command::done(),
        NetworkChangeState::WaitingForNewIp { .. } => {
            log::warn!("cannot dismiss while waiting for new ip");
            Command::done()
        }
    }
}
