//! Clock operations and the events they fire.
//!
//! The shell owns the clock. It arms timers on request and, when one fires,
//! sends [`TimerId::fired_event`] back into the core.

use crux_core::{capability::Operation, Command};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

use crate::events::{DeviceEvent, Event};

/// Identity of every timer the core may run; at most one instance per id
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimerId {
    ReconnectionCheck,
    ReconnectionTimeout,
    NewIpCheck,
    NewIpTimeout,
}

impl TimerId {
    /// Event delivered to the core when this timer fires
    pub fn fired_event(self) -> Event {
        let event = match self {
            Self::ReconnectionCheck => DeviceEvent::ReconnectionCheckTick,
            Self::ReconnectionTimeout => DeviceEvent::ReconnectionTimeout,
            Self::NewIpCheck => DeviceEvent::NewIpCheckTick,
            Self::NewIpTimeout => DeviceEvent::NewIpCheckTimeout,
        };
        Event::Device(event)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimerOperation {
    ScheduleInterval { id: TimerId, period_ms: u64 },
    ScheduleTimeout { id: TimerId, delay_ms: u64 },
    Cancel { id: TimerId },
}

impl TimerOperation {
    pub fn id(&self) -> TimerId {
        match self {
            Self::ScheduleInterval { id, .. }
            | Self::ScheduleTimeout { id, .. }
            | Self::Cancel { id } => *id,
        }
    }
}

impl Operation for TimerOperation {
    type Output = ();
}

/// Command-based timer API
pub struct Timer<Effect, Event> {
    _effect: PhantomData<Effect>,
    _event: PhantomData<Event>,
}

impl<Effect, Event> Timer<Effect, Event>
where
    Effect: Send + From<crux_core::Request<TimerOperation>> + 'static,
    Event: Send + 'static,
{
    /// Fire `id` every `period_ms`, replacing an active timer with the same id
    pub fn schedule_interval(id: TimerId, period_ms: u64) -> Command<Effect, Event> {
        Command::notify_shell(TimerOperation::ScheduleInterval { id, period_ms }).into()
    }

    /// Fire `id` once after `delay_ms`
    pub fn schedule_timeout(id: TimerId, delay_ms: u64) -> Command<Effect, Event> {
        Command::notify_shell(TimerOperation::ScheduleTimeout { id, delay_ms }).into()
    }

    pub fn cancel(id: TimerId) -> Command<Effect, Event> {
        Command::notify_shell(TimerOperation::Cancel { id }).into()
    }
}
