//! Deterministic virtual clock for the timers the reducer schedules.
//!
//! The manager holds no business logic; it only knows when each [`TimerId`]
//! is due. Time moves forward exclusively through [`TimerManager::next_due`].

use std::collections::BTreeMap;

use crate::commands::{TimerId, TimerOperation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Schedule {
    Interval { period_ms: u64 },
    Timeout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ActiveTimer {
    due_ms: u64,
    /// Scheduling order, breaks ties between timers due at the same instant
    seq: u64,
    schedule: Schedule,
}

#[derive(Debug, Default, Clone)]
pub struct TimerManager {
    now_ms: u64,
    next_seq: u64,
    active: BTreeMap<TimerId, ActiveTimer>,
}

impl TimerManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.active.contains_key(&id)
    }

    fn arm(&mut self, id: TimerId, delay_ms: u64, schedule: Schedule) {
        let seq = self.next_seq;
        self.next_seq += 1;
        if self
            .active
            .insert(
                id,
                ActiveTimer {
                    due_ms: self.now_ms.saturating_add(delay_ms),
                    seq,
                    schedule,
                },
            )
            .is_some()
        {
            log::debug!("timer {id:?} rescheduled");
        }
    }

    /// Apply a timer effect; scheduling an active id replaces it
    pub fn apply(&mut self, op: &TimerOperation) {
        match *op {
            TimerOperation::ScheduleInterval { id, period_ms } => {
                // a zero period would never let the clock advance
                let period_ms = period_ms.max(1);
                self.arm(id, period_ms, Schedule::Interval { period_ms });
            }
            TimerOperation::ScheduleTimeout { id, delay_ms } => {
                self.arm(id, delay_ms, Schedule::Timeout);
            }
            TimerOperation::Cancel { id } => {
                if self.active.remove(&id).is_none() {
                    log::debug!("cancel of inactive timer {id:?}");
                }
            }
        }
    }

    /// Fire the earliest timer due at or before `until_ms`.
    ///
    /// Moves the clock to the firing instant, re-arms intervals and drops
    /// timeouts. Returns `None` (clock moved to `until_ms`) if nothing is due.
    pub fn next_due(&mut self, until_ms: u64) -> Option<TimerId> {
        let (id, timer) = self
            .active
            .iter()
            .filter(|(_, t)| t.due_ms <= until_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.seq))
            .map(|(id, t)| (*id, *t))?;

        self.now_ms = self.now_ms.max(timer.due_ms);
        match timer.schedule {
            Schedule::Interval { period_ms } => {
                self.arm(id, period_ms, timer.schedule);
            }
            Schedule::Timeout => {
                self.active.remove(&id);
            }
        }
        Some(id)
    }

    /// Move the clock forward without firing anything
    pub fn settle(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }

    /// Milliseconds until `id` fires, if active
    pub fn remaining_ms(&self, id: TimerId) -> Option<u64> {
        self.active
            .get(&id)
            .map(|t| t.due_ms.saturating_sub(self.now_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interval(id: TimerId, period_ms: u64) -> TimerOperation {
        TimerOperation::ScheduleInterval { id, period_ms }
    }

    fn timeout(id: TimerId, delay_ms: u64) -> TimerOperation {
        TimerOperation::ScheduleTimeout { id, delay_ms }
    }

    #[test]
    fn interval_rearms_after_firing() {
        let mut timers = TimerManager::new();
        timers.apply(&interval(TimerId::ReconnectionCheck, 5_000));

        assert_eq!(timers.next_due(12_000), Some(TimerId::ReconnectionCheck));
        assert_eq!(timers.now_ms(), 5_000);
        assert_eq!(timers.next_due(12_000), Some(TimerId::ReconnectionCheck));
        assert_eq!(timers.now_ms(), 10_000);
        assert_eq!(timers.next_due(12_000), None);
        assert!(timers.is_active(TimerId::ReconnectionCheck));
    }

    #[test]
    fn timeout_fires_once() {
        let mut timers = TimerManager::new();
        timers.apply(&timeout(TimerId::NewIpTimeout, 90_000));

        assert_eq!(timers.next_due(100_000), Some(TimerId::NewIpTimeout));
        assert_eq!(timers.next_due(200_000), None);
        assert!(!timers.is_active(TimerId::NewIpTimeout));
    }

    #[test]
    fn cancel_removes_timer() {
        let mut timers = TimerManager::new();
        timers.apply(&interval(TimerId::NewIpCheck, 5_000));

        timers.apply(&TimerOperation::Cancel {
            id: TimerId::NewIpCheck,
        });

        assert!(!timers.is_active(TimerId::NewIpCheck));
        assert_eq!(timers.next_due(60_000), None);
    }

    #[test]
    fn rescheduling_replaces_deadline() {
        let mut timers = TimerManager::new();
        timers.apply(&timeout(TimerId::ReconnectionTimeout, 1_000));

        timers.apply(&timeout(TimerId::ReconnectionTimeout, 3_000));

        assert_eq!(timers.next_due(2_000), None);
        assert_eq!(timers.remaining_ms(TimerId::ReconnectionTimeout), Some(3_000));
    }

    #[test]
    fn ties_fire_in_scheduling_order() {
        let mut timers = TimerManager::new();
        timers.apply(&timeout(TimerId::ReconnectionTimeout, 10_000));
        timers.apply(&interval(TimerId::ReconnectionCheck, 5_000));

        assert_eq!(timers.next_due(10_000), Some(TimerId::ReconnectionCheck));
        // both due at 10s now; the timeout was scheduled before the re-armed interval
        assert_eq!(timers.next_due(10_000), Some(TimerId::ReconnectionTimeout));
        assert_eq!(timers.next_due(10_000), Some(TimerId::ReconnectionCheck));
    }

    #[test]
    fn clock_never_moves_backwards() {
        let mut timers = TimerManager::new();

        timers.settle(5_000);
        timers.settle(1_000);

        assert_eq!(timers.now_ms(), 5_000);
    }
}
