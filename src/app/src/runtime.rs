//! Native shell around [`App`].
//!
//! [`Core`] owns the model and the commands still in flight. Timer effects
//! drive its virtual clock and never reach the caller; render effects turn
//! into subscriber notifications. HTTP, Centrifugo and redirect effects are
//! handed back to the caller, who answers them through [`Core::resolve`].

use crux_core::{capability::Operation, App as _, Command, Request};
use thiserror::Error;

use crate::acknowledgement::AcknowledgementTracker;
use crate::config::CoreConfig;
use crate::events::Event;
use crate::model::Model;
use crate::timer::TimerManager;
use crate::view::ViewModel;
use crate::{App, Effect};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("request cannot be resolved: {0}")]
    Resolve(String),
}

/// Receiver of projection changes
#[cfg_attr(test, mockall::automock)]
pub trait ViewSubscriber: Send {
    fn on_view(&mut self, view: &ViewModel);
}

struct FnSubscriber<F>(F);

impl<F: FnMut(&ViewModel) + Send> ViewSubscriber for FnSubscriber<F> {
    fn on_view(&mut self, view: &ViewModel) {
        (self.0)(view)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub struct Core {
    app: App,
    model: Model,
    commands: Vec<Command<Effect, Event>>,
    timers: TimerManager,
    subscribers: Vec<(SubscriptionId, Box<dyn ViewSubscriber>)>,
    next_subscription: u64,
    last_view: ViewModel,
}

impl Default for Core {
    fn default() -> Self {
        Self::new(CoreConfig::default(), AcknowledgementTracker::new())
    }
}

impl Core {
    pub fn new(config: CoreConfig, acknowledgements: AcknowledgementTracker) -> Self {
        let app = App;
        let model = Model::new(config, acknowledgements);
        let last_view = app.view(&model);
        Self {
            app,
            model,
            commands: Vec::new(),
            timers: TimerManager::new(),
            subscribers: Vec::new(),
            next_subscription: 0,
            last_view,
        }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn timers(&self) -> &TimerManager {
        &self.timers
    }

    pub fn view(&self) -> ViewModel {
        self.app.view(&self.model)
    }

    pub fn subscribe(&mut self, subscriber: Box<dyn ViewSubscriber>) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, subscriber));
        id
    }

    pub fn subscribe_fn(
        &mut self,
        callback: impl FnMut(&ViewModel) + Send + 'static,
    ) -> SubscriptionId {
        self.subscribe(Box::new(FnSubscriber(callback)))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        before != self.subscribers.len()
    }

    /// Run one event through the app; returns the effects for the host
    pub fn process_event(&mut self, event: Event) -> Vec<Effect> {
        log::debug!("processing {event:?}");
        let command = self.app.update(event, &mut self.model);
        self.commands.push(command);
        self.run()
    }

    /// Answer a request previously returned to the host
    pub fn resolve<Op: Operation>(
        &mut self,
        request: &mut Request<Op>,
        output: Op::Output,
    ) -> Result<Vec<Effect>, RuntimeError> {
        request
            .resolve(output)
            .map_err(|e| RuntimeError::Resolve(format!("{e:?}")))?;
        Ok(self.run())
    }

    /// Advance the virtual clock, firing due timers one at a time.
    ///
    /// Each firing is processed before the next due timer is looked up, so a
    /// cancel issued by one firing suppresses any later one.
    pub fn advance_time(&mut self, elapsed_ms: u64) -> Vec<Effect> {
        let until = self.timers.now_ms().saturating_add(elapsed_ms);
        let mut host_effects = Vec::new();

        while let Some(id) = self.timers.next_due(until) {
            log::debug!("timer {id:?} fired at {}ms", self.timers.now_ms());
            host_effects.extend(self.process_event(id.fired_event()));
        }
        self.timers.settle(until);

        host_effects
    }

    /// Drive every live command until none has anything left to report
    fn run(&mut self) -> Vec<Effect> {
        let mut host_effects = Vec::new();
        let mut rendered = false;

        loop {
            let mut effects = Vec::new();
            let mut events = Vec::new();
            for command in &mut self.commands {
                effects.extend(command.effects());
                events.extend(command.events());
            }
            self.commands.retain_mut(|command| !command.is_done());

            if effects.is_empty() && events.is_empty() {
                break;
            }

            for effect in effects {
                match effect {
                    Effect::Render(_) => rendered = true,
                    Effect::Timer(request) => self.timers.apply(&request.operation),
                    other => host_effects.push(other),
                }
            }
            for event in events {
                log::debug!("processing {event:?}");
                let command = self.app.update(event, &mut self.model);
                self.commands.push(command);
            }
        }

        if rendered {
            self.notify();
        }
        host_effects
    }

    fn notify(&mut self) {
        let current = self.app.view(&self.model);
        if current == self.last_view {
            return;
        }
        for (_, subscriber) in &mut self.subscribers {
            subscriber.on_view(&current);
        }
        self.last_view = current;
    }
}
