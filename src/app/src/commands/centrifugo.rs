//! Real-time channel operations performed by the shell.

use crux_core::{capability::Operation, command, Command};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

use crate::types::ods::ChannelName;

/// Operation on the shell's Centrifugo connection.
///
/// Live publications on subscribed channels arrive as
/// `WebSocketEvent::ChannelMessage`, independent of these requests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum CentrifugoOperation {
    Subscribe { channel: String },
    Unsubscribe { channel: String },
    /// Replay the last `limit` publications of a channel
    History { channel: String, limit: u32 },
}

/// What the shell reports back for a [`CentrifugoOperation`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum CentrifugoOutput {
    Subscribed { channel: String },
    Unsubscribed { channel: String },
    /// Latest replayed publication, `None` if the channel has no history
    HistoryResult { channel: String, data: Option<String> },
    Error { message: String },
}

impl Operation for CentrifugoOperation {
    type Output = CentrifugoOutput;
}

/// Command-based Centrifugo API
pub struct Centrifugo<Effect, Event> {
    _effect: PhantomData<Effect>,
    _event: PhantomData<Event>,
}

impl<Effect, Event> Centrifugo<Effect, Event>
where
    Effect: Send + From<crux_core::Request<CentrifugoOperation>> + 'static,
    Event: Send + 'static,
{
    pub fn subscribe(channel: ChannelName) -> RequestBuilder<Effect, Event> {
        RequestBuilder::new(CentrifugoOperation::Subscribe {
            channel: channel.as_str().to_string(),
        })
    }

    pub fn unsubscribe(channel: ChannelName) -> RequestBuilder<Effect, Event> {
        RequestBuilder::new(CentrifugoOperation::Unsubscribe {
            channel: channel.as_str().to_string(),
        })
    }

    pub fn history(channel: ChannelName, limit: u32) -> RequestBuilder<Effect, Event> {
        RequestBuilder::new(CentrifugoOperation::History {
            channel: channel.as_str().to_string(),
            limit,
        })
    }
}

/// Request builder for Centrifugo operations
#[must_use]
pub struct RequestBuilder<Effect, Event> {
    operation: CentrifugoOperation,
    _effect: PhantomData<Effect>,
    _event: PhantomData<fn() -> Event>,
}

impl<Effect, Event> RequestBuilder<Effect, Event>
where
    Effect: Send + From<crux_core::Request<CentrifugoOperation>> + 'static,
    Event: Send + 'static,
{
    fn new(operation: CentrifugoOperation) -> Self {
        Self {
            operation,
            _effect: PhantomData,
            _event: PhantomData,
        }
    }

    pub fn build(
        self,
    ) -> command::RequestBuilder<Effect, Event, impl std::future::Future<Output = CentrifugoOutput>>
    {
        command::RequestBuilder::new(move |ctx| async move {
            Command::request_from_shell(self.operation)
                .into_future(ctx)
                .await
        })
    }
}
