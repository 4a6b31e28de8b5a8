//! Client side navigation, e.g. to the device's new address.

use crux_core::{capability::Operation, Command};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RedirectOperation {
    pub url: String,
}

impl Operation for RedirectOperation {
    type Output = ();
}

/// Command-based redirect API. The shell navigates away; nothing comes back.
pub struct Redirect<Effect, Event> {
    _effect: PhantomData<Effect>,
    _event: PhantomData<Event>,
}

impl<Effect, Event> Redirect<Effect, Event>
where
    Effect: Send + From<crux_core::Request<RedirectOperation>> + 'static,
    Event: Send + 'static,
{
    pub fn to(url: impl Into<String>) -> Command<Effect, Event> {
        Command::notify_shell(RedirectOperation { url: url.into() }).into()
    }
}
