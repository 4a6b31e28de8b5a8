//! Test shell: runs a command and records what it asks for.

use crux_core::{Command, Request};
use crux_http::protocol::{HttpRequest, HttpResponse, HttpResult};

use crate::commands::{CentrifugoOperation, CentrifugoOutput, TimerOperation};
use crate::events::Event;
use crate::Effect;

pub fn ok(body: &str) -> HttpResult {
    HttpResult::Ok(HttpResponse::ok().body(body).build())
}

pub fn status(code: u16) -> HttpResult {
    HttpResult::Ok(HttpResponse::status(code).build())
}

pub fn unreachable() -> HttpResult {
    HttpResult::Err(crux_http::HttpError::Io("Failed to fetch".to_string()))
}

pub fn json<T: serde::Serialize>(value: &T) -> HttpResult {
    ok(&serde_json::to_string(value).expect("serializable"))
}

/// Effects and events of one command, in the order they were emitted
pub struct Shell {
    cmd: Command<Effect, Event>,
    pub http: Vec<Request<HttpRequest>>,
    pub centrifugo: Vec<Request<CentrifugoOperation>>,
    pub timers: Vec<TimerOperation>,
    pub redirects: Vec<String>,
    pub renders: usize,
    pub events: Vec<Event>,
    /// Debug rendering of every effect operation
    pub log: Vec<String>,
}

impl Shell {
    pub fn new(cmd: Command<Effect, Event>) -> Self {
        let mut shell = Self {
            cmd,
            http: Vec::new(),
            centrifugo: Vec::new(),
            timers: Vec::new(),
            redirects: Vec::new(),
            renders: 0,
            events: Vec::new(),
            log: Vec::new(),
        };
        shell.drain();
        shell
    }

    fn drain(&mut self) {
        for effect in self.cmd.effects() {
            match effect {
                Effect::Render(request) => {
                    self.log.push(format!("{:?}", request.operation));
                    self.renders += 1;
                }
                Effect::Http(request) => {
                    self.log.push(format!("{:?}", request.operation));
                    self.http.push(request);
                }
                Effect::Centrifugo(request) => {
                    self.log.push(format!("{:?}", request.operation));
                    self.centrifugo.push(request);
                }
                Effect::Timer(request) => {
                    self.log.push(format!("{:?}", request.operation));
                    self.timers.push(request.operation.clone());
                }
                Effect::Redirect(request) => {
                    self.log.push(format!("{:?}", request.operation));
                    self.redirects.push(request.operation.url.clone());
                }
            }
        }
        self.events.extend(self.cmd.events());
    }

    pub fn urls(&self) -> Vec<&str> {
        self.http
            .iter()
            .map(|request| request.operation.url.as_str())
            .collect()
    }

    pub fn header(&self, index: usize, name: &str) -> Option<&str> {
        self.http[index]
            .operation
            .headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }

    pub fn body_json(&self, index: usize) -> serde_json::Value {
        serde_json::from_slice(&self.http[index].operation.body).expect("json body")
    }

    /// Answer the `index`th request; returns the events that answer produced
    pub fn resolve_http(&mut self, index: usize, reply: HttpResult) -> Vec<Event> {
        let before = self.events.len();
        self.http[index].resolve(reply).expect("request awaits a response");
        self.drain();
        self.events[before..].to_vec()
    }

    pub fn resolve_centrifugo(&mut self, index: usize, output: CentrifugoOutput) -> Vec<Event> {
        let before = self.events.len();
        self.centrifugo[index]
            .resolve(output)
            .expect("operation awaits an answer");
        self.drain();
        self.events[before..].to_vec()
    }

    pub fn respond_last(&mut self, reply: HttpResult) -> Vec<Event> {
        let last = self.http.len().checked_sub(1).expect("an http request");
        self.resolve_http(last, reply)
    }

    pub fn is_empty(&self) -> bool {
        self.http.is_empty()
            && self.centrifugo.is_empty()
            && self.timers.is_empty()
            && self.redirects.is_empty()
            && self.events.is_empty()
    }
}
