//! Ordered listener registry.
//!
//! Listeners run synchronously, inline with line processing, in the order
//! they were registered. A slow listener delays the next line. A listener
//! that panics is logged and skipped; the remaining listeners still run.

use std::any::Any;
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};

use tracing::error;

use crate::event::{EventKind, IrcEvent};
use crate::message::ParsedMessage;
use crate::state::SyncState;

/// Callback for one [`EventKind`].
pub type Listener = Box<dyn FnMut(&IrcEvent<'_>, &ParsedMessage<'_>, &SyncState) + Send>;

/// Callback for every line, recognised or not.
pub type RawListener = Box<dyn FnMut(&ParsedMessage<'_>, &SyncState) + Send>;

/// Listeners keyed by [`EventKind`], plus raw listeners.
#[derive(Default)]
pub struct Dispatcher {
    raw: Vec<RawListener>,
    listeners: HashMap<EventKind, Vec<Listener>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for one event kind.
    pub fn on<F>(&mut self, kind: EventKind, listener: F)
    where
        F: FnMut(&IrcEvent<'_>, &ParsedMessage<'_>, &SyncState) + Send + 'static,
    {
        self.listeners
            .entry(kind)
            .or_default()
            .push(Box::new(listener));
    }

    /// Register a listener for every line.
    pub fn on_raw<F>(&mut self, listener: F)
    where
        F: FnMut(&ParsedMessage<'_>, &SyncState) + Send + 'static,
    {
        self.raw.push(Box::new(listener));
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.get(&kind).map_or(0, Vec::len)
    }

    pub fn raw_listener_count(&self) -> usize {
        self.raw.len()
    }

    /// Drop every listener.
    pub fn clear(&mut self) {
        self.raw.clear();
        self.listeners.clear();
    }

    pub(crate) fn dispatch_raw(&mut self, msg: &ParsedMessage<'_>, state: &SyncState) {
        for (index, listener) in self.raw.iter_mut().enumerate() {
            if let Err(panic) = catch_unwind(AssertUnwindSafe(|| listener(msg, state))) {
                error!(
                    "raw listener #{} panicked on {:?}: {}",
                    index,
                    msg.raw,
                    panic_message(&*panic)
                );
            }
        }
    }

    pub(crate) fn dispatch(
        &mut self,
        event: &IrcEvent<'_>,
        msg: &ParsedMessage<'_>,
        state: &SyncState,
    ) {
        let kind = event.kind();
        let Some(listeners) = self.listeners.get_mut(&kind) else {
            return;
        };
        for (index, listener) in listeners.iter_mut().enumerate() {
            if let Err(panic) = catch_unwind(AssertUnwindSafe(|| listener(event, msg, state))) {
                error!(
                    "{} listener #{} panicked: {}",
                    kind,
                    index,
                    panic_message(&*panic)
                );
            }
        }
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut counts: Vec<(EventKind, usize)> =
            self.listeners.iter().map(|(k, v)| (*k, v.len())).collect();
        counts.sort_unstable();
        f.debug_struct("Dispatcher")
            .field("raw", &self.raw.len())
            .field("listeners", &counts)
            .finish()
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn join_event() -> IrcEvent<'static> {
        IrcEvent::Join {
            channel: "#rust",
            nick: "alice",
        }
    }

    #[test]
    fn test_registration_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut dispatcher = Dispatcher::new();
        for id in 0..3 {
            let seen = Arc::clone(&seen);
            dispatcher.on(EventKind::Join, move |_, _, _| seen.lock().unwrap().push(id));
        }

        let msg = ParsedMessage::parse(":alice!a@h JOIN #rust");
        dispatcher.dispatch(&join_event(), &msg, &SyncState::new());
        assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_other_kinds_not_called() {
        let hits = Arc::new(Mutex::new(0));
        let mut dispatcher = Dispatcher::new();
        let counter = Arc::clone(&hits);
        dispatcher.on(EventKind::Part, move |_, _, _| *counter.lock().unwrap() += 1);

        let msg = ParsedMessage::parse(":alice!a@h JOIN #rust");
        dispatcher.dispatch(&join_event(), &msg, &SyncState::new());
        assert_eq!(*hits.lock().unwrap(), 0);
        assert_eq!(dispatcher.listener_count(EventKind::Part), 1);
        assert_eq!(dispatcher.listener_count(EventKind::Join), 0);
    }

    #[test]
    fn test_panicking_listener_is_contained() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut dispatcher = Dispatcher::new();
        dispatcher.on(EventKind::Join, |_, _, _| panic!("listener failure"));
        let after = Arc::clone(&seen);
        dispatcher.on(EventKind::Join, move |event, _, _| {
            after.lock().unwrap().push(event.kind())
        });

        let msg = ParsedMessage::parse(":alice!a@h JOIN #rust");
        dispatcher.dispatch(&join_event(), &msg, &SyncState::new());
        assert_eq!(*seen.lock().unwrap(), vec![EventKind::Join]);
    }

    #[test]
    fn test_raw_listeners_see_every_line() {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let mut dispatcher = Dispatcher::new();
        let sink = Arc::clone(&lines);
        dispatcher.on_raw(move |msg, _| sink.lock().unwrap().push(msg.raw.to_string()));

        let state = SyncState::new();
        for line in ["PING :x", ":a!b@c FOO bar", ""] {
            dispatcher.dispatch_raw(&ParsedMessage::parse(line), &state);
        }
        assert_eq!(*lines.lock().unwrap(), vec!["PING :x", ":a!b@c FOO bar", ""]);
    }
}
