//! Engine lifecycle states and change notifications.
//!
//! Every lifecycle call on the engine produces a [`StateChange`]. It is
//! delivered synchronously to each subscribed listener and also queued so
//! callers that prefer polling can drain it after the fact.
//!
//! ```text
//! NotStarted ──start──▶ Running ◀──resume── Paused
//!                        │  └─────pause────────▲
//!                        ├──on_completed──▶ Completed
//!                        └──stop──▶ Stopped ◀──stop── Paused
//! ```

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse lifecycle of an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineState {
    #[default]
    NotStarted,
    Running,
    Paused,
    Stopped,
    Completed,
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NotStarted => "not_started",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Stopped => "stopped",
            Self::Completed => "completed",
        };
        f.write_str(name)
    }
}

/// A lifecycle transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateChange {
    pub previous: EngineState,
    pub current: EngineState,
}

/// Handle returned by [`Listeners::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListenerId(pub u64);

type Listener = Box<dyn FnMut(&StateChange) + Send>;

/// Subscribers to state changes.
#[derive(Default)]
pub struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, Listener)>,
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}

impl Listeners {
    pub fn subscribe(&mut self, listener: impl FnMut(&StateChange) + Send + 'static) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.entries.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub fn notify(&mut self, change: &StateChange) {
        for (_, listener) in self.entries.iter_mut() {
            listener(change);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Queue of state changes waiting to be polled.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<StateChange>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, change: StateChange) {
        self.events.push_back(change);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn pop(&mut self) -> Option<StateChange> {
        self.events.pop_front()
    }

    pub fn peek(&self) -> Option<&StateChange> {
        self.events.front()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = StateChange> + '_ {
        self.events.drain(..)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
