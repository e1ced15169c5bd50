use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{ColorIndices, DataPoint};

/// Notification channels every artist exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArtistEventKind {
    DataChanged,
    ColorIndicesChanged,
}

/// Payload delivered to observers, borrowed from the emitting artist.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArtistEvent<'a> {
    DataChanged(&'a [DataPoint]),
    ColorIndicesChanged(&'a ColorIndices),
}

impl ArtistEvent<'_> {
    #[must_use]
    pub fn kind(&self) -> ArtistEventKind {
        match self {
            Self::DataChanged(_) => ArtistEventKind::DataChanged,
            Self::ColorIndicesChanged(_) => ArtistEventKind::ColorIndicesChanged,
        }
    }
}

pub type ArtistCallback = Box<dyn FnMut(&ArtistEvent<'_>)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Synchronous broadcast list.
///
/// Callbacks run inside the emitting call, in registration order. A callback
/// must not mutate the artist that emitted the event.
#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    subscribers: Vec<(SubscriptionId, ArtistEventKind, ArtistCallback)>,
}

impl EventBus {
    pub fn subscribe(&mut self, kind: ArtistEventKind, callback: ArtistCallback) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.subscribers.push((id, kind, callback));
        id
    }

    /// Removes a subscription. Returns `true` when it existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(entry, _, _)| *entry != id);
        self.subscribers.len() != before
    }

    pub fn emit(&mut self, event: &ArtistEvent<'_>) {
        let kind = event.kind();
        for (_, subscribed, callback) in &mut self.subscribers {
            if *subscribed == kind {
                callback(event);
            }
        }
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
