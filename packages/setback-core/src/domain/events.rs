//! Notifications emitted by the engine, and the bus that delivers them.

use std::fmt;

use serde::Serialize;

use crate::domain::bidding::Bid;
use crate::domain::rules::PARTNERSHIPS;
use crate::domain::scoring::{GameEndReason, HandScoreResult};
use crate::domain::state::{PartnershipId, PlayerId, Trick};
use crate::domain::{Card, Suit};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    GameStarted {
        target_score: i16,
        first_dealer: PlayerId,
    },
    BiddingStarted {
        hand_no: u32,
        dealer: PlayerId,
        first_bidder: PlayerId,
    },
    BidPlaced {
        bid: Bid,
    },
    BiddingEnded {
        final_bid: Bid,
    },
    PlayStarted {
        leader: PlayerId,
    },
    TrumpEstablished {
        suit: Suit,
    },
    CardPlayed {
        player: PlayerId,
        card: Card,
    },
    InvalidPlay {
        player: PlayerId,
        card_id: String,
        reason: String,
    },
    TrickComplete {
        winner: PlayerId,
        trick: Trick,
    },
    HandCompleted {
        hand_no: u32,
        tricks: Vec<Trick>,
    },
    HandScored {
        result: HandScoreResult,
    },
    GameEnded {
        winner: PartnershipId,
        final_scores: [i16; PARTNERSHIPS],
        decided_by: GameEndReason,
    },
}

/// Receives events synchronously, in emission order.
pub trait EventListener {
    fn on_event(&mut self, event: &GameEvent);
}

impl<F> EventListener for F
where
    F: FnMut(&GameEvent),
{
    fn on_event(&mut self, event: &GameEvent) {
        self(event)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Per-intent event log plus registered listeners.
///
/// Events are queued while an intent runs and only delivered by [`EventBus::flush`];
/// a failed intent calls [`EventBus::discard`] instead.
#[derive(Default)]
pub struct EventBus {
    queue: Vec<GameEvent>,
    listeners: Vec<(ListenerId, Box<dyn EventListener>)>,
    next_id: u64,
}

impl EventBus {
    pub fn subscribe(&mut self, listener: impl EventListener + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false when `id` was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn push(&mut self, event: GameEvent) {
        self.queue.push(event);
    }

    pub fn pending(&self) -> &[GameEvent] {
        &self.queue
    }

    /// Deliver queued events to every listener and hand them back.
    pub fn flush(&mut self) -> Vec<GameEvent> {
        let events = std::mem::take(&mut self.queue);
        for event in &events {
            for (_, listener) in self.listeners.iter_mut() {
                listener.on_event(event);
            }
        }
        events
    }

    pub fn discard(&mut self) {
        self.queue.clear();
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("queue", &self.queue)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
