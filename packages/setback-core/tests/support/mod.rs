#![allow(dead_code)]

//! Engine drivers and event capture for integration tests.

use std::cell::RefCell;
use std::rc::Rc;

use rand::seq::IndexedRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use setback_core::{GameConfig, GameEvent, Phase, SetbackEngine};

/// Shared log of every event delivered to a listener.
pub type EventLog = Rc<RefCell<Vec<GameEvent>>>;

pub fn record_events(engine: &mut SetbackEngine) -> EventLog {
    let log: EventLog = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    engine.subscribe(move |e: &GameEvent| sink.borrow_mut().push(e.clone()));
    log
}

/// Engine with a started, seeded game (dealer North, target 21).
pub fn started_engine(seed: u64) -> SetbackEngine {
    started_engine_with(GameConfig::default().with_seed(seed))
}

pub fn started_engine_with(config: GameConfig) -> SetbackEngine {
    let mut engine = SetbackEngine::new();
    engine.start_game(config).expect("start game");
    engine
}

/// Submits a uniformly random legal intent for whoever must act.
pub struct RandomDriver {
    rng: ChaCha20Rng,
}

impl RandomDriver {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Apply one legal intent. Returns the events it produced.
    pub fn step(&mut self, engine: &mut SetbackEngine) -> Vec<GameEvent> {
        let snap = engine.game_state();
        let who = snap.turn.expect("someone must be on turn");
        match snap.phase {
            Phase::Bidding => {
                let bid = *engine
                    .legal_bids(who)
                    .choose(&mut self.rng)
                    .expect("at least one legal bid");
                engine.place_bid(who, bid).expect("legal bid accepted")
            }
            Phase::Playing { .. } => {
                let card = *engine
                    .legal_moves(who)
                    .choose(&mut self.rng)
                    .expect("at least one legal card");
                engine.play_card(who, card).expect("legal card accepted")
            }
            other => panic!("no intent possible in {other:?}"),
        }
    }

    /// Drive bidding to completion for the current hand.
    pub fn finish_bidding(&mut self, engine: &mut SetbackEngine) -> Vec<GameEvent> {
        let mut events = Vec::new();
        while engine.game_state().phase == Phase::Bidding {
            events.extend(self.step(engine));
        }
        events
    }

    /// Drive the current hand through scoring.
    pub fn finish_hand(&mut self, engine: &mut SetbackEngine) -> Vec<GameEvent> {
        let hand_no = engine.game_state().hand.hand_no;
        let mut events = Vec::new();
        while !engine.is_game_over() && engine.game_state().hand.hand_no == hand_no {
            events.extend(self.step(engine));
        }
        events
    }

    /// Play until the game ends, bounded by `max_hands`.
    pub fn finish_game(&mut self, engine: &mut SetbackEngine, max_hands: u32) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for _ in 0..max_hands {
            if engine.is_game_over() {
                break;
            }
            events.extend(self.finish_hand(engine));
        }
        events
    }
}
