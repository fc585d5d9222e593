//! The rule engine: owns the authoritative `GameState`, applies intents and
//! emits notifications.
//!
//! Every intent is all-or-nothing. The state and deck are snapshotted before
//! the intent runs and restored if any step fails, and queued notifications are
//! only delivered once the intent has fully succeeded.

use std::collections::HashSet;

use tracing::{debug, error, info};

use crate::config::GameConfig;
use crate::domain::bidding;
use crate::domain::deck::{deal_hands, Deck, DECK_SIZE};
use crate::domain::events::{EventBus, EventListener, GameEvent, ListenerId};
use crate::domain::rules::{HAND_SIZE, PLAYERS};
use crate::domain::scoring::{apply_hand_scoring, check_game_end};
use crate::domain::seed_derivation::derive_dealing_seed;
use crate::domain::snapshot::{snapshot, GameSnapshot, PlayerSnapshot};
use crate::domain::state::{
    dealer_for_hand, next_player, require_declarer, BiddingStatus, GameState, HandState,
    PartnershipId, Phase, Player, PlayerId,
};
use crate::domain::tricks;
use crate::domain::Card;
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug)]
pub struct SetbackEngine {
    state: GameState,
    deck: Deck,
    seed: u64,
    first_dealer: PlayerId,
    bus: EventBus,
}

impl Default for SetbackEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SetbackEngine {
    /// Engine in the `Setup` phase; call [`SetbackEngine::start_game`] next.
    pub fn new() -> Self {
        let config = GameConfig::default();
        Self {
            state: GameState::new(build_players(&config), config.target_score),
            deck: Deck::unshuffled(0),
            seed: 0,
            first_dealer: config.first_dealer,
            bus: EventBus::default(),
        }
    }

    pub fn subscribe(&mut self, listener: impl EventListener + 'static) -> ListenerId {
        self.bus.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// Seed the current game's deals derive from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn is_game_over(&self) -> bool {
        self.state.phase == Phase::GameOver
    }

    /// Set up partnerships, deal the first hand and open bidding.
    ///
    /// Allowed before the first game and after a game has ended.
    pub fn start_game(&mut self, config: GameConfig) -> Result<Vec<GameEvent>, DomainError> {
        if !matches!(self.state.phase, Phase::Setup | Phase::GameOver) {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "A game is already in progress",
            ));
        }
        config.validate()?;

        self.run_intent(|eng| {
            let seed = config.seed.unwrap_or_else(rand::random);
            eng.seed = seed;
            eng.first_dealer = config.first_dealer;
            eng.state = GameState::new(build_players(&config), config.target_score);
            eng.deck = Deck::unshuffled(seed);

            info!(
                seed,
                target_score = config.target_score,
                first_dealer = config.first_dealer,
                "Game started"
            );
            eng.bus.push(GameEvent::GameStarted {
                target_score: config.target_score,
                first_dealer: config.first_dealer,
            });
            eng.deal_next_hand()
        })
    }

    /// Submit a bid (`Some(2..=6)`) or a pass (`None`).
    pub fn place_bid(
        &mut self,
        player: PlayerId,
        amount: Option<u8>,
    ) -> Result<Vec<GameEvent>, DomainError> {
        debug!(player, amount = ?amount, "Submitting bid");

        let result = self.run_intent(|eng| {
            let outcome = bidding::place_bid(&mut eng.state, player, amount)?;
            eng.bus.push(GameEvent::BidPlaced { bid: outcome.bid });

            if let Some(final_bid) = outcome.final_bid {
                info!(
                    hand_no = eng.state.hand.hand_no,
                    declarer = final_bid.player,
                    amount = ?final_bid.amount,
                    "Bidding ended"
                );
                eng.bus.push(GameEvent::BiddingEnded { final_bid });
                eng.bus.push(GameEvent::PlayStarted {
                    leader: final_bid.player,
                });
            }
            Ok(())
        });

        if let Err(e) = &result {
            debug!(player, amount = ?amount, error = %e, "Bid rejected");
        }
        result
    }

    /// Play `card` from `player`'s hand into the current trick.
    pub fn play_card(
        &mut self,
        player: PlayerId,
        card: Card,
    ) -> Result<Vec<GameEvent>, DomainError> {
        debug!(player, card = %card, "Submitting card play");

        let result = self.run_intent(|eng| eng.apply_play(player, card));
        if let Err(e) = &result {
            self.reject_play(player, card.id(), e);
        }
        result
    }

    /// Like [`SetbackEngine::play_card`], identifying the card by id (`"hearts_14"`).
    pub fn play_card_id(
        &mut self,
        player: PlayerId,
        card_id: &str,
    ) -> Result<Vec<GameEvent>, DomainError> {
        match Card::from_id(card_id) {
            Ok(card) => self.play_card(player, card),
            Err(e) => {
                self.reject_play(player, card_id.to_string(), &e);
                Err(e)
            }
        }
    }

    pub fn game_state(&self) -> GameSnapshot {
        snapshot(&self.state)
    }

    pub fn player(&self, id: PlayerId) -> Result<PlayerSnapshot, DomainError> {
        self.state
            .player(id)
            .map(PlayerSnapshot::from)
            .ok_or_else(|| {
                DomainError::validation(ValidationKind::UnknownPlayer, format!("Unknown player {id}"))
            })
    }

    pub fn legal_bids(&self, player: PlayerId) -> Vec<Option<u8>> {
        bidding::legal_bids(&self.state, player)
    }

    /// Cards `player` may legally play now; empty when it is not their turn.
    pub fn legal_moves(&self, player: PlayerId) -> Vec<Card> {
        if self.state.turn != Some(player) {
            return Vec::new();
        }
        tricks::legal_moves(&self.state, player)
    }

    fn run_intent<F>(&mut self, f: F) -> Result<Vec<GameEvent>, DomainError>
    where
        F: FnOnce(&mut Self) -> Result<(), DomainError>,
    {
        let saved_state = self.state.clone();
        let saved_deck = self.deck.clone();
        let saved_seed = (self.seed, self.first_dealer);

        match f(self) {
            Ok(()) => Ok(self.bus.flush()),
            Err(e) => {
                self.state = saved_state;
                self.deck = saved_deck;
                (self.seed, self.first_dealer) = saved_seed;
                self.bus.discard();
                if e.is_invariant() {
                    error!(error = %e, "Invariant violated; state restored");
                }
                Err(e)
            }
        }
    }

    fn reject_play(&mut self, player: PlayerId, card_id: String, err: &DomainError) {
        if err.is_invariant() {
            return;
        }
        debug!(player, card_id = %card_id, error = %err, "Card play rejected");
        self.bus.push(GameEvent::InvalidPlay {
            player,
            card_id,
            reason: err.detail().to_string(),
        });
        self.bus.flush();
    }

    fn apply_play(&mut self, player: PlayerId, card: Card) -> Result<(), DomainError> {
        let played = tricks::play_card(&mut self.state, player, card)?;
        self.bus.push(GameEvent::CardPlayed { player, card });

        if let Some(suit) = played.trump_established {
            info!(hand_no = self.state.hand.hand_no, trump = %suit, "Trump established");
            self.bus.push(GameEvent::TrumpEstablished { suit });
        }

        if let Some(trick) = played.completed_trick {
            let winner = trick
                .winner
                .ok_or_else(|| DomainError::invariant("completed trick without winner"))?;
            debug!(winner, tricks = self.state.hand.completed_tricks.len(), "Trick complete");
            self.bus.push(GameEvent::TrickComplete { winner, trick });
        }

        self.check_conservation()?;

        if played.hand_completed {
            self.finish_hand()?;
        }
        Ok(())
    }

    /// Score the finished hand, then end the game or deal the next hand.
    fn finish_hand(&mut self) -> Result<(), DomainError> {
        let hand_no = self.state.hand.hand_no;
        self.bus.push(GameEvent::HandCompleted {
            hand_no,
            tricks: self.state.hand.completed_tricks.clone(),
        });

        let bidders = PartnershipId::of(require_declarer(&self.state, "finish_hand")?);
        let result = apply_hand_scoring(&mut self.state)?;
        self.bus.push(GameEvent::HandScored { result });

        let Some(outcome) = check_game_end(&self.state, bidders) else {
            return self.deal_next_hand();
        };

        self.state.phase = Phase::GameOver;
        self.state.turn = None;
        self.state.winner = Some(outcome.winner);
        info!(
            hand_no,
            winner = ?outcome.winner,
            ns_score = outcome.final_scores[0],
            ew_score = outcome.final_scores[1],
            decided_by = ?outcome.decided_by,
            "Game ended"
        );
        self.bus.push(GameEvent::GameEnded {
            winner: outcome.winner,
            final_scores: outcome.final_scores,
            decided_by: outcome.decided_by,
        });
        Ok(())
    }

    /// Reset and reshuffle the deck, deal six cards each and open bidding.
    fn deal_next_hand(&mut self) -> Result<(), DomainError> {
        let hand_no = self.state.hand.hand_no + 1;
        let dealer = dealer_for_hand(self.first_dealer, hand_no);
        self.state.phase = Phase::Dealing;

        self.deck.reseed(derive_dealing_seed(self.seed, hand_no));
        self.deck.reset();
        let hands = deal_hands(&mut self.deck, dealer, HAND_SIZE)?;

        for (player, hand) in self.state.players.iter_mut().zip(hands) {
            player.hand = hand;
            player.is_dealer = player.id == dealer;
        }
        self.state.hand = HandState {
            hand_no,
            dealer,
            bidding: BiddingStatus::Bidding,
            undealt: self.deck.remaining(),
            ..HandState::empty()
        };
        let first_bidder = next_player(dealer);
        self.state.phase = Phase::Bidding;
        self.state.turn = Some(first_bidder);

        self.check_conservation()?;

        info!(hand_no, dealer, undealt = self.deck.remaining(), "Hand dealt");
        self.bus.push(GameEvent::BiddingStarted {
            hand_no,
            dealer,
            first_bidder,
        });
        Ok(())
    }

    /// Hands + played cards + undealt cards account for the whole deck, once each.
    fn check_conservation(&self) -> Result<(), DomainError> {
        let hand = &self.state.hand;
        let in_hands = self.state.cards_in_hands();
        let played = hand.cards_played();
        let total = in_hands + played + hand.undealt;
        if total != DECK_SIZE {
            error!(in_hands, played, undealt = hand.undealt, "Card count mismatch");
            return Err(DomainError::invariant(format!(
                "card conservation broken: {in_hands} in hands + {played} played + {} undealt != {DECK_SIZE}",
                hand.undealt
            )));
        }

        let mut seen = HashSet::with_capacity(DECK_SIZE);
        let held = self.state.players.iter().flat_map(|p| p.hand.iter().copied());
        let tricks = hand
            .completed_tricks
            .iter()
            .chain(std::iter::once(&hand.current_trick))
            .flat_map(|t| t.cards());
        for card in held.chain(tricks).chain(self.deck.cards().iter().copied()) {
            if !seen.insert(card) {
                error!(card = %card, "Duplicate card in play");
                return Err(DomainError::invariant(format!("duplicate card {card}")));
            }
        }
        debug_assert_eq!(seen.len(), DECK_SIZE);
        Ok(())
    }
}

fn build_players(config: &GameConfig) -> [Player; PLAYERS] {
    std::array::from_fn(|i| {
        let pc = &config.players[i];
        Player::new(i as PlayerId, pc.name.clone(), pc.is_human)
    })
}
