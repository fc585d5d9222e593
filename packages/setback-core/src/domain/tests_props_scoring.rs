/// Property-based tests over randomly played hands: point conservation and
/// bid resolution.
use std::collections::HashSet;

use proptest::prelude::*;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::domain::bidding::{legal_bids, place_bid};
use crate::domain::deck::{deal_hands, Deck};
use crate::domain::rules::{HAND_SIZE, PLAYERS};
use crate::domain::scoring::{captured_cards, score_hand};
use crate::domain::state::{GameState, Phase};
use crate::domain::test_state_helpers::{make_game_state, MakeGameStateArgs};
use crate::domain::tricks::{legal_moves, play_card};
use crate::domain::{test_gens, test_prelude, Card};

/// Deal and play one hand with uniformly random legal choices.
fn random_hand(seed: u64, dealer: u8) -> (GameState, Vec<Card>) {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut deck = Deck::new(seed);
    let hands = deal_hands(&mut deck, dealer, HAND_SIZE).unwrap();
    let dealt: Vec<Card> = hands.iter().flatten().copied().collect();

    let mut state = make_game_state(
        hands,
        MakeGameStateArgs {
            phase: Phase::Bidding,
            dealer,
            ..Default::default()
        },
    );

    while state.phase == Phase::Bidding {
        let who = state.turn.unwrap();
        let choice = *legal_bids(&state, who).choose(&mut rng).unwrap();
        place_bid(&mut state, who, choice).unwrap();
    }
    while let Phase::Playing { .. } = state.phase {
        let who = state.turn.unwrap();
        let card = *legal_moves(&state, who).choose(&mut rng).unwrap();
        play_card(&mut state, who, card).unwrap();
    }
    (state, dealt)
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Every dealt card is captured exactly once and game points are conserved.
    #[test]
    fn prop_captured_points_equal_dealt_points(
        seed in any::<u64>(),
        dealer in test_gens::player_id(),
    ) {
        let (state, dealt) = random_hand(seed, dealer);
        prop_assert_eq!(state.phase, Phase::Scoring);
        prop_assert_eq!(state.cards_in_hands(), 0);

        let captured = captured_cards(&state.hand).unwrap();
        prop_assert_eq!(captured.len(), HAND_SIZE * PLAYERS);
        let unique: HashSet<Card> = captured.iter().map(|&(_, c)| c).collect();
        let dealt_set: HashSet<Card> = dealt.iter().copied().collect();
        prop_assert_eq!(unique, dealt_set);

        let result = score_hand(&state.hand).unwrap();
        let dealt_points: u32 = dealt.iter().map(|c| u32::from(c.point_value())).sum();
        prop_assert_eq!(result.game_points.iter().sum::<u32>(), dealt_points);
    }

    /// Bidders move by exactly the bid; opponents gain what they earned.
    #[test]
    fn prop_bid_resolution(seed in any::<u64>(), dealer in test_gens::player_id()) {
        let (state, _) = random_hand(seed, dealer);
        let result = score_hand(&state.hand).unwrap();
        let bid = i16::from(result.bid_amount);
        let bidders = result.bidding_partnership.index();
        let others = result.bidding_partnership.other().index();

        prop_assert!(result.game.is_some(), "Game is always awarded");
        let awarded = result.awards().iter().flatten().count() as u8;
        prop_assert_eq!(
            result.bidding_partnership_points + result.non_bidding_partnership_points,
            awarded
        );
        prop_assert_eq!(result.bid_made, result.bidding_partnership_points >= result.bid_amount);
        let expected = if result.bid_made { bid } else { -bid };
        prop_assert_eq!(result.score_deltas[bidders], expected);
        prop_assert_eq!(
            result.score_deltas[others],
            i16::from(result.non_bidding_partnership_points)
        );
    }
}
