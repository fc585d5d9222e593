use crate::domain::bidding::{dealer_is_forced, high_bid, legal_bids, place_bid, Bid};
use crate::domain::state::{BiddingStatus, Phase};
use crate::domain::test_state_helpers::{make_game_state, MakeGameStateArgs};
use crate::errors::domain::{DomainError, ValidationKind};

fn empty_hands() -> [Vec<crate::domain::Card>; 4] {
    [Vec::new(), Vec::new(), Vec::new(), Vec::new()]
}

fn bidding_state(dealer: u8) -> crate::domain::GameState {
    make_game_state(
        empty_hands(),
        MakeGameStateArgs {
            phase: Phase::Bidding,
            dealer,
            ..Default::default()
        },
    )
}

#[test]
fn bidding_runs_left_of_dealer_and_dealer_last() {
    let mut state = bidding_state(3);
    assert_eq!(state.turn, Some(0));

    place_bid(&mut state, 0, Some(2)).unwrap();
    assert_eq!(state.turn, Some(1));
    place_bid(&mut state, 1, None).unwrap();
    place_bid(&mut state, 2, Some(4)).unwrap();
    assert_eq!(state.turn, Some(3));

    let outcome = place_bid(&mut state, 3, None).unwrap();
    assert_eq!(outcome.final_bid, Some(Bid::of(2, 4)));
    assert_eq!(state.phase, Phase::Playing { trick_no: 1 });
    assert_eq!(state.hand.bidding, BiddingStatus::BidEstablished);
    assert_eq!(state.hand.declarer, Some(2));
    assert_eq!(state.hand.winning_bid, Some(4));
    assert_eq!(state.turn, Some(2), "declarer leads the first trick");
    assert_eq!(state.hand.bids.len(), 4);
}

#[test]
fn out_of_turn_bid_rejected_and_state_unchanged() {
    let mut state = bidding_state(0);
    let before = state.clone();

    let err = place_bid(&mut state, 3, Some(3)).unwrap_err();
    assert_eq!(err.kind(), Some(ValidationKind::OutOfTurn));
    assert_eq!(state, before);
}

#[test]
fn bid_must_exceed_current_high() {
    let mut state = bidding_state(3);
    place_bid(&mut state, 0, Some(3)).unwrap();

    let err = place_bid(&mut state, 1, Some(3)).unwrap_err();
    match err {
        DomainError::Validation(ValidationKind::InvalidBid, msg) => {
            assert!(msg.contains("exceed"), "unexpected error message: {msg}");
        }
        other => panic!("expected InvalidBid validation error, got: {other:?}"),
    }
    place_bid(&mut state, 1, Some(4)).unwrap();
    assert_eq!(high_bid(&state.hand), Some(Bid::of(1, 4)));
}

#[test]
fn bid_out_of_range_rejected() {
    for amount in [0, 1, 7, 200] {
        let mut state = bidding_state(3);
        let err = place_bid(&mut state, 0, Some(amount)).unwrap_err();
        assert_eq!(err.kind(), Some(ValidationKind::InvalidBid), "amount {amount}");
    }
}

#[test]
fn dealer_cannot_pass_after_three_passes() {
    let mut state = bidding_state(3);
    place_bid(&mut state, 0, None).unwrap();
    place_bid(&mut state, 1, None).unwrap();
    place_bid(&mut state, 2, None).unwrap();

    assert!(dealer_is_forced(&state, 3));
    let before = state.clone();
    let err = place_bid(&mut state, 3, None).unwrap_err();
    assert_eq!(err.kind(), Some(ValidationKind::DealerMustBid));
    assert_eq!(state, before);

    for amount in 2..=6 {
        let mut s = before.clone();
        let outcome = place_bid(&mut s, 3, Some(amount)).unwrap();
        assert_eq!(outcome.final_bid, Some(Bid::of(3, amount)));
        assert_eq!(s.hand.declarer, Some(3));
    }
}

#[test]
fn dealer_may_pass_when_someone_bid() {
    let mut state = bidding_state(1);
    place_bid(&mut state, 2, None).unwrap();
    place_bid(&mut state, 3, Some(2)).unwrap();
    place_bid(&mut state, 0, None).unwrap();
    assert!(!dealer_is_forced(&state, 1));

    place_bid(&mut state, 1, None).unwrap();
    assert_eq!(state.hand.declarer, Some(3));
}

#[test]
fn legal_bids_reflect_floor_and_forced_dealer() {
    let mut state = bidding_state(3);
    assert_eq!(
        legal_bids(&state, 0),
        vec![None, Some(2), Some(3), Some(4), Some(5), Some(6)]
    );
    assert!(legal_bids(&state, 1).is_empty(), "not player 1's turn");

    place_bid(&mut state, 0, Some(5)).unwrap();
    assert_eq!(legal_bids(&state, 1), vec![None, Some(6)]);

    let mut forced = bidding_state(3);
    for p in 0..3 {
        place_bid(&mut forced, p, None).unwrap();
    }
    assert_eq!(
        legal_bids(&forced, 3),
        vec![Some(2), Some(3), Some(4), Some(5), Some(6)]
    );
}

#[test]
fn six_bid_ends_competition() {
    let mut state = bidding_state(3);
    place_bid(&mut state, 0, Some(6)).unwrap();
    assert_eq!(legal_bids(&state, 1), vec![None]);
    let err = place_bid(&mut state, 1, Some(6)).unwrap_err();
    assert_eq!(err.kind(), Some(ValidationKind::InvalidBid));
}

#[test]
fn bidding_rejected_outside_bidding_phase() {
    let mut state = make_game_state(
        empty_hands(),
        MakeGameStateArgs {
            phase: Phase::Scoring,
            ..Default::default()
        },
    );
    let err = place_bid(&mut state, 0, Some(2)).unwrap_err();
    assert_eq!(err.kind(), Some(ValidationKind::PhaseMismatch));

    state.phase = Phase::GameOver;
    let err = place_bid(&mut state, 0, Some(2)).unwrap_err();
    assert_eq!(err.kind(), Some(ValidationKind::GameOver));
}

#[test]
fn unknown_player_rejected() {
    let mut state = bidding_state(3);
    let err = place_bid(&mut state, 4, Some(2)).unwrap_err();
    assert_eq!(err.kind(), Some(ValidationKind::UnknownPlayer));
}
