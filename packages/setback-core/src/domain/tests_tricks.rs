use crate::domain::state::Phase;
use crate::domain::test_state_helpers::{
    card, cards, make_game_state, playing_state, MakeGameStateArgs,
};
use crate::domain::tricks::{legal_moves, play_card, resolve_trick};
use crate::domain::{Card, Suit};
use crate::errors::domain::{DomainError, ValidationKind};

#[test]
fn leading_joker_with_other_cards_is_rejected() {
    let hands = [
        cards(&["JK", "2C", "9S"]),
        cards(&["3C", "4C", "5C"]),
        cards(&["6C", "7C", "8C"]),
        cards(&["9C", "TC", "QC"]),
    ];
    let mut state = playing_state(hands, Suit::Hearts, 0, 0, 2);
    let before = state.clone();

    let err = play_card(&mut state, 0, Card::Joker).unwrap_err();
    match err {
        DomainError::Validation(ValidationKind::JokerLead, msg) => {
            assert!(msg.contains("last card"), "unexpected error message: {msg}");
        }
        other => panic!("expected JokerLead validation error, got: {other:?}"),
    }
    assert_eq!(state, before);
    assert!(!legal_moves(&state, 0).contains(&Card::Joker));
}

#[test]
fn joker_may_lead_as_last_card_and_leads_trump() {
    let hands = [
        cards(&["JK"]),
        cards(&["3C"]),
        cards(&["AH"]),
        cards(&["9C"]),
    ];
    let mut state = playing_state(hands, Suit::Hearts, 0, 0, 2);
    state.phase = Phase::Playing { trick_no: 6 };

    play_card(&mut state, 0, Card::Joker).unwrap();
    assert_eq!(state.hand.current_trick.lead_suit, Some(Suit::Hearts));
}

#[test]
fn first_card_of_hand_sets_trump() {
    let hands = [
        cards(&["9S", "2C"]),
        cards(&["3S", "4C"]),
        cards(&["6S", "7C"]),
        cards(&["9C", "TC"]),
    ];
    let mut state = make_game_state(
        hands,
        MakeGameStateArgs {
            phase: Phase::Playing { trick_no: 1 },
            declarer: Some(0),
            winning_bid: Some(3),
            ..Default::default()
        },
    );
    assert_eq!(state.hand.trump, None);

    let result = play_card(&mut state, 0, card("9S")).unwrap();
    assert_eq!(result.trump_established, Some(Suit::Spades));
    assert_eq!(state.hand.trump, Some(Suit::Spades));
    assert_eq!(state.hand.current_trick.lead_suit, Some(Suit::Spades));

    let result = play_card(&mut state, 1, card("3S")).unwrap();
    assert_eq!(result.trump_established, None, "trump is set once per hand");
}

#[test]
fn must_follow_lead_suit_when_able() {
    let hands = [
        cards(&["KC", "2D"]),
        cards(&["3C", "4D"]),
        cards(&["6S", "7D"]),
        cards(&["9S", "TS"]),
    ];
    let mut state = playing_state(hands, Suit::Hearts, 0, 0, 2);
    play_card(&mut state, 0, card("KC")).unwrap();

    let before = state.clone();
    let err = play_card(&mut state, 1, card("4D")).unwrap_err();
    assert_eq!(err.kind(), Some(ValidationKind::MustFollowSuit));
    assert_eq!(state, before);
    assert_eq!(legal_moves(&state, 1), cards(&["3C"]));

    play_card(&mut state, 1, card("3C")).unwrap();
    // Player 2 is void in clubs: anything goes.
    assert_eq!(legal_moves(&state, 2).len(), 2);
}

#[test]
fn trump_and_joker_always_playable_when_following() {
    let hands = [
        cards(&["KC", "2D"]),
        cards(&["3C", "4H", "JK"]),
        cards(&["6S", "7D"]),
        cards(&["9S", "TS"]),
    ];
    let mut state = playing_state(hands, Suit::Hearts, 0, 0, 2);
    play_card(&mut state, 0, card("KC")).unwrap();

    assert_eq!(legal_moves(&state, 1), cards(&["3C", "4H", "JK"]));
}

#[test]
fn off_jack_cannot_replace_trump_when_trump_led_and_held() {
    // Trump hearts, off-jack is the jack of diamonds.
    let hands = [
        cards(&["AH", "2C"]),
        cards(&["JD", "5H", "3C"]),
        cards(&["4C", "6S"]),
        cards(&["9S", "TS"]),
    ];
    let mut state = playing_state(hands, Suit::Hearts, 0, 0, 2);
    play_card(&mut state, 0, card("AH")).unwrap();

    let err = play_card(&mut state, 1, card("JD")).unwrap_err();
    assert_eq!(err.kind(), Some(ValidationKind::MustFollowSuit));
    assert_eq!(legal_moves(&state, 1), cards(&["5H"]));
}

#[test]
fn off_jack_allowed_when_no_trump_suit_card_held() {
    let hands = [
        cards(&["AH", "2C"]),
        cards(&["JD", "3C"]),
        cards(&["4C", "6S"]),
        cards(&["9S", "TS"]),
    ];
    let mut state = playing_state(hands, Suit::Hearts, 0, 0, 2);
    play_card(&mut state, 0, card("AH")).unwrap();

    assert_eq!(legal_moves(&state, 1), cards(&["3C", "JD"]));
    play_card(&mut state, 1, card("JD")).unwrap();
}

#[test]
fn off_jack_does_not_count_as_its_printed_suit() {
    // Diamonds led under hearts trump; the jack of diamonds is trump, so a
    // player holding only it among diamonds is void and may play anything.
    let hands = [
        cards(&["KD", "2C"]),
        cards(&["JD", "3C"]),
        cards(&["4C", "6S"]),
        cards(&["9S", "TS"]),
    ];
    let mut state = playing_state(hands, Suit::Hearts, 0, 0, 2);
    play_card(&mut state, 0, card("KD")).unwrap();

    assert_eq!(legal_moves(&state, 1), cards(&["3C", "JD"]));
}

#[test]
fn off_jack_outranks_ace_of_trump_in_trick() {
    let hands = [
        cards(&["KC"]),
        cards(&["AH"]),
        cards(&["AC"]),
        cards(&["JD"]),
    ];
    let mut state = playing_state(hands, Suit::Hearts, 0, 0, 2);
    state.phase = Phase::Playing { trick_no: 2 };
    for (p, c) in [(0, "KC"), (1, "AH"), (2, "AC"), (3, "JD")] {
        play_card(&mut state, p, card(c)).unwrap();
    }

    let last = state.last_trick.clone().unwrap();
    assert_eq!(last.winner, Some(3));
    assert_eq!(state.turn, Some(3), "winner leads next");
    assert_eq!(state.phase, Phase::Playing { trick_no: 3 });
    assert_eq!(state.hand.completed_tricks.len(), 1);
    assert!(state.hand.current_trick.plays.is_empty());
}

#[test]
fn highest_lead_suit_wins_without_trump() {
    let hands = [
        cards(&["9C"]),
        cards(&["KC"]),
        cards(&["AS"]),
        cards(&["TC"]),
    ];
    let mut state = playing_state(hands, Suit::Hearts, 0, 0, 2);
    for (p, c) in [(0, "9C"), (1, "KC"), (2, "AS"), (3, "TC")] {
        play_card(&mut state, p, card(c)).unwrap();
    }
    assert_eq!(state.last_trick.as_ref().and_then(|t| t.winner), Some(1));
}

#[test]
fn turn_out_of_trick_order_is_an_invariant_error() {
    let hands = [
        cards(&["9C", "2S"]),
        cards(&["KC", "3S"]),
        cards(&["AS", "4S"]),
        cards(&["TC", "5S"]),
    ];
    let mut state = playing_state(hands, Suit::Hearts, 0, 0, 2);
    play_card(&mut state, 0, card("9C")).unwrap();
    state.turn = Some(2);
    let before = state.clone();

    let err = play_card(&mut state, 2, card("AS")).unwrap_err();
    assert!(err.is_invariant(), "unexpected error: {err:?}");
    assert_eq!(state, before);
}

#[test]
fn sixth_trick_moves_to_scoring() {
    let hands = [
        cards(&["9C"]),
        cards(&["KC"]),
        cards(&["AS"]),
        cards(&["TC"]),
    ];
    let mut state = playing_state(hands, Suit::Hearts, 0, 0, 2);
    state.phase = Phase::Playing { trick_no: 6 };

    let mut last = None;
    for (p, c) in [(0, "9C"), (1, "KC"), (2, "AS"), (3, "TC")] {
        last = Some(play_card(&mut state, p, card(c)).unwrap());
    }
    let last = last.unwrap();
    assert!(last.hand_completed);
    assert_eq!(state.phase, Phase::Scoring);
    assert_eq!(state.turn, None);
}

#[test]
fn play_rejections_leave_state_unchanged() {
    let hands = [
        cards(&["9C", "2D"]),
        cards(&["KC", "3D"]),
        cards(&["AS", "4D"]),
        cards(&["TC", "5D"]),
    ];
    let mut state = playing_state(hands, Suit::Hearts, 0, 0, 2);
    let before = state.clone();

    let err = play_card(&mut state, 1, card("KC")).unwrap_err();
    assert_eq!(err.kind(), Some(ValidationKind::OutOfTurn));

    let err = play_card(&mut state, 0, card("AH")).unwrap_err();
    assert_eq!(err.kind(), Some(ValidationKind::CardNotInHand));

    let err = play_card(&mut state, 9, card("9C")).unwrap_err();
    assert_eq!(err.kind(), Some(ValidationKind::UnknownPlayer));

    assert_eq!(state, before);

    state.phase = Phase::Bidding;
    let err = play_card(&mut state, 0, card("9C")).unwrap_err();
    assert_eq!(err.kind(), Some(ValidationKind::PhaseMismatch));
}

#[test]
fn resolve_trick_waits_for_four_cards() {
    let mut t = crate::domain::state::Trick {
        plays: vec![(0, card("2C")), (1, card("3C"))],
        lead_suit: Some(Suit::Clubs),
        winner: None,
    };
    assert_eq!(resolve_trick(&t, Suit::Spades), None);
    t.plays.push((2, card("2S")));
    t.plays.push((3, card("AC")));
    assert_eq!(resolve_trick(&t, Suit::Spades), Some(2));
}
