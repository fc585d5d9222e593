use crate::domain::cards_logic::lead_suit_for;
use crate::domain::rules::{PLAYERS, TRICKS_PER_HAND};
use crate::domain::state::{
    expected_actor, next_player, require_turn, GameState, Phase, PlayerId, Trick,
};
use crate::domain::{card_beats, hand_has_suit, Card, Suit};
use crate::errors::domain::{DomainError, ValidationKind};

/// Result of playing a card, describing what state changes occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayCardResult {
    pub card: Card,
    /// Trump suit, when this card was the first of the hand.
    pub trump_established: Option<Suit>,
    /// The trick this card completed, with its winner.
    pub completed_trick: Option<Trick>,
    /// Whether this card completed the last trick of the hand.
    pub hand_completed: bool,
}

/// Suit-following check for `card` from `hand` into `trick`.
///
/// Leading: anything except the joker while other cards remain.
/// Following: lead suit, trump, joker or off-jack are always fine, except that
/// the off-jack cannot stand in for trump when a trump-suit card led and the
/// player still holds a trump-suit card. Anything else requires being void in
/// the lead suit.
pub fn can_follow(
    hand: &[Card],
    card: Card,
    trick: &Trick,
    trump: Option<Suit>,
) -> Result<(), DomainError> {
    let Some(&(_, first)) = trick.plays.first() else {
        if card.is_joker() && hand.len() > 1 {
            return Err(DomainError::validation(
                ValidationKind::JokerLead,
                "Joker may only lead as the player's last card",
            ));
        }
        return Ok(());
    };

    let trump = trump.ok_or_else(|| DomainError::invariant("trump unset after first play"))?;
    let lead = trick
        .lead_suit
        .ok_or_else(|| DomainError::invariant("lead suit unset after first play"))?;

    if card.is_trump(trump) {
        return Ok(());
    }

    if card.is_off_jack(trump) {
        let trump_suit_led = first.is_suit(trump);
        let holds_trump_suit = hand.iter().any(|c| c.is_suit(trump));
        if trump_suit_led && holds_trump_suit {
            return Err(DomainError::validation(
                ValidationKind::MustFollowSuit,
                format!("Trump was led: play {trump} before the off-jack"),
            ));
        }
        return Ok(());
    }

    if card.is_suit(lead) || !hand_has_suit(hand, lead, Some(trump)) {
        return Ok(());
    }

    Err(DomainError::validation(
        ValidationKind::MustFollowSuit,
        format!("Must follow {lead}"),
    ))
}

/// Compute legal cards the player may play, independent of turn enforcement.
pub fn legal_moves(state: &GameState, who: PlayerId) -> Vec<Card> {
    let Phase::Playing { .. } = state.phase else {
        return Vec::new();
    };
    let Some(player) = state.player(who) else {
        return Vec::new();
    };

    let hand = &player.hand;
    let mut legal: Vec<Card> = hand
        .iter()
        .copied()
        .filter(|&c| can_follow(hand, c, &state.hand.current_trick, state.hand.trump).is_ok())
        .collect();
    legal.sort();
    legal
}

/// Play a card into the current trick, enforcing phase, turn, ownership,
/// the joker-lead rule and suit-following. The first card of the hand
/// establishes trump.
pub fn play_card(
    state: &mut GameState,
    who: PlayerId,
    card: Card,
) -> Result<PlayCardResult, DomainError> {
    let trick_no = match state.phase {
        Phase::Playing { trick_no } => trick_no,
        Phase::GameOver => {
            return Err(DomainError::validation(
                ValidationKind::GameOver,
                "Game is over",
            ))
        }
        _ => {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "Not in playing phase",
            ))
        }
    };

    if who as usize >= PLAYERS {
        return Err(DomainError::validation(
            ValidationKind::UnknownPlayer,
            format!("Unknown player {who}"),
        ));
    }

    let turn = require_turn(state, "play_card")?;
    let trick = &state.hand.current_trick;
    if let Some(leader) = trick.leader() {
        let expected = expected_actor(leader, trick.plays.len() as u8);
        if turn != expected {
            return Err(DomainError::invariant(format!(
                "turn {turn} disagrees with trick order (expected {expected})"
            )));
        }
    }
    if turn != who {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            format!("Not your turn to play. Expected player {turn}, got player {who}"),
        ));
    }

    let Some(pos) = state.players[who as usize].hand.iter().position(|&c| c == card) else {
        return Err(DomainError::validation(
            ValidationKind::CardNotInHand,
            format!("Card {card} not in hand"),
        ));
    };

    can_follow(
        &state.players[who as usize].hand,
        card,
        &state.hand.current_trick,
        state.hand.trump,
    )?;

    // Trump establishment (first card of the hand)
    let (trump, trump_established) = match state.hand.trump {
        Some(t) => (t, None),
        None => {
            if state.hand.cards_played() != 0 {
                return Err(DomainError::invariant("trump unset after cards were played"));
            }
            let Some(suit) = card.suit() else {
                return Err(DomainError::validation(
                    ValidationKind::JokerLead,
                    "Joker cannot establish trump",
                ));
            };
            (suit, Some(suit))
        }
    };

    // All checks passed; mutate.
    if let Some(suit) = trump_established {
        state.hand.trump = Some(suit);
    }
    if state.hand.current_trick.plays.is_empty() {
        state.hand.current_trick.lead_suit = Some(lead_suit_for(card, trump));
    }
    let removed = state.players[who as usize].hand.remove(pos);
    state.hand.current_trick.plays.push((who, removed));
    state.turn = Some(next_player(who));

    let mut result = PlayCardResult {
        card,
        trump_established,
        completed_trick: None,
        hand_completed: false,
    };

    if !state.hand.current_trick.is_complete() {
        return Ok(result);
    }

    let winner = resolve_trick(&state.hand.current_trick, trump)
        .ok_or_else(|| DomainError::invariant("complete trick without a winner"))?;
    let mut trick = std::mem::take(&mut state.hand.current_trick);
    trick.winner = Some(winner);
    state.hand.completed_tricks.push(trick.clone());
    state.last_trick = Some(trick.clone());
    state.turn = Some(winner);
    result.completed_trick = Some(trick);

    if trick_no >= TRICKS_PER_HAND {
        state.phase = Phase::Scoring;
        state.turn = None;
        result.hand_completed = true;
    } else {
        state.phase = Phase::Playing {
            trick_no: trick_no + 1,
        };
    }

    Ok(result)
}

/// Winner of a complete trick; `None` while fewer than four cards are in.
pub fn resolve_trick(trick: &Trick, trump: Suit) -> Option<PlayerId> {
    if !trick.is_complete() {
        return None;
    }
    let lead = trick.lead_suit?;

    let mut best = trick.plays[0];
    for &play in &trick.plays[1..] {
        if card_beats(play.1, best.1, lead, trump) {
            best = play;
        }
    }
    Some(best.0)
}
