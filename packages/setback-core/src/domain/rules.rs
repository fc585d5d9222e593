use std::ops::RangeInclusive;

pub const PLAYERS: usize = 4;
pub const PARTNERSHIPS: usize = 2;

/// Cards dealt to each player, and therefore tricks per hand.
pub const HAND_SIZE: usize = 6;
pub const TRICKS_PER_HAND: u8 = HAND_SIZE as u8;

/// Cards handed out per player per pass around the table.
pub const DEAL_PACKET: usize = 3;

pub const MIN_BID: u8 = 2;
pub const MAX_BID: u8 = 6;

/// High, Low, Jack, Off-Jack, Joker, Game.
pub const SCORING_CATEGORIES: u8 = 6;

pub const DEFAULT_TARGET_SCORE: i16 = 21;

/// Largest accepted target; one more hand of points still fits in `i16`.
pub const MAX_TARGET_SCORE: i16 = i16::MAX - MAX_BID as i16;

pub fn valid_bid_range() -> RangeInclusive<u8> {
    MIN_BID..=MAX_BID
}
