//! RNG seed derivation utilities for deterministic game behavior.
//!
//! Every hand of a game is shuffled from its own seed, derived from the game
//! seed and the 1-based hand number, so a whole game replays identically from
//! one `u64`.

/// Derive a seed for shuffling the deck before a hand.
///
/// # Arguments
///
/// * `game_seed` - Base RNG seed of the game
/// * `hand_no` - 1-based hand number
///
/// # Returns
///
/// Derived seed that is unique per (game, hand) combination.
pub fn derive_dealing_seed(game_seed: u64, hand_no: u32) -> u64 {
    // SplitMix64 finalizer over the combined input so neighbouring hands
    // do not produce neighbouring seeds.
    let mut z = game_seed
        .wrapping_add((hand_no as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
        .wrapping_add(2);
    z ^= z >> 30;
    z = z.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z ^= z >> 27;
    z = z.wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
