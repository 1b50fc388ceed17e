//! Short token generation.
//!
//! Tokens are drawn uniformly from the 62-symbol alphanumeric alphabet using a
//! small, non-cryptographic PRNG seeded afresh from the thread RNG on every
//! call. No uniqueness is promised here: collisions are caught by the store's
//! unique constraint.

use rand::distr::Alphanumeric;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Token length used for newly created records.
pub const TOKEN_LENGTH: usize = 8;

/// Generates a random alphanumeric token of `length` characters.
///
/// # Examples
///
/// ```
/// use link_relay::utils::token_generator::generate_token;
///
/// let token = generate_token(8);
/// assert_eq!(token.len(), 8);
/// assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_token(length: usize) -> String {
    SmallRng::from_rng(&mut rand::rng())
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}
