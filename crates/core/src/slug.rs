//! Public slug generation.
//!
//! A slug is the short path segment of a template's share link
//! (`/v/{slug}`). It is generated once, on first publish, and reused for the
//! lifetime of the record. Uniqueness is enforced by the store, not here.

use rand::Rng;

/// Characters a slug is drawn from: lowercase ASCII letters and digits.
const SLUG_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Length of generated slugs.
pub const SLUG_LEN: usize = 8;

/// Generate a fresh random slug of [`SLUG_LEN`] characters.
pub fn generate_slug() -> String {
    let mut rng = rand::rng();
    (0..SLUG_LEN)
        .map(|_| SLUG_ALPHABET[rng.random_range(0..SLUG_ALPHABET.len())] as char)
        .collect()
}
