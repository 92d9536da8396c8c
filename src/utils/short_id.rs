//! Random short identifier generation.

use rand::Rng;

/// Alphabet for generated identifiers.
///
/// Latin letters only, both cases: 52 symbols, so an 8-character identifier
/// gives 52^8 (~5.3e13) possible values.
const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Generates a random identifier of `length` characters from [`ALPHABET`].
///
/// Uniqueness is not guaranteed here; the allocator reserves the identifier
/// against storage and regenerates on collision.
pub fn generate_short_id(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}
