//! Short code generation.
//!
//! Codes are drawn uniformly from the 62-character alphanumeric alphabet
//! at a fixed length. Collision probability is negligible at the default
//! length, but the generator still re-rolls against the live key set so a
//! duplicate can never be handed out.

use std::collections::HashMap;

use rand::Rng;

/// The 62-character alphabet codes are drawn from.
const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generates a random short code of `length` characters.
///
/// Each character is drawn independently and uniformly from [`ALPHABET`].
/// The result is not checked against any existing key set; use
/// [`generate_unique_code`] for that.
pub fn generate_code(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Generates a short code that is not already a key in `existing`.
///
/// Re-rolls the whole code on collision. There is no retry cap: the loop
/// terminates almost surely as long as at least one code of the given
/// length is free.
pub fn generate_unique_code<V>(existing: &HashMap<String, V>, length: usize) -> String {
    loop {
        let code = generate_code(length);
        if !existing.contains_key(&code) {
            return code;
        }
    }
}
