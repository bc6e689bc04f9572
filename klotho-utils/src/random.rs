//! Uniform random lowercase letters and strings.
//!
//! The unseeded functions draw from [`rand::thread_rng`], so every thread owns
//! an independently seeded generator and concurrent callers never share state.
//! The `_with` variants take an explicit generator for reproducible output.

use rand::Rng;

/// The 26 lowercase ASCII letters every generated character is drawn from.
pub const ALPHABET: &[u8; 26] = b"abcdefghijklmnopqrstuvwxyz";

/// Draw one letter uniformly from [`ALPHABET`] using the thread-local generator.
#[must_use]
pub fn random_char() -> char {
    random_char_with(&mut rand::thread_rng())
}

/// Draw one letter uniformly from [`ALPHABET`] using `rng`.
#[must_use]
pub fn random_char_with<R: Rng + ?Sized>(rng: &mut R) -> char {
    char::from(ALPHABET[rng.gen_range(0..ALPHABET.len())])
}

/// Build a string of exactly `length` random letters.
///
/// A zero length yields an empty string. Large lengths allocate accordingly.
#[must_use]
pub fn random_char_string(length: usize) -> String {
    random_char_string_with(&mut rand::thread_rng(), length)
}

/// Build a string of exactly `length` random letters drawn from `rng`.
#[must_use]
pub fn random_char_string_with<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    let mut out = String::with_capacity(length);
    for _ in 0..length {
        out.push(random_char_with(rng));
    }
    out
}
