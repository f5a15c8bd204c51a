//! Continuous word hash: a word read as a base-27 fraction in `[0, 1)`.
//!
//! The apostrophe is digit 0 and `a..=z` are digits 1..=26. The first
//! character's digit is reduced by one so the smallest word hashes to 0
//! rather than 1/27. Only the first `max_chars()` characters contribute,
//! which is as many base-27 digits as the chosen float can hold exactly.
//!
//! Because the digit order matches byte order, hash order follows
//! lexicographic order up to the precision limit, and the ideal slot
//! `floor(h * capacity)` is monotone in the word.

use core::fmt;
use core::str::FromStr;

use clap::ValueEnum;
use num_traits::Float;

use crate::error::ZipfError;

const BASE: u8 = 27;

/// Float representation used to compute word hashes.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, ValueEnum)]
pub enum HashPrecision {
    /// `f32`: 27^5 < 2^24, so 5 characters are represented exactly.
    #[value(alias = "f32", alias = "32")]
    Single,
    /// `f64`: 27^11 < 2^53, so 11 characters are represented exactly.
    #[default]
    #[value(alias = "f64", alias = "64")]
    Double,
}

impl HashPrecision {
    /// Number of leading characters that contribute to the hash.
    pub const fn max_chars(self) -> usize {
        match self {
            HashPrecision::Single => 5,
            HashPrecision::Double => 11,
        }
    }
}

impl fmt::Display for HashPrecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashPrecision::Single => f.write_str("single"),
            HashPrecision::Double => f.write_str("double"),
        }
    }
}

impl FromStr for HashPrecision {
    type Err = ZipfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" | "f32" | "32" => Ok(HashPrecision::Single),
            "double" | "f64" | "64" => Ok(HashPrecision::Double),
            _ => Err(ZipfError::InvalidPrecision(s.to_string())),
        }
    }
}

/// Hash `word` at the given precision. The result is widened to `f64`,
/// which is exact and preserves order for `Single`.
///
/// Words that agree on their first `max_chars()` characters hash
/// identically, except when the character at the limit is an apostrophe:
/// then the character after it contributes one extra digit, so that
/// `"abcdefghij'k"` does not collide with `"abcdefghij"`.
pub fn word_hash(word: &str, precision: HashPrecision) -> f64 {
    let bytes = word.as_bytes();
    match precision {
        HashPrecision::Single => f64::from(fraction::<f32>(bytes, precision.max_chars())),
        HashPrecision::Double => fraction::<f64>(bytes, precision.max_chars()),
    }
}

#[inline]
fn digit(b: u8) -> u8 {
    match b {
        b'a'..=b'z' => b - b'a' + 1,
        b'A'..=b'Z' => b - b'A' + 1,
        // apostrophe, and anything a normalizing tokenizer would not emit
        _ => 0,
    }
}

#[inline]
fn lift<F: From<u8>>(d: u8) -> F {
    F::from(d)
}

fn fraction<F: Float + From<u8>>(bytes: &[u8], max_chars: usize) -> F {
    let Some(&first) = bytes.first() else {
        return F::zero();
    };
    let base: F = lift(BASE);
    let mut scale = base;
    let mut hash = lift::<F>(digit(first).saturating_sub(1)) / scale;

    let length = bytes.len().min(max_chars);
    for &b in &bytes[1..length] {
        scale = scale * base;
        let d = digit(b);
        if d != 0 {
            hash = hash + lift::<F>(d) / scale;
        }
    }

    if bytes.len() > length && bytes[length - 1] == b'\'' {
        scale = scale * base;
        hash = hash + lift::<F>(digit(bytes[length])) / scale;
    }
    hash
}
