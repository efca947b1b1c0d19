//! Content hashing: CSS text → short base-36 key.
//!
//! The hash is a 32-bit djb2 variant walked over UTF-16 code units from the
//! end of the string. It is a cache key, not a security boundary, and it must
//! give the same result across processes so server and client agree on
//! generated class names.

use std::fmt;

/// Signature of a pluggable hash function (see [`crate::registry::RegistryOptions`]).
pub type HashFn = fn(&str) -> String;

const SEED: u32 = 5381;
const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Hash a string into a base-36 token.
pub fn string_hash(input: &str) -> String {
    let units: Vec<u16> = input.encode_utf16().collect();
    let value = units
        .iter()
        .rev()
        .fold(SEED, |acc, &unit| acc.wrapping_mul(33) ^ u32::from(unit));
    to_base36(value)
}

fn to_base36(mut value: u32) -> String {
    if value == 0 {
        return "0".into();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    // Only ASCII digits and lowercase letters were pushed.
    digits.into_iter().map(char::from).collect()
}

/// Content hash identifying one registered node.
///
/// Two structurally equal inputs always produce the same key. A key never
/// changes once assigned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StyleKey(String);

impl StyleKey {
    /// Wrap an already-computed hash.
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// The raw hash text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StyleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StyleKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
