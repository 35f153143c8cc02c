use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// A sequential short identifier.
///
/// Identifiers are assigned from 0 upwards. The textual form is canonical
/// decimal, so `"7"` parses while `"07"`, `"+7"` and `" 7"` do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShortId(u64);

impl ShortId {
    /// The identifier handed to the first registered URL.
    pub const FIRST: ShortId = ShortId(0);

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns the identifier that follows this one, or `None` once the
    /// id space is exhausted.
    pub fn next(self) -> Option<ShortId> {
        self.0.checked_add(1).map(ShortId)
    }
}

impl Display for ShortId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a canonical short id")]
pub struct ParseShortIdError(String);

impl FromStr for ShortId {
    type Err = ParseShortIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let canonical = !s.is_empty()
            && s.bytes().all(|b| b.is_ascii_digit())
            && (s == "0" || !s.starts_with('0'));
        if !canonical {
            return Err(ParseShortIdError(s.to_owned()));
        }

        s.parse::<u64>()
            .map(ShortId)
            .map_err(|_| ParseShortIdError(s.to_owned()))
    }
}

/// A stored association between a short id and the original URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlMapping {
    pub id: ShortId,
    pub url: String,
}

impl UrlMapping {
    pub fn new(id: ShortId, url: impl Into<String>) -> Self {
        Self {
            id,
            url: url.into(),
        }
    }
}
