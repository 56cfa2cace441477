/*!
 * Memo Encodings
 * What a memo slot means, and which candidate wins a slot
 */

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Memo slot semantics, fixed for a whole run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MemoEncoding {
    /// Slot holds the smallest seed whose walk passed through the value
    #[default]
    SeedMarker,
    /// Slot holds 1 + the most steps any continuing walk had taken on arrival
    Length,
}

impl MemoEncoding {
    /// Convert to string representation
    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SeedMarker => "seed-marker",
            Self::Length => "length",
        }
    }

    /// Whether `candidate` should replace the `current` slot value
    ///
    /// # Performance
    /// Hot path - evaluated on every memoized walker step
    #[inline(always)]
    pub const fn wins(&self, candidate: u64, current: u64) -> bool {
        match self {
            Self::SeedMarker => current == 0 || current > candidate,
            Self::Length => candidate > current,
        }
    }
}

impl FromStr for MemoEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "seed-marker" | "seed_marker" | "seed" | "marker" => Ok(Self::SeedMarker),
            "length" | "len" => Ok(Self::Length),
            _ => Err(format!(
                "Invalid encoding '{}'. Valid: seed-marker, length",
                s
            )),
        }
    }
}

impl fmt::Display for MemoEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for MemoEncoding {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for MemoEncoding {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
