// used for timestamps on bookings
use chrono::{DateTime, Utc};

// used to write timestamps back out exactly as they came in
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

// used when parsing a string to a Timestamp
use std::str::FromStr;
// used to print out readable forms of a data type
use std::fmt;
// used to compare and hash by instant only
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use crate::error::BookingError;

/// An RFC3339 instant that remembers the text it was parsed from.
///
/// Comparisons look at the instant alone, so `2026-06-01T12:00:00+02:00` and
/// `2026-06-01T10:00:00Z` are equal, while each still serializes back to its
/// own original text.
#[derive(Debug, Clone)]
pub struct Timestamp {
    instant: DateTime<Utc>,
    text: String,
}

impl Timestamp {
    pub fn parse(s: &str) -> Option<Timestamp> {
        Timestamp::from_str(s).ok()
    }
    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(instant: DateTime<Utc>) -> Self {
        Timestamp {
            instant,
            text: instant.to_rfc3339(),
        }
    }
}

impl FromStr for Timestamp {
    type Err = BookingError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // chrono also takes a space between date and time, RFC3339 proper does not
        if s.as_bytes().get(10) != Some(&b'T') {
            return Err(BookingError::invalid_date());
        }
        let parsed = DateTime::parse_from_rfc3339(s).map_err(|_| BookingError::invalid_date())?;
        Ok(Timestamp {
            instant: parsed.with_timezone(&Utc),
            text: s.to_string(),
        })
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        self.instant == other.instant
    }
}
impl Eq for Timestamp {}
impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.instant.cmp(&other.instant)
    }
}
impl Hash for Timestamp {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.instant.hash(state);
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}
impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Timestamp::from_str(&s).map_err(de::Error::custom)
    }
}
