use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

const MAX_NANOSEC: u32 = 999_999_999;
const NANOS_PER_MICRO: u32 = 1_000;

/// An instant decoded from the timestamp extension (type -1).
///
/// Stores whole seconds since the Unix epoch of 1970-01-01T00:00:00Z plus a
/// nanosecond fraction. All three wire forms (4, 8, and 12 bytes) decode into
/// this one representation, so equal instants compare equal regardless of
/// which form carried them. Nanosecond resolution is kept as decoded.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Timestamp {
    secs: i64,
    nanos: u32,
}

impl Timestamp {
    /// Create a timestamp from a whole number of seconds since the epoch.
    pub fn from_secs(secs: i64) -> Timestamp {
        Timestamp { secs, nanos: 0 }
    }

    /// Create a timestamp from raw seconds + nanoseconds. Returns `None` if
    /// nanoseconds is one billion or more.
    pub fn from_raw(secs: i64, nanos: u32) -> Option<Timestamp> {
        if nanos > MAX_NANOSEC {
            return None;
        }
        Some(Timestamp { secs, nanos })
    }

    /// Whole seconds since the epoch. Negative for instants before it.
    pub fn as_secs(&self) -> i64 {
        self.secs
    }

    /// The fractional part, in nanoseconds. Always below one billion.
    pub fn subsec_nanos(&self) -> u32 {
        self.nanos
    }

    /// The fractional part, truncated to microseconds.
    pub fn subsec_micros(&self) -> u32 {
        self.nanos / NANOS_PER_MICRO
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.secs
            .cmp(&other.secs)
            .then(self.nanos.cmp(&other.nanos))
    }
}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.nanos == 0 {
            write!(f, "{}s", self.secs)
        } else {
            write!(f, "{}.{:09}s", self.secs, self.nanos)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_bounds() {
        assert!(Timestamp::from_raw(0, MAX_NANOSEC).is_some());
        assert!(Timestamp::from_raw(0, MAX_NANOSEC + 1).is_none());
    }

    #[test]
    fn equality_across_forms() {
        assert_eq!(Timestamp::from_secs(12), Timestamp::from_raw(12, 0).unwrap());
        assert_ne!(
            Timestamp::from_raw(12, 1).unwrap(),
            Timestamp::from_raw(12, 2).unwrap()
        );
    }

    #[test]
    fn ordering() {
        let a = Timestamp::from_raw(-1, 999_999_999).unwrap();
        let b = Timestamp::from_secs(0);
        let c = Timestamp::from_raw(0, 1).unwrap();
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn micros_truncate() {
        let t = Timestamp::from_raw(0, 123_456_789).unwrap();
        assert_eq!(t.subsec_micros(), 123_456);
    }
}
