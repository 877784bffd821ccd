use std::cmp::Ordering;
use std::convert::TryFrom;
use std::fmt;

use num_traits::NumCast;

use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A decoded MessagePack integer.
///
/// The wire format's integer range is wider than any one primitive: uint64
/// reaches up to `u64::MAX` while int64 reaches down to `i64::MIN`. An
/// `Integer` keeps whichever half of that range the wire value fell in, so
/// decoding never truncates; `as_i64` and `as_u64` convert out when the
/// value fits the requested type.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Integer {
    repr: Repr,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Repr {
    /// Zero and above.
    Unsigned(u64),
    /// Strictly below zero.
    Negative(i64),
}

impl Integer {
    /// Whether the value fits in an `i64`.
    pub fn is_i64(&self) -> bool {
        self.as_i64().is_some()
    }

    /// Whether the value is nonnegative, and so fits in a `u64`.
    pub fn is_u64(&self) -> bool {
        matches!(self.repr, Repr::Unsigned(_))
    }

    /// The value as an `i64`, if it fits.
    pub fn as_i64(&self) -> Option<i64> {
        match self.repr {
            Repr::Unsigned(v) => i64::try_from(v).ok(),
            Repr::Negative(v) => Some(v),
        }
    }

    /// The value as a `u64`. `None` for negative values.
    pub fn as_u64(&self) -> Option<u64> {
        match self.repr {
            Repr::Unsigned(v) => Some(v),
            Repr::Negative(_) => None,
        }
    }

    /// The value as an `f64`. Lossy above 2^53.
    pub fn as_f64(&self) -> Option<f64> {
        match self.repr {
            Repr::Unsigned(v) => NumCast::from(v),
            Repr::Negative(v) => NumCast::from(v),
        }
    }
}

impl Default for Integer {
    fn default() -> Self {
        Integer {
            repr: Repr::Unsigned(0),
        }
    }
}

impl Ord for Integer {
    fn cmp(&self, other: &Integer) -> Ordering {
        use self::Repr::*;
        match (self.repr, other.repr) {
            (Unsigned(a), Unsigned(b)) => a.cmp(&b),
            (Negative(a), Negative(b)) => a.cmp(&b),
            (Unsigned(_), Negative(_)) => Ordering::Greater,
            (Negative(_), Unsigned(_)) => Ordering::Less,
        }
    }
}

impl PartialOrd for Integer {
    fn partial_cmp(&self, other: &Integer) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for Integer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.repr {
            Repr::Unsigned(v) => write!(f, "Integer({})", v),
            Repr::Negative(v) => write!(f, "Integer({})", v),
        }
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.repr {
            Repr::Unsigned(v) => fmt::Display::fmt(&v, f),
            Repr::Negative(v) => fmt::Display::fmt(&v, f),
        }
    }
}

macro_rules! from_unsigned {
    ($($t:ty),*) => {$(
        impl From<$t> for Integer {
            fn from(v: $t) -> Integer {
                Integer {
                    repr: Repr::Unsigned(v as u64),
                }
            }
        }
    )*};
}

macro_rules! from_signed {
    ($($t:ty),*) => {$(
        impl From<$t> for Integer {
            fn from(v: $t) -> Integer {
                if v < 0 {
                    Integer {
                        repr: Repr::Negative(v as i64),
                    }
                } else {
                    Integer {
                        repr: Repr::Unsigned(v as u64),
                    }
                }
            }
        }
    )*};
}

from_unsigned!(u8, u16, u32, u64, usize);
from_signed!(i8, i16, i32, i64, isize);

macro_rules! try_into_primitive {
    ($($t:ty),*) => {$(
        impl TryFrom<Integer> for $t {
            type Error = Integer;
            fn try_from(v: Integer) -> Result<$t, Integer> {
                match v.repr {
                    Repr::Unsigned(n) => <$t>::try_from(n).map_err(|_| v),
                    Repr::Negative(n) => <$t>::try_from(n).map_err(|_| v),
                }
            }
        }
    )*};
}

try_into_primitive!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl Serialize for Integer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.repr {
            Repr::Unsigned(v) => serializer.serialize_u64(v),
            Repr::Negative(v) => serializer.serialize_i64(v),
        }
    }
}

impl<'de> Deserialize<'de> for Integer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Integer, D::Error> {
        struct IntegerVisitor;

        impl<'de> de::Visitor<'de> for IntegerVisitor {
            type Value = Integer;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a MessagePack integer")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Integer, E> {
                Ok(v.into())
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Integer, E> {
                Ok(v.into())
            }
        }

        deserializer.deserialize_any(IntegerVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signs() {
        assert!(Integer::from(0u8).is_u64());
        assert!(Integer::from(-1i8).is_i64());
        assert!(!Integer::from(-1i8).is_u64());
        assert!(!Integer::from(u64::MAX).is_i64());
    }

    #[test]
    fn conversions() {
        assert_eq!(Integer::from(u64::MAX).as_u64(), Some(u64::MAX));
        assert_eq!(Integer::from(u64::MAX).as_i64(), None);
        assert_eq!(Integer::from(i64::MIN).as_i64(), Some(i64::MIN));
        assert_eq!(Integer::from(i64::MIN).as_u64(), None);
        assert_eq!(Integer::from(1u64 << 63).as_u64(), Some(1u64 << 63));
        assert_eq!(u8::try_from(Integer::from(255u64)), Ok(255));
        assert!(u8::try_from(Integer::from(256u64)).is_err());
        assert_eq!(i64::try_from(Integer::from(-5i32)), Ok(-5));
    }

    #[test]
    fn default_is_zero() {
        assert_eq!(Integer::default(), Integer::from(0u8));
    }

    #[test]
    fn ordering() {
        let mut v = [
            Integer::from(u64::MAX),
            Integer::from(-3i64),
            Integer::from(0u8),
            Integer::from(i64::MIN),
            Integer::from(7u16),
        ];
        v.sort();
        assert_eq!(
            v,
            [
                Integer::from(i64::MIN),
                Integer::from(-3i64),
                Integer::from(0u8),
                Integer::from(7u16),
                Integer::from(u64::MAX),
            ]
        );
    }
}
