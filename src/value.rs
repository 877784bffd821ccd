use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::{Integer, Timestamp};

/// A decoded value tree.
///
/// Maps are kept as pair sequences so insertion order is preserved exactly as
/// read off the wire; MessagePack map keys may themselves be any value.
/// `Undefined`, `BigInt`, `Error` and `Set` only arise from the dialect's
/// typed extensions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Bool(bool),
    Int(Integer),
    Float(f64),
    Str(String),
    Bin(Vec<u8>),
    Array(Vec<Value>),
    Map(Vec<(Value, Value)>),
    Undefined,
    Timestamp(Timestamp),
    BigInt(BigUint),
    Error(ErrorValue),
    Set(Vec<Value>),
}

impl Value {
    /// Short variant name, for error and trace text.
    pub fn name(&self) -> &'static str {
        use self::Value::*;
        match self {
            Null => "null",
            Bool(_) => "bool",
            Int(_) => "int",
            Float(_) => "float",
            Str(_) => "str",
            Bin(_) => "bin",
            Array(_) => "array",
            Map(_) => "map",
            Undefined => "undefined",
            Timestamp(_) => "timestamp",
            BigInt(_) => "bigint",
            Error(_) => "error",
            Set(_) => "set",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn as_bool(&self) -> Option<bool> {
        if let Value::Bool(v) = *self {
            Some(v)
        } else {
            None
        }
    }

    pub fn as_int(&self) -> Option<Integer> {
        if let Value::Int(v) = *self {
            Some(v)
        } else {
            None
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::Int(ref n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Value::Int(ref n) => n.as_u64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Int(ref n) => n.as_f64(),
            Value::Float(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        if let Value::Str(ref v) = *self {
            Some(v.as_str())
        } else {
            None
        }
    }

    pub fn as_slice(&self) -> Option<&[u8]> {
        if let Value::Bin(ref v) = *self {
            Some(v)
        } else {
            None
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        if let Value::Array(ref v) = *self {
            Some(v)
        } else {
            None
        }
    }

    pub fn as_map(&self) -> Option<&[(Value, Value)]> {
        if let Value::Map(ref v) = *self {
            Some(v)
        } else {
            None
        }
    }

    pub fn as_timestamp(&self) -> Option<Timestamp> {
        if let Value::Timestamp(v) = *self {
            Some(v)
        } else {
            None
        }
    }

    pub fn as_bigint(&self) -> Option<&BigUint> {
        if let Value::BigInt(ref v) = *self {
            Some(v)
        } else {
            None
        }
    }

    pub fn as_set(&self) -> Option<&[Value]> {
        if let Value::Set(ref v) = *self {
            Some(v)
        } else {
            None
        }
    }

    /// Look up a map entry by string key. First match wins.
    pub fn get(&self, key: &str) -> Option<&Value> {
        let map = self.as_map()?;
        map.iter()
            .find(|(k, _)| k.as_str() == Some(key))
            .map(|(_, v)| v)
    }
}

impl From<Integer> for Value {
    fn from(v: Integer) -> Value {
        Value::Int(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Value {
        Value::Str(v.to_string())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Value {
        Value::Int(v.into())
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Value {
        Value::Int(v.into())
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Value {
        Value::Bool(v)
    }
}

/// A decoded error extension (type 101): an error class discriminant plus a
/// message and cause string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorValue {
    pub code: i64,
    pub message: String,
    pub cause: String,
}

impl std::fmt::Display for ErrorValue {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}(message={:?}, cause={:?})",
            self.code, self.message, self.cause
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        let v = Value::Map(vec![
            (Value::from("a"), Value::from(1i64)),
            (Value::from("b"), Value::Bool(true)),
        ]);
        assert_eq!(v.get("a").and_then(Value::as_i64), Some(1));
        assert_eq!(v.get("b").and_then(Value::as_bool), Some(true));
        assert!(v.get("c").is_none());
        assert!(Value::Null.is_null());
        assert!(Value::Undefined.is_undefined());
        assert_eq!(Value::Float(1.5).as_f64(), Some(1.5));
        assert_eq!(Value::from(3i64).as_f64(), Some(3.0));
    }

    #[test]
    fn map_order_is_kept() {
        let v = Value::Map(vec![
            (Value::from("z"), Value::Null),
            (Value::from("a"), Value::Null),
        ]);
        let keys: Vec<&str> = v
            .as_map()
            .unwrap()
            .iter()
            .filter_map(|(k, _)| k.as_str())
            .collect();
        assert_eq!(keys, ["z", "a"]);
    }
}
