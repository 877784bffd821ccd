//! Lead-byte format markers and code classes for the msgpackr dialect.
//!
//! The dialect covers all 256 lead bytes: standard MessagePack, plus the
//! record range `0x40-0x7F` and the bundled-strings reference `0xC1`.

/// MessagePack dialect format markers. For internal use only.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Marker {
    PosFixInt(u8),
    Record(u8),
    FixMap(u8),
    FixArray(u8),
    FixStr(u8),
    Nil,
    BundledStrings,
    False,
    True,
    Bin8,
    Bin16,
    Bin32,
    Ext8,
    Ext16,
    Ext32,
    F32,
    F64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Int8,
    Int16,
    Int32,
    Int64,
    FixExt1,
    FixExt2,
    FixExt4,
    FixExt8,
    FixExt16,
    Str8,
    Str16,
    Str32,
    Array16,
    Array32,
    Map16,
    Map32,
    NegFixInt(i8),
}

impl Marker {
    /// Construct a marker from a single byte.
    pub fn from_u8(n: u8) -> Marker {
        match n {
            0x00..=0x3f => Marker::PosFixInt(n),
            0x40..=0x7f => Marker::Record(n & 0x3F),
            0x80..=0x8f => Marker::FixMap(n & 0x0F),
            0x90..=0x9f => Marker::FixArray(n & 0x0F),
            0xa0..=0xbf => Marker::FixStr(n & 0x1F),
            0xc0 => Marker::Nil,
            0xc1 => Marker::BundledStrings,
            0xc2 => Marker::False,
            0xc3 => Marker::True,
            0xc4 => Marker::Bin8,
            0xc5 => Marker::Bin16,
            0xc6 => Marker::Bin32,
            0xc7 => Marker::Ext8,
            0xc8 => Marker::Ext16,
            0xc9 => Marker::Ext32,
            0xca => Marker::F32,
            0xcb => Marker::F64,
            0xcc => Marker::UInt8,
            0xcd => Marker::UInt16,
            0xce => Marker::UInt32,
            0xcf => Marker::UInt64,
            0xd0 => Marker::Int8,
            0xd1 => Marker::Int16,
            0xd2 => Marker::Int32,
            0xd3 => Marker::Int64,
            0xd4 => Marker::FixExt1,
            0xd5 => Marker::FixExt2,
            0xd6 => Marker::FixExt4,
            0xd7 => Marker::FixExt8,
            0xd8 => Marker::FixExt16,
            0xd9 => Marker::Str8,
            0xda => Marker::Str16,
            0xdb => Marker::Str32,
            0xdc => Marker::Array16,
            0xdd => Marker::Array32,
            0xde => Marker::Map16,
            0xdf => Marker::Map32,
            0xe0..=0xff => Marker::NegFixInt(n as i8),
        }
    }

    /// Converts a marker object into a single-byte representation.
    /// Assumes the content of the marker is already masked appropriately.
    pub fn into_u8(self) -> u8 {
        match self {
            Marker::PosFixInt(val) => val,
            Marker::Record(id) => 0x40 | id,
            Marker::FixMap(len) => 0x80 | len,
            Marker::FixArray(len) => 0x90 | len,
            Marker::FixStr(len) => 0xa0 | len,
            Marker::Nil => 0xc0,
            Marker::BundledStrings => 0xc1,
            Marker::False => 0xc2,
            Marker::True => 0xc3,
            Marker::Bin8 => 0xc4,
            Marker::Bin16 => 0xc5,
            Marker::Bin32 => 0xc6,
            Marker::Ext8 => 0xc7,
            Marker::Ext16 => 0xc8,
            Marker::Ext32 => 0xc9,
            Marker::F32 => 0xca,
            Marker::F64 => 0xcb,
            Marker::UInt8 => 0xcc,
            Marker::UInt16 => 0xcd,
            Marker::UInt32 => 0xce,
            Marker::UInt64 => 0xcf,
            Marker::Int8 => 0xd0,
            Marker::Int16 => 0xd1,
            Marker::Int32 => 0xd2,
            Marker::Int64 => 0xd3,
            Marker::FixExt1 => 0xd4,
            Marker::FixExt2 => 0xd5,
            Marker::FixExt4 => 0xd6,
            Marker::FixExt8 => 0xd7,
            Marker::FixExt16 => 0xd8,
            Marker::Str8 => 0xd9,
            Marker::Str16 => 0xda,
            Marker::Str32 => 0xdb,
            Marker::Array16 => 0xdc,
            Marker::Array32 => 0xdd,
            Marker::Map16 => 0xde,
            Marker::Map32 => 0xdf,
            Marker::NegFixInt(val) => val as u8,
        }
    }

    /// Short marker name, for trace output and error text.
    pub fn name(&self) -> &'static str {
        use self::Marker::*;
        match self {
            PosFixInt(_) => "pos fixint",
            Record(_) => "record",
            FixMap(_) => "fixmap",
            FixArray(_) => "fixarray",
            FixStr(_) => "fixstr",
            Nil => "nil",
            BundledStrings => "bundled strings",
            False => "false",
            True => "true",
            Bin8 => "bin8",
            Bin16 => "bin16",
            Bin32 => "bin32",
            Ext8 => "ext8",
            Ext16 => "ext16",
            Ext32 => "ext32",
            F32 => "float32",
            F64 => "float64",
            UInt8 => "uint8",
            UInt16 => "uint16",
            UInt32 => "uint32",
            UInt64 => "uint64",
            Int8 => "int8",
            Int16 => "int16",
            Int32 => "int32",
            Int64 => "int64",
            FixExt1 => "fixext1",
            FixExt2 => "fixext2",
            FixExt4 => "fixext4",
            FixExt8 => "fixext8",
            FixExt16 => "fixext16",
            Str8 => "str8",
            Str16 => "str16",
            Str32 => "str32",
            Array16 => "array16",
            Array32 => "array32",
            Map16 => "map16",
            Map32 => "map32",
            NegFixInt(_) => "neg fixint",
        }
    }
}

impl From<u8> for Marker {
    fn from(val: u8) -> Marker {
        Marker::from_u8(val)
    }
}

impl From<Marker> for u8 {
    fn from(val: Marker) -> u8 {
        val.into_u8()
    }
}

/// Extension type codes the built-in registry covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtType {
    Timestamp,
    Undefined,
    BigInt,
    BundledStrings,
    Error,
    Record,
    Set,
}

impl ExtType {
    /// Return the assigned extension type code.
    pub fn into_i8(self) -> i8 {
        match self {
            ExtType::Timestamp => -1,
            ExtType::Undefined => 0,
            ExtType::BigInt => 66,
            ExtType::BundledStrings => 98,
            ExtType::Error => 101,
            ExtType::Record => 114,
            ExtType::Set => 115,
        }
    }

    /// Convert from an assigned extension type code. Returns `None` if the
    /// code isn't recognized.
    pub fn from_i8(v: i8) -> Option<ExtType> {
        match v {
            -1 => Some(ExtType::Timestamp),
            0 => Some(ExtType::Undefined),
            66 => Some(ExtType::BigInt),
            98 => Some(ExtType::BundledStrings),
            101 => Some(ExtType::Error),
            114 => Some(ExtType::Record),
            115 => Some(ExtType::Set),
            _ => None,
        }
    }
}

impl From<ExtType> for i8 {
    fn from(val: ExtType) -> i8 {
        val.into_i8()
    }
}

/// A single lead-byte code or an inclusive span of codes, used to restrict
/// what a structural caller will accept.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CodeRange {
    One(u8),
    Span(u8, u8),
}

impl CodeRange {
    pub fn contains(self, code: u8) -> bool {
        match self {
            CodeRange::One(c) => c == code,
            CodeRange::Span(low, high) => low <= code && code <= high,
        }
    }
}

use self::CodeRange::{One, Span};

/// Codes that produce an unsigned integer.
pub const UINT_CODES: &[CodeRange] = &[
    Span(0x00, 0x3F),
    One(0xCC),
    One(0xCD),
    One(0xCE),
    One(0xCF),
];

/// Codes that produce an integer of either sign.
pub const INT_CODES: &[CodeRange] = &[
    Span(0x00, 0x3F),
    One(0xCC),
    One(0xCD),
    One(0xCE),
    One(0xCF),
    Span(0xE0, 0xFF),
    One(0xD0),
    One(0xD1),
    One(0xD2),
    One(0xD3),
];

/// Codes that produce a string.
pub const STR_CODES: &[CodeRange] = &[Span(0xA0, 0xBF), One(0xD9), One(0xDA), One(0xDB)];

/// Codes that produce an array.
pub const ARRAY_CODES: &[CodeRange] = &[Span(0x90, 0x9F), One(0xDC), One(0xDD)];

/// Codes that produce a map.
pub const MAP_CODES: &[CodeRange] = &[Span(0x80, 0x8F), One(0xDE), One(0xDF)];

/// Check a lead byte against a restriction set.
pub fn codes_allow(set: &[CodeRange], code: u8) -> bool {
    set.iter().any(|r| r.contains(code))
}

/// Render a restriction set for error text, e.g. `"a0-bf, d9, da, db"`.
pub fn describe_codes(set: &[CodeRange]) -> String {
    let parts: Vec<String> = set
        .iter()
        .map(|r| match r {
            One(c) => format!("{:02x}", c),
            Span(low, high) => format!("{:02x}-{:02x}", low, high),
        })
        .collect();
    parts.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_all_codes() {
        for n in 0..=255u8 {
            assert_eq!(Marker::from_u8(n).into_u8(), n);
        }
    }

    #[test]
    fn classification() {
        assert_eq!(Marker::from_u8(0x3F), Marker::PosFixInt(0x3F));
        assert_eq!(Marker::from_u8(0x40), Marker::Record(0));
        assert_eq!(Marker::from_u8(0x7F), Marker::Record(0x3F));
        assert_eq!(Marker::from_u8(0xC1), Marker::BundledStrings);
        assert_eq!(Marker::from_u8(0xE0), Marker::NegFixInt(-32));
        assert_eq!(Marker::from_u8(0xFF), Marker::NegFixInt(-1));
    }

    #[test]
    fn code_groups() {
        for code in [0x00, 0x3F, 0xCC, 0xCF, 0xE0, 0xFF, 0xD0, 0xD3] {
            assert!(codes_allow(INT_CODES, code), "{:02x}", code);
        }
        assert!(!codes_allow(INT_CODES, 0x40));
        assert!(!codes_allow(INT_CODES, 0xA0));
        assert!(codes_allow(STR_CODES, 0xA0));
        assert!(codes_allow(ARRAY_CODES, 0x93));
        assert!(!codes_allow(ARRAY_CODES, 0x80));
        assert!(codes_allow(MAP_CODES, 0xDE));
    }

    #[test]
    fn ext_type_codes() {
        assert_eq!(ExtType::Timestamp.into_i8(), -1);
        assert_eq!(ExtType::from_i8(98), Some(ExtType::BundledStrings));
        assert_eq!(ExtType::from_i8(42), None);
    }

    #[test]
    fn describe() {
        assert_eq!(
            describe_codes(&[Span(0xA0, 0xBF), One(0xD9)]),
            "a0-bf, d9"
        );
    }
}
