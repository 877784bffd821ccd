//! Decoder for the msgpackr dialect of MessagePack.
//!
//! The dialect is standard MessagePack extended with three non-standard
//! productions from the msgpackr ecosystem:
//!
//! - **Records**: lead bytes `0x40-0x7F` reference a cached, ordered list of
//!   field names, so repeated map shapes are encoded once per session.
//! - **Bundled strings**: an installer extension (type 98) carries two
//!   out-of-band strings whose substrings are referenced through lead byte
//!   `0xC1` with a compact signed length.
//! - **Typed extensions**: timestamp (-1), undefined (0), big integer (66),
//!   error (101), and set (115).
//!
//! Decoding is a synchronous recursive descent over a borrowed byte slice;
//! produced strings and binary payloads are owned copies. The session caches
//! that make the dialect work (the string pool and the record key lists)
//! live on the [`Unpacker`] and persist across calls, and can be captured
//! and reinstalled through [`Unpacker::export_state`] and
//! [`Unpacker::restore_state`].
//!
//! ```
//! use packr::Unpacker;
//!
//! let mut unpacker = Unpacker::new();
//! let value = unpacker.unpack(&[0x93, 0x01, 0x02, 0x03]).unwrap();
//! assert_eq!(value.as_array().map(|a| a.len()), Some(3));
//! ```

mod bundle;
mod error;
mod extension;
mod integer;
mod marker;
mod timestamp;
mod unpack;
mod value;

pub use self::bundle::BundledStrings;
pub use self::error::{Error, Result};
pub use self::extension::{ExtPostUnpackFn, ExtUnpackFn, ExtUnpacked, Extension};
pub use self::integer::Integer;
pub use self::marker::{
    codes_allow, describe_codes, CodeRange, ExtType, Marker, ARRAY_CODES, INT_CODES, MAP_CODES,
    STR_CODES, UINT_CODES,
};
pub use self::timestamp::Timestamp;
pub use self::unpack::{FixedFn, RangeFn, Step, Unpacker, UnpackerState};
pub use self::value::{ErrorValue, Value};

/// Maximum container nesting depth a single decode will follow.
pub const MAX_DEPTH: usize = 128;
