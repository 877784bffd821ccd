//! Library error types.

use std::fmt;

/// A packr Result, normally returning a packr [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A packr decoding error. Every error is fatal to the decode call that
/// raised it; no partial value tree is ever returned. Session state (the
/// bundled-string pool and the records cache) is left as-is, so callers that
/// need transactional behavior should pair
/// [`export_state`][crate::Unpacker::export_state] with
/// [`restore_state`][crate::Unpacker::restore_state].
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// A read would extend past the end of the buffer.
    ShortBuffer {
        /// Position the read started from
        pos: usize,
        /// Number of bytes the read needed
        needed: usize,
        /// Number of bytes that were actually left
        remaining: usize,
    },
    /// The lead byte matched no entry in the dispatch tables.
    InvalidCode {
        /// The offending lead byte
        code: u8,
        /// Position of the lead byte
        pos: usize,
    },
    /// The lead byte fell outside the set of codes the caller required.
    RestrictedCode {
        /// The offending lead byte
        code: u8,
        /// Position of the lead byte
        pos: usize,
        /// Human-readable rendering of the permitted codes
        expected: String,
    },
    /// A byte sequence flagged as a string was not valid UTF-8.
    BadUtf8 {
        /// Position of the string payload
        pos: usize,
    },
    /// An extension type code had no registered handler.
    UnknownExtension {
        /// The unrecognized extension type code
        ext_type: i8,
    },
    /// A bundled-string reference was read with no active pool.
    BundledStringsMissing,
    /// A bundled-string cursor was already at the end of its string.
    BundledStringsExhausted,
    /// A bundled-string slice ran past the end of its string.
    BundledStringsOutOfBounds {
        /// Characters the reference asked for
        requested: usize,
        /// Characters left before the end of the string
        available: usize,
    },
    /// A record's inline key list was not an array of strings.
    BadRecordKeys(String),
    /// An extension payload was malformed.
    BadExtPayload {
        /// The extension type code whose payload was rejected
        ext_type: i8,
        /// What was wrong with it
        reason: String,
    },
    /// A single-value unpack left bytes unconsumed.
    TrailingData {
        /// Number of unconsumed bytes
        remaining: usize,
    },
    /// An extension type code was registered twice without `replace`.
    DuplicateExtension {
        /// The already-registered extension type code
        ext_type: i8,
    },
    /// A handler replacement named a code or range that is not a decoder slot.
    UnknownCodeSlot(String),
    /// Decoding hit a structural limit, such as the nesting depth cap.
    ParseLimit(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::ShortBuffer {
                pos,
                needed,
                remaining,
            } => write!(
                f,
                "Data too short at 0x{:x}: needed {} bytes, {} remain",
                pos, needed, remaining
            ),
            Error::InvalidCode { code, pos } => {
                write!(f, "Invalid code 0x{:02x} at 0x{:x}", code, pos)
            }
            Error::RestrictedCode {
                code,
                pos,
                ref expected,
            } => write!(
                f,
                "Invalid code 0x{:02x} at 0x{:x} (expected {})",
                code, pos, expected
            ),
            Error::BadUtf8 { pos } => write!(f, "String at 0x{:x} wasn't valid UTF-8", pos),
            Error::UnknownExtension { ext_type } => {
                write!(f, "Unknown extension type: {}", ext_type)
            }
            Error::BundledStringsMissing => write!(f, "No bundled strings provided"),
            Error::BundledStringsExhausted => write!(f, "Bundled strings exhausted"),
            Error::BundledStringsOutOfBounds {
                requested,
                available,
            } => write!(
                f,
                "Bundled string out of bounds: requested {} chars, {} remain",
                requested, available
            ),
            Error::BadRecordKeys(ref err) => write!(f, "Invalid record keys: {}", err),
            Error::BadExtPayload {
                ext_type,
                ref reason,
            } => write!(f, "Bad payload for extension {}: {}", ext_type, reason),
            Error::TrailingData { remaining } => {
                write!(f, "Remaining data after unpacking: {} bytes", remaining)
            }
            Error::DuplicateExtension { ext_type } => {
                write!(f, "Extension type {} is already registered", ext_type)
            }
            Error::UnknownCodeSlot(ref err) => {
                write!(f, "Not an existing decoder slot: {}", err)
            }
            Error::ParseLimit(ref err) => write!(f, "Hit parsing limit: {}", err),
        }
    }
}

impl std::error::Error for Error {}
