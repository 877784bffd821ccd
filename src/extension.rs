//! Typed extension handlers.
//!
//! An extension is a plain record of function pointers: `unpack` reads
//! exactly the declared payload, and an optional `post_unpack` continues
//! reading structure from the surrounding stream afterwards. The record and
//! bundled-strings extensions live entirely in their post phase; their
//! payloads are bookkeeping.

use num_bigint::BigUint;

use crate::error::{Error, Result};
use crate::marker::{ExtType, ARRAY_CODES, STR_CODES};
use crate::unpack::{
    read_i64_at, read_u32_at, read_u64_at, read_u8_at, slice_at, Step, Unpacker,
};
use crate::{BundledStrings, ErrorValue, Timestamp, Value};

/// Reads exactly `len` payload bytes starting at `pos`.
pub type ExtUnpackFn = fn(&mut Unpacker, &[u8], usize, usize) -> Result<ExtUnpacked>;

/// Continues reading from `pos` (just past the declared payload) and returns
/// the new position together with the final step result.
pub type ExtPostUnpackFn = fn(&mut Unpacker, &[u8], usize, ExtUnpacked) -> Result<(usize, Step)>;

/// A registered extension handler, keyed by its signed 8-bit type code.
#[derive(Clone, Copy, Debug)]
pub struct Extension {
    pub ext_type: i8,
    pub unpack: ExtUnpackFn,
    pub post_unpack: Option<ExtPostUnpackFn>,
}

/// What an extension's `unpack` phase produced: either a finished value, or
/// the intermediate its `post_unpack` phase picks up.
#[derive(Clone, Debug)]
pub enum ExtUnpacked {
    Value(Value),
    Bundle(BundledStrings),
    RecordId(u8),
}

fn bad(ext_type: i8, reason: impl Into<String>) -> Error {
    Error::BadExtPayload {
        ext_type,
        reason: reason.into(),
    }
}

/// The built-in registry contents. The bundled-strings installer is only
/// present when bundled strings are enabled on the session.
pub(crate) fn defaults(enable_bundled_strings: bool) -> Vec<Extension> {
    let mut exts = vec![
        Extension {
            ext_type: ExtType::Timestamp.into_i8(),
            unpack: timestamp_unpack,
            post_unpack: None,
        },
        Extension {
            ext_type: ExtType::Undefined.into_i8(),
            unpack: undefined_unpack,
            post_unpack: None,
        },
        Extension {
            ext_type: ExtType::BigInt.into_i8(),
            unpack: bigint_unpack,
            post_unpack: None,
        },
        Extension {
            ext_type: ExtType::Error.into_i8(),
            unpack: empty_unpack,
            post_unpack: Some(error_post_unpack),
        },
        Extension {
            ext_type: ExtType::Record.into_i8(),
            unpack: record_unpack,
            post_unpack: Some(record_post_unpack),
        },
        Extension {
            ext_type: ExtType::Set.into_i8(),
            unpack: empty_unpack,
            post_unpack: Some(set_post_unpack),
        },
    ];
    if enable_bundled_strings {
        exts.push(Extension {
            ext_type: ExtType::BundledStrings.into_i8(),
            unpack: bundled_strings_unpack,
            post_unpack: Some(bundled_strings_post_unpack),
        });
    }
    exts
}

/// Timestamp (type -1): 4-byte seconds, 8-byte packed nanos+seconds, or
/// 12-byte nanos then signed seconds. Everything else is rejected.
fn timestamp_unpack(
    _unpacker: &mut Unpacker,
    data: &[u8],
    pos: usize,
    len: usize,
) -> Result<ExtUnpacked> {
    let ts = match len {
        4 => {
            let secs = read_u32_at(data, pos)?;
            Timestamp::from_secs(secs as i64)
        }
        8 => {
            let raw = read_u64_at(data, pos)?;
            let secs = (raw & 0x3_FFFF_FFFF) as i64;
            let nanos = (raw >> 34) as u32;
            Timestamp::from_raw(secs, nanos)
                .ok_or_else(|| bad(-1, "timestamp nanoseconds is too big"))?
        }
        12 => {
            let nanos = read_u32_at(data, pos)?;
            let secs = read_i64_at(data, pos + 4)?;
            Timestamp::from_raw(secs, nanos)
                .ok_or_else(|| bad(-1, "timestamp nanoseconds is too big"))?
        }
        _ => return Err(bad(-1, format!("invalid timestamp length: {} bytes", len))),
    };
    Ok(ExtUnpacked::Value(Value::Timestamp(ts)))
}

/// Undefined (type 0): the payload carries nothing.
fn undefined_unpack(
    _unpacker: &mut Unpacker,
    _data: &[u8],
    _pos: usize,
    _len: usize,
) -> Result<ExtUnpacked> {
    Ok(ExtUnpacked::Value(Value::Undefined))
}

/// Big integer (type 66): big-endian magnitude of a nonnegative integer.
fn bigint_unpack(
    _unpacker: &mut Unpacker,
    data: &[u8],
    pos: usize,
    len: usize,
) -> Result<ExtUnpacked> {
    let magnitude = slice_at(data, pos, len)?;
    Ok(ExtUnpacked::Value(Value::BigInt(BigUint::from_bytes_be(
        magnitude,
    ))))
}

/// Shared `unpack` for the extensions whose declared payload is empty and
/// whose real content follows in the post phase.
fn empty_unpack(
    _unpacker: &mut Unpacker,
    _data: &[u8],
    _pos: usize,
    _len: usize,
) -> Result<ExtUnpacked> {
    Ok(ExtUnpacked::Value(Value::Null))
}

/// Error (type 101): the post phase reads a `(class, message, cause)` array.
fn error_post_unpack(
    unpacker: &mut Unpacker,
    data: &[u8],
    pos: usize,
    _ret: ExtUnpacked,
) -> Result<(usize, Step)> {
    let (pos, values) = unpacker.step(data, pos, Some(ARRAY_CODES))?;
    let items = match values {
        Value::Array(items) => items,
        other => return Err(bad(101, format!("expected an array, got {}", other.name()))),
    };
    let [code, message, cause]: [Value; 3] = items
        .try_into()
        .map_err(|v: Vec<Value>| bad(101, format!("expected 3 fields, got {}", v.len())))?;
    let (Value::Int(code), Value::Str(message), Value::Str(cause)) = (code, message, cause) else {
        return Err(bad(101, "expected (int, str, str) fields"));
    };
    let code = code
        .as_i64()
        .ok_or_else(|| bad(101, "error class out of range"))?;
    Ok((
        pos,
        Step::Yield(Value::Error(ErrorValue {
            code,
            message,
            cause,
        })),
    ))
}

/// Set (type 115): the post phase reads one array of members.
fn set_post_unpack(
    unpacker: &mut Unpacker,
    data: &[u8],
    pos: usize,
    _ret: ExtUnpacked,
) -> Result<(usize, Step)> {
    let (pos, values) = unpacker.step(data, pos, Some(ARRAY_CODES))?;
    let items = match values {
        Value::Array(items) => items,
        other => return Err(bad(115, format!("expected an array, got {}", other.name()))),
    };
    Ok((pos, Step::Yield(Value::Set(items))))
}

/// Record (type 114): the payload is the record identifier byte. Only the
/// one-byte identifier form decodes; the two-byte extended form is rejected.
fn record_unpack(
    _unpacker: &mut Unpacker,
    data: &[u8],
    pos: usize,
    len: usize,
) -> Result<ExtUnpacked> {
    match len {
        1 => {
            let identifier = read_u8_at(data, pos)?;
            if !(0x40..=0x7F).contains(&identifier) {
                return Err(bad(
                    114,
                    format!("invalid record identifier: 0x{:02x}", identifier),
                ));
            }
            Ok(ExtUnpacked::RecordId(identifier & 0x3F))
        }
        2 => Err(bad(114, "extended record identifiers are not supported")),
        _ => Err(bad(
            114,
            format!("invalid record identifier length: {} bytes", len),
        )),
    }
}

fn record_post_unpack(
    unpacker: &mut Unpacker,
    data: &[u8],
    pos: usize,
    ret: ExtUnpacked,
) -> Result<(usize, Step)> {
    let ExtUnpacked::RecordId(id) = ret else {
        return Err(bad(114, "missing record identifier"));
    };
    if !unpacker.records_enabled() {
        return Err(bad(114, "records are disabled"));
    }
    let (pos, record) = unpacker.read_record(data, pos, id)?;
    Ok((pos, Step::Yield(record)))
}

/// Bundled strings (type 98): the payload is a big-endian u32 whose value,
/// less the payload length, is the offset from the end of the payload to the
/// string pool.
fn bundled_strings_unpack(
    _unpacker: &mut Unpacker,
    data: &[u8],
    pos: usize,
    len: usize,
) -> Result<ExtUnpacked> {
    if len < 4 {
        return Err(bad(98, format!("installer payload too short: {} bytes", len)));
    }
    let raw = read_u32_at(data, pos)?;
    let offset = raw as i64 - len as i64;
    Ok(ExtUnpacked::Bundle(BundledStrings::new(offset)))
}

/// Decodes the two pool strings at their forward offset, installs the
/// populated pool on the session, and yields no value. The reader's position
/// is left where it was; the dispatcher's pool-skip hook jumps the pool
/// region once the position first reaches it.
fn bundled_strings_post_unpack(
    unpacker: &mut Unpacker,
    data: &[u8],
    pos: usize,
    ret: ExtUnpacked,
) -> Result<(usize, Step)> {
    let ExtUnpacked::Bundle(mut bundle) = ret else {
        return Err(bad(98, "installer produced no pool"));
    };
    let Some(offset) = bundle.string_offset() else {
        return Err(bad(98, "pool is already populated"));
    };

    let begin = pos as i64 + offset;
    if begin < 0 {
        return Err(bad(98, format!("pool offset out of range: {}", offset)));
    }
    let begin = begin as usize;

    let (next, left) = expect_str(unpacker.step(data, begin, Some(STR_CODES))?)?;
    let (end, right) = expect_str(unpacker.step(data, next, Some(STR_CODES))?)?;
    bundle.populate(left, right, begin, end);
    unpacker.install_bundle(bundle);

    Ok((pos, Step::Skip))
}

fn expect_str(stepped: (usize, Value)) -> Result<(usize, String)> {
    match stepped {
        (pos, Value::Str(s)) => Ok((pos, s)),
        (_, other) => Err(bad(98, format!("expected a string, got {}", other.name()))),
    }
}
