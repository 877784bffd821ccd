//! The decode state machine.
//!
//! [`Unpacker`] owns the dispatch tables and the session caches (bundled
//! string pool, record key lists). [`step`][Unpacker::step] reads one lead
//! byte, routes it through the fixed-code or range tables, and drains any
//! SKIP results iteratively so stacked installers can't grow the stack.

use std::collections::HashMap;

use byteorder::{BigEndian, ByteOrder};
use log::{debug, trace};

use crate::error::{Error, Result};
use crate::extension::{defaults, ExtUnpacked, Extension};
use crate::marker::{codes_allow, describe_codes, CodeRange, Marker, ARRAY_CODES, INT_CODES};
use crate::{BundledStrings, Integer, Value, MAX_DEPTH};

/// What a handler hands back to the dispatcher: a concrete value, or a
/// signal that it installed state and the next value should be decoded in
/// its place.
#[derive(Clone, Debug)]
pub enum Step {
    Yield(Value),
    Skip,
}

/// Handler for a single fixed lead byte. Receives the position just past the
/// lead byte and returns the new position with the step result.
pub type FixedFn = fn(&mut Unpacker, &[u8], usize) -> Result<(usize, Step)>;

/// Handler for a lead-byte range. Also receives the original lead byte,
/// whose low bits usually carry a length or identifier.
pub type RangeFn = fn(&mut Unpacker, u8, &[u8], usize) -> Result<(usize, Step)>;

/// A snapshot of the mutable session state: the active bundled-string pool
/// (cursors included) and the record key-list cache. Supports speculative
/// reads that are rolled back on failure.
#[derive(Clone, Debug, Default)]
pub struct UnpackerState {
    pub bundle: Option<BundledStrings>,
    pub records: Option<HashMap<u8, Vec<String>>>,
}

/// A decoding session for the msgpackr dialect.
///
/// An unpacker is cheap to construct and may be reused across messages.
/// Note that the record key-list cache deliberately persists across calls on
/// the same instance, mirroring encoders that share record definitions
/// across a connection; use a fresh instance for per-message behavior. An
/// instance is not safe to share between threads while decoding, since the
/// session caches mutate.
pub struct Unpacker {
    extensions: HashMap<i8, Extension>,
    fixed: [Option<FixedFn>; 256],
    ranges: Vec<(u8, u8, RangeFn)>,
    bundle: Option<BundledStrings>,
    records: Option<HashMap<u8, Vec<String>>>,
    bundled_strings_enabled: bool,
    depth: usize,
}

impl Default for Unpacker {
    fn default() -> Self {
        Self::new()
    }
}

impl Unpacker {
    /// Create an unpacker with bundled strings and records enabled.
    pub fn new() -> Unpacker {
        Unpacker::with_options(true, true)
    }

    /// Create an unpacker, choosing which non-standard productions are
    /// honored. With bundled strings disabled the installer extension is not
    /// registered; with records disabled, lead bytes `0x40-0x7F` decode as
    /// positive fixints of their raw value.
    pub fn with_options(enable_bundled_strings: bool, enable_records: bool) -> Unpacker {
        let mut fixed: [Option<FixedFn>; 256] = [None; 256];
        fixed[0xC0] = Some(nil);
        // 0xC1 is the bundled-strings reference, handled outside the table
        fixed[0xC2] = Some(bool_false);
        fixed[0xC3] = Some(bool_true);
        fixed[0xC4] = Some(bin8);
        fixed[0xC5] = Some(bin16);
        fixed[0xC6] = Some(bin32);
        fixed[0xC7] = Some(ext8);
        fixed[0xC8] = Some(ext16);
        fixed[0xC9] = Some(ext32);
        fixed[0xCA] = Some(float32);
        fixed[0xCB] = Some(float64);
        fixed[0xCC] = Some(uint8);
        fixed[0xCD] = Some(uint16);
        fixed[0xCE] = Some(uint32);
        fixed[0xCF] = Some(uint64);
        fixed[0xD0] = Some(int8);
        fixed[0xD1] = Some(int16);
        fixed[0xD2] = Some(int32);
        fixed[0xD3] = Some(int64);
        fixed[0xD4] = Some(fixext1);
        fixed[0xD5] = Some(fixext2);
        fixed[0xD6] = Some(fixext4);
        fixed[0xD7] = Some(fixext8);
        fixed[0xD8] = Some(fixext16);
        fixed[0xD9] = Some(str8);
        fixed[0xDA] = Some(str16);
        fixed[0xDB] = Some(str32);
        fixed[0xDC] = Some(array16);
        fixed[0xDD] = Some(array32);
        fixed[0xDE] = Some(map16);
        fixed[0xDF] = Some(map32);

        let ranges: Vec<(u8, u8, RangeFn)> = vec![
            (0x00, 0x3F, positive_fixint),
            (0x40, 0x7F, record),
            (0x80, 0x8F, fixmap),
            (0x90, 0x9F, fixarray),
            (0xA0, 0xBF, fixstr),
            (0xE0, 0xFF, negative_fixint),
        ];

        let mut extensions = HashMap::new();
        for ext in defaults(enable_bundled_strings) {
            extensions.insert(ext.ext_type, ext);
        }

        Unpacker {
            extensions,
            fixed,
            ranges,
            bundle: None,
            records: enable_records.then(HashMap::new),
            bundled_strings_enabled: enable_bundled_strings,
            depth: 0,
        }
    }

    /// Unpack exactly one value. Unconsumed bytes are an error.
    pub fn unpack(&mut self, data: &[u8]) -> Result<Value> {
        self.depth = 0;
        let (pos, ret) = self.step(data, 0, None)?;
        if pos < data.len() {
            return Err(Error::TrailingData {
                remaining: data.len() - pos,
            });
        }
        Ok(ret)
    }

    /// Unpack the first value and ignore anything after it.
    pub fn unpack_first(&mut self, data: &[u8]) -> Result<Value> {
        self.depth = 0;
        let (_, ret) = self.step(data, 0, None)?;
        Ok(ret)
    }

    /// Unpack values until the buffer is exhausted.
    pub fn unpack_multiple(&mut self, data: &[u8]) -> Result<Vec<Value>> {
        self.depth = 0;
        let mut pos = 0;
        let mut ret = Vec::new();
        while pos < data.len() {
            let (p, v) = self.step(data, pos, None)?;
            pos = p;
            ret.push(v);
        }
        Ok(ret)
    }

    /// Register extension handlers. With `replace` unset, re-registering an
    /// existing type code is an error; nothing is registered in that case.
    pub fn register_extensions(&mut self, exts: &[Extension], replace: bool) -> Result<()> {
        if !replace {
            for ext in exts {
                if self.extensions.contains_key(&ext.ext_type) {
                    return Err(Error::DuplicateExtension {
                        ext_type: ext.ext_type,
                    });
                }
            }
        }
        for ext in exts {
            self.extensions.insert(ext.ext_type, *ext);
        }
        Ok(())
    }

    /// Swap the handler for a fixed lead byte. The byte must already be a
    /// fixed code point of the decoder.
    pub fn replace_fixed_code(&mut self, code: u8, func: FixedFn) -> Result<()> {
        match self.fixed[code as usize] {
            Some(_) => {
                self.fixed[code as usize] = Some(func);
                Ok(())
            }
            None => Err(Error::UnknownCodeSlot(format!(
                "0x{:02x} is not a fixed code point",
                code
            ))),
        }
    }

    /// Swap the handler for a lead-byte range. The bounds must name an
    /// existing range exactly.
    pub fn replace_range_code(&mut self, low: u8, high: u8, func: RangeFn) -> Result<()> {
        for slot in self.ranges.iter_mut() {
            if slot.0 == low && slot.1 == high {
                slot.2 = func;
                return Ok(());
            }
        }
        Err(Error::UnknownCodeSlot(format!(
            "0x{:02x}-0x{:02x} is not a range code point",
            low, high
        )))
    }

    /// Snapshot the session caches.
    pub fn export_state(&self) -> UnpackerState {
        UnpackerState {
            bundle: self.bundle.clone(),
            records: self.records.clone(),
        }
    }

    /// Install a previously exported snapshot. Clone the snapshot first if
    /// it needs to be restored more than once.
    pub fn restore_state(&mut self, state: UnpackerState) {
        self.bundle = state.bundle;
        self.records = state.records;
    }

    /// Decode one value starting at `pos`, returning the value and the
    /// position just past it.
    ///
    /// `restrict` limits what the first lead byte may be; it does not apply
    /// to nested values, nor to the value decoded after a SKIP. Handlers
    /// that return [`Step::Skip`] are drained iteratively here until a
    /// concrete value is produced.
    pub fn step(
        &mut self,
        data: &[u8],
        mut pos: usize,
        mut restrict: Option<&[CodeRange]>,
    ) -> Result<(usize, Value)> {
        let mut skipping = false;
        loop {
            let code_pos = pos;
            let code = read_u8_at(data, pos)?;
            pos += 1;

            if let Some(set) = restrict {
                if !codes_allow(set, code) {
                    return Err(Error::RestrictedCode {
                        code,
                        pos: code_pos,
                        expected: describe_codes(set),
                    });
                }
                restrict = None;
            }

            trace!(
                "0x{:x}: {} (0x{:02x})",
                code_pos,
                Marker::from_u8(code).name(),
                code
            );

            if let Some(handler) = self.fixed[code as usize] {
                let (p, step) = handler(self, data, pos)?;
                match step {
                    Step::Yield(v) => return Ok((self.skip_bundle(p), v)),
                    Step::Skip => {
                        pos = p;
                        skipping = true;
                        continue;
                    }
                }
            }

            if code == 0xC1 {
                let (p, v) = self.bundled_string(data, pos)?;
                // a reference skips the pool hook, unless the reference was
                // reached by draining an installer's SKIP
                let p = if skipping { self.skip_bundle(p) } else { p };
                return Ok((p, v));
            }

            let mut matched = None;
            for &(low, high, func) in &self.ranges {
                if low <= code && code <= high {
                    matched = Some(func);
                    break;
                }
            }
            if let Some(func) = matched {
                let (p, step) = func(self, code, data, pos)?;
                match step {
                    Step::Yield(v) => return Ok((self.skip_bundle(p), v)),
                    Step::Skip => {
                        pos = p;
                        skipping = true;
                        continue;
                    }
                }
            }

            return Err(Error::InvalidCode {
                code,
                pos: code_pos,
            });
        }
    }

    /// Resolve a `0xC1` reference against the active pool. The length that
    /// follows the lead byte selects the side: non-negative consumes from
    /// the right string, negative from the left.
    fn bundled_string(&mut self, data: &[u8], pos: usize) -> Result<(usize, Value)> {
        if !self.bundled_strings_enabled || self.bundle.is_none() {
            return Err(Error::BundledStringsMissing);
        }

        // Park the pool while the length decodes; the pool-skip hook must
        // not fire inside a reference.
        let parked = self.bundle.take();
        let stepped = self.step(data, pos, Some(INT_CODES));
        self.bundle = parked;
        let (pos, length) = stepped?;

        let length = match length {
            Value::Int(n) => n.as_i64().unwrap_or(i64::MAX),
            other => {
                return Err(Error::BadExtPayload {
                    ext_type: 98,
                    reason: format!("reference length was not an integer: {}", other.name()),
                })
            }
        };

        let bundle = self.bundle.as_mut().ok_or(Error::BundledStringsMissing)?;
        let ret = bundle.consume(length)?;
        Ok((pos, Value::Str(ret)))
    }

    /// Jump over the pool payload if the reader has just reached it,
    /// invalidating the pool.
    fn skip_bundle(&mut self, pos: usize) -> usize {
        match &self.bundle {
            Some(b) if b.is_populated() && b.begin() == pos => {
                let end = b.end();
                debug!("skipping string pool at 0x{:x}..0x{:x}", pos, end);
                self.bundle = None;
                end
            }
            _ => pos,
        }
    }

    pub(crate) fn install_bundle(&mut self, bundle: BundledStrings) {
        debug!(
            "installing string pool at 0x{:x}..0x{:x}",
            bundle.begin(),
            bundle.end()
        );
        self.bundle = Some(bundle);
    }

    pub(crate) fn records_enabled(&self) -> bool {
        self.records.is_some()
    }

    /// Decode one record reference: fetch or inline-decode the key list for
    /// `id`, then one value per key, in key order.
    pub(crate) fn read_record(
        &mut self,
        data: &[u8],
        mut pos: usize,
        id: u8,
    ) -> Result<(usize, Value)> {
        let keys = match self.records.as_ref().and_then(|r| r.get(&id)) {
            Some(keys) => keys.clone(),
            None => {
                let (p, v) = self.step(data, pos, Some(ARRAY_CODES))?;
                pos = p;
                let items = match v {
                    Value::Array(items) => items,
                    other => return Err(Error::BadRecordKeys(format!("got {}", other.name()))),
                };
                let mut keys = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::Str(key) => keys.push(key),
                        other => {
                            return Err(Error::BadRecordKeys(format!(
                                "non-string key of type {}",
                                other.name()
                            )))
                        }
                    }
                }
                debug!("caching record keys for id {}: {:?}", id, keys);
                if let Some(records) = self.records.as_mut() {
                    records.insert(id, keys.clone());
                }
                keys
            }
        };

        self.enter()?;
        let mut record = Vec::with_capacity(keys.len());
        for key in keys {
            let (p, value) = self.step(data, pos, None)?;
            pos = p;
            record.push((Value::Str(key), value));
        }
        self.exit();
        Ok((pos, Value::Map(record)))
    }

    /// Shared ext8/16/32 and fixext decoding: type code, handler lookup,
    /// payload-bounded unpack, then the optional post phase which may read
    /// past the payload.
    fn read_ext(&mut self, data: &[u8], type_pos: usize, payload_len: usize) -> Result<(usize, Step)> {
        let ext_type = read_i8_at(data, type_pos)?;
        let ext = *self
            .extensions
            .get(&ext_type)
            .ok_or(Error::UnknownExtension { ext_type })?;

        let payload_pos = type_pos + 1;
        slice_at(data, payload_pos, payload_len)?;
        let end = payload_pos + payload_len;
        let ret = (ext.unpack)(self, data, payload_pos, payload_len)?;
        match ext.post_unpack {
            Some(post) => post(self, data, end, ret),
            None => match ret {
                ExtUnpacked::Value(v) => Ok((end, Step::Yield(v))),
                _ => Err(Error::BadExtPayload {
                    ext_type,
                    reason: "extension handler yielded no value".to_string(),
                }),
            },
        }
    }

    fn read_array_items(&mut self, data: &[u8], mut pos: usize, len: usize) -> Result<(usize, Step)> {
        self.enter()?;
        let mut arr = Vec::with_capacity(len);
        for _ in 0..len {
            let (p, v) = self.step(data, pos, None)?;
            pos = p;
            arr.push(v);
        }
        self.exit();
        Ok((pos, Step::Yield(Value::Array(arr))))
    }

    fn read_map_items(&mut self, data: &[u8], mut pos: usize, len: usize) -> Result<(usize, Step)> {
        self.enter()?;
        let mut map = Vec::with_capacity(len);
        for _ in 0..len {
            let (p, key) = self.step(data, pos, None)?;
            let (p, value) = self.step(data, p, None)?;
            pos = p;
            map.push((key, value));
        }
        self.exit();
        Ok((pos, Step::Yield(Value::Map(map))))
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(Error::ParseLimit("depth limit exceeded".to_string()));
        }
        Ok(())
    }

    fn exit(&mut self) {
        self.depth -= 1;
    }
}

// Fixed code points. Each handler receives the position just past the lead
// byte.

fn nil(_: &mut Unpacker, _: &[u8], pos: usize) -> Result<(usize, Step)> {
    Ok((pos, Step::Yield(Value::Null)))
}

fn bool_false(_: &mut Unpacker, _: &[u8], pos: usize) -> Result<(usize, Step)> {
    Ok((pos, Step::Yield(Value::Bool(false))))
}

fn bool_true(_: &mut Unpacker, _: &[u8], pos: usize) -> Result<(usize, Step)> {
    Ok((pos, Step::Yield(Value::Bool(true))))
}

fn read_bin(data: &[u8], pos: usize, len: usize) -> Result<(usize, Step)> {
    let payload = slice_at(data, pos, len)?;
    Ok((pos + len, Step::Yield(Value::Bin(payload.to_vec()))))
}

fn bin8(_: &mut Unpacker, data: &[u8], pos: usize) -> Result<(usize, Step)> {
    let len = read_u8_at(data, pos)? as usize;
    read_bin(data, pos + 1, len)
}

fn bin16(_: &mut Unpacker, data: &[u8], pos: usize) -> Result<(usize, Step)> {
    let len = read_u16_at(data, pos)? as usize;
    read_bin(data, pos + 2, len)
}

fn bin32(_: &mut Unpacker, data: &[u8], pos: usize) -> Result<(usize, Step)> {
    let len = read_u32_at(data, pos)? as usize;
    read_bin(data, pos + 4, len)
}

fn ext8(u: &mut Unpacker, data: &[u8], pos: usize) -> Result<(usize, Step)> {
    let len = read_u8_at(data, pos)? as usize;
    u.read_ext(data, pos + 1, len)
}

fn ext16(u: &mut Unpacker, data: &[u8], pos: usize) -> Result<(usize, Step)> {
    let len = read_u16_at(data, pos)? as usize;
    u.read_ext(data, pos + 2, len)
}

fn ext32(u: &mut Unpacker, data: &[u8], pos: usize) -> Result<(usize, Step)> {
    let len = read_u32_at(data, pos)? as usize;
    u.read_ext(data, pos + 4, len)
}

fn float32(_: &mut Unpacker, data: &[u8], pos: usize) -> Result<(usize, Step)> {
    let v = read_f32_at(data, pos)?;
    Ok((pos + 4, Step::Yield(Value::Float(v as f64))))
}

fn float64(_: &mut Unpacker, data: &[u8], pos: usize) -> Result<(usize, Step)> {
    let v = read_f64_at(data, pos)?;
    Ok((pos + 8, Step::Yield(Value::Float(v))))
}

fn uint8(_: &mut Unpacker, data: &[u8], pos: usize) -> Result<(usize, Step)> {
    let v = read_u8_at(data, pos)?;
    Ok((pos + 1, Step::Yield(Value::Int(Integer::from(v)))))
}

fn uint16(_: &mut Unpacker, data: &[u8], pos: usize) -> Result<(usize, Step)> {
    let v = read_u16_at(data, pos)?;
    Ok((pos + 2, Step::Yield(Value::Int(Integer::from(v)))))
}

fn uint32(_: &mut Unpacker, data: &[u8], pos: usize) -> Result<(usize, Step)> {
    let v = read_u32_at(data, pos)?;
    Ok((pos + 4, Step::Yield(Value::Int(Integer::from(v)))))
}

fn uint64(_: &mut Unpacker, data: &[u8], pos: usize) -> Result<(usize, Step)> {
    let v = read_u64_at(data, pos)?;
    Ok((pos + 8, Step::Yield(Value::Int(Integer::from(v)))))
}

fn int8(_: &mut Unpacker, data: &[u8], pos: usize) -> Result<(usize, Step)> {
    let v = read_i8_at(data, pos)?;
    Ok((pos + 1, Step::Yield(Value::Int(Integer::from(v)))))
}

fn int16(_: &mut Unpacker, data: &[u8], pos: usize) -> Result<(usize, Step)> {
    let v = read_i16_at(data, pos)?;
    Ok((pos + 2, Step::Yield(Value::Int(Integer::from(v)))))
}

fn int32(_: &mut Unpacker, data: &[u8], pos: usize) -> Result<(usize, Step)> {
    let v = read_i32_at(data, pos)?;
    Ok((pos + 4, Step::Yield(Value::Int(Integer::from(v)))))
}

fn int64(_: &mut Unpacker, data: &[u8], pos: usize) -> Result<(usize, Step)> {
    let v = read_i64_at(data, pos)?;
    Ok((pos + 8, Step::Yield(Value::Int(Integer::from(v)))))
}

fn fixext1(u: &mut Unpacker, data: &[u8], pos: usize) -> Result<(usize, Step)> {
    u.read_ext(data, pos, 1)
}

fn fixext2(u: &mut Unpacker, data: &[u8], pos: usize) -> Result<(usize, Step)> {
    u.read_ext(data, pos, 2)
}

fn fixext4(u: &mut Unpacker, data: &[u8], pos: usize) -> Result<(usize, Step)> {
    u.read_ext(data, pos, 4)
}

fn fixext8(u: &mut Unpacker, data: &[u8], pos: usize) -> Result<(usize, Step)> {
    u.read_ext(data, pos, 8)
}

fn fixext16(u: &mut Unpacker, data: &[u8], pos: usize) -> Result<(usize, Step)> {
    u.read_ext(data, pos, 16)
}

fn read_str(data: &[u8], pos: usize, len: usize) -> Result<(usize, Step)> {
    let s = str_at(data, pos, len)?;
    Ok((pos + len, Step::Yield(Value::Str(s.to_string()))))
}

fn str8(_: &mut Unpacker, data: &[u8], pos: usize) -> Result<(usize, Step)> {
    let len = read_u8_at(data, pos)? as usize;
    read_str(data, pos + 1, len)
}

fn str16(_: &mut Unpacker, data: &[u8], pos: usize) -> Result<(usize, Step)> {
    let len = read_u16_at(data, pos)? as usize;
    read_str(data, pos + 2, len)
}

fn str32(_: &mut Unpacker, data: &[u8], pos: usize) -> Result<(usize, Step)> {
    let len = read_u32_at(data, pos)? as usize;
    read_str(data, pos + 4, len)
}

fn array16(u: &mut Unpacker, data: &[u8], pos: usize) -> Result<(usize, Step)> {
    let len = read_u16_at(data, pos)? as usize;
    u.read_array_items(data, pos + 2, len)
}

fn array32(u: &mut Unpacker, data: &[u8], pos: usize) -> Result<(usize, Step)> {
    let len = read_u32_at(data, pos)? as usize;
    u.read_array_items(data, pos + 4, len)
}

fn map16(u: &mut Unpacker, data: &[u8], pos: usize) -> Result<(usize, Step)> {
    let len = read_u16_at(data, pos)? as usize;
    u.read_map_items(data, pos + 2, len)
}

fn map32(u: &mut Unpacker, data: &[u8], pos: usize) -> Result<(usize, Step)> {
    let len = read_u32_at(data, pos)? as usize;
    u.read_map_items(data, pos + 4, len)
}

// Range code points. Each handler also receives the original lead byte.

fn positive_fixint(_: &mut Unpacker, code: u8, _: &[u8], pos: usize) -> Result<(usize, Step)> {
    Ok((pos, Step::Yield(Value::Int(Integer::from(code)))))
}

fn record(u: &mut Unpacker, code: u8, data: &[u8], pos: usize) -> Result<(usize, Step)> {
    if !u.records_enabled() {
        // with records disabled these bytes are ordinary fixints
        return positive_fixint(u, code, data, pos);
    }
    let (pos, v) = u.read_record(data, pos, code & 0x3F)?;
    Ok((pos, Step::Yield(v)))
}

fn fixmap(u: &mut Unpacker, code: u8, data: &[u8], pos: usize) -> Result<(usize, Step)> {
    u.read_map_items(data, pos, (code & 0x0F) as usize)
}

fn fixarray(u: &mut Unpacker, code: u8, data: &[u8], pos: usize) -> Result<(usize, Step)> {
    u.read_array_items(data, pos, (code & 0x0F) as usize)
}

fn fixstr(_: &mut Unpacker, code: u8, data: &[u8], pos: usize) -> Result<(usize, Step)> {
    read_str(data, pos, (code & 0x1F) as usize)
}

fn negative_fixint(_: &mut Unpacker, code: u8, _: &[u8], pos: usize) -> Result<(usize, Step)> {
    Ok((pos, Step::Yield(Value::Int(Integer::from(code as i8)))))
}

// Primitive readers. All multi-byte fields are big-endian.

pub(crate) fn read_u8_at(data: &[u8], pos: usize) -> Result<u8> {
    data.get(pos).copied().ok_or(Error::ShortBuffer {
        pos,
        needed: 1,
        remaining: data.len().saturating_sub(pos),
    })
}

pub(crate) fn slice_at(data: &[u8], pos: usize, len: usize) -> Result<&[u8]> {
    let short = || Error::ShortBuffer {
        pos,
        needed: len,
        remaining: data.len().saturating_sub(pos),
    };
    let end = pos.checked_add(len).ok_or_else(short)?;
    data.get(pos..end).ok_or_else(short)
}

pub(crate) fn str_at(data: &[u8], pos: usize, len: usize) -> Result<&str> {
    let payload = slice_at(data, pos, len)?;
    std::str::from_utf8(payload).map_err(|_| Error::BadUtf8 { pos })
}

pub(crate) fn read_u16_at(data: &[u8], pos: usize) -> Result<u16> {
    Ok(BigEndian::read_u16(slice_at(data, pos, 2)?))
}

pub(crate) fn read_u32_at(data: &[u8], pos: usize) -> Result<u32> {
    Ok(BigEndian::read_u32(slice_at(data, pos, 4)?))
}

pub(crate) fn read_u64_at(data: &[u8], pos: usize) -> Result<u64> {
    Ok(BigEndian::read_u64(slice_at(data, pos, 8)?))
}

pub(crate) fn read_i8_at(data: &[u8], pos: usize) -> Result<i8> {
    Ok(read_u8_at(data, pos)? as i8)
}

pub(crate) fn read_i16_at(data: &[u8], pos: usize) -> Result<i16> {
    Ok(BigEndian::read_i16(slice_at(data, pos, 2)?))
}

pub(crate) fn read_i32_at(data: &[u8], pos: usize) -> Result<i32> {
    Ok(BigEndian::read_i32(slice_at(data, pos, 4)?))
}

pub(crate) fn read_i64_at(data: &[u8], pos: usize) -> Result<i64> {
    Ok(BigEndian::read_i64(slice_at(data, pos, 8)?))
}

pub(crate) fn read_f32_at(data: &[u8], pos: usize) -> Result<f32> {
    Ok(BigEndian::read_f32(slice_at(data, pos, 4)?))
}

pub(crate) fn read_f64_at(data: &[u8], pos: usize) -> Result<f64> {
    Ok(BigEndian::read_f64(slice_at(data, pos, 8)?))
}
