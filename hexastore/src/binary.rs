//! Binary bag codec (§6): a length-prefixed, checksummed record format for
//! bulk transport of a [`Bag`]. Framing mirrors the storage crate's WAL
//! record layout — `len:u32 | crc32:u32 | body` — but the body here
//! serializes a whole triple rather than a storage op.

use crate::error::{Error, Result};
use crc32fast::Hasher;
use hexastore_api::{Bag, Triple, Value};

const IRI_TAG: u8 = 0;
const STRING_TAG: u8 = 1;

/// Encodes `bag` as a flat byte buffer: a `u64` record count followed by
/// one framed record per triple, in bag order.
pub fn encode_bag(bag: &Bag) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&(bag.len() as u64).to_le_bytes());
    for t in bag.iter() {
        let body = encode_triple(t);
        let len = body.len() as u32;
        let crc = crc32(&body);
        out.extend_from_slice(&len.to_le_bytes());
        out.extend_from_slice(&crc.to_le_bytes());
        out.extend_from_slice(&body);
    }
    out
}

/// Decodes a buffer produced by [`encode_bag`]. Any truncation or checksum
/// mismatch aborts the decode and discards whatever was read so far, per
/// §7's "codec errors abort the decode with partial results discarded."
pub fn decode_bag(bytes: &[u8]) -> Result<Bag> {
    let mut cursor = Cursor::new(bytes);
    let count = cursor.read_u64()?;
    let mut bag = Bag::new();
    for _ in 0..count {
        let len = cursor.read_u32()? as usize;
        let crc = cursor.read_u32()?;
        let body = cursor.read_bytes(len)?;
        if crc32(body) != crc {
            return Err(Error::Codec("triple record failed checksum".into()));
        }
        bag.join(decode_triple(body)?);
    }
    Ok(bag)
}

fn encode_triple(t: &Triple) -> Vec<u8> {
    let mut out = Vec::new();
    encode_value(&mut out, &t.s);
    encode_value(&mut out, &t.p);
    encode_value(&mut out, &t.o);
    out.extend_from_slice(&t.c.to_le_bytes());
    out.extend_from_slice(&t.k.to_le_bytes());
    out
}

fn decode_triple(body: &[u8]) -> Result<Triple> {
    let mut cursor = Cursor::new(body);
    let s = decode_value(&mut cursor)?;
    let p = decode_value(&mut cursor)?;
    let o = decode_value(&mut cursor)?;
    let c = f64::from_le_bytes(cursor.read_bytes(8)?.try_into().unwrap());
    let k = u128::from_le_bytes(cursor.read_bytes(16)?.try_into().unwrap());
    cursor.expect_exhausted()?;
    Ok(Triple::with_meta(s, p, o, c, k))
}

fn encode_value(out: &mut Vec<u8>, v: &Value) {
    let (tag, s) = match v {
        Value::AnyUri(s) => (IRI_TAG, s),
        Value::String(s) => (STRING_TAG, s),
    };
    out.push(tag);
    out.extend_from_slice(&(s.len() as u32).to_le_bytes());
    out.extend_from_slice(s.as_bytes());
}

fn decode_value(cursor: &mut Cursor) -> Result<Value> {
    let tag = cursor.read_u8()?;
    let len = cursor.read_u32()? as usize;
    let raw = cursor.read_bytes(len)?;
    let s = String::from_utf8(raw.to_vec()).map_err(|e| Error::Codec(e.to_string()))?;
    match tag {
        IRI_TAG => Ok(Value::iri(s)),
        STRING_TAG => Ok(Value::string(s)),
        other => Err(Error::Codec(format!("unknown value tag {other}"))),
    }
}

fn crc32(bytes: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(bytes);
    hasher.finalize()
}

/// A minimal forward-only byte cursor with explicit truncation errors,
/// kept private to this module.
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Cursor { bytes, pos: 0 }
    }

    fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self.pos + n;
        if end > self.bytes.len() {
            return Err(Error::Codec("truncated binary record".into()));
        }
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_bytes(4)?.try_into().unwrap()))
    }

    fn read_u64(&mut self) -> Result<u64> {
        Ok(u64::from_le_bytes(self.read_bytes(8)?.try_into().unwrap()))
    }

    fn expect_exhausted(&self) -> Result<()> {
        if self.pos != self.bytes.len() {
            return Err(Error::Codec("trailing bytes in triple record".into()));
        }
        Ok(())
    }
}
