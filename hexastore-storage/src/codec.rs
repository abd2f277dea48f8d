//! Wire codec for index rows: the string encoding of a [`Value`] and the
//! composite-key / partition-key format an external store sees.
//!
//! Grounded in the original store's dynamo codec: each lattice variant is
//! prefixed with a distinguishing glyph so that (a) cross-variant ordering
//! is preserved in a plain byte-lexical sort and (b) the decoder can
//! recover the variant without side information.

use crate::error::{Error, Result};
use hexastore_api::Value;

const IRI_PREFIX: char = 'ᴵ';
const STRING_PREFIX: char = 'ᴸ';
const SEP: char = '|';

/// Backslash-escapes `\` and `|` in a value's payload so a component can
/// never be mistaken for the pair separator, regardless of its content.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c == '\\' || c == SEP {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Inverse of [`escape`]. Fails on a trailing, unterminated escape.
fn unescape(s: &str) -> Result<String> {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(escaped) => out.push(escaped),
                None => return Err(Error::MalformedEncoding(s.to_string())),
            }
        } else {
            out.push(c);
        }
    }
    Ok(out)
}

/// Byte offset of the first `SEP` not preceded by an escaping backslash.
fn find_unescaped_sep(s: &str) -> Option<usize> {
    let mut chars = s.char_indices();
    while let Some((i, c)) = chars.next() {
        if c == '\\' {
            chars.next();
            continue;
        }
        if c == SEP {
            return Some(i);
        }
    }
    None
}

/// Encodes a single value as `<prefix><escaped utf8 payload>`.
pub fn encode_value(v: &Value) -> String {
    match v {
        Value::AnyUri(s) => format!("{IRI_PREFIX}{}", escape(s)),
        Value::String(s) => format!("{STRING_PREFIX}{}", escape(s)),
    }
}

/// Inverse of [`encode_value`].
pub fn decode_value(s: &str) -> Result<Value> {
    let mut chars = s.chars();
    match chars.next() {
        Some(IRI_PREFIX) => Ok(Value::iri(unescape(chars.as_str())?)),
        Some(STRING_PREFIX) => Ok(Value::string(unescape(chars.as_str())?)),
        _ => Err(Error::MalformedEncoding(s.to_string())),
    }
}

/// Encodes a composite `(X,Y)` key as `encode(X) "|" encode(Y)`. Each
/// component escapes its own `|`s, so the separator found by
/// [`decode_pair`] is always the one inserted here.
pub fn encode_pair(x: &Value, y: &Value) -> String {
    format!("{}{SEP}{}", encode_value(x), encode_value(y))
}

/// Inverse of [`encode_pair`].
pub fn decode_pair(s: &str) -> Result<(Value, Value)> {
    let idx = find_unescaped_sep(s).ok_or_else(|| Error::MalformedEncoding(s.to_string()))?;
    let (x, y) = (&s[..idx], &s[idx + SEP.len_utf8()..]);
    Ok((decode_value(x)?, decode_value(y)?))
}

/// The six index tags, one per permutation of (S,P,O).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexTag {
    Sp,
    So,
    Ps,
    Po,
    Os,
    Op,
}

impl IndexTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexTag::Sp => "sp",
            IndexTag::So => "so",
            IndexTag::Ps => "ps",
            IndexTag::Po => "po",
            IndexTag::Os => "os",
            IndexTag::Op => "op",
        }
    }
}

/// A row's partition key: `"<tag>|<graph-iri>"`. `graph` defaults to the
/// empty string for a single, unnamed graph.
pub fn partition_key(tag: IndexTag, graph: &str) -> String {
    format!("{}{SEP}{graph}", tag.as_str())
}
