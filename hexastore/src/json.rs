//! JSON / JSON-LD ingestion (§6): decodes a node-graph document into a
//! [`Bag`] of triples.
//!
//! One decoder covers both dialects since the JSON-LD pieces — `@graph`,
//! `@type`/`rdf:type`, `@value` — are additive: a plain JSON document
//! with no such keys decodes exactly as it would under the original
//! JSON-only codec. Grounded in the original `encoding/json` and
//! `encoding/jsonld` packages, merged into one pass.

use crate::error::{Error, Result};
use hexastore_api::{Bag, Value};
use serde_json::Value as Json;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_BLANK: AtomicU64 = AtomicU64::new(0);

fn fresh_blank_id() -> String {
    format!("_:b{}", NEXT_BLANK.fetch_add(1, Ordering::Relaxed))
}

/// Decodes a JSON or JSON-LD document into a triple bag.
pub fn decode(input: &str) -> Result<Bag> {
    let root: Json = serde_json::from_str(input).map_err(|e| Error::Ingest(e.to_string()))?;
    let mut bag = Bag::new();
    decode_root(&mut bag, &root)?;
    Ok(bag)
}

fn decode_root(bag: &mut Bag, root: &Json) -> Result<()> {
    match root {
        Json::Array(items) => decode_array(bag, None, None, items),
        Json::Object(obj) => {
            if let Some(Json::Array(items)) = obj.get("@graph") {
                return decode_array(bag, None, None, items);
            }
            decode_object(bag, None, None, obj)
        }
        other => Err(Error::Ingest(format!("unsupported top-level JSON value: {other}"))),
    }
}

fn decode_array(
    bag: &mut Bag,
    s: Option<&str>,
    p: Option<&str>,
    items: &[Json],
) -> Result<()> {
    for item in items {
        match item {
            Json::String(o) => {
                if let (Some(s), Some(p)) = (s, p) {
                    bag.join(triple(s, p, Value::iri(o.clone())));
                }
            }
            Json::Object(obj) => decode_object(bag, s, p, obj)?,
            other => return Err(unsupported_literal(other)),
        }
    }
    Ok(())
}

fn decode_object(
    bag: &mut Bag,
    s: Option<&str>,
    p: Option<&str>,
    obj: &serde_json::Map<String, Json>,
) -> Result<()> {
    let id = object_id(obj).unwrap_or_else(fresh_blank_id);

    if let (Some(s), Some(p)) = (s, p) {
        bag.join(triple(s, p, Value::iri(id.clone())));
    }

    if let Some(ty) = object_type(obj) {
        bag.join(triple(&id, "rdf:type", Value::iri(ty)));
    }

    decode_properties(bag, &id, obj)
}

fn object_id(obj: &serde_json::Map<String, Json>) -> Option<String> {
    obj.get("@id")
        .or_else(|| obj.get("id"))
        .and_then(Json::as_str)
        .map(str::to_string)
}

fn object_type(obj: &serde_json::Map<String, Json>) -> Option<String> {
    obj.get("@type")
        .or_else(|| obj.get("rdf:type"))
        .and_then(Json::as_str)
        .map(str::to_string)
}

fn decode_properties(
    bag: &mut Bag,
    s: &str,
    obj: &serde_json::Map<String, Json>,
) -> Result<()> {
    for (key, val) in obj {
        if matches!(key.as_str(), "@id" | "id" | "@type" | "rdf:type" | "@graph") {
            continue;
        }
        match val {
            Json::String(o) => bag.join(triple(s, key, Value::string(o.clone()))),
            Json::Object(node) => decode_node_object(bag, s, key, node)?,
            Json::Array(items) => decode_node_array(bag, s, key, items)?,
            other => return Err(unsupported_literal(other)),
        }
    }
    Ok(())
}

/// A nested object: either a literal wrapper (`@value`) or a linked node
/// (identified by `@id`/`id`, assigned a blank id otherwise).
fn decode_node_object(
    bag: &mut Bag,
    s: &str,
    p: &str,
    node: &serde_json::Map<String, Json>,
) -> Result<()> {
    if let Some(val) = node.get("@value") {
        return decode_value(bag, s, p, val);
    }
    // A nested node without `@value` is linked by id, recursing to pick
    // up its own properties (and a fresh blank id when it has none).
    decode_object(bag, Some(s), Some(p), node)
}

fn decode_node_array(bag: &mut Bag, s: &str, p: &str, items: &[Json]) -> Result<()> {
    for item in items {
        match item {
            Json::String(o) => bag.join(triple(s, p, Value::string(o.clone()))),
            Json::Object(node) => decode_node_object(bag, s, p, node)?,
            other => return Err(unsupported_literal(other)),
        }
    }
    Ok(())
}

fn decode_value(bag: &mut Bag, s: &str, p: &str, val: &Json) -> Result<()> {
    match val {
        Json::String(o) => {
            bag.join(triple(s, p, Value::string(o.clone())));
            Ok(())
        }
        other => Err(unsupported_literal(other)),
    }
}

fn unsupported_literal(val: &Json) -> Error {
    hexastore_api::Error::UnsupportedLiteral(val.to_string()).into()
}

fn triple(s: &str, p: &str, o: Value) -> hexastore_api::Triple {
    hexastore_api::Triple::from(s, p, o)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_node_with_id_and_scalar_properties() {
        let bag = decode(r#"{"id": "https://ex/a", "https://ex/name": "Alice"}"#).unwrap();
        assert_eq!(bag.len(), 1);
        let t = bag.iter().next().unwrap();
        assert_eq!(t.s, Value::iri("https://ex/a"));
        assert_eq!(t.o, Value::string("Alice"));
    }

    #[test]
    fn nested_object_without_id_gets_blank_node() {
        let bag = decode(r#"{"@id": "https://ex/a", "https://ex/friend": {"https://ex/name": "Bob"}}"#).unwrap();
        assert_eq!(bag.len(), 2);
        let link = bag.iter().find(|t| t.p == Value::iri("https://ex/friend")).unwrap();
        assert!(link.o.as_str().starts_with("_:"));
    }

    #[test]
    fn array_expands_one_triple_per_element() {
        let bag = decode(r#"{"@id": "https://ex/a", "https://ex/tag": ["x", "y"]}"#).unwrap();
        assert_eq!(bag.len(), 2);
    }

    #[test]
    fn graph_unwraps_top_level_array() {
        let bag = decode(r#"{"@graph": [{"@id": "https://ex/a", "https://ex/k": "v"}]}"#).unwrap();
        assert_eq!(bag.len(), 1);
    }

    #[test]
    fn type_keyword_produces_rdf_type_triple() {
        let bag = decode(r#"{"@id": "https://ex/a", "@type": "https://ex/Person"}"#).unwrap();
        let t = bag.iter().next().unwrap();
        assert_eq!(t.p, Value::iri("rdf:type"));
        assert_eq!(t.o, Value::iri("https://ex/Person"));
    }

    #[test]
    fn value_wrapper_unwraps_to_plain_literal() {
        let bag = decode(r#"{"@id": "https://ex/a", "https://ex/age": {"@value": "42"}}"#).unwrap();
        let t = bag.iter().next().unwrap();
        assert_eq!(t.o, Value::string("42"));
    }

    #[test]
    fn numeric_scalar_is_rejected() {
        let err = decode(r#"{"@id": "https://ex/a", "https://ex/age": 42}"#).unwrap_err();
        assert!(matches!(err, Error::Api(hexastore_api::Error::UnsupportedLiteral(_))));
    }

    #[test]
    fn boolean_scalar_is_rejected() {
        let err = decode(r#"{"@id": "https://ex/a", "https://ex/active": true}"#).unwrap_err();
        assert!(matches!(err, Error::Api(hexastore_api::Error::UnsupportedLiteral(_))));
    }
}
