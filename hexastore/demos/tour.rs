//! # hexastore Tour
//!
//! Demonstrates the core workflow:
//! 1. Ingesting a small JSON-LD document.
//! 2. Running a few `(S?, P?, O?)` pattern queries.
//! 3. Round-tripping the store through the binary bulk-transport codec.

use anyhow::Result;
use hexastore::Store;
use hexastore_query::pattern::{iri, Pattern};

fn main() -> Result<()> {
    println!("hexastore tour");

    let store = Store::new();

    let doc = r#"{
        "@graph": [
            {
                "@id": "https://ex/alice",
                "@type": "https://ex/Person",
                "https://ex/follows": {"@id": "https://ex/bob"},
                "https://ex/name": "Alice"
            },
            {
                "@id": "https://ex/bob",
                "@type": "https://ex/Person",
                "https://ex/name": "Bob"
            }
        ]
    }"#;

    let n = store.ingest_json(doc)?;
    println!("ingested {n} triples, store now holds {}", store.len());

    println!("\nwho does alice follow?");
    let pat = Pattern::new()
        .s(iri::eq("https://ex/alice"))
        .p(iri::eq("https://ex/follows"));
    for t in store.query(&pat)? {
        println!("  {t}");
    }

    println!("\nevery https://ex/Person");
    let pat = Pattern::new().p(iri::eq("rdf:type")).o(hexastore_query::pattern::eq(
        hexastore::Value::iri("https://ex/Person"),
    ));
    for t in store.query(&pat)? {
        println!("  {t}");
    }

    let bytes = store.to_binary();
    println!("\nbinary codec round-trip: {} bytes", bytes.len());
    let restored = Store::from_binary(&bytes)?;
    assert_eq!(restored.len(), store.len());
    println!("restored store holds {} triples", restored.len());

    Ok(())
}
