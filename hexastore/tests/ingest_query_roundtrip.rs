use hexastore::{Store, Value};
use hexastore_query::pattern::{eq, iri, Pattern};

const GRAPH: &str = r#"
{
  "@graph": [
    {
      "@id": "https://ex/alice",
      "@type": "https://ex/Person",
      "https://ex/follows": { "@id": "https://ex/bob" },
      "https://ex/name": "Alice"
    },
    {
      "@id": "https://ex/bob",
      "@type": "https://ex/Person",
      "https://ex/follows": { "@id": "https://ex/carol" },
      "https://ex/name": "Bob"
    },
    {
      "@id": "https://ex/carol",
      "@type": "https://ex/Person",
      "https://ex/name": "Carol"
    }
  ]
}
"#;

#[test]
fn ingests_a_social_graph_and_answers_multiple_queries() {
    let store = Store::new();
    let n = store.ingest_json(GRAPH).unwrap();
    assert_eq!(n, 8);

    let alice_follows = Pattern::new()
        .s(iri::eq("https://ex/alice"))
        .p(iri::eq("https://ex/follows"));
    let hits: Vec<_> = store.query(&alice_follows).unwrap().collect();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].o, Value::iri("https://ex/bob"));

    let everyone = Pattern::new()
        .p(iri::eq("rdf:type"))
        .o(eq(Value::iri("https://ex/Person")));
    let people: Vec<_> = store.query(&everyone).unwrap().collect();
    assert_eq!(people.len(), 3);
}

#[test]
fn binary_round_trip_through_a_cli_style_pipeline() {
    let ingest_side = Store::new();
    ingest_side.ingest_json(GRAPH).unwrap();
    let bytes = ingest_side.to_binary();

    let query_side = Store::from_binary(&bytes).unwrap();
    assert_eq!(query_side.len(), ingest_side.len());

    let names = Pattern::new().p(iri::eq("https://ex/name"));
    let hits: Vec<_> = query_side.query(&names).unwrap().collect();
    assert_eq!(hits.len(), 3);
}

#[test]
fn removing_a_triple_after_ingestion_drops_it_from_query_results() {
    let store = Store::new();
    store.ingest_json(GRAPH).unwrap();

    let bob_follows_carol = hexastore::Predicate::eq(Value::iri("https://ex/carol"));
    let pat = Pattern::new()
        .s(iri::eq("https://ex/bob"))
        .p(iri::eq("https://ex/follows"))
        .o(bob_follows_carol);
    let before: Vec<_> = store.query(&pat).unwrap().collect();
    assert_eq!(before.len(), 1);

    store.remove(&before[0]);
    let after: Vec<_> = store.query(&pat).unwrap().collect();
    assert!(after.is_empty());
}
