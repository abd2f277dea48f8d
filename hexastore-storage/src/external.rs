//! The external-store adapter contract (§4.H): an optional durable
//! collaborator that mirrors the in-memory indexes as partitioned
//! key/value rows. The in-memory [`crate::Hexastore`] is fully functional
//! without one; when present, every `put`/`remove` fans out a row
//! operation per index and the hexastore waits for all six.

use crate::codec::IndexTag;
use crate::error::Result;

/// One index row: a partition/sort key pair plus the values to add
/// (`put`) or remove (`cut`) from that key's set.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub tag: IndexTag,
    pub graph: String,
    pub sort_key: String,
    pub values: Vec<String>,
}

/// A page of matching rows plus an opaque continuation cursor.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page {
    pub rows: Vec<Row>,
    pub next_cursor: Option<String>,
}

/// A durable backend for one or more of the six indexes.
///
/// Implementations must honor H3 at the row level and must make `put` and
/// `cut` idempotent: adding a value already present, or removing one
/// already absent, is a no-op success. The hexastore's retry-on-partial-
/// failure policy depends on this.
pub trait ExternalStore: Send + Sync {
    /// Upserts `row.values` into the set at `(row.tag, row.graph,
    /// row.sort_key)`, creating the row if absent.
    fn put(&self, row: &Row) -> Result<()>;

    /// Removes `row.values` from the set at the same key; the row itself
    /// is dropped once its value set is empty.
    fn cut(&self, row: &Row) -> Result<()>;

    /// Paginated scan of rows whose sort key begins with `prefix`, within
    /// one `(tag, graph)` partition. `cursor` is the opaque continuation
    /// from a prior call's `Page::next_cursor`.
    fn scan_match(
        &self,
        tag: IndexTag,
        graph: &str,
        prefix: &str,
        cursor: Option<&str>,
    ) -> Result<Page>;
}

/// Fans a single triple's six index-row puts out concurrently and waits
/// for all of them. Collects every failure rather than the original
/// source's fire-and-forget rollback, which silently discarded cut
/// errors; on any failure the caller is expected to retry the full
/// six-row put (idempotency makes retry safe).
pub fn put_all(store: &dyn ExternalStore, rows: &[Row]) -> Result<()> {
    let errors: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = rows
            .iter()
            .map(|row| scope.spawn(|| store.put(row)))
            .collect();
        handles
            .into_iter()
            .filter_map(|h| h.join().expect("external store put panicked").err())
            .collect()
    });

    match errors.into_iter().next() {
        Some(first) => {
            tracing::warn!(error = %first, "external store put_all failed, caller should retry");
            Err(first)
        }
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::sync::Mutex;

    struct Recording {
        puts: Mutex<Vec<Row>>,
        fail_tag: Option<IndexTag>,
    }

    impl ExternalStore for Recording {
        fn put(&self, row: &Row) -> Result<()> {
            if Some(row.tag) == self.fail_tag {
                return Err(Error::Api(hexastore_api::Error::StoreIo("boom".into())));
            }
            self.puts.lock().unwrap().push(row.clone());
            Ok(())
        }

        fn cut(&self, _row: &Row) -> Result<()> {
            Ok(())
        }

        fn scan_match(
            &self,
            _tag: IndexTag,
            _graph: &str,
            _prefix: &str,
            _cursor: Option<&str>,
        ) -> Result<Page> {
            Ok(Page::default())
        }
    }

    fn row(tag: IndexTag) -> Row {
        Row {
            tag,
            graph: String::new(),
            sort_key: "k".into(),
            values: vec!["v".into()],
        }
    }

    #[test]
    fn put_all_succeeds_when_every_row_succeeds() {
        let store = Recording {
            puts: Mutex::new(Vec::new()),
            fail_tag: None,
        };
        let rows = vec![
            row(IndexTag::Sp),
            row(IndexTag::So),
            row(IndexTag::Ps),
            row(IndexTag::Po),
            row(IndexTag::Os),
            row(IndexTag::Op),
        ];
        put_all(&store, &rows).unwrap();
        assert_eq!(store.puts.lock().unwrap().len(), 6);
    }

    #[test]
    fn put_all_reports_first_failure() {
        let store = Recording {
            puts: Mutex::new(Vec::new()),
            fail_tag: Some(IndexTag::Po),
        };
        let rows = vec![row(IndexTag::Sp), row(IndexTag::Po)];
        let err = put_all(&store, &rows).unwrap_err();
        assert!(matches!(err, Error::Api(hexastore_api::Error::StoreIo(_))));
    }
}
