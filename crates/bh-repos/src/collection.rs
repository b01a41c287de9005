//! Typed load/save helpers over the JSON-level `RecordStore` port.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use bh_core::error::Result;
use bh_core::ports::RecordStore;

/// Reads a collection and decodes each record, skipping (with a warning)
/// records that no longer deserialize. Fail-soft by design: the store
/// holds locally-cached, non-critical data.
pub(crate) async fn load<T: DeserializeOwned>(store: &dyn RecordStore, collection: &str) -> Vec<T> {
    store
        .read_all(collection)
        .await
        .into_iter()
        .filter_map(|value| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(collection, %err, "skipping undecodable record");
                None
            }
        })
        .collect()
}

/// Encodes and writes the whole collection back in one store call.
pub(crate) async fn save<T: Serialize>(
    store: &dyn RecordStore,
    collection: &str,
    records: &[T],
) -> Result<()> {
    let values = records
        .iter()
        .map(serde_json::to_value)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    store.write_all(collection, values).await
}
