use serde_json::Value;
use vocab_core::model::VocabularyEntry;

use crate::repository::{EntryRecord, StorageError};

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

/// Decode a vocabulary document.
///
/// The top level must be an array. Elements that are not objects, lack `word` or
/// `meaning`, or carry blank values are dropped; the rest keep their order.
pub(crate) fn decode_entries(raw: &str) -> Result<Vec<VocabularyEntry>, StorageError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| StorageError::Malformed(e.to_string()))?;
    let Value::Array(items) = value else {
        return Err(StorageError::Malformed("expected a JSON array".into()));
    };

    let total = items.len();
    let entries: Vec<VocabularyEntry> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let decoded = serde_json::from_value::<EntryRecord>(item)
                .map_err(ser)
                .and_then(|record| record.into_entry().map_err(ser));
            match decoded {
                Ok(entry) => Some(entry),
                Err(err) => {
                    tracing::debug!(index, %err, "skipping invalid vocabulary record");
                    None
                }
            }
        })
        .collect();

    if entries.len() < total {
        tracing::warn!(
            kept = entries.len(),
            dropped = total - entries.len(),
            "dropped invalid vocabulary records"
        );
    }

    Ok(entries)
}

/// Encode entries as a pretty-printed JSON array with a trailing newline.
pub(crate) fn encode_entries(entries: &[VocabularyEntry]) -> Result<String, StorageError> {
    let records: Vec<EntryRecord> = entries.iter().map(EntryRecord::from_entry).collect();
    let mut out = serde_json::to_string_pretty(&records).map_err(ser)?;
    out.push('\n');
    Ok(out)
}
