//! Snapshot save/load
//!
//! Pets persist as a versioned JSON envelope. Decoding is tolerant per
//! entry: one malformed pet is logged and skipped without aborting the
//! rest of the restoration. The storage medium itself belongs to the
//! host; this module only produces and consumes strings.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::sim::species::{PetColor, PetSize, SpeciesKind};

/// Current snapshot format version
pub const SNAPSHOT_VERSION: u32 = 1;

/// One persisted pet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetSnapshotEntry {
    pub species: SpeciesKind,
    pub color: PetColor,
    pub size: PetSize,
    pub name: String,
    /// Friend relation by display name, re-linked after all pets exist
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friend_name: Option<String>,
    pub x: f32,
    #[serde(default)]
    pub bottom: f32,
}

/// Versioned envelope around the pet list. Decoding keeps entries as raw
/// values so one malformed pet cannot poison the rest.
#[derive(Debug, Deserialize)]
struct Envelope {
    version: u32,
    pets: Vec<Value>,
}

#[derive(Serialize)]
struct EnvelopeOut<'a> {
    version: u32,
    pets: &'a [PetSnapshotEntry],
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("unsupported snapshot version {0}")]
    UnsupportedVersion(u32),
}

/// Serialize pets into the versioned envelope
pub fn encode(entries: &[PetSnapshotEntry]) -> String {
    let envelope = EnvelopeOut {
        version: SNAPSHOT_VERSION,
        pets: entries,
    };
    match serde_json::to_string(&envelope) {
        Ok(json) => json,
        Err(err) => {
            log::error!("snapshot encode failed: {err}");
            String::new()
        }
    }
}

/// Decode a snapshot, skipping malformed entries individually
pub fn decode(json: &str) -> Result<Vec<PetSnapshotEntry>, SnapshotError> {
    let envelope: Envelope = serde_json::from_str(json)?;
    if envelope.version > SNAPSHOT_VERSION {
        return Err(SnapshotError::UnsupportedVersion(envelope.version));
    }

    let mut entries = Vec::with_capacity(envelope.pets.len());
    for (i, value) in envelope.pets.into_iter().enumerate() {
        match serde_json::from_value::<PetSnapshotEntry>(value) {
            Ok(entry) => entries.push(entry),
            Err(err) => {
                log::warn!("skipping malformed snapshot entry {i}: {err}");
            }
        }
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str) -> PetSnapshotEntry {
        PetSnapshotEntry {
            species: SpeciesKind::Dog,
            color: PetColor::Brown,
            size: PetSize::Small,
            name: name.to_string(),
            friend_name: None,
            x: 42.0,
            bottom: 0.0,
        }
    }

    #[test]
    fn test_round_trip() {
        let mut a = entry("Rex");
        a.friend_name = Some("Molly".to_string());
        let entries = vec![a, entry("Molly")];
        let decoded = decode(&encode(&entries)).unwrap();
        assert_eq!(decoded, entries);
    }

    #[test]
    fn test_malformed_entry_is_skipped_not_fatal() {
        let json = r#"{
            "version": 1,
            "pets": [
                {"species":"dog","color":"brown","size":"small","name":"Rex","x":10.0},
                {"species":"dragon","color":"brown","size":"small","name":"Smaug","x":10.0},
                {"species":"fox","color":"red","size":"nano","name":"Foxy","x":99.0}
            ]
        }"#;
        let decoded = decode(json).unwrap();
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0].name, "Rex");
        assert_eq!(decoded[1].name, "Foxy");
    }

    #[test]
    fn test_unknown_fields_default() {
        // Older snapshots without `bottom` or `friend_name` still load
        let json = r#"{
            "version": 1,
            "pets": [{"species":"crab","color":"red","size":"large","name":"Ferris","x":5.0}]
        }"#;
        let decoded = decode(json).unwrap();
        assert_eq!(decoded[0].bottom, 0.0);
        assert_eq!(decoded[0].friend_name, None);
    }

    #[test]
    fn test_future_version_is_rejected() {
        let json = r#"{"version": 99, "pets": []}"#;
        assert!(matches!(
            decode(json),
            Err(SnapshotError::UnsupportedVersion(99))
        ));
    }

    #[test]
    fn test_garbage_is_malformed() {
        assert!(matches!(decode("not json"), Err(SnapshotError::Malformed(_))));
    }
}
