// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Server state management.
//!
//! Holds the canonical document collection in memory and rewrites a JSONL
//! snapshot file after every applied mutation. The snapshot is the store's
//! only durable form; it is loaded wholesale on startup.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use fleet_core::{Document, Result};

/// Snapshot filename within the data directory.
const SNAPSHOT_NAME: &str = "devices.jsonl";

/// A document as the store keeps it: the client-visible field map plus
/// store metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredDocument {
    /// The assigned document id.
    pub id: String,
    /// Flat field map, excluding the id.
    pub fields: BTreeMap<String, String>,
    /// When this document was last written.
    pub updated_at: DateTime<Utc>,
}

/// Shared server state containing the canonical collection.
#[derive(Clone)]
pub struct ServerState {
    inner: Arc<ServerStateInner>,
}

struct ServerStateInner {
    /// The collection, keyed by document id (protected by mutex for writes).
    collection: Mutex<BTreeMap<String, StoredDocument>>,
    /// Snapshot file path.
    snapshot_path: PathBuf,
}

impl ServerState {
    /// Creates server state backed by a snapshot file in the given
    /// directory, loading whatever the file already holds.
    pub fn new(data_dir: &Path) -> Result<Self> {
        let snapshot_path = data_dir.join(SNAPSHOT_NAME);
        let collection = load_snapshot(&snapshot_path)?;

        Ok(ServerState {
            inner: Arc::new(ServerStateInner {
                collection: Mutex::new(collection),
                snapshot_path,
            }),
        })
    }

    /// Creates a document or replaces one by id, returning the document's
    /// id in the store.
    ///
    /// Without an id, a fresh one is assigned from the record's name and
    /// the current time. With one, the document is written at that id
    /// whether or not it existed before (upsert semantics).
    pub async fn upsert(
        &self,
        id: Option<String>,
        fields: BTreeMap<String, String>,
    ) -> Result<String> {
        let now = Utc::now();
        let mut collection = self.inner.collection.lock().await;

        let id = match id {
            Some(id) => id,
            None => {
                let name = fields.get("device_name").map(String::as_str).unwrap_or("");
                crate::id::generate_unique_id(name, &now, |candidate| {
                    collection.contains_key(candidate)
                })
            }
        };

        collection.insert(
            id.clone(),
            StoredDocument {
                id: id.clone(),
                fields,
                updated_at: now,
            },
        );

        write_snapshot(&self.inner.snapshot_path, &collection)?;
        Ok(id)
    }

    /// Removes the document with the given id.
    ///
    /// Returns whether the document existed; removing an absent id is
    /// still a success and leaves the snapshot untouched.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let mut collection = self.inner.collection.lock().await;

        let existed = collection.remove(id).is_some();
        if existed {
            write_snapshot(&self.inner.snapshot_path, &collection)?;
        }

        Ok(existed)
    }

    /// Returns every document in id order.
    pub async fn list(&self) -> Vec<Document> {
        let collection = self.inner.collection.lock().await;
        collection
            .values()
            .map(|stored| Document {
                id: stored.id.clone(),
                fields: stored.fields.clone(),
            })
            .collect()
    }

    /// Number of documents currently held.
    pub async fn len(&self) -> usize {
        self.inner.collection.lock().await.len()
    }
}

/// Reads the snapshot file into a collection map.
///
/// A missing file is an empty collection; blank lines are skipped.
fn load_snapshot(path: &Path) -> Result<BTreeMap<String, StoredDocument>> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut collection = BTreeMap::new();

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let stored: StoredDocument = serde_json::from_str(&line)?;
        collection.insert(stored.id.clone(), stored);
    }

    Ok(collection)
}

/// Rewrites the snapshot file from the collection, one document per line,
/// fsynced before returning.
fn write_snapshot(path: &Path, collection: &BTreeMap<String, StoredDocument>) -> Result<()> {
    let mut file = File::create(path)?;

    for stored in collection.values() {
        let json = serde_json::to_string(stored)?;
        writeln!(file, "{json}")?;
    }
    file.sync_all()?;

    Ok(())
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
