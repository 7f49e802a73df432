// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The optimistic list synchronizer.
//!
//! Owns the local device list and keeps it eventually consistent with the
//! remote collection. Saves apply optimistically and roll back on failure;
//! deletes are confirmed before the local list changes; refresh replaces
//! the list wholesale. Errors are never retried: each failed operation
//! emits exactly one notification and leaves the list in a consistent
//! state.

use tokio::sync::{mpsc, watch};
use tracing::warn;

use fleet_core::{Device, Error};

use crate::collection::Collection;

/// Synchronizes an in-memory device list with a remote collection.
///
/// The list is exposed as a watch channel so the hosting UI re-renders on
/// every change. Mutations run on the calling task and complete exactly
/// once; dropping the synchronizer (or an operation future) cancels the
/// completion, so nothing can fire against torn-down state.
pub struct Synchronizer<C: Collection> {
    collection: C,
    list: watch::Sender<Vec<Device>>,
    errors: mpsc::UnboundedSender<Error>,
    error_rx: Option<mpsc::UnboundedReceiver<Error>>,
    next_placeholder: u64,
}

impl<C: Collection> Synchronizer<C> {
    /// Create a synchronizer over the given collection, starting from an
    /// empty local list.
    pub fn new(collection: C) -> Self {
        let (list, _) = watch::channel(Vec::new());
        let (errors, error_rx) = mpsc::unbounded_channel();

        Synchronizer {
            collection,
            list,
            errors,
            error_rx: Some(error_rx),
            next_placeholder: 0,
        }
    }

    /// Subscribe to the local list.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Device>> {
        self.list.subscribe()
    }

    /// Snapshot of the current local list.
    pub fn devices(&self) -> Vec<Device> {
        self.list.borrow().clone()
    }

    /// Take the error notification channel.
    ///
    /// The hosting UI calls this once and renders whatever arrives. Errors
    /// emitted with no receiver alive are logged and dropped.
    pub fn take_errors(&mut self) -> Option<mpsc::UnboundedReceiver<Error>> {
        self.error_rx.take()
    }

    /// Replace the local list with the collection's full contents.
    ///
    /// On failure the list keeps its previous value (initially empty) and
    /// one error notification is emitted.
    pub async fn refresh(&mut self) {
        match self.collection.list_all().await {
            Ok(devices) => {
                self.list.send_replace(devices);
            }
            Err(e) => self.report(e),
        }
    }

    /// Create or update a record.
    ///
    /// The record lands in the local list immediately. If the remote
    /// upsert then fails, the optimistic change is rolled back and one
    /// error notification is emitted.
    pub async fn save(&mut self, device: Device) {
        if device.is_persisted() {
            self.save_existing(device).await;
        } else {
            self.save_new(device).await;
        }
    }

    /// Delete the record with the given id.
    ///
    /// The local list changes only after the remote delete succeeds; on
    /// failure it is left untouched and one error notification is emitted.
    pub async fn remove(&mut self, id: &str) {
        match self.collection.delete(id.to_string()).await {
            Ok(()) => {
                self.list.send_modify(|list| list.retain(|d| d.id != id));
            }
            Err(e) => self.report(e),
        }
    }

    /// Create path: insert under a placeholder id, then reconcile the
    /// placeholder with the id the store assigned.
    async fn save_new(&mut self, device: Device) {
        let placeholder = self.placeholder_id();

        let mut optimistic = device.clone();
        optimistic.id = placeholder.clone();
        self.list.send_modify(|list| list.push(optimistic));

        match self.collection.upsert(device).await {
            Ok(assigned) => {
                self.list.send_modify(|list| {
                    if let Some(entry) = list.iter_mut().find(|d| d.id == placeholder) {
                        entry.id = assigned;
                    }
                });
            }
            Err(e) => {
                self.list
                    .send_modify(|list| list.retain(|d| d.id != placeholder));
                self.report(e);
            }
        }
    }

    /// Update path: replace in place, keeping the previous value for
    /// rollback.
    async fn save_existing(&mut self, device: Device) {
        let id = device.id.clone();
        let previous = self.list.borrow().iter().find(|d| d.id == id).cloned();

        self.list.send_modify(|list| {
            match list.iter_mut().find(|d| d.id == id) {
                Some(entry) => *entry = device.clone(),
                // An edit of a record the list no longer holds still goes
                // to the store; show it locally as well.
                None => list.push(device.clone()),
            }
        });

        if let Err(e) = self.collection.upsert(device).await {
            self.list.send_modify(|list| match &previous {
                Some(prev) => {
                    if let Some(entry) = list.iter_mut().find(|d| d.id == id) {
                        *entry = prev.clone();
                    }
                }
                None => list.retain(|d| d.id != id),
            });
            self.report(e);
        }
    }

    /// Process-unique placeholder id for a record the store has not named
    /// yet. Never sent over the wire.
    fn placeholder_id(&mut self) -> String {
        self.next_placeholder += 1;
        format!("pending-{}", self.next_placeholder)
    }

    fn report(&self, error: Error) {
        warn!("collection operation failed: {}", error);
        // With no receiver alive, the log line is all that remains.
        let _ = self.errors.send(error);
    }
}
