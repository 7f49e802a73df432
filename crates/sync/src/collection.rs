// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The store boundary the synchronizer works against.
//!
//! A remote collection is anything that can upsert, list, and delete
//! documents asynchronously, answering each call exactly once with a value
//! or a store error. The production implementation is
//! [`fleet_client::CollectionClient`]; tests inject scripted fakes.

use std::future::Future;
use std::pin::Pin;

use fleet_client::{CollectionClient, Transport};
use fleet_core::{Device, Result};

/// A remote document collection of device records.
pub trait Collection: Send {
    /// Create a document (empty record id) or replace one (non-empty id).
    ///
    /// Resolves to the document's id in the store: freshly assigned for a
    /// create, echoed for a replace.
    fn upsert(&mut self, device: Device)
        -> Pin<Box<dyn Future<Output = Result<String>> + Send + '_>>;

    /// Fetch every record in the collection, in store-defined order.
    fn list_all(&mut self) -> Pin<Box<dyn Future<Output = Result<Vec<Device>>> + Send + '_>>;

    /// Remove the record with the given id. Absence is success.
    fn delete(&mut self, id: String) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}

impl<T: Transport> Collection for CollectionClient<T> {
    fn upsert(
        &mut self,
        device: Device,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + '_>> {
        Box::pin(async move { CollectionClient::upsert(self, &device).await })
    }

    fn list_all(&mut self) -> Pin<Box<dyn Future<Output = Result<Vec<Device>>> + Send + '_>> {
        Box::pin(async move { CollectionClient::list_all(self).await })
    }

    fn delete(&mut self, id: String) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move { CollectionClient::delete(self, &id).await })
    }
}
