// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for fleet-core operations.

use thiserror::Error;

/// All possible errors that can occur in fleet operations.
///
/// Remote collection operations surface failures as `Store` (reported by
/// the store itself) or `Transport` (the connection failed before the store
/// could answer). Neither is retried automatically and neither is fatal.
#[derive(Debug, Error)]
pub enum Error {
    #[error("store error: {0}")]
    Store(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed document: {0}")]
    Document(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for fleet operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
