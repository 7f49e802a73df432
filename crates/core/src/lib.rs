// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! fleet-core: Shared library for the fleet device dashboard backend.
//!
//! This crate provides the device record model, the flat document codec
//! used at the storage boundary, the client/server wire protocol, and the
//! error taxonomy shared by the fleet client, synchronizer, and server.

pub mod device;
pub mod document;
pub mod error;
pub mod protocol;

pub use device::Device;
pub use document::Document;
pub use error::{Error, Result};
pub use protocol::{ClientMessage, ServerMessage};
