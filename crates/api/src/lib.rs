// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Query Substrate nodes over JSON-RPC and decode SCALE storage values using
//! the runtime metadata the node reports.

pub mod client;
pub mod consts;
pub mod converters;
pub mod error;
pub mod logging;
pub mod metadata;
pub mod request;
pub mod types;
pub mod utils;

#[cfg(test)]
pub mod test_fixtures;

pub use client::{ClientBuilder, ClientOptions, SubstrateClient};
pub use converters::{TypeConverter, TypeRegistry, WireTypeConverter};
pub use error::{ClientError, ErrorKind};
pub use request::Method;
pub use types::{DecodedValue, WireType};
