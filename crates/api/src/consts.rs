// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use std::time::Duration;

/// RPC method returning the SCALE value stored under a key.
pub const STATE_GET_STORAGE: &str = "state_getStorage";

/// RPC method returning the `RuntimeMetadataPrefixed` blob.
pub const STATE_GET_METADATA: &str = "state_getMetadata";

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
