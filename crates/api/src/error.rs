// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error types shared across the codec, registry, metadata and client layers.
//!
//! Each layer owns its own error enum. [`ClientError`] wraps all of them so a
//! caller of [`crate::SubstrateClient`] only has to handle one type, and
//! [`ClientError::kind`] flattens the nesting into a single inspectable
//! [`ErrorKind`].

use std::time::Duration;
use thiserror::Error;

/// Failures while turning bytes into a wire value or back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The decode cursor plus the type size runs past the end of the buffer.
    #[error(
        "decoding {type_name} out of range: cursor {cursor} + size {size} exceeds buffer length {len}"
    )]
    OutOfRange {
        type_name: &'static str,
        cursor: usize,
        size: usize,
        len: usize,
    },

    /// Input is not valid hex, has the wrong length, or is not parseable.
    #[error("invalid {type_name} input: {reason}")]
    Format {
        type_name: &'static str,
        reason: String,
    },
}

impl CodecError {
    pub(crate) fn format(type_name: &'static str, reason: impl Into<String>) -> Self {
        Self::Format {
            type_name,
            reason: reason.into(),
        }
    }
}

/// Failures of the type converter registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Converter for type '{0}' is already registered")]
    DuplicateConverter(String),

    #[error("No converter registered for type '{0}'")]
    UnknownType(String),
}

/// Failures while parsing the runtime metadata blob.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("Invalid metadata hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("Failed to decode metadata: {0}")]
    Decode(#[from] parity_scale_codec::Error),

    #[error("Invalid metadata magic number 0x{0:08x}")]
    InvalidMagic(u32),

    #[error("Unsupported metadata version V{0}")]
    UnsupportedVersion(u32),
}

/// Failures while turning a (module, item, key) triple into a storage address.
#[derive(Debug, Error)]
pub enum StorageRequestError {
    #[error("{module}.{item} needs a parameter of type '{key_type}'")]
    ParameterRequired {
        module: String,
        item: String,
        key_type: String,
    },

    #[error("{module}.{item} takes no parameter")]
    UnexpectedParameter { module: String, item: String },

    #[error("{module}.{item} has a multi-key layout that cannot be addressed with a single key")]
    UnsupportedEntry { module: String, item: String },

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Every way a client operation can fail.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Module '{module}' or item '{item}' missing in metadata of '{origin}'")]
    ModuleOrItemNotFound {
        module: String,
        item: String,
        origin: String,
    },

    #[error("Invalid return type in metadata for {module}.{item}")]
    InvalidReturnType { module: String, item: String },

    #[error(transparent)]
    Request(#[from] StorageRequestError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("RPC request failed: {0}")]
    TransportFailure(#[source] subxt_rpcs::Error),

    #[error("Failed to connect to node: {0}")]
    Connection(#[source] subxt_rpcs::Error),
}

/// Flat classification of a [`ClientError`], independent of which layer raised it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    OutOfRange,
    FormatError,
    DuplicateConverter,
    UnknownType,
    ModuleOrItemNotFound,
    ParameterRequired,
    UnexpectedParameter,
    UnsupportedEntry,
    InvalidReturnType,
    Metadata,
    Cancelled,
    Timeout,
    TransportFailure,
    Connection,
}

impl From<&CodecError> for ErrorKind {
    fn from(err: &CodecError) -> Self {
        match err {
            CodecError::OutOfRange { .. } => ErrorKind::OutOfRange,
            CodecError::Format { .. } => ErrorKind::FormatError,
        }
    }
}

impl From<&RegistryError> for ErrorKind {
    fn from(err: &RegistryError) -> Self {
        match err {
            RegistryError::DuplicateConverter(_) => ErrorKind::DuplicateConverter,
            RegistryError::UnknownType(_) => ErrorKind::UnknownType,
        }
    }
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ModuleOrItemNotFound { .. } => ErrorKind::ModuleOrItemNotFound,
            Self::InvalidReturnType { .. } => ErrorKind::InvalidReturnType,
            Self::Request(err) => match err {
                StorageRequestError::ParameterRequired { .. } => ErrorKind::ParameterRequired,
                StorageRequestError::UnexpectedParameter { .. } => ErrorKind::UnexpectedParameter,
                StorageRequestError::UnsupportedEntry { .. } => ErrorKind::UnsupportedEntry,
                StorageRequestError::Registry(err) => err.into(),
                StorageRequestError::Codec(err) => err.into(),
            },
            Self::Registry(err) => err.into(),
            Self::Codec(err) => err.into(),
            Self::Metadata(_) => ErrorKind::Metadata,
            Self::Cancelled => ErrorKind::Cancelled,
            Self::Timeout(_) => ErrorKind::Timeout,
            Self::TransportFailure(_) => ErrorKind::TransportFailure,
            Self::Connection(_) => ErrorKind::Connection,
        }
    }
}
