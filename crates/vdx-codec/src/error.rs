//! Per-message codec errors.
//!
//! Every error here concerns a single message. The caller can discard that
//! message and carry on; the registry is never affected.

use std::io;

use vdx_core::{InterfaceVersion, Tag, WireKind};

use crate::config::ConfigError;

/// Errors from encoding or decoding one message.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The requested type name is not registered.
    #[error("unknown type '{name}'")]
    UnknownType {
        /// The unresolved type name.
        name: String,
    },
    /// A record value does not fit its field's declared kind, or the field
    /// is not declared at all.
    #[error("cannot encode field {tag} of '{type_name}': {detail}")]
    UnencodableField {
        /// Type being encoded.
        type_name: String,
        /// Offending field tag.
        tag: Tag,
        /// Human-readable description of the mismatch.
        detail: String,
    },
    /// The input ended inside a field unit.
    #[error("truncated input: {detail}")]
    TruncatedInput {
        /// What was being read when the input ran out.
        detail: String,
    },
    /// A known field arrived with a different wire kind than declared.
    #[error(
        "type mismatch for field {tag} of '{type_name}': expected {expected}, found {found}"
    )]
    TypeMismatch {
        /// Type being decoded.
        type_name: String,
        /// Offending field tag.
        tag: Tag,
        /// Wire kind the catalog declares.
        expected: WireKind,
        /// Wire kind found in the input.
        found: WireKind,
    },
    /// The message's interface major version is newer than the registry's.
    #[error("incompatible interface version {found}, compiled schema is {supported}")]
    IncompatibleVersion {
        /// Version carried by the message.
        found: InterfaceVersion,
        /// Version the registry was compiled with.
        supported: InterfaceVersion,
    },
    /// The input is not a well-formed unit stream (bad wire-kind byte,
    /// invalid tag, over-long varint, invalid UTF-8).
    #[error("malformed input: {detail}")]
    MalformedInput {
        /// Human-readable description of what went wrong.
        detail: String,
    },
    /// Messages are nested deeper than the configured limit.
    #[error("message nesting exceeds the limit of {limit}")]
    RecursionLimit {
        /// The configured `max_depth`.
        limit: usize,
    },
}

/// Errors from the framed message streams.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// The underlying reader or writer failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// A frame could not be encoded or decoded.
    #[error(transparent)]
    Codec(#[from] CodecError),
    /// The stream was constructed with an invalid configuration.
    #[error("invalid codec config: {0}")]
    Config(#[from] ConfigError),
    /// A frame exceeds `CodecConfig::max_message_size`.
    #[error("message of {len} bytes exceeds the limit of {limit}")]
    MessageTooLarge {
        /// Declared or encoded frame length.
        len: u64,
        /// The configured limit.
        limit: usize,
    },
}
