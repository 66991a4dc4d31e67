//! Tagged-field binary codec for vdx records.
//!
//! Encodes [`Record`](vdx_core::Record) trees to a compact byte stream and
//! back, driven by the immutable [`SchemaRegistry`].
//!
//! # Architecture
//!
//! - [`SchemaRegistry`] resolves fully-qualified type names to
//!   [`FieldCatalog`](vdx_core::FieldCatalog)s and enum descriptors
//! - [`Encoder`] serializes a record against its type's catalog
//! - [`Decoder`] parses bytes back into a record, tolerating unknown tags
//! - [`MessageWriter`] and [`MessageReader`] add length-prefix framing over
//!   any `Write`/`Read` stream
//!
//! # Format
//!
//! ```text
//! message    := unit*
//! unit       := varint(tag) wire_kind:u8 payload
//! wire_kind  := 0 varint | 1 fixed32 | 2 fixed64 | 3 length-delimited
//! payload    := varint              (enum, bool)
//!             | 4 bytes LE          (int32, uint32, float)
//!             | 8 bytes LE          (int64, uint64, double)
//!             | varint(len) bytes   (string, bytes, nested message)
//! ```
//!
//! A top-level message has no outer framing. Repeated fields emit one unit
//! per element, sharing the tag.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod registry;
pub mod stream;
pub mod wire;

pub use config::{CodecConfig, ConfigError, UnknownFieldPolicy, VersionPolicy};
pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::{CodecError, StreamError};
pub use registry::{RegistryBuilder, SchemaRegistry};
pub use stream::{MessageReader, MessageWriter};
