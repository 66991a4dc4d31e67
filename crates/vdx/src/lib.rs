//! vdx: vehicle dynamics exchange between simulators.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all vdx sub-crates. For most users, adding `vdx` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use vdx::prelude::*;
//! use vdx::schema::host_vehicle::{self, vehicle_powertrain, vehicle_powertrain::pedalry};
//!
//! let registry = vdx::schema::registry().unwrap();
//!
//! // A host vehicle report carrying only pedal positions.
//! let pedals = Record::new()
//!     .with(pedalry::PEDAL_POSITION_ACCELERATION, 0.5)
//!     .with(pedalry::PEDAL_POSITION_CLUTCH, 0.0);
//! let report = Record::new().with(
//!     host_vehicle::VEHICLE_POWERTRAIN,
//!     Record::new().with(vehicle_powertrain::PEDALRY, pedals),
//! );
//!
//! let bytes = registry.encode(&report, host_vehicle::NAME).unwrap();
//! let decoded = registry.decode(&bytes, host_vehicle::NAME).unwrap();
//! assert_eq!(decoded, report);
//!
//! // Several reports over one byte stream.
//! let mut buf = Vec::new();
//! let mut writer = MessageWriter::new(&mut buf, registry, host_vehicle::NAME).unwrap();
//! writer.write(&report).unwrap();
//! writer.write(&Record::new()).unwrap();
//! drop(writer);
//!
//! let reader = MessageReader::new(buf.as_slice(), registry, host_vehicle::NAME).unwrap();
//! assert_eq!(reader.count(), 2);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `vdx-core` | tags, wire kinds, descriptors, catalogs, records |
//! | [`codec`] | `vdx-codec` | registry, encoder, decoder, stream framing |
//! | [`schema`] | `vdx-schema` | the vehicle dynamics schema and its registry |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core data model (`vdx-core`).
///
/// [`types::Record`] and [`types::Value`] hold message contents;
/// [`types::FieldCatalog`] and the descriptor types describe their shape.
pub use vdx_core as types;

/// Registry and wire codec (`vdx-codec`).
///
/// Build a [`codec::SchemaRegistry`], then serialize with
/// [`codec::Encoder`] and parse with [`codec::Decoder`].
pub use vdx_codec as codec;

/// The vehicle dynamics schema (`vdx-schema`).
///
/// [`schema::registry()`] returns the process-wide registry.
pub use vdx_schema as schema;

/// Common imports for typical vdx usage.
///
/// ```rust
/// use vdx::prelude::*;
/// ```
pub mod prelude {
    // Data model
    pub use vdx_core::{
        EnumDescriptor, FieldCatalog, FieldDescriptor, FieldKind, InterfaceVersion,
        MessageDescriptor, Record, ScalarType, Tag, UnknownField, Value, WireKind,
    };

    // Codec
    pub use vdx_codec::{
        CodecConfig, Decoder, Encoder, MessageReader, MessageWriter, SchemaRegistry,
        UnknownFieldPolicy, VersionPolicy,
    };

    // Errors
    pub use vdx_codec::{CodecError, ConfigError, StreamError};
    pub use vdx_core::SchemaError;
}
