//! The vdx vehicle dynamics schema.
//!
//! Declares every message and enum of the exchange format under the `vdx`
//! package and builds them into a process-wide [`SchemaRegistry`].
//!
//! Each message has a module holding its fully-qualified `NAME` and one
//! [`Tag`](vdx_core::Tag) constant per field; each enum has a module
//! holding its `NAME` and one `i32` constant per value. Tags never change
//! once published. New fields take new tags.
//!
//! # Examples
//!
//! ```
//! use vdx_core::{Record, Value};
//! use vdx_schema::host_vehicle::vehicle_powertrain::pedalry;
//!
//! let registry = vdx_schema::registry().unwrap();
//! let record = Record::new()
//!     .with(pedalry::PEDAL_POSITION_ACCELERATION, 0.5)
//!     .with(pedalry::PEDAL_POSITION_CLUTCH, 0.0);
//!
//! let bytes = registry.encode(&record, pedalry::NAME).unwrap();
//! let decoded = registry.decode(&bytes, pedalry::NAME).unwrap();
//! assert_eq!(decoded.get(pedalry::PEDAL_POSITION_BRAKE), None);
//! assert_eq!(
//!     decoded.get(pedalry::PEDAL_POSITION_ACCELERATION),
//!     Some(&Value::Double(0.5))
//! );
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod common;
pub mod host_vehicle;

use std::sync::OnceLock;

use vdx_codec::{RegistryBuilder, SchemaRegistry};
use vdx_core::{InterfaceVersion, SchemaError};

pub use common::{geodetic_position, interface_version, orientation3d, timestamp, vector3d};

/// Interface version this schema was compiled at.
///
/// Decoders built on [`registry()`] reject `HostVehicleData` messages whose
/// major version is newer.
pub const INTERFACE_VERSION: InterfaceVersion = InterfaceVersion::new(1, 0, 0);

/// Add every vdx declaration and the interface version to `builder`.
///
/// Use this to build a registry that extends the schema with
/// application-specific messages.
pub fn declare(builder: RegistryBuilder) -> RegistryBuilder {
    builder
        .interface_version(INTERFACE_VERSION)
        .message(common::interface_version::descriptor())
        .message(common::timestamp::descriptor())
        .message(common::vector3d::descriptor())
        .message(common::orientation3d::descriptor())
        .message(common::geodetic_position::descriptor())
        .message(host_vehicle::descriptor())
}

/// Build a fresh registry holding the vdx schema.
pub fn build_registry() -> Result<SchemaRegistry, SchemaError> {
    declare(SchemaRegistry::builder()).build()
}

/// The process-wide registry, built on first use.
///
/// A schema error is fatal to startup; every call returns the same error.
pub fn registry() -> Result<&'static SchemaRegistry, SchemaError> {
    static REGISTRY: OnceLock<Result<SchemaRegistry, SchemaError>> = OnceLock::new();
    REGISTRY
        .get_or_init(|| {
            let registry = build_registry();
            if let Err(e) = &registry {
                tracing::error!(error = %e, "vdx schema failed to load");
            }
            registry
        })
        .as_ref()
        .map_err(Clone::clone)
}
