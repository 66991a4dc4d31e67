//! Core types for the vdx vehicle dynamics exchange format.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! data shapes shared by the codec and the schema: field tags, wire kinds,
//! field/enum/message descriptors, the per-type [`FieldCatalog`], the
//! dynamic [`Record`] tree, and schema load errors.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod catalog;
pub mod descriptor;
pub mod error;
pub mod kind;
pub mod tag;
pub mod value;

pub use catalog::FieldCatalog;
pub use descriptor::{
    EnumDescriptor, FieldDescriptor, InterfaceVersion, MessageDescriptor, ENUM_SENTINEL,
};
pub use error::SchemaError;
pub use kind::{FieldKind, ScalarType, WireKind};
pub use tag::Tag;
pub use value::{Record, UnknownField, Value};
