//! Schema load errors.
//!
//! Everything here is raised while descriptors are validated and the
//! registry is assembled. None of it can happen once the registry is built.

/// Errors detected while validating descriptors or building a registry.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// A type name was looked up or referenced but never registered.
    #[error("unknown type '{name}'")]
    UnknownType {
        /// The unresolved type name.
        name: String,
    },
    /// Two declarations contradict each other: a duplicate tag or field
    /// name within one type, or the same type name registered twice with
    /// different field sets.
    #[error("schema conflict in '{type_name}': {detail}")]
    SchemaConflict {
        /// The type in which the conflict was found.
        type_name: String,
        /// Human-readable description of the conflict.
        detail: String,
    },
    /// A single declaration is malformed on its own (tag 0, nested
    /// repeated, missing enum sentinel, bad version field).
    #[error("invalid descriptor '{type_name}': {detail}")]
    InvalidDescriptor {
        /// The type whose declaration is malformed.
        type_name: String,
        /// Human-readable description of the problem.
        detail: String,
    },
}
