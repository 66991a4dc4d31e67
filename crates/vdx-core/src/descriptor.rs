//! Field, enum and message declarations.
//!
//! Descriptors are plain declarations. They are validated when they are
//! turned into a [`FieldCatalog`](crate::FieldCatalog) or registered with
//! a registry, not when they are built.

use std::fmt;

use crate::error::SchemaError;
use crate::kind::FieldKind;
use crate::tag::Tag;

/// The reserved "unknown/unspecified" enum value.
///
/// Every enum must declare it, and decoders substitute it for integers the
/// enum does not declare.
pub const ENUM_SENTINEL: i32 = 0;

/// Declaration of a single field of a message type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    /// Stable wire tag.
    pub tag: Tag,
    /// Field name, unique within its message type.
    pub name: String,
    /// Semantic type of the field.
    pub kind: FieldKind,
}

impl FieldDescriptor {
    /// Create a field descriptor.
    pub fn new(tag: u32, name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            tag: Tag(tag),
            name: name.into(),
            kind,
        }
    }
}

/// Declaration of an enum: symbolic names mapped to integer values.
///
/// By convention value `0` is `*_UNKNOWN` and value `1` is `*_OTHER`.
/// Only the `0` sentinel is enforced.
///
/// # Examples
///
/// ```
/// use vdx_core::EnumDescriptor;
///
/// let state = EnumDescriptor::new("State")
///     .value("STATE_UNKNOWN", 0)
///     .value("STATE_OTHER", 1)
///     .value("STATE_ACTIVE", 2);
///
/// assert!(state.validate().is_ok());
/// assert_eq!(state.resolve(2), 2);
/// assert_eq!(state.resolve(42), 0);
/// assert_eq!(state.name_of(1), Some("STATE_OTHER"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EnumDescriptor {
    name: String,
    values: Vec<(String, i32)>,
}

impl EnumDescriptor {
    /// Start an enum declaration with no values.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    /// Declare a value.
    pub fn value(mut self, name: impl Into<String>, value: i32) -> Self {
        self.values.push((name.into(), value));
        self
    }

    /// The enum's name as declared (local or fully qualified).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared `(name, value)` pairs in declaration order.
    pub fn values(&self) -> &[(String, i32)] {
        &self.values
    }

    /// Returns `true` if `value` is declared.
    pub fn contains(&self, value: i32) -> bool {
        self.values.iter().any(|(_, v)| *v == value)
    }

    /// Symbolic name of a declared value.
    pub fn name_of(&self, value: i32) -> Option<&str> {
        self.values
            .iter()
            .find(|(_, v)| *v == value)
            .map(|(n, _)| n.as_str())
    }

    /// Integer value of a declared name.
    pub fn value_of(&self, name: &str) -> Option<i32> {
        self.values.iter().find(|(n, _)| n == name).map(|(_, v)| *v)
    }

    /// Map `value` to itself if declared, to [`ENUM_SENTINEL`] otherwise.
    pub fn resolve(&self, value: i32) -> i32 {
        if self.contains(value) {
            value
        } else {
            ENUM_SENTINEL
        }
    }

    /// Check the sentinel is declared and names and values are unique.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if !self.contains(ENUM_SENTINEL) {
            return Err(SchemaError::InvalidDescriptor {
                type_name: self.name.clone(),
                detail: format!("enum does not declare the sentinel value {ENUM_SENTINEL}"),
            });
        }
        for (i, (name, value)) in self.values.iter().enumerate() {
            for (other_name, other_value) in &self.values[..i] {
                if other_name == name {
                    return Err(SchemaError::SchemaConflict {
                        type_name: self.name.clone(),
                        detail: format!("enum name {name} declared twice"),
                    });
                }
                if other_value == value {
                    return Err(SchemaError::SchemaConflict {
                        type_name: self.name.clone(),
                        detail: format!(
                            "enum value {value} declared by both {other_name} and {name}"
                        ),
                    });
                }
            }
        }
        Ok(())
    }

    pub(crate) fn renamed(&self, name: String) -> Self {
        Self {
            name,
            values: self.values.clone(),
        }
    }
}

/// Declaration of a message type, possibly with nested declarations.
///
/// Nested messages and enums are a namespacing convenience: the registry
/// flattens them to fully-qualified names `parent.child`. Field kinds must
/// always refer to other types by their fully-qualified name.
///
/// # Examples
///
/// ```
/// use vdx_core::{FieldKind, MessageDescriptor, ScalarType};
///
/// let wheels = MessageDescriptor::new("vdx.VehicleWheels")
///     .field(1, "wheel_data", FieldKind::repeated(
///         FieldKind::message("vdx.VehicleWheels.WheelData"),
///     ))
///     .message(
///         MessageDescriptor::new("WheelData")
///             .field(1, "axle", FieldKind::Scalar(ScalarType::Uint32))
///             .field(2, "index", FieldKind::Scalar(ScalarType::Uint32)),
///     );
///
/// assert_eq!(wheels.fields().len(), 1);
/// assert_eq!(wheels.nested_messages().len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageDescriptor {
    name: String,
    fields: Vec<FieldDescriptor>,
    version_field: Option<Tag>,
    nested_messages: Vec<MessageDescriptor>,
    nested_enums: Vec<EnumDescriptor>,
}

impl MessageDescriptor {
    /// Start a message declaration with no fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            version_field: None,
            nested_messages: Vec::new(),
            nested_enums: Vec::new(),
        }
    }

    /// Declare a field.
    pub fn field(mut self, tag: u32, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push(FieldDescriptor::new(tag, name, kind));
        self
    }

    /// Mark the field holding this message's [`InterfaceVersion`].
    pub fn version_field(mut self, tag: u32) -> Self {
        self.version_field = Some(Tag(tag));
        self
    }

    /// Declare a nested message type.
    pub fn message(mut self, nested: MessageDescriptor) -> Self {
        self.nested_messages.push(nested);
        self
    }

    /// Declare a nested enum type.
    pub fn enumeration(mut self, nested: EnumDescriptor) -> Self {
        self.nested_enums.push(nested);
        self
    }

    /// The message's name as declared.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared fields in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Tag of the version field, if one was marked.
    pub fn version_tag(&self) -> Option<Tag> {
        self.version_field
    }

    /// Nested message declarations.
    pub fn nested_messages(&self) -> &[MessageDescriptor] {
        &self.nested_messages
    }

    /// Nested enum declarations.
    pub fn nested_enums(&self) -> &[EnumDescriptor] {
        &self.nested_enums
    }

    /// Flatten this declaration and everything nested in it into
    /// fully-qualified `(messages, enums)`, parents before children.
    pub fn flatten(&self) -> (Vec<MessageDescriptor>, Vec<EnumDescriptor>) {
        let mut messages = Vec::new();
        let mut enums = Vec::new();
        self.flatten_into(None, &mut messages, &mut enums);
        (messages, enums)
    }

    fn flatten_into(
        &self,
        parent: Option<&str>,
        messages: &mut Vec<MessageDescriptor>,
        enums: &mut Vec<EnumDescriptor>,
    ) {
        let full_name = qualify(parent, &self.name);
        messages.push(MessageDescriptor {
            name: full_name.clone(),
            fields: self.fields.clone(),
            version_field: self.version_field,
            nested_messages: Vec::new(),
            nested_enums: Vec::new(),
        });
        for nested in &self.nested_enums {
            enums.push(nested.renamed(qualify(Some(&full_name), nested.name())));
        }
        for nested in &self.nested_messages {
            nested.flatten_into(Some(&full_name), messages, enums);
        }
    }
}

fn qualify(parent: Option<&str>, name: &str) -> String {
    match parent {
        Some(parent) => format!("{parent}.{name}"),
        None => name.to_string(),
    }
}

/// Schema interface version carried in a message's version field.
///
/// On the wire this is a nested message with `uint32` fields
/// `major = 1`, `minor = 2`, `patch = 3`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InterfaceVersion {
    /// Incremented on incompatible changes.
    pub major: u32,
    /// Incremented on compatible additions.
    pub minor: u32,
    /// Incremented on fixes that do not change the schema shape.
    pub patch: u32,
}

impl InterfaceVersion {
    /// Tag of the major number inside an interface version message.
    pub const MAJOR_TAG: Tag = Tag(1);
    /// Tag of the minor number inside an interface version message.
    pub const MINOR_TAG: Tag = Tag(2);
    /// Tag of the patch number inside an interface version message.
    pub const PATCH_TAG: Tag = Tag(3);

    /// Create a version triple.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Returns `true` if a peer speaking `other` can be decoded by a
    /// schema compiled at `self` (the peer's major is not newer).
    pub fn accepts(&self, other: &InterfaceVersion) -> bool {
        other.major <= self.major
    }
}

impl fmt::Display for InterfaceVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
