//! Field kinds and the wire kinds they encode to.

use std::fmt;

/// Encoding discriminator written after every tag on the wire.
///
/// The numeric values are part of the wire format and must never change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WireKind {
    /// Unsigned LEB128 varint (enums, bools).
    Varint = 0,
    /// Four little-endian bytes.
    Fixed32 = 1,
    /// Eight little-endian bytes.
    Fixed64 = 2,
    /// Varint byte length followed by that many bytes (strings, bytes,
    /// nested messages).
    LengthDelimited = 3,
}

impl WireKind {
    /// Decode a wire-kind byte, or `None` if the byte is not a known kind.
    pub fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Varint),
            1 => Some(Self::Fixed32),
            2 => Some(Self::Fixed64),
            3 => Some(Self::LengthDelimited),
            _ => None,
        }
    }

    /// The byte written on the wire for this kind.
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for WireKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Varint => "varint",
            Self::Fixed32 => "fixed32",
            Self::Fixed64 => "fixed64",
            Self::LengthDelimited => "length-delimited",
        };
        f.write_str(name)
    }
}

/// Scalar value types a field may declare.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalarType {
    /// 32-bit signed integer, fixed width.
    Int32,
    /// 64-bit signed integer, fixed width.
    Int64,
    /// 32-bit unsigned integer, fixed width.
    Uint32,
    /// 64-bit unsigned integer, fixed width.
    Uint64,
    /// IEEE 754 single precision.
    Float,
    /// IEEE 754 double precision.
    Double,
    /// Boolean, encoded as a varint `0`/`1`.
    Bool,
    /// UTF-8 text.
    String,
    /// Opaque bytes.
    Bytes,
}

impl ScalarType {
    /// Wire kind used to encode values of this type.
    pub fn wire_kind(self) -> WireKind {
        match self {
            Self::Int32 | Self::Uint32 | Self::Float => WireKind::Fixed32,
            Self::Int64 | Self::Uint64 | Self::Double => WireKind::Fixed64,
            Self::Bool => WireKind::Varint,
            Self::String | Self::Bytes => WireKind::LengthDelimited,
        }
    }

    /// Schema-language name of the type (e.g. `"double"`).
    pub fn name(self) -> &'static str {
        match self {
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Float => "float",
            Self::Double => "double",
            Self::Bool => "bool",
            Self::String => "string",
            Self::Bytes => "bytes",
        }
    }
}

/// Semantic type of a field.
///
/// Enum and message kinds refer to other registered types by their
/// fully-qualified name. Resolution happens when the registry is built.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// A scalar value.
    Scalar(ScalarType),
    /// A value of the named enum.
    Enum(String),
    /// A nested record of the named message type.
    Message(String),
    /// Zero or more elements of the inner kind. The inner kind is never
    /// itself `Repeated`.
    Repeated(Box<FieldKind>),
}

impl FieldKind {
    /// Shorthand for `FieldKind::Enum(name.into())`.
    pub fn enumeration(name: impl Into<String>) -> Self {
        Self::Enum(name.into())
    }

    /// Shorthand for `FieldKind::Message(name.into())`.
    pub fn message(name: impl Into<String>) -> Self {
        Self::Message(name.into())
    }

    /// Wrap `inner` as a repeated kind.
    pub fn repeated(inner: FieldKind) -> Self {
        Self::Repeated(Box::new(inner))
    }

    /// Returns `true` for repeated fields.
    pub fn is_repeated(&self) -> bool {
        matches!(self, Self::Repeated(_))
    }

    /// The kind of a single wire unit: the inner kind for repeated fields,
    /// `self` otherwise.
    pub fn element(&self) -> &FieldKind {
        match self {
            Self::Repeated(inner) => inner,
            other => other,
        }
    }

    /// Wire kind of a single unit of this field.
    pub fn wire_kind(&self) -> WireKind {
        match self {
            Self::Scalar(scalar) => scalar.wire_kind(),
            Self::Enum(_) => WireKind::Varint,
            Self::Message(_) => WireKind::LengthDelimited,
            Self::Repeated(inner) => inner.wire_kind(),
        }
    }

    /// The type name this kind refers to, if it is an enum or message kind
    /// (looking through `Repeated`).
    pub fn referenced_type(&self) -> Option<&str> {
        match self.element() {
            Self::Enum(name) | Self::Message(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(scalar) => f.write_str(scalar.name()),
            Self::Enum(name) => write!(f, "enum {name}"),
            Self::Message(name) => write!(f, "message {name}"),
            Self::Repeated(inner) => write!(f, "repeated {inner}"),
        }
    }
}
