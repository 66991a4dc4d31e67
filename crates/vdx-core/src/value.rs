//! Dynamic record trees: [`Value`], [`Record`] and [`UnknownField`].

use indexmap::IndexMap;

use crate::kind::{FieldKind, ScalarType, WireKind};
use crate::tag::Tag;

/// A single field value.
///
/// Enum values carry their raw integer. Repeated fields hold a
/// `Repeated` whose elements are never themselves `Repeated`.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// `int32` value.
    Int32(i32),
    /// `int64` value.
    Int64(i64),
    /// `uint32` value.
    Uint32(u32),
    /// `uint64` value.
    Uint64(u64),
    /// `float` value.
    Float(f32),
    /// `double` value.
    Double(f64),
    /// `bool` value.
    Bool(bool),
    /// `string` value.
    String(String),
    /// `bytes` value.
    Bytes(Vec<u8>),
    /// Enum value as its declared integer.
    Enum(i32),
    /// Nested message.
    Message(Record),
    /// Elements of a repeated field, in order.
    Repeated(Vec<Value>),
}

impl Value {
    /// Short name of the value's runtime type, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Int32(_) => "int32",
            Self::Int64(_) => "int64",
            Self::Uint32(_) => "uint32",
            Self::Uint64(_) => "uint64",
            Self::Float(_) => "float",
            Self::Double(_) => "double",
            Self::Bool(_) => "bool",
            Self::String(_) => "string",
            Self::Bytes(_) => "bytes",
            Self::Enum(_) => "enum",
            Self::Message(_) => "message",
            Self::Repeated(_) => "repeated",
        }
    }

    /// Returns `true` if this value can be a single element of `kind`
    /// (looking through `Repeated` on the kind side).
    pub fn matches_element(&self, kind: &FieldKind) -> bool {
        match (kind.element(), self) {
            (FieldKind::Scalar(scalar), value) => value.matches_scalar(*scalar),
            (FieldKind::Enum(_), Self::Enum(_)) => true,
            (FieldKind::Message(_), Self::Message(_)) => true,
            _ => false,
        }
    }

    fn matches_scalar(&self, scalar: ScalarType) -> bool {
        matches!(
            (scalar, self),
            (ScalarType::Int32, Self::Int32(_))
                | (ScalarType::Int64, Self::Int64(_))
                | (ScalarType::Uint32, Self::Uint32(_))
                | (ScalarType::Uint64, Self::Uint64(_))
                | (ScalarType::Float, Self::Float(_))
                | (ScalarType::Double, Self::Double(_))
                | (ScalarType::Bool, Self::Bool(_))
                | (ScalarType::String, Self::String(_))
                | (ScalarType::Bytes, Self::Bytes(_))
        )
    }

    /// The `int32` payload, if this is an `Int32`.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Int32(v) => Some(*v),
            _ => None,
        }
    }

    /// The `int64` payload, if this is an `Int64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int64(v) => Some(*v),
            _ => None,
        }
    }

    /// The `uint32` payload, if this is a `Uint32`.
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Self::Uint32(v) => Some(*v),
            _ => None,
        }
    }

    /// The `uint64` payload, if this is a `Uint64`.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Uint64(v) => Some(*v),
            _ => None,
        }
    }

    /// The `float` payload, if this is a `Float`.
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// The `double` payload, if this is a `Double`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// The `bool` payload, if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// The string payload, if this is a `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    /// The byte payload, if this is `Bytes`.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(v) => Some(v),
            _ => None,
        }
    }

    /// The enum integer, if this is an `Enum`.
    pub fn as_enum(&self) -> Option<i32> {
        match self {
            Self::Enum(v) => Some(*v),
            _ => None,
        }
    }

    /// The nested record, if this is a `Message`.
    pub fn as_message(&self) -> Option<&Record> {
        match self {
            Self::Message(v) => Some(v),
            _ => None,
        }
    }

    /// The elements, if this is `Repeated`.
    pub fn as_repeated(&self) -> Option<&[Value]> {
        match self {
            Self::Repeated(v) => Some(v),
            _ => None,
        }
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::$variant(v)
                }
            }
        )*
    };
}

impl_from! {
    i32 => Int32,
    i64 => Int64,
    u32 => Uint32,
    u64 => Uint64,
    f32 => Float,
    f64 => Double,
    bool => Bool,
    String => String,
    Vec<u8> => Bytes,
    Record => Message,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

/// A field the decoder met but the type's catalog does not declare.
///
/// `payload` holds the unit's payload exactly as read, without the tag and
/// wire-kind prefix. For length-delimited units it excludes the length
/// prefix as well.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownField {
    /// The unit's tag.
    pub tag: Tag,
    /// The unit's wire kind.
    pub wire_kind: WireKind,
    /// Raw payload bytes.
    pub payload: Vec<u8>,
}

/// An in-memory message: present fields keyed by tag, plus any retained
/// unknown fields.
///
/// A field that was never set is absent, which is distinct from a field
/// set to its default value. A repeated field with zero elements cannot be
/// told apart from an absent one on the wire, so setting an empty
/// `Repeated` removes the field instead.
///
/// Equality compares present fields as a map (insertion order does not
/// matter) and unknown fields as an ordered list.
///
/// # Examples
///
/// ```
/// use vdx_core::{Record, Tag, Value};
///
/// let pedalry = Record::new()
///     .with(Tag(1), 0.5)
///     .with(Tag(3), 0.0);
///
/// assert_eq!(pedalry.get(Tag(1)), Some(&Value::Double(0.5)));
/// assert!(!pedalry.contains(Tag(2)));
/// assert_eq!(pedalry.len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    fields: IndexMap<Tag, Value>,
    unknown: Vec<UnknownField>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, tag: Tag, value: impl Into<Value>) -> Self {
        self.set(tag, value);
        self
    }

    /// Set a field, returning the previous value.
    pub fn set(&mut self, tag: Tag, value: impl Into<Value>) -> Option<Value> {
        match value.into() {
            Value::Repeated(items) if items.is_empty() => self.fields.shift_remove(&tag),
            value => self.fields.insert(tag, value),
        }
    }

    /// Append one element to a repeated field.
    ///
    /// An absent field becomes a one-element `Repeated`. A field holding a
    /// singular value is replaced.
    pub fn push(&mut self, tag: Tag, value: impl Into<Value>) {
        let value = value.into();
        match self.fields.get_mut(&tag) {
            Some(Value::Repeated(items)) => items.push(value),
            _ => {
                self.fields.insert(tag, Value::Repeated(vec![value]));
            }
        }
    }

    /// Remove a field, returning its value.
    pub fn remove(&mut self, tag: Tag) -> Option<Value> {
        self.fields.shift_remove(&tag)
    }

    /// The value of a present field.
    pub fn get(&self, tag: Tag) -> Option<&Value> {
        self.fields.get(&tag)
    }

    /// Mutable access to a present field.
    pub fn get_mut(&mut self, tag: Tag) -> Option<&mut Value> {
        self.fields.get_mut(&tag)
    }

    /// Returns `true` if the field is present.
    pub fn contains(&self, tag: Tag) -> bool {
        self.fields.contains_key(&tag)
    }

    /// The elements of a repeated field, empty if absent or not repeated.
    pub fn repeated(&self, tag: Tag) -> &[Value] {
        self.get(tag).and_then(Value::as_repeated).unwrap_or(&[])
    }

    /// The nested record of a message field.
    pub fn message(&self, tag: Tag) -> Option<&Record> {
        self.get(tag).and_then(Value::as_message)
    }

    /// Number of present fields (unknown fields excluded).
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if no field is present and no unknown field is held.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.unknown.is_empty()
    }

    /// Present fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Tag, &Value)> {
        self.fields.iter().map(|(tag, value)| (*tag, value))
    }

    /// Retained unknown fields in arrival order.
    pub fn unknown_fields(&self) -> &[UnknownField] {
        &self.unknown
    }

    /// Retain an unknown field.
    pub fn push_unknown(&mut self, field: UnknownField) {
        self.unknown.push(field);
    }

    /// Drop all retained unknown fields.
    pub fn clear_unknown(&mut self) {
        self.unknown.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn push_appends_in_order(values in proptest::collection::vec(any::<i64>(), 1..32)) {
            let mut r = Record::new();
            for v in &values {
                r.push(Tag(3), *v);
            }
            let got: Vec<i64> = r.repeated(Tag(3)).iter().filter_map(Value::as_i64).collect();
            prop_assert_eq!(got, values);
            prop_assert_eq!(r.len(), 1);
        }

        #[test]
        fn equality_is_order_independent(tags in proptest::collection::btree_set(1u32..64, 0..16)) {
            let forward = tags.iter().fold(Record::new(), |r, t| r.with(Tag(*t), *t));
            let backward = tags.iter().rev().fold(Record::new(), |r, t| r.with(Tag(*t), *t));
            prop_assert_eq!(forward, backward);
        }
    }

    #[test]
    fn absent_differs_from_default() {
        let mut a = Record::new();
        let b = Record::new().with(Tag(2), 0.0);
        assert_ne!(a, b);
        a.set(Tag(2), 0.0);
        assert_eq!(a, b);
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let a = Record::new().with(Tag(1), 1u32).with(Tag(2), "x");
        let b = Record::new().with(Tag(2), "x").with(Tag(1), 1u32);
        assert_eq!(a, b);
    }

    #[test]
    fn push_keeps_order() {
        let mut r = Record::new();
        r.push(Tag(5), 3u32);
        r.push(Tag(5), 1u32);
        r.push(Tag(5), 2u32);
        let got: Vec<u32> = r.repeated(Tag(5)).iter().filter_map(Value::as_u32).collect();
        assert_eq!(got, vec![3, 1, 2]);
    }

    #[test]
    fn empty_repeated_is_absent() {
        let mut r = Record::new().with(Tag(1), Value::Repeated(vec![Value::Int32(1)]));
        assert!(r.contains(Tag(1)));
        r.set(Tag(1), Value::Repeated(Vec::new()));
        assert!(!r.contains(Tag(1)));
        assert!(r.repeated(Tag(1)).is_empty());
    }

    #[test]
    fn unknown_fields_take_part_in_equality() {
        let a = Record::new().with(Tag(1), true);
        let mut b = a.clone();
        b.push_unknown(UnknownField {
            tag: Tag(99),
            wire_kind: WireKind::Varint,
            payload: vec![1],
        });
        assert_ne!(a, b);
        assert!(!b.is_empty());
        b.clear_unknown();
        assert_eq!(a, b);
    }

    #[test]
    fn values_match_declared_kinds() {
        let double = FieldKind::Scalar(ScalarType::Double);
        assert!(Value::Double(1.0).matches_element(&double));
        assert!(!Value::Float(1.0).matches_element(&double));
        assert!(Value::Enum(2).matches_element(&FieldKind::enumeration("E")));
        assert!(Value::Message(Record::new())
            .matches_element(&FieldKind::repeated(FieldKind::message("M"))));
        assert!(!Value::Repeated(vec![]).matches_element(&FieldKind::message("M")));
    }
}
