//! The per-type [`FieldCatalog`].

use indexmap::IndexMap;

use crate::descriptor::{FieldDescriptor, MessageDescriptor};
use crate::error::SchemaError;
use crate::kind::FieldKind;
use crate::tag::Tag;

/// Immutable, validated description of one message type's fields.
///
/// Built once from a flattened [`MessageDescriptor`]. Construction rejects
/// tag 0, nested repeated kinds, duplicate tags and duplicate field names.
/// Fields keep their declaration order, which is the order the encoder
/// emits them in.
#[derive(Clone, Debug)]
pub struct FieldCatalog {
    type_name: String,
    fields: Vec<FieldDescriptor>,
    by_tag: IndexMap<Tag, usize>,
    by_name: IndexMap<String, usize>,
    version_field: Option<Tag>,
}

impl FieldCatalog {
    /// Validate `fields` and build the catalog for `type_name`.
    pub fn new(
        type_name: impl Into<String>,
        fields: Vec<FieldDescriptor>,
        version_field: Option<Tag>,
    ) -> Result<Self, SchemaError> {
        let type_name = type_name.into();
        let mut by_tag = IndexMap::with_capacity(fields.len());
        let mut by_name = IndexMap::with_capacity(fields.len());

        for (idx, field) in fields.iter().enumerate() {
            if !field.tag.is_valid() {
                return Err(SchemaError::InvalidDescriptor {
                    type_name,
                    detail: format!("field '{}' uses reserved tag 0", field.name),
                });
            }
            if let FieldKind::Repeated(inner) = &field.kind {
                if inner.is_repeated() {
                    return Err(SchemaError::InvalidDescriptor {
                        type_name,
                        detail: format!("field '{}' nests repeated kinds", field.name),
                    });
                }
            }
            if let Some(&prev) = by_tag.get(&field.tag) {
                let prev: &FieldDescriptor = &fields[prev];
                return Err(SchemaError::SchemaConflict {
                    type_name,
                    detail: format!(
                        "tag {} used by both '{}' and '{}'",
                        field.tag, prev.name, field.name
                    ),
                });
            }
            if by_name.contains_key(&field.name) {
                return Err(SchemaError::SchemaConflict {
                    type_name,
                    detail: format!("field name '{}' declared twice", field.name),
                });
            }
            by_tag.insert(field.tag, idx);
            by_name.insert(field.name.clone(), idx);
        }

        if let Some(tag) = version_field {
            let valid = by_tag
                .get(&tag)
                .map(|&idx| matches!(fields[idx].kind, FieldKind::Message(_)))
                .unwrap_or(false);
            if !valid {
                return Err(SchemaError::InvalidDescriptor {
                    type_name,
                    detail: format!("version field {tag} is not a singular message field"),
                });
            }
        }

        Ok(Self {
            type_name,
            fields,
            by_tag,
            by_name,
            version_field,
        })
    }

    /// Build the catalog of a flattened message declaration.
    pub fn from_descriptor(descriptor: &MessageDescriptor) -> Result<Self, SchemaError> {
        Self::new(
            descriptor.name(),
            descriptor.fields().to_vec(),
            descriptor.version_tag(),
        )
    }

    /// Fully-qualified name of the message type.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Field descriptors in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Look up a field by tag.
    pub fn field(&self, tag: Tag) -> Option<&FieldDescriptor> {
        self.by_tag.get(&tag).map(|&idx| &self.fields[idx])
    }

    /// Look up a field by name.
    pub fn field_by_name(&self, name: &str) -> Option<&FieldDescriptor> {
        self.by_name.get(name).map(|&idx| &self.fields[idx])
    }

    /// Tag of the named field.
    pub fn tag_of(&self, name: &str) -> Option<Tag> {
        self.field_by_name(name).map(|f| f.tag)
    }

    /// Tag of the field carrying the interface version, if any.
    pub fn version_field(&self) -> Option<Tag> {
        self.version_field
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the type declares no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns `true` if `other` declares exactly the same fields (same
    /// tags, names and kinds, in any order) and the same version field.
    pub fn same_shape(&self, other: &FieldCatalog) -> bool {
        self.fields.len() == other.fields.len()
            && self.version_field == other.version_field
            && self
                .fields
                .iter()
                .all(|f| other.field(f.tag) == Some(f))
    }
}
