//! The process-wide [`SchemaRegistry`].
//!
//! Built once from message and enum declarations, then read-only. All
//! lookups take `&self`, so a registry can be shared across threads
//! without locking.

use indexmap::IndexMap;
use vdx_core::{
    EnumDescriptor, FieldCatalog, FieldDescriptor, FieldKind, InterfaceVersion, MessageDescriptor,
    Record, ScalarType, SchemaError,
};

use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::error::CodecError;

/// Immutable mapping from fully-qualified type names to field catalogs and
/// enum descriptors.
///
/// # Examples
///
/// ```
/// use vdx_codec::SchemaRegistry;
/// use vdx_core::{FieldKind, MessageDescriptor, Record, ScalarType, Tag, Value};
///
/// let registry = SchemaRegistry::builder()
///     .message(
///         MessageDescriptor::new("vdx.Pedalry")
///             .field(1, "pedal_position_acceleration", FieldKind::Scalar(ScalarType::Double))
///             .field(2, "pedal_position_brake", FieldKind::Scalar(ScalarType::Double))
///             .field(3, "pedal_position_clutch", FieldKind::Scalar(ScalarType::Double)),
///     )
///     .build()
///     .unwrap();
///
/// let record = Record::new().with(Tag(1), 0.5).with(Tag(3), 0.0);
/// let bytes = registry.encode(&record, "vdx.Pedalry").unwrap();
/// let decoded = registry.decode(&bytes, "vdx.Pedalry").unwrap();
///
/// assert_eq!(decoded, record);
/// assert_eq!(decoded.get(Tag(2)), None);
/// assert_eq!(decoded.get(Tag(3)), Some(&Value::Double(0.0)));
/// ```
#[derive(Clone, Debug)]
pub struct SchemaRegistry {
    messages: IndexMap<String, FieldCatalog>,
    enums: IndexMap<String, EnumDescriptor>,
    interface_version: Option<InterfaceVersion>,
}

impl SchemaRegistry {
    /// Start assembling a registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder {
            messages: Vec::new(),
            enums: Vec::new(),
            interface_version: None,
        }
    }

    /// The catalog of a registered message type.
    pub fn catalog(&self, type_name: &str) -> Result<&FieldCatalog, CodecError> {
        self.messages
            .get(type_name)
            .ok_or_else(|| CodecError::UnknownType {
                name: type_name.to_string(),
            })
    }

    /// The ordered field list of a registered message type.
    pub fn fields(&self, type_name: &str) -> Result<&[FieldDescriptor], CodecError> {
        self.catalog(type_name).map(FieldCatalog::fields)
    }

    /// The descriptor of a registered enum.
    pub fn enumeration(&self, enum_name: &str) -> Result<&EnumDescriptor, CodecError> {
        self.enums
            .get(enum_name)
            .ok_or_else(|| CodecError::UnknownType {
                name: enum_name.to_string(),
            })
    }

    /// Returns `true` if `name` is a registered message or enum.
    pub fn contains(&self, name: &str) -> bool {
        self.messages.contains_key(name) || self.enums.contains_key(name)
    }

    /// Registered message names in registration order.
    pub fn message_names(&self) -> impl Iterator<Item = &str> {
        self.messages.keys().map(String::as_str)
    }

    /// Registered enum names in registration order.
    pub fn enum_names(&self) -> impl Iterator<Item = &str> {
        self.enums.keys().map(String::as_str)
    }

    /// The interface version the schema was compiled with, if declared.
    pub fn interface_version(&self) -> Option<InterfaceVersion> {
        self.interface_version
    }

    /// An encoder with the default configuration.
    pub fn encoder(&self) -> Encoder<'_> {
        Encoder::new(self)
    }

    /// A decoder with the default configuration.
    pub fn decoder(&self) -> Decoder<'_> {
        Decoder::new(self)
    }

    /// Encode `record` as `type_name` with the default configuration.
    pub fn encode(&self, record: &Record, type_name: &str) -> Result<Vec<u8>, CodecError> {
        self.encoder().encode(record, type_name)
    }

    /// Decode `bytes` as `type_name` with the default configuration.
    pub fn decode(&self, bytes: &[u8], type_name: &str) -> Result<Record, CodecError> {
        self.decoder().decode(bytes, type_name)
    }
}

/// Collects declarations for [`SchemaRegistry::builder()`].
#[derive(Clone, Debug)]
pub struct RegistryBuilder {
    messages: Vec<MessageDescriptor>,
    enums: Vec<EnumDescriptor>,
    interface_version: Option<InterfaceVersion>,
}

impl RegistryBuilder {
    /// Register a message declaration and everything nested in it.
    pub fn message(mut self, descriptor: MessageDescriptor) -> Self {
        self.messages.push(descriptor);
        self
    }

    /// Register a top-level enum declaration.
    pub fn enumeration(mut self, descriptor: EnumDescriptor) -> Self {
        self.enums.push(descriptor);
        self
    }

    /// Declare the interface version the schema is compiled at.
    pub fn interface_version(mut self, version: InterfaceVersion) -> Self {
        self.interface_version = Some(version);
        self
    }

    /// Flatten, validate and resolve every declaration.
    ///
    /// Fails on the first invalid declaration, duplicate registration with
    /// a different shape, name clash between a message and an enum, or
    /// unresolved type reference.
    pub fn build(self) -> Result<SchemaRegistry, SchemaError> {
        let mut messages = IndexMap::new();
        let mut enums = IndexMap::new();

        for declaration in &self.messages {
            let (flat_messages, flat_enums) = declaration.flatten();
            for message in &flat_messages {
                register_message(&mut messages, message)?;
            }
            for enumeration in flat_enums {
                register_enum(&mut enums, enumeration)?;
            }
        }
        for enumeration in self.enums {
            register_enum(&mut enums, enumeration)?;
        }

        if let Some(name) = messages.keys().find(|name| enums.contains_key(*name)) {
            return Err(SchemaError::SchemaConflict {
                type_name: name.clone(),
                detail: "name registered as both a message and an enum".to_string(),
            });
        }

        for catalog in messages.values() {
            resolve_references(catalog, &messages, &enums)?;
        }

        tracing::debug!(
            messages = messages.len(),
            enums = enums.len(),
            version = ?self.interface_version,
            "schema registry built"
        );

        Ok(SchemaRegistry {
            messages,
            enums,
            interface_version: self.interface_version,
        })
    }
}

fn register_message(
    messages: &mut IndexMap<String, FieldCatalog>,
    descriptor: &MessageDescriptor,
) -> Result<(), SchemaError> {
    let catalog = FieldCatalog::from_descriptor(descriptor)?;
    match messages.get(catalog.type_name()) {
        Some(existing) if existing.same_shape(&catalog) => {
            tracing::trace!(type_name = catalog.type_name(), "identical message re-registered");
            Ok(())
        }
        Some(_) => Err(SchemaError::SchemaConflict {
            type_name: catalog.type_name().to_string(),
            detail: "registered twice with different field sets".to_string(),
        }),
        None => {
            messages.insert(catalog.type_name().to_string(), catalog);
            Ok(())
        }
    }
}

fn register_enum(
    enums: &mut IndexMap<String, EnumDescriptor>,
    descriptor: EnumDescriptor,
) -> Result<(), SchemaError> {
    descriptor.validate()?;
    match enums.get(descriptor.name()) {
        Some(existing) if *existing == descriptor => Ok(()),
        Some(_) => Err(SchemaError::SchemaConflict {
            type_name: descriptor.name().to_string(),
            detail: "enum registered twice with different values".to_string(),
        }),
        None => {
            enums.insert(descriptor.name().to_string(), descriptor);
            Ok(())
        }
    }
}

fn resolve_references(
    catalog: &FieldCatalog,
    messages: &IndexMap<String, FieldCatalog>,
    enums: &IndexMap<String, EnumDescriptor>,
) -> Result<(), SchemaError> {
    for field in catalog.fields() {
        let resolved = match field.kind.element() {
            FieldKind::Message(name) => messages.contains_key(name),
            FieldKind::Enum(name) => enums.contains_key(name),
            _ => true,
        };
        if !resolved {
            let name = field.kind.referenced_type().unwrap_or_default();
            return Err(SchemaError::UnknownType {
                name: name.to_string(),
            });
        }
    }

    if let Some(tag) = catalog.version_field() {
        let major_is_u32 = catalog
            .field(tag)
            .and_then(|field| field.kind.referenced_type())
            .and_then(|name| messages.get(name))
            .and_then(|version| version.field(InterfaceVersion::MAJOR_TAG))
            .map(|major| major.kind == FieldKind::Scalar(ScalarType::Uint32))
            .unwrap_or(false);
        if !major_is_u32 {
            return Err(SchemaError::InvalidDescriptor {
                type_name: catalog.type_name().to_string(),
                detail: format!(
                    "version field {tag} must hold a message with a uint32 major at tag {}",
                    InterfaceVersion::MAJOR_TAG
                ),
            });
        }
    }
    Ok(())
}
