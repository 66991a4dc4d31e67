//! Bytes → Record.

use vdx_core::{
    FieldCatalog, FieldKind, InterfaceVersion, Record, ScalarType, Tag, UnknownField, Value,
    WireKind, ENUM_SENTINEL,
};

use crate::config::{CodecConfig, ConfigError, UnknownFieldPolicy, VersionPolicy};
use crate::error::CodecError;
use crate::registry::SchemaRegistry;
use crate::wire::WireReader;

/// Parses bytes into records against the catalogs of a [`SchemaRegistry`].
///
/// Units may arrive in any order. Units whose tag the catalog does not
/// declare are skipped using their wire kind and, under
/// [`UnknownFieldPolicy::Preserve`], kept on the record. A singular field
/// seen more than once keeps its last value; repeated fields accumulate.
#[derive(Clone, Debug)]
pub struct Decoder<'r> {
    registry: &'r SchemaRegistry,
    config: CodecConfig,
}

impl<'r> Decoder<'r> {
    /// Create a decoder with the default configuration.
    pub fn new(registry: &'r SchemaRegistry) -> Self {
        Self {
            registry,
            config: CodecConfig::default(),
        }
    }

    /// Create a decoder with a validated configuration.
    pub fn with_config(
        registry: &'r SchemaRegistry,
        config: CodecConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { registry, config })
    }

    /// The configuration in use.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Decode `bytes` as one complete message of type `type_name`.
    ///
    /// The whole input is consumed. A top-level message that carries the
    /// interface version field is checked against the registry's version
    /// under [`VersionPolicy::Reject`] before any other field is decoded,
    /// so a message from a newer major version fails with
    /// [`CodecError::IncompatibleVersion`] even when its fields no longer
    /// match this schema.
    pub fn decode(&self, bytes: &[u8], type_name: &str) -> Result<Record, CodecError> {
        let catalog = self.registry.catalog(type_name)?;
        self.check_version(bytes, catalog)?;
        self.decode_message(bytes, catalog, 0)
    }

    fn decode_message(
        &self,
        bytes: &[u8],
        catalog: &FieldCatalog,
        depth: usize,
    ) -> Result<Record, CodecError> {
        if depth > self.config.max_depth {
            return Err(CodecError::RecursionLimit {
                limit: self.config.max_depth,
            });
        }

        let mut reader = WireReader::new(bytes);
        let mut record = Record::new();
        while !reader.is_empty() {
            let (tag, wire_kind) = reader.read_unit_header()?;

            let Some(field) = catalog.field(tag) else {
                let payload = reader.read_payload(wire_kind)?;
                tracing::trace!(
                    type_name = catalog.type_name(),
                    %tag,
                    %wire_kind,
                    len = payload.len(),
                    "skipping unknown field"
                );
                if self.config.unknown_fields == UnknownFieldPolicy::Preserve {
                    record.push_unknown(UnknownField {
                        tag,
                        wire_kind,
                        payload: payload.to_vec(),
                    });
                }
                continue;
            };

            let expected = field.kind.wire_kind();
            if wire_kind != expected {
                return Err(CodecError::TypeMismatch {
                    type_name: catalog.type_name().to_string(),
                    tag,
                    expected,
                    found: wire_kind,
                });
            }

            match &field.kind {
                FieldKind::Repeated(inner) => {
                    let value = self.decode_element(&mut reader, catalog, tag, inner, depth)?;
                    record.push(tag, value);
                }
                kind => {
                    let value = self.decode_element(&mut reader, catalog, tag, kind, depth)?;
                    record.set(tag, value);
                }
            }
        }
        Ok(record)
    }

    fn decode_element(
        &self,
        reader: &mut WireReader<'_>,
        catalog: &FieldCatalog,
        tag: Tag,
        kind: &FieldKind,
        depth: usize,
    ) -> Result<Value, CodecError> {
        let value = match kind {
            FieldKind::Scalar(scalar) => match scalar {
                ScalarType::Int32 => Value::Int32(i32::from_le_bytes(reader.read_fixed32()?)),
                ScalarType::Uint32 => Value::Uint32(u32::from_le_bytes(reader.read_fixed32()?)),
                ScalarType::Float => Value::Float(f32::from_le_bytes(reader.read_fixed32()?)),
                ScalarType::Int64 => Value::Int64(i64::from_le_bytes(reader.read_fixed64()?)),
                ScalarType::Uint64 => Value::Uint64(u64::from_le_bytes(reader.read_fixed64()?)),
                ScalarType::Double => Value::Double(f64::from_le_bytes(reader.read_fixed64()?)),
                ScalarType::Bool => Value::Bool(reader.read_varint()? != 0),
                ScalarType::String => {
                    let bytes = reader.read_length_prefixed()?;
                    let text = std::str::from_utf8(bytes).map_err(|e| {
                        CodecError::MalformedInput {
                            detail: format!(
                                "{}: field {tag} is not valid UTF-8: {e}",
                                catalog.type_name()
                            ),
                        }
                    })?;
                    Value::String(text.to_string())
                }
                ScalarType::Bytes => Value::Bytes(reader.read_length_prefixed()?.to_vec()),
            },
            FieldKind::Enum(enum_name) => {
                let raw = reader.read_varint()?;
                let descriptor = self.registry.enumeration(enum_name)?;
                // Sign-extended negatives come back through i64.
                let resolved = i32::try_from(raw as i64)
                    .map(|v| descriptor.resolve(v))
                    .unwrap_or(ENUM_SENTINEL);
                if i64::from(resolved) != raw as i64 {
                    tracing::trace!(
                        enum_name = enum_name.as_str(),
                        raw,
                        "unknown enum value mapped to sentinel"
                    );
                }
                Value::Enum(resolved)
            }
            FieldKind::Message(type_name) => {
                let nested_catalog = self.registry.catalog(type_name)?;
                let bytes = reader.read_length_prefixed()?;
                Value::Message(self.decode_message(bytes, nested_catalog, depth + 1)?)
            }
            FieldKind::Repeated(_) => {
                return Err(CodecError::MalformedInput {
                    detail: format!(
                        "{}: field {tag} is a nested repeated field",
                        catalog.type_name()
                    ),
                });
            }
        };
        Ok(value)
    }

    fn check_version(&self, bytes: &[u8], catalog: &FieldCatalog) -> Result<(), CodecError> {
        if self.config.version_policy == VersionPolicy::Ignore {
            return Ok(());
        }
        let (Some(supported), Some(version_tag)) =
            (self.registry.interface_version(), catalog.version_field())
        else {
            return Ok(());
        };
        let Some(version) = self.peek_version(bytes, catalog, version_tag) else {
            return Ok(());
        };

        let part = |tag: Tag| version.get(tag).and_then(Value::as_u32).unwrap_or(0);
        let found = InterfaceVersion::new(
            part(InterfaceVersion::MAJOR_TAG),
            part(InterfaceVersion::MINOR_TAG),
            part(InterfaceVersion::PATCH_TAG),
        );
        if supported.accepts(&found) {
            return Ok(());
        }
        tracing::debug!(
            type_name = catalog.type_name(),
            %found,
            %supported,
            "rejecting message from a newer interface"
        );
        Err(CodecError::IncompatibleVersion { found, supported })
    }

    /// Scan the top-level units for the version field and decode only that
    /// unit. Returns `None` when the field is absent or unreadable; the full
    /// decode then reports any framing or type error.
    fn peek_version(
        &self,
        bytes: &[u8],
        catalog: &FieldCatalog,
        version_tag: Tag,
    ) -> Option<Record> {
        let FieldKind::Message(version_type) = &catalog.field(version_tag)?.kind else {
            return None;
        };

        let mut reader = WireReader::new(bytes);
        let mut payload = None;
        while !reader.is_empty() {
            let Ok((tag, wire_kind)) = reader.read_unit_header() else {
                break;
            };
            let Ok(unit) = reader.read_payload(wire_kind) else {
                break;
            };
            // Last occurrence wins, as in the full decode.
            if tag == version_tag && wire_kind == WireKind::LengthDelimited {
                payload = Some(unit);
            }
        }

        let version_catalog = self.registry.catalog(version_type).ok()?;
        self.decode_message(payload?, version_catalog, 1).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::Encoder;
    use crate::wire;
    use vdx_core::{EnumDescriptor, MessageDescriptor};

    fn double() -> FieldKind {
        FieldKind::Scalar(ScalarType::Double)
    }

    fn uint32() -> FieldKind {
        FieldKind::Scalar(ScalarType::Uint32)
    }

    fn registry() -> SchemaRegistry {
        SchemaRegistry::builder()
            .interface_version(InterfaceVersion::new(1, 2, 0))
            .message(
                MessageDescriptor::new("t.Version")
                    .field(1, "major", uint32())
                    .field(2, "minor", uint32())
                    .field(3, "patch", uint32()),
            )
            .message(
                MessageDescriptor::new("t.Pedalry")
                    .field(1, "pedal_position_acceleration", double())
                    .field(2, "pedal_position_brake", double())
                    .field(3, "pedal_position_clutch", double()),
            )
            .message(
                MessageDescriptor::new("t.Frame")
                    .field(1, "version", FieldKind::message("t.Version"))
                    .field(2, "label", FieldKind::Scalar(ScalarType::String))
                    .field(3, "state", FieldKind::enumeration("t.Frame.State"))
                    .field(4, "pedals", FieldKind::message("t.Pedalry"))
                    .field(5, "ids", FieldKind::repeated(FieldKind::Scalar(ScalarType::Int64)))
                    .field(6, "ok", FieldKind::Scalar(ScalarType::Bool))
                    .version_field(1)
                    .enumeration(
                        EnumDescriptor::new("State")
                            .value("STATE_UNKNOWN", 0)
                            .value("STATE_OTHER", 1)
                            .value("STATE_ACTIVE", 2)
                            .value("STATE_FAULT", -3),
                    ),
            )
            .build()
            .unwrap()
    }

    fn version(major: u32, minor: u32) -> Record {
        Record::new()
            .with(InterfaceVersion::MAJOR_TAG, major)
            .with(InterfaceVersion::MINOR_TAG, minor)
    }

    #[test]
    fn empty_input_is_empty_record() {
        let registry = registry();
        let record = registry.decode(&[], "t.Pedalry").unwrap();
        assert!(record.is_empty());
        assert!(record.unknown_fields().is_empty());
    }

    #[test]
    fn roundtrip_mixed_record() {
        let registry = registry();
        let mut record = Record::new()
            .with(Tag(1), version(1, 0))
            .with(Tag(2), "front left")
            .with(Tag(3), Value::Enum(-3))
            .with(Tag(4), Record::new().with(Tag(2), 1.0))
            .with(Tag(6), false);
        record.push(Tag(5), 7i64);
        record.push(Tag(5), -7i64);

        let bytes = registry.encode(&record, "t.Frame").unwrap();
        assert_eq!(registry.decode(&bytes, "t.Frame").unwrap(), record);
    }

    #[test]
    fn units_in_any_order_are_accepted() {
        let mut bytes = Vec::new();
        wire::write_unit_header(&mut bytes, Tag(3), WireKind::Fixed64);
        bytes.extend_from_slice(&0.25f64.to_le_bytes());
        wire::write_unit_header(&mut bytes, Tag(1), WireKind::Fixed64);
        bytes.extend_from_slice(&0.75f64.to_le_bytes());

        let registry = registry();
        let record = registry.decode(&bytes, "t.Pedalry").unwrap();
        assert_eq!(record.get(Tag(1)), Some(&Value::Double(0.75)));
        assert_eq!(record.get(Tag(3)), Some(&Value::Double(0.25)));
    }

    #[test]
    fn last_singular_value_wins() {
        let mut bytes = Vec::new();
        for v in [1.0f64, 2.0] {
            wire::write_unit_header(&mut bytes, Tag(2), WireKind::Fixed64);
            bytes.extend_from_slice(&v.to_le_bytes());
        }
        let registry = registry();
        let record = registry.decode(&bytes, "t.Pedalry").unwrap();
        assert_eq!(record.get(Tag(2)), Some(&Value::Double(2.0)));
    }

    #[test]
    fn unknown_fields_preserved_and_reemitted() {
        let registry = registry();
        let mut bytes = registry
            .encode(&Record::new().with(Tag(1), 0.5), "t.Pedalry")
            .unwrap();
        wire::write_unit_header(&mut bytes, Tag(99), WireKind::LengthDelimited);
        wire::write_length_prefixed(&mut bytes, b"future");

        let record = registry.decode(&bytes, "t.Pedalry").unwrap();
        assert_eq!(record.len(), 1);
        assert_eq!(
            record.unknown_fields(),
            &[UnknownField {
                tag: Tag(99),
                wire_kind: WireKind::LengthDelimited,
                payload: b"future".to_vec(),
            }]
        );
        assert_eq!(registry.encode(&record, "t.Pedalry").unwrap(), bytes);
    }

    #[test]
    fn unknown_fields_dropped_on_request() {
        let registry = registry();
        let mut bytes = Vec::new();
        wire::write_unit_header(&mut bytes, Tag(50), WireKind::Varint);
        wire::write_varint(&mut bytes, 12345);
        wire::write_unit_header(&mut bytes, Tag(51), WireKind::Fixed32);
        bytes.extend_from_slice(&[0; 4]);

        let config = CodecConfig {
            unknown_fields: UnknownFieldPolicy::Drop,
            ..Default::default()
        };
        let decoder = Decoder::with_config(&registry, config).unwrap();
        let record = decoder.decode(&bytes, "t.Pedalry").unwrap();
        assert!(record.is_empty());
        assert!(record.unknown_fields().is_empty());
    }

    #[test]
    fn unknown_enum_value_becomes_sentinel() {
        let mut bytes = Vec::new();
        wire::write_unit_header(&mut bytes, Tag(3), WireKind::Varint);
        wire::write_varint(&mut bytes, 42);
        let registry = registry();
        let record = registry.decode(&bytes, "t.Frame").unwrap();
        assert_eq!(record.get(Tag(3)), Some(&Value::Enum(ENUM_SENTINEL)));

        // Out of i32 range.
        let mut bytes = Vec::new();
        wire::write_unit_header(&mut bytes, Tag(3), WireKind::Varint);
        wire::write_varint(&mut bytes, u64::from(u32::MAX) + 10);
        let record = registry.decode(&bytes, "t.Frame").unwrap();
        assert_eq!(record.get(Tag(3)), Some(&Value::Enum(ENUM_SENTINEL)));
    }

    #[test]
    fn wire_kind_mismatch_is_reported() {
        let mut bytes = Vec::new();
        wire::write_unit_header(&mut bytes, Tag(1), WireKind::Fixed32);
        bytes.extend_from_slice(&[0; 4]);
        let registry = registry();
        assert_eq!(
            registry.decode(&bytes, "t.Pedalry").unwrap_err(),
            CodecError::TypeMismatch {
                type_name: "t.Pedalry".into(),
                tag: Tag(1),
                expected: WireKind::Fixed64,
                found: WireKind::Fixed32,
            }
        );
    }

    #[test]
    fn invalid_utf8_is_malformed() {
        let mut bytes = Vec::new();
        wire::write_unit_header(&mut bytes, Tag(2), WireKind::LengthDelimited);
        wire::write_length_prefixed(&mut bytes, &[0xFF, 0xFE]);
        let registry = registry();
        assert!(matches!(
            registry.decode(&bytes, "t.Frame"),
            Err(CodecError::MalformedInput { .. })
        ));
    }

    #[test]
    fn nonzero_bool_is_true() {
        let mut bytes = Vec::new();
        wire::write_unit_header(&mut bytes, Tag(6), WireKind::Varint);
        wire::write_varint(&mut bytes, 5);
        let registry = registry();
        let record = registry.decode(&bytes, "t.Frame").unwrap();
        assert_eq!(record.get(Tag(6)), Some(&Value::Bool(true)));
    }

    #[test]
    fn truncation_inside_a_unit_is_detected() {
        let registry = registry();
        let record = Record::new().with(Tag(1), 0.5).with(Tag(3), 0.0);
        let bytes = registry.encode(&record, "t.Pedalry").unwrap();
        // Units are 10 bytes each; only 0, 10 and 20 are boundaries.
        for cut in (1..bytes.len()).filter(|cut| cut % 10 != 0) {
            assert!(
                matches!(
                    registry.decode(&bytes[..cut], "t.Pedalry"),
                    Err(CodecError::TruncatedInput { .. })
                ),
                "cut at {cut}"
            );
        }
        let prefix = registry.decode(&bytes[..10], "t.Pedalry").unwrap();
        assert_eq!(prefix, Record::new().with(Tag(1), 0.5));
    }

    #[test]
    fn newer_major_version_is_rejected() {
        let registry = registry();
        let record = Record::new().with(Tag(1), version(2, 0));
        let bytes = registry.encode(&record, "t.Frame").unwrap();
        assert_eq!(
            registry.decode(&bytes, "t.Frame").unwrap_err(),
            CodecError::IncompatibleVersion {
                found: InterfaceVersion::new(2, 0, 0),
                supported: InterfaceVersion::new(1, 2, 0),
            }
        );

        let config = CodecConfig {
            version_policy: VersionPolicy::Ignore,
            ..Default::default()
        };
        let decoder = Decoder::with_config(&registry, config).unwrap();
        assert_eq!(decoder.decode(&bytes, "t.Frame").unwrap(), record);
    }

    #[test]
    fn newer_major_is_rejected_before_field_kinds_are_checked() {
        let registry = registry();
        let mut bytes = Vec::new();
        // A later major version turned `label` into a varint.
        wire::write_unit_header(&mut bytes, Tag(2), WireKind::Varint);
        wire::write_varint(&mut bytes, 42);
        let version_bytes = registry.encode(&version(3, 1), "t.Version").unwrap();
        wire::write_unit_header(&mut bytes, Tag(1), WireKind::LengthDelimited);
        wire::write_length_prefixed(&mut bytes, &version_bytes);

        assert_eq!(
            registry.decode(&bytes, "t.Frame").unwrap_err(),
            CodecError::IncompatibleVersion {
                found: InterfaceVersion::new(3, 1, 0),
                supported: InterfaceVersion::new(1, 2, 0),
            }
        );

        let config = CodecConfig {
            version_policy: VersionPolicy::Ignore,
            ..Default::default()
        };
        let decoder = Decoder::with_config(&registry, config).unwrap();
        assert!(matches!(
            decoder.decode(&bytes, "t.Frame"),
            Err(CodecError::TypeMismatch { tag: Tag(2), .. })
        ));
    }

    #[test]
    fn older_or_equal_major_is_accepted() {
        let registry = registry();
        for (major, minor) in [(0, 9), (1, 0), (1, 7)] {
            let record = Record::new().with(Tag(1), version(major, minor));
            let bytes = registry.encode(&record, "t.Frame").unwrap();
            assert_eq!(registry.decode(&bytes, "t.Frame").unwrap(), record);
        }
    }

    #[test]
    fn nesting_beyond_limit_is_rejected() {
        let registry = SchemaRegistry::builder()
            .message(
                MessageDescriptor::new("t.Node")
                    .field(1, "child", FieldKind::message("t.Node")),
            )
            .build()
            .unwrap();

        let mut record = Record::new();
        for _ in 0..4 {
            record = Record::new().with(Tag(1), record);
        }
        let bytes = Encoder::new(&registry).encode(&record, "t.Node").unwrap();

        let config = CodecConfig {
            max_depth: 3,
            ..Default::default()
        };
        let decoder = Decoder::with_config(&registry, config.clone()).unwrap();
        assert_eq!(
            decoder.decode(&bytes, "t.Node").unwrap_err(),
            CodecError::RecursionLimit { limit: 3 }
        );

        let config = CodecConfig {
            max_depth: 4,
            ..config
        };
        let decoder = Decoder::with_config(&registry, config).unwrap();
        assert_eq!(decoder.decode(&bytes, "t.Node").unwrap(), record);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let registry = registry();
        let config = CodecConfig {
            max_depth: 0,
            ..Default::default()
        };
        assert_eq!(
            Decoder::with_config(&registry, config).unwrap_err(),
            ConfigError::ZeroMaxDepth
        );
    }
}
