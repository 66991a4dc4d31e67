//! Record → bytes.

use vdx_core::{FieldCatalog, FieldKind, Record, ScalarType, Tag, UnknownField, Value, WireKind};

use crate::config::{CodecConfig, ConfigError};
use crate::error::CodecError;
use crate::registry::SchemaRegistry;
use crate::wire::{self, WireReader};

/// Serializes records against the catalogs of a [`SchemaRegistry`].
///
/// Encoding is a pure function of the record and the registry. Fields are
/// written in catalog declaration order; absent fields are skipped; each
/// element of a repeated field becomes its own unit, in order. Retained
/// unknown fields follow the known ones.
#[derive(Clone, Debug)]
pub struct Encoder<'r> {
    registry: &'r SchemaRegistry,
    config: CodecConfig,
}

impl<'r> Encoder<'r> {
    /// Create an encoder with the default configuration.
    pub fn new(registry: &'r SchemaRegistry) -> Self {
        Self {
            registry,
            config: CodecConfig::default(),
        }
    }

    /// Create an encoder with a validated configuration.
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

    /// Encode `record` as a message of type `type_name`.
    pub fn encode(&self, record: &Record, type_name: &str) -> Result<Vec<u8>, CodecError> {
        let mut buf = Vec::new();
        self.encode_into(record, type_name, &mut buf)?;
        Ok(buf)
    }

    /// Encode `record`, appending to `buf`.
    ///
    /// On error `buf` is left as it was before the call.
    pub fn encode_into(
        &self,
        record: &Record,
        type_name: &str,
        buf: &mut Vec<u8>,
    ) -> Result<(), CodecError> {
        let catalog = self.registry.catalog(type_name)?;
        let start = buf.len();
        let result = self.encode_message(record, catalog, buf, 0);
        if result.is_err() {
            buf.truncate(start);
        }
        result
    }

    fn encode_message(
        &self,
        record: &Record,
        catalog: &FieldCatalog,
        buf: &mut Vec<u8>,
        depth: usize,
    ) -> Result<(), CodecError> {
        if depth > self.config.max_depth {
            return Err(CodecError::RecursionLimit {
                limit: self.config.max_depth,
            });
        }

        if let Some((tag, value)) = record.iter().find(|(tag, _)| catalog.field(*tag).is_none()) {
            return Err(unencodable(
                catalog,
                tag,
                format!("{} value for a tag the type does not declare", value.type_name()),
            ));
        }

        for field in catalog.fields() {
            let Some(value) = record.get(field.tag) else {
                continue;
            };
            match (&field.kind, value) {
                (FieldKind::Repeated(inner), Value::Repeated(items)) => {
                    for item in items {
                        self.encode_unit(catalog, field.tag, inner, item, buf, depth)?;
                    }
                }
                (FieldKind::Repeated(_), other) => {
                    return Err(unencodable(
                        catalog,
                        field.tag,
                        format!("expected {}, found {}", field.kind, other.type_name()),
                    ));
                }
                (kind, value) => self.encode_unit(catalog, field.tag, kind, value, buf, depth)?,
            }
        }

        for unknown in record.unknown_fields() {
            encode_unknown(catalog, unknown, buf)?;
        }
        Ok(())
    }

    fn encode_unit(
        &self,
        catalog: &FieldCatalog,
        tag: Tag,
        kind: &FieldKind,
        value: &Value,
        buf: &mut Vec<u8>,
        depth: usize,
    ) -> Result<(), CodecError> {
        match (kind, value) {
            (FieldKind::Scalar(ScalarType::Int32), Value::Int32(v)) => {
                put_fixed(buf, tag, WireKind::Fixed32, &v.to_le_bytes())
            }
            (FieldKind::Scalar(ScalarType::Uint32), Value::Uint32(v)) => {
                put_fixed(buf, tag, WireKind::Fixed32, &v.to_le_bytes())
            }
            (FieldKind::Scalar(ScalarType::Float), Value::Float(v)) => {
                put_fixed(buf, tag, WireKind::Fixed32, &v.to_le_bytes())
            }
            (FieldKind::Scalar(ScalarType::Int64), Value::Int64(v)) => {
                put_fixed(buf, tag, WireKind::Fixed64, &v.to_le_bytes())
            }
            (FieldKind::Scalar(ScalarType::Uint64), Value::Uint64(v)) => {
                put_fixed(buf, tag, WireKind::Fixed64, &v.to_le_bytes())
            }
            (FieldKind::Scalar(ScalarType::Double), Value::Double(v)) => {
                put_fixed(buf, tag, WireKind::Fixed64, &v.to_le_bytes())
            }
            (FieldKind::Scalar(ScalarType::Bool), Value::Bool(v)) => {
                wire::write_unit_header(buf, tag, WireKind::Varint);
                wire::write_varint(buf, u64::from(*v));
            }
            (FieldKind::Scalar(ScalarType::String), Value::String(v)) => {
                put_length_delimited(buf, tag, v.as_bytes())
            }
            (FieldKind::Scalar(ScalarType::Bytes), Value::Bytes(v)) => {
                put_length_delimited(buf, tag, v)
            }
            (FieldKind::Enum(enum_name), Value::Enum(v)) => {
                let descriptor = self.registry.enumeration(enum_name)?;
                if !descriptor.contains(*v) {
                    return Err(unencodable(
                        catalog,
                        tag,
                        format!("{v} is not a declared value of {enum_name}"),
                    ));
                }
                wire::write_unit_header(buf, tag, WireKind::Varint);
                // Negative values are sign-extended to 64 bits.
                wire::write_varint(buf, i64::from(*v) as u64);
            }
            (FieldKind::Message(type_name), Value::Message(nested)) => {
                let nested_catalog = self.registry.catalog(type_name)?;
                let mut inner = Vec::new();
                self.encode_message(nested, nested_catalog, &mut inner, depth + 1)?;
                put_length_delimited(buf, tag, &inner);
            }
            (kind, value) => {
                return Err(unencodable(
                    catalog,
                    tag,
                    format!("expected {kind}, found {}", value.type_name()),
                ));
            }
        }
        Ok(())
    }
}

fn put_fixed(buf: &mut Vec<u8>, tag: Tag, kind: WireKind, bytes: &[u8]) {
    wire::write_unit_header(buf, tag, kind);
    buf.extend_from_slice(bytes);
}

fn put_length_delimited(buf: &mut Vec<u8>, tag: Tag, bytes: &[u8]) {
    wire::write_unit_header(buf, tag, WireKind::LengthDelimited);
    wire::write_length_prefixed(buf, bytes);
}

fn encode_unknown(
    catalog: &FieldCatalog,
    unknown: &UnknownField,
    buf: &mut Vec<u8>,
) -> Result<(), CodecError> {
    if catalog.field(unknown.tag).is_some() {
        return Err(unencodable(
            catalog,
            unknown.tag,
            "unknown field collides with a declared tag".to_string(),
        ));
    }
    let well_formed = match unknown.wire_kind {
        WireKind::Varint => {
            let mut reader = WireReader::new(&unknown.payload);
            reader.read_varint().is_ok() && reader.is_empty()
        }
        WireKind::Fixed32 => unknown.payload.len() == 4,
        WireKind::Fixed64 => unknown.payload.len() == 8,
        WireKind::LengthDelimited => true,
    };
    if !well_formed {
        return Err(unencodable(
            catalog,
            unknown.tag,
            format!("unknown {} payload of {} bytes", unknown.wire_kind, unknown.payload.len()),
        ));
    }

    wire::write_unit_header(buf, unknown.tag, unknown.wire_kind);
    match unknown.wire_kind {
        WireKind::LengthDelimited => wire::write_length_prefixed(buf, &unknown.payload),
        _ => buf.extend_from_slice(&unknown.payload),
    }
    Ok(())
}

fn unencodable(catalog: &FieldCatalog, tag: Tag, detail: String) -> CodecError {
    CodecError::UnencodableField {
        type_name: catalog.type_name().to_string(),
        tag,
        detail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vdx_core::{EnumDescriptor, MessageDescriptor};

    fn double() -> FieldKind {
        FieldKind::Scalar(ScalarType::Double)
    }

    fn registry() -> SchemaRegistry {
        SchemaRegistry::builder()
            .message(
                MessageDescriptor::new("t.Pedalry")
                    .field(1, "pedal_position_acceleration", double())
                    .field(2, "pedal_position_brake", double())
                    .field(3, "pedal_position_clutch", double()),
            )
            .message(
                MessageDescriptor::new("t.Mixed")
                    .field(1, "gear", FieldKind::Scalar(ScalarType::Int32))
                    .field(2, "odometer", FieldKind::Scalar(ScalarType::Uint64))
                    .field(3, "active", FieldKind::Scalar(ScalarType::Bool))
                    .field(4, "label", FieldKind::Scalar(ScalarType::String))
                    .field(5, "mode", FieldKind::enumeration("t.Mixed.Mode"))
                    .field(6, "pedals", FieldKind::message("t.Pedalry"))
                    .field(7, "samples", FieldKind::repeated(FieldKind::Scalar(ScalarType::Float)))
                    .enumeration(
                        EnumDescriptor::new("Mode")
                            .value("MODE_UNKNOWN", 0)
                            .value("MODE_OTHER", 1)
                            .value("MODE_REVERSE", -1),
                    ),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn pedalry_example_emits_two_units() {
        let registry = registry();
        let record = Record::new().with(Tag(1), 0.5).with(Tag(3), 0.0);
        let bytes = registry.encode(&record, "t.Pedalry").unwrap();

        let mut expected = vec![0x01, 0x02];
        expected.extend_from_slice(&0.5f64.to_le_bytes());
        expected.extend_from_slice(&[0x03, 0x02]);
        expected.extend_from_slice(&0.0f64.to_le_bytes());
        assert_eq!(bytes, expected);
    }

    #[test]
    fn empty_record_encodes_to_nothing() {
        let registry = registry();
        assert!(registry.encode(&Record::new(), "t.Pedalry").unwrap().is_empty());
    }

    #[test]
    fn fields_follow_declaration_order() {
        let registry = registry();
        let record = Record::new().with(Tag(4), "x").with(Tag(1), 2i32);
        let bytes = registry.encode(&record, "t.Mixed").unwrap();
        // tag 1 fixed32 first, then tag 4 length-delimited.
        assert_eq!(&bytes[..2], &[0x01, 0x01]);
        assert_eq!(&bytes[6..], &[0x04, 0x03, 0x01, b'x']);
    }

    #[test]
    fn repeated_elements_become_separate_units() {
        let registry = registry();
        let mut record = Record::new();
        for v in [1.0f32, 2.0, 3.0] {
            record.push(Tag(7), v);
        }
        let bytes = registry.encode(&record, "t.Mixed").unwrap();
        assert_eq!(bytes.len(), 3 * (2 + 4));
        for (i, chunk) in bytes.chunks(6).enumerate() {
            assert_eq!(&chunk[..2], &[0x07, 0x01]);
            assert_eq!(&chunk[2..], &(i as f32 + 1.0).to_le_bytes());
        }
    }

    #[test]
    fn negative_enum_is_sign_extended() {
        let registry = registry();
        let record = Record::new().with(Tag(5), Value::Enum(-1));
        let bytes = registry.encode(&record, "t.Mixed").unwrap();
        assert_eq!(bytes.len(), 2 + 10);
        assert_eq!(&bytes[..2], &[0x05, 0x00]);
    }

    #[test]
    fn value_kind_mismatch_is_unencodable() {
        let registry = registry();
        let record = Record::new().with(Tag(1), 0.5f32);
        let err = registry.encode(&record, "t.Pedalry").unwrap_err();
        assert!(matches!(
            err,
            CodecError::UnencodableField { tag: Tag(1), ref type_name, .. } if type_name == "t.Pedalry"
        ));
    }

    #[test]
    fn singular_value_in_repeated_field_is_unencodable() {
        let registry = registry();
        let record = Record::new().with(Tag(7), 1.0f32);
        assert!(matches!(
            registry.encode(&record, "t.Mixed"),
            Err(CodecError::UnencodableField { tag: Tag(7), .. })
        ));
    }

    #[test]
    fn undeclared_tag_is_unencodable() {
        let registry = registry();
        let record = Record::new().with(Tag(9), 1.0);
        assert!(matches!(
            registry.encode(&record, "t.Pedalry"),
            Err(CodecError::UnencodableField { tag: Tag(9), .. })
        ));
    }

    #[test]
    fn undeclared_enum_value_is_unencodable() {
        let registry = registry();
        let record = Record::new().with(Tag(5), Value::Enum(7));
        assert!(matches!(
            registry.encode(&record, "t.Mixed"),
            Err(CodecError::UnencodableField { tag: Tag(5), .. })
        ));
    }

    #[test]
    fn nested_error_leaves_buffer_untouched() {
        let registry = registry();
        let encoder = registry.encoder();
        let bad_pedals = Record::new().with(Tag(2), "not a double");
        let record = Record::new().with(Tag(1), 3i32).with(Tag(6), bad_pedals);

        let mut buf = vec![0xAA];
        assert!(encoder.encode_into(&record, "t.Mixed", &mut buf).is_err());
        assert_eq!(buf, vec![0xAA]);
    }

    #[test]
    fn unknown_type_is_reported() {
        let registry = registry();
        assert_eq!(
            registry.encode(&Record::new(), "t.Nope").unwrap_err(),
            CodecError::UnknownType { name: "t.Nope".into() }
        );
    }

    #[test]
    fn depth_limit_applies_to_nesting() {
        let registry = SchemaRegistry::builder()
            .message(
                MessageDescriptor::new("t.Node")
                    .field(1, "child", FieldKind::message("t.Node")),
            )
            .build()
            .unwrap();
        let config = CodecConfig {
            max_depth: 2,
            ..Default::default()
        };
        let encoder = Encoder::with_config(&registry, config).unwrap();

        let two_deep = Record::new().with(Tag(1), Record::new().with(Tag(1), Record::new()));
        assert!(encoder.encode(&two_deep, "t.Node").is_ok());

        let three_deep = Record::new().with(Tag(1), two_deep);
        assert_eq!(
            encoder.encode(&three_deep, "t.Node").unwrap_err(),
            CodecError::RecursionLimit { limit: 2 }
        );
    }

    #[test]
    fn malformed_unknown_field_is_unencodable() {
        let registry = registry();
        let mut record = Record::new();
        record.push_unknown(UnknownField {
            tag: Tag(40),
            wire_kind: WireKind::Fixed64,
            payload: vec![1, 2, 3],
        });
        assert!(matches!(
            registry.encode(&record, "t.Pedalry"),
            Err(CodecError::UnencodableField { tag: Tag(40), .. })
        ));

        let mut record = Record::new();
        record.push_unknown(UnknownField {
            tag: Tag(2),
            wire_kind: WireKind::Fixed64,
            payload: vec![0; 8],
        });
        assert!(matches!(
            registry.encode(&record, "t.Pedalry"),
            Err(CodecError::UnencodableField { tag: Tag(2), .. })
        ));
    }
}
