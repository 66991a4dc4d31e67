use std::collections::BTreeSet;

use vdx_codec::{CodecConfig, MessageReader, MessageWriter};
use vdx_core::{FieldKind, ScalarType};
use vdx_schema::host_vehicle;
use vdx_test_utils::sample_host_vehicle_data;

#[test]
fn every_referenced_type_is_registered() {
    let registry = vdx_schema::registry().unwrap();
    for name in registry.message_names() {
        for field in registry.fields(name).unwrap() {
            match field.kind.element() {
                FieldKind::Message(target) => {
                    assert!(registry.catalog(target).is_ok(), "{name}.{}", field.name)
                }
                FieldKind::Enum(target) => {
                    assert!(registry.enumeration(target).is_ok(), "{name}.{}", field.name)
                }
                FieldKind::Scalar(_) | FieldKind::Repeated(_) => {}
            }
        }
    }
}

#[test]
fn schema_uses_every_wire_kind_and_repetition() {
    let registry = vdx_schema::registry().unwrap();
    let mut wire_kinds = BTreeSet::new();
    let mut repeated = BTreeSet::new();
    for name in registry.message_names() {
        for field in registry.fields(name).unwrap() {
            wire_kinds.insert(field.kind.wire_kind().as_u8());
            if field.kind.is_repeated() {
                repeated.insert(match field.kind.element() {
                    FieldKind::Scalar(ScalarType::String) => "string",
                    FieldKind::Enum(_) => "enum",
                    FieldKind::Message(_) => "message",
                    _ => "other",
                });
            }
        }
    }
    assert_eq!(wire_kinds, BTreeSet::from([0, 1, 2, 3]));
    assert_eq!(repeated, BTreeSet::from(["enum", "message", "string"]));
}

#[test]
fn sample_streams_through_the_shared_registry() {
    let registry = vdx_schema::registry().unwrap();
    let sample = sample_host_vehicle_data();

    let mut writer = MessageWriter::with_config(
        Vec::new(),
        registry,
        host_vehicle::NAME,
        CodecConfig::default(),
    )
    .unwrap();
    for _ in 0..3 {
        writer.write(&sample).unwrap();
    }
    let buf = writer.into_inner();

    let records: Vec<_> = MessageReader::new(buf.as_slice(), registry, host_vehicle::NAME)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(records, vec![sample.clone(), sample.clone(), sample]);
}
