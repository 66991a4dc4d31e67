//! Benchmark profiles for the vdx codec.
//!
//! The schema's own messages are small. These profiles build synthetic
//! types that stress one dimension at a time:
//!
//! - [`wide_profile`]: one message with many scalar fields
//! - [`deep_profile`]: a chain of nested messages
//! - [`framed_stream`]: many length-prefixed messages back to back

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use vdx_codec::{MessageWriter, SchemaRegistry, StreamError};
use vdx_core::{FieldKind, MessageDescriptor, Record, ScalarType, SchemaError, Tag};

/// Type name used by [`wide_profile`].
pub const WIDE: &str = "bench.Wide";
/// Type name used by [`deep_profile`].
pub const NODE: &str = "bench.Node";

/// A registry holding `bench.Wide` with `fields` double fields, and a
/// record with every field set.
pub fn wide_profile(fields: u32) -> Result<(SchemaRegistry, Record), SchemaError> {
    let mut descriptor = MessageDescriptor::new(WIDE);
    let mut record = Record::new();
    for tag in 1..=fields {
        descriptor = descriptor.field(
            tag,
            format!("f{tag}"),
            FieldKind::Scalar(ScalarType::Double),
        );
        record.set(Tag(tag), f64::from(tag) * 0.5);
    }
    let registry = SchemaRegistry::builder().message(descriptor).build()?;
    Ok((registry, record))
}

/// A registry holding the self-referential `bench.Node`, and a record
/// nested `depth` levels below the top.
pub fn deep_profile(depth: usize) -> Result<(SchemaRegistry, Record), SchemaError> {
    let registry = SchemaRegistry::builder()
        .message(
            MessageDescriptor::new(NODE)
                .field(1, "child", FieldKind::message(NODE))
                .field(2, "payload", FieldKind::Scalar(ScalarType::Uint64)),
        )
        .build()?;
    let mut record = Record::new().with(Tag(2), 0u64);
    for level in 1..=depth {
        record = Record::new()
            .with(Tag(1), record)
            .with(Tag(2), level as u64);
    }
    Ok((registry, record))
}

/// Frame `count` copies of `record` as `type_name` into one buffer.
pub fn framed_stream(
    registry: &SchemaRegistry,
    type_name: &str,
    record: &Record,
    count: usize,
) -> Result<Vec<u8>, StreamError> {
    let mut writer = MessageWriter::new(Vec::new(), registry, type_name)?;
    for _ in 0..count {
        writer.write(record)?;
    }
    Ok(writer.into_inner())
}
