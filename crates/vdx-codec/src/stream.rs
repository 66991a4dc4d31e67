//! Length-prefixed message streams.
//!
//! A single encoded message carries no length, so a cut that lands on a
//! unit boundary still parses. On a byte stream each message is framed
//! as `varint length | message bytes`, which makes every truncation
//! detectable and lets many messages share one connection or file.

use std::io::{ErrorKind, Read, Write};

use vdx_core::Record;

use crate::config::CodecConfig;
use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::error::{CodecError, StreamError};
use crate::registry::SchemaRegistry;
use crate::wire::{self, MAX_VARINT_LEN};

/// Writes framed messages of one type to a byte sink.
///
/// Generic over `W: Write` so tests can use `Vec<u8>` and production
/// code can use `BufWriter<File>` or a socket.
///
/// # Examples
///
/// ```
/// use vdx_codec::{MessageReader, MessageWriter, SchemaRegistry};
/// use vdx_core::{FieldKind, MessageDescriptor, Record, ScalarType, Tag};
///
/// let registry = SchemaRegistry::builder()
///     .message(
///         MessageDescriptor::new("vdx.Pedalry")
///             .field(1, "pedal_position_acceleration", FieldKind::Scalar(ScalarType::Double)),
///     )
///     .build()
///     .unwrap();
///
/// let mut buf = Vec::new();
/// let mut writer = MessageWriter::new(&mut buf, &registry, "vdx.Pedalry").unwrap();
/// for step in 0..3 {
///     writer.write(&Record::new().with(Tag(1), f64::from(step) / 2.0)).unwrap();
/// }
/// assert_eq!(writer.messages_written(), 3);
/// drop(writer);
///
/// let reader = MessageReader::new(buf.as_slice(), &registry, "vdx.Pedalry").unwrap();
/// let records: Vec<Record> = reader.collect::<Result<_, _>>().unwrap();
/// assert_eq!(records.len(), 3);
/// assert_eq!(records[2].get(Tag(1)).and_then(|v| v.as_f64()), Some(1.0));
/// ```
pub struct MessageWriter<'r, W: Write> {
    writer: W,
    encoder: Encoder<'r>,
    type_name: String,
    scratch: Vec<u8>,
    messages_written: u64,
}

impl<'r, W: Write> MessageWriter<'r, W> {
    /// Create a writer for messages of `type_name`.
    pub fn new(
        writer: W,
        registry: &'r SchemaRegistry,
        type_name: &str,
    ) -> Result<Self, StreamError> {
        Self::build(writer, Encoder::new(registry), registry, type_name)
    }

    /// Create a writer with a validated configuration.
    pub fn with_config(
        writer: W,
        registry: &'r SchemaRegistry,
        type_name: &str,
        config: CodecConfig,
    ) -> Result<Self, StreamError> {
        let encoder = Encoder::with_config(registry, config)?;
        Self::build(writer, encoder, registry, type_name)
    }

    fn build(
        writer: W,
        encoder: Encoder<'r>,
        registry: &'r SchemaRegistry,
        type_name: &str,
    ) -> Result<Self, StreamError> {
        registry.catalog(type_name)?;
        Ok(Self {
            writer,
            encoder,
            type_name: type_name.to_string(),
            scratch: Vec::new(),
            messages_written: 0,
        })
    }

    /// Encode `record` and write it as one frame.
    ///
    /// Nothing is written if encoding fails or the message exceeds
    /// `max_message_size`.
    pub fn write(&mut self, record: &Record) -> Result<(), StreamError> {
        self.scratch.clear();
        self.encoder
            .encode_into(record, &self.type_name, &mut self.scratch)?;

        let limit = self.encoder.config().max_message_size;
        if self.scratch.len() > limit {
            return Err(StreamError::MessageTooLarge {
                len: self.scratch.len() as u64,
                limit,
            });
        }

        self.writer
            .write_all(&wire::encode_varint(self.scratch.len() as u64))?;
        self.writer.write_all(&self.scratch)?;
        self.messages_written += 1;
        Ok(())
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> Result<(), StreamError> {
        self.writer.flush()?;
        Ok(())
    }

    /// Number of messages written so far.
    pub fn messages_written(&self) -> u64 {
        self.messages_written
    }

    /// Consume the writer and return the underlying `Write` sink.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Reads framed messages of one type from a byte source.
///
/// A clean end of input between frames ends the stream. Running out of
/// bytes inside a frame's length or body is
/// [`CodecError::TruncatedInput`].
///
/// A frame that was read in full but fails to decode is reported and
/// skipped; the next call continues with the following frame. Errors in
/// the framing itself (I/O failure, truncation, an oversized length)
/// leave the source out of step, and the iterator ends after yielding
/// one.
///
/// Frame lengths are read a byte at a time. Wrap a `File` or socket in
/// a `BufReader` to avoid one read call per length byte.
pub struct MessageReader<'r, R: Read> {
    reader: R,
    decoder: Decoder<'r>,
    type_name: String,
    scratch: Vec<u8>,
    messages_read: u64,
    done: bool,
}

impl<'r, R: Read> MessageReader<'r, R> {
    /// Create a reader for messages of `type_name`.
    pub fn new(
        reader: R,
        registry: &'r SchemaRegistry,
        type_name: &str,
    ) -> Result<Self, StreamError> {
        Self::build(reader, Decoder::new(registry), registry, type_name)
    }

    /// Create a reader with a validated configuration.
    pub fn with_config(
        reader: R,
        registry: &'r SchemaRegistry,
        type_name: &str,
        config: CodecConfig,
    ) -> Result<Self, StreamError> {
        let decoder = Decoder::with_config(registry, config)?;
        Self::build(reader, decoder, registry, type_name)
    }

    fn build(
        reader: R,
        decoder: Decoder<'r>,
        registry: &'r SchemaRegistry,
        type_name: &str,
    ) -> Result<Self, StreamError> {
        registry.catalog(type_name)?;
        Ok(Self {
            reader,
            decoder,
            type_name: type_name.to_string(),
            scratch: Vec::new(),
            messages_read: 0,
            done: false,
        })
    }

    /// Read the next message, or `None` at a clean end of input.
    pub fn read(&mut self) -> Result<Option<Record>, StreamError> {
        if !self.read_frame()? {
            return Ok(None);
        }
        self.decode_frame().map(Some)
    }

    /// Number of messages read so far.
    pub fn messages_read(&self) -> u64 {
        self.messages_read
    }

    /// Consume the reader and return the underlying `Read` source.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Read the next frame body into `scratch`. Returns `false` at a clean
    /// end of input.
    fn read_frame(&mut self) -> Result<bool, StreamError> {
        let Some(len) = self.read_frame_len()? else {
            return Ok(false);
        };

        let limit = self.decoder.config().max_message_size;
        let len = match usize::try_from(len) {
            Ok(len) if len <= limit => len,
            _ => return Err(StreamError::MessageTooLarge { len, limit }),
        };

        self.scratch.resize(len, 0);
        self.reader
            .read_exact(&mut self.scratch)
            .map_err(|e| match e.kind() {
                ErrorKind::UnexpectedEof => StreamError::Codec(CodecError::TruncatedInput {
                    detail: format!("stream ended inside a {len}-byte frame"),
                }),
                _ => StreamError::Io(e),
            })?;
        Ok(true)
    }

    fn decode_frame(&mut self) -> Result<Record, StreamError> {
        let record = self.decoder.decode(&self.scratch, &self.type_name)?;
        self.messages_read += 1;
        Ok(record)
    }

    /// Read a frame length, returning `None` if the input ends before its
    /// first byte.
    fn read_frame_len(&mut self) -> Result<Option<u64>, StreamError> {
        let mut bytes = [0u8; MAX_VARINT_LEN];
        let mut n = 0;
        loop {
            let mut byte = [0u8; 1];
            match self.reader.read(&mut byte) {
                Ok(0) if n == 0 => return Ok(None),
                Ok(0) => {
                    return Err(StreamError::Codec(CodecError::TruncatedInput {
                        detail: format!("stream ended inside a frame length after {n} bytes"),
                    }));
                }
                Ok(_) => {
                    bytes[n] = byte[0];
                    n += 1;
                    if byte[0] & 0x80 == 0 || n == MAX_VARINT_LEN {
                        break;
                    }
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(StreamError::Io(e)),
            }
        }
        let len = wire::WireReader::new(&bytes[..n]).read_varint()?;
        Ok(Some(len))
    }
}

impl<R: Read> Iterator for MessageReader<'_, R> {
    type Item = Result<Record, StreamError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.read_frame() {
            Ok(true) => Some(self.decode_frame()),
            Ok(false) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
