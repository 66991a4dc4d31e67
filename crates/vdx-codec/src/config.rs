//! Codec configuration and validation.
//!
//! [`CodecConfig`] is passed to [`Encoder::with_config`](crate::Encoder::with_config),
//! [`Decoder::with_config`](crate::Decoder::with_config) and the stream
//! constructors, which call [`validate()`](CodecConfig::validate) before
//! accepting it.

/// What the decoder does with units whose tag the catalog does not declare.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnknownFieldPolicy {
    /// Keep them on the record as opaque
    /// [`UnknownField`](vdx_core::UnknownField)s. The encoder re-emits them
    /// byte-exact after the known fields, so relays forward what they do
    /// not understand.
    #[default]
    Preserve,
    /// Skip them.
    Drop,
}

/// How the decoder treats a top-level message's interface version.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VersionPolicy {
    /// Fail with `IncompatibleVersion` when the message's major version is
    /// newer than the registry's.
    #[default]
    Reject,
    /// Decode regardless of the version field.
    Ignore,
}

/// Tuning knobs shared by the encoder, decoder and streams.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodecConfig {
    /// Unknown-field retention. Default: [`UnknownFieldPolicy::Preserve`].
    pub unknown_fields: UnknownFieldPolicy,
    /// Interface version enforcement. Default: [`VersionPolicy::Reject`].
    pub version_policy: VersionPolicy,
    /// Maximum message nesting below the top-level message. Default: 64.
    pub max_depth: usize,
    /// Largest frame a stream will write or read, in bytes.
    /// Default: 64 MiB.
    pub max_message_size: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            unknown_fields: UnknownFieldPolicy::Preserve,
            version_policy: VersionPolicy::Reject,
            max_depth: 64,
            max_message_size: 64 * 1024 * 1024,
        }
    }
}

impl CodecConfig {
    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroMaxDepth);
        }
        if self.max_message_size == 0 {
            return Err(ConfigError::ZeroMaxMessageSize);
        }
        Ok(())
    }
}

/// Errors detected by [`CodecConfig::validate()`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// `max_depth` is zero, which would reject every nested message.
    #[error("max_depth must be at least 1")]
    ZeroMaxDepth,
    /// `max_message_size` is zero, which would reject every frame.
    #[error("max_message_size must be at least 1")]
    ZeroMaxMessageSize,
}
