//! Shared plumbing for record decoders.

use crate::codec::ByteBuffer;
use crate::config::{DecodeOptions, Strictness};
use crate::error::{DecodeError, Result};
use crate::version::VersionGate;

/// Per-file decode state handed to every record decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeContext {
    pub gate: VersionGate,
    pub options: DecodeOptions,
}

impl DecodeContext {
    pub fn new(version: u32, options: DecodeOptions) -> Self {
        Self {
            gate: VersionGate::new(version),
            options,
        }
    }

    pub fn version(&self) -> u32 {
        self.gate.version()
    }

    pub fn strictness(&self) -> Strictness {
        self.options.strictness
    }

    pub fn read_bool(&self, buf: &mut ByteBuffer<'_>) -> Result<bool> {
        buf.read_bool(self.strictness())
    }

    /// Reads a one-byte enum.
    ///
    /// Unknown values fail under the strict policy and become `fallback`
    /// under the lenient one.
    pub fn read_enum<T>(
        &self,
        buf: &mut ByteBuffer<'_>,
        name: &'static str,
        from_u8: fn(u8) -> Option<T>,
        fallback: T,
    ) -> Result<T> {
        let offset = buf.position();
        let raw = buf.read_u8()?;
        match from_u8(raw) {
            Some(value) => Ok(value),
            None if self.options.is_strict() => {
                Err(DecodeError::invalid(offset, format!("unknown {name} value {raw}")).into())
            }
            None => {
                tracing::warn!(offset, value = raw, "Unknown {} value, using default", name);
                Ok(fallback)
            }
        }
    }

    /// Reads a fixed marker byte. Markers are structural, so a mismatch fails
    /// regardless of strictness.
    pub fn expect_marker(&self, buf: &mut ByteBuffer<'_>, expected: u8, what: &'static str) -> Result<()> {
        let offset = buf.position();
        let found = buf.read_u8()?;
        if found != expected {
            return Err(DecodeError::invalid(
                offset,
                format!("expected {what} marker {expected:#04x}, found {found:#04x}"),
            )
            .into());
        }
        Ok(())
    }

    /// Reads a count-prefixed sequence of records.
    pub fn read_records<T: Decode>(&self, buf: &mut ByteBuffer<'_>) -> Result<Vec<T>> {
        buf.read_array(T::LABEL, T::MIN_SIZE, |b| T::decode(b, self))
    }
}

/// A record with a fixed field grammar.
pub trait Decode: Sized {
    /// Name used in error paths, e.g. `Timing Point`.
    const LABEL: &'static str;

    /// Lower bound of the encoded size in any format version, used to reject
    /// implausible counts before allocating.
    const MIN_SIZE: usize;

    fn decode(buf: &mut ByteBuffer<'_>, ctx: &DecodeContext) -> Result<Self>;
}
