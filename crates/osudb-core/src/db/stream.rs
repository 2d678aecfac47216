//! Lazy, fail-fast iteration over the top-level records of a file.

use std::marker::PhantomData;

use crate::codec::ByteBuffer;
use crate::config::DecodeOptions;
use crate::error::Result;
use crate::record::{Decode, DecodeContext};

/// Reads the leading format version and applies the version policy.
pub(crate) fn read_version(buf: &mut ByteBuffer<'_>, options: DecodeOptions) -> Result<(DecodeContext, bool)> {
    let offset = buf.position();
    let version = buf.read_u32()?;
    let ctx = DecodeContext::new(version, options);
    let validated = ctx.gate.check(options.version_policy, offset)?;
    Ok((ctx, validated))
}

/// Yields the declared number of records one at a time.
///
/// The stream fuses after the first error: once the byte position is lost
/// nothing after it can be decoded. A declared count larger than the data
/// shows up as a `TruncatedInput` error on the first missing record.
/// Dropping the stream stops decoding.
#[derive(Debug, Clone)]
pub struct RecordStream<'a, T> {
    buf: ByteBuffer<'a>,
    ctx: DecodeContext,
    version_validated: bool,
    declared: usize,
    next_index: usize,
    failed: bool,
    _record: PhantomData<fn() -> T>,
}

impl<'a, T: Decode> RecordStream<'a, T> {
    /// Reads the `u32` record count at the current position.
    pub(crate) fn new(mut buf: ByteBuffer<'a>, ctx: DecodeContext, version_validated: bool) -> Result<Self> {
        let declared = buf.read_u32()? as usize;
        tracing::debug!(record = T::LABEL, declared, version = ctx.version(), "Reading records");
        Ok(Self {
            buf,
            ctx,
            version_validated,
            declared,
            next_index: 0,
            failed: false,
            _record: PhantomData,
        })
    }

    pub fn version(&self) -> u32 {
        self.ctx.version()
    }

    pub fn version_validated(&self) -> bool {
        self.version_validated
    }

    pub fn context(&self) -> &DecodeContext {
        &self.ctx
    }

    /// Record count declared by the file.
    pub fn declared_count(&self) -> usize {
        self.declared
    }

    /// Byte offset of the next record.
    pub fn position(&self) -> usize {
        self.buf.position()
    }

    pub fn has_failed(&self) -> bool {
        self.failed
    }

    /// `true` once every declared record has been yielded.
    pub fn is_complete(&self) -> bool {
        !self.failed && self.next_index >= self.declared
    }

    /// Capacity hint that never exceeds what the remaining bytes could hold.
    pub(crate) fn capacity_hint(&self) -> usize {
        let remaining = self.declared - self.next_index.min(self.declared);
        remaining.min(self.buf.remaining() / T::MIN_SIZE.max(1))
    }

    pub(crate) fn buffer_mut(&mut self) -> &mut ByteBuffer<'a> {
        &mut self.buf
    }

    /// Drains the stream into a vector, failing on the first error.
    pub(crate) fn collect_all(&mut self) -> Result<Vec<T>> {
        let mut records = Vec::with_capacity(self.capacity_hint());
        for record in self.by_ref() {
            records.push(record?);
        }
        Ok(records)
    }
}

impl<T: Decode> Iterator for RecordStream<'_, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.next_index >= self.declared {
            return None;
        }

        let index = self.next_index;
        self.next_index += 1;

        match T::decode(&mut self.buf, &self.ctx) {
            Ok(record) => Some(Ok(record)),
            Err(e) => {
                self.failed = true;
                tracing::debug!(record = T::LABEL, index, "Record decode failed, stopping");
                Some(Err(e.within(T::LABEL, index)))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            (0, Some(0))
        } else {
            (0, Some(self.declared - self.next_index))
        }
    }
}

/// Logs bytes left after a complete file.
pub(crate) fn note_trailing(buf: &ByteBuffer<'_>, file: &'static str) {
    if buf.remaining() > 0 {
        tracing::debug!(file, trailing = buf.remaining(), "Trailing bytes after last record");
    }
}
