//! Lookup structures over decoded or raw `osu!.db` data.

use std::collections::HashMap;
use std::ops::Range;

use crate::beatmap::BeatmapEntry;
use crate::codec::ByteBuffer;
use crate::config::DecodeOptions;
use crate::db::beatmap_db::{BeatmapDbHeader, UserPermissions};
use crate::error::Result;
use crate::record::{Decode, DecodeContext};

/// Beatmap entries keyed by MD5 hash.
///
/// When several entries share a hash the first one in file order wins.
#[derive(Debug, Clone, Default)]
pub struct BeatmapIndex<'a> {
    by_hash: HashMap<&'a str, &'a BeatmapEntry>,
}

impl<'a> BeatmapIndex<'a> {
    pub fn new(entries: &'a [BeatmapEntry]) -> Self {
        let mut by_hash = HashMap::with_capacity(entries.len());
        for entry in entries {
            by_hash.entry(entry.md5_hash.as_str()).or_insert(entry);
        }
        if by_hash.len() != entries.len() {
            tracing::debug!(
                entries = entries.len(),
                unique = by_hash.len(),
                "Repeated beatmap hashes, index keeps the first entry"
            );
        }
        Self { by_hash }
    }

    pub fn get(&self, hash: &str) -> Option<&'a BeatmapEntry> {
        self.by_hash.get(hash).copied()
    }

    pub fn contains(&self, hash: &str) -> bool {
        self.by_hash.contains_key(hash)
    }

    pub fn len(&self) -> usize {
        self.by_hash.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_hash.is_empty()
    }
}

/// Byte spans of every entry in an `osu!.db` image.
///
/// Once the spans are known, entries decode independently of each other,
/// in any order or in parallel. Files with an entry size prefix are scanned
/// by skipping over each entry when decoding strictly; otherwise every entry
/// is decoded once to find where the next one starts.
#[derive(Debug, Clone)]
pub struct EntryIndex<'a> {
    bytes: &'a [u8],
    header: BeatmapDbHeader,
    ctx: DecodeContext,
    spans: Vec<Range<usize>>,
    user_permissions: UserPermissions,
}

impl<'a> EntryIndex<'a> {
    pub fn scan(bytes: &'a [u8]) -> Result<Self> {
        Self::scan_with(bytes, DecodeOptions::default())
    }

    pub fn scan_with(bytes: &'a [u8], options: DecodeOptions) -> Result<Self> {
        let mut buf = ByteBuffer::new(bytes);
        let (header, ctx) = BeatmapDbHeader::decode(&mut buf, options)?;
        let declared = buf.read_u32()? as usize;

        // Lenient decoding tolerates a wrong size prefix, so the prefix can
        // only be trusted for skipping when a mismatch would be an error.
        let skip_by_size = ctx.gate.has_entry_size() && options.is_strict();

        let mut spans = Vec::with_capacity(declared.min(buf.remaining() / BeatmapEntry::MIN_SIZE));
        for index in 0..declared {
            let start = buf.position();
            let scanned = if skip_by_size {
                buf.read_u32().and_then(|size| buf.skip(size as usize))
            } else {
                BeatmapEntry::decode(&mut buf, &ctx).map(drop)
            };
            scanned.map_err(|e| e.within(BeatmapEntry::LABEL, index))?;
            spans.push(start..buf.position());
        }

        let user_permissions = UserPermissions::from_bits_retain(buf.read_u32()?);
        tracing::debug!(entries = spans.len(), skip_by_size, "Indexed osu!.db entries");

        Ok(Self {
            bytes,
            header,
            ctx,
            spans,
            user_permissions,
        })
    }

    pub fn header(&self) -> &BeatmapDbHeader {
        &self.header
    }

    pub fn user_permissions(&self) -> UserPermissions {
        self.user_permissions
    }

    /// Byte range of each entry, size prefix included.
    pub fn spans(&self) -> &[Range<usize>] {
        &self.spans
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Decodes entry `index` on its own. `None` past the last entry.
    pub fn decode_entry(&self, index: usize) -> Option<Result<BeatmapEntry>> {
        let span = self.spans.get(index)?;
        let mut buf = ByteBuffer::new(&self.bytes[..span.end]);
        let decoded = buf
            .set_position(span.start)
            .and_then(|()| BeatmapEntry::decode(&mut buf, &self.ctx))
            .map_err(|e| e.within(BeatmapEntry::LABEL, index));
        Some(decoded)
    }

    /// Decodes every entry in order on the current thread.
    pub fn decode_all(&self) -> Result<Vec<BeatmapEntry>> {
        (0..self.spans.len())
            .filter_map(|i| self.decode_entry(i))
            .collect()
    }

    /// Decodes every entry on the rayon thread pool.
    ///
    /// The result is in file order. When several entries fail, the error of
    /// the lowest index is returned.
    #[cfg(feature = "parallel")]
    pub fn decode_parallel(&self) -> Result<Vec<BeatmapEntry>> {
        use rayon::prelude::*;

        let decoded: Vec<Result<BeatmapEntry>> = (0..self.spans.len())
            .into_par_iter()
            .filter_map(|i| self.decode_entry(i))
            .collect();
        tracing::debug!(entries = decoded.len(), "Decoded osu!.db entries in parallel");
        decoded.into_iter().collect()
    }
}
