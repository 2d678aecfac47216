use bitflags::bitflags;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::beatmap::BeatmapEntry;
use crate::codec::ByteBuffer;
use crate::config::DecodeOptions;
use crate::db::stream::{note_trailing, read_version, RecordStream};
use crate::db::BeatmapIndex;
use crate::error::Result;
use crate::record::DecodeContext;

bitflags! {
    /// Chat permissions of the local account.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
    pub struct UserPermissions: u32 {
        const NORMAL = 1 << 0;
        const MODERATOR = 1 << 1;
        const SUPPORTER = 1 << 2;
        const FRIEND = 1 << 3;
        const PEPPY = 1 << 4;
        const WORLD_CUP_STAFF = 1 << 5;

        const _ = !0;
    }
}

/// Scalars preceding the entries of `osu!.db`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BeatmapDbHeader {
    pub version: u32,
    /// `false` when the version is outside the validated range and the
    /// policy allowed decoding anyway.
    pub version_validated: bool,
    pub folder_count: u32,
    /// `false` while the account is restricted.
    pub account_unlocked: bool,
    pub unlock_date: DateTime<Utc>,
    pub player_name: String,
    pub beatmap_count: u32,
}

impl BeatmapDbHeader {
    pub(crate) fn decode(buf: &mut ByteBuffer<'_>, options: DecodeOptions) -> Result<(Self, DecodeContext)> {
        let (ctx, version_validated) = read_version(buf, options)?;
        let folder_count = buf.read_u32()?;
        let account_unlocked = ctx.read_bool(buf)?;
        let unlock_date = buf.read_datetime()?;
        let player_name = buf.read_string()?;

        // The count is peeked here for the header; RecordStream reads it again.
        let count_offset = buf.position();
        let beatmap_count = buf.read_u32()?;
        buf.set_position(count_offset)?;

        tracing::debug!(
            version = ctx.version(),
            folder_count,
            player = %player_name,
            beatmap_count,
            "Read osu!.db header"
        );

        Ok((
            Self {
                version: ctx.version(),
                version_validated,
                folder_count,
                account_unlocked,
                unlock_date,
                player_name,
                beatmap_count,
            },
            ctx,
        ))
    }
}

/// Fully decoded `osu!.db`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BeatmapDatabase {
    pub header: BeatmapDbHeader,
    pub beatmaps: Vec<BeatmapEntry>,
    pub user_permissions: UserPermissions,
}

impl BeatmapDatabase {
    /// Decodes a whole `osu!.db` image with default options.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Self::decode_with(bytes, DecodeOptions::default())
    }

    pub fn decode_with(bytes: &[u8], options: DecodeOptions) -> Result<Self> {
        let mut stream = Self::stream_with(bytes, options)?;
        let beatmaps = stream.collect_entries()?;
        let user_permissions = stream.finish()?;
        Ok(Self {
            header: stream.header,
            beatmaps,
            user_permissions,
        })
    }

    /// Header now, entries on demand.
    pub fn stream(bytes: &[u8]) -> Result<BeatmapStream<'_>> {
        Self::stream_with(bytes, DecodeOptions::default())
    }

    pub fn stream_with(bytes: &[u8], options: DecodeOptions) -> Result<BeatmapStream<'_>> {
        let mut buf = ByteBuffer::new(bytes);
        let (header, ctx) = BeatmapDbHeader::decode(&mut buf, options)?;
        let records = RecordStream::new(buf, ctx, header.version_validated)?;
        Ok(BeatmapStream {
            header,
            records,
            user_permissions: None,
            trailer_done: false,
        })
    }

    pub fn version(&self) -> u32 {
        self.header.version
    }

    pub fn len(&self) -> usize {
        self.beatmaps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beatmaps.is_empty()
    }

    /// Builds a hash lookup over the entries.
    pub fn index_by_hash(&self) -> BeatmapIndex<'_> {
        BeatmapIndex::new(&self.beatmaps)
    }

    /// Entries grouped by beatmap set, in first-seen order.
    pub fn beatmap_sets(&self) -> Vec<(u32, Vec<&BeatmapEntry>)> {
        let mut sets: Vec<(u32, Vec<&BeatmapEntry>)> = Vec::new();
        let mut positions = std::collections::HashMap::new();
        for entry in &self.beatmaps {
            let slot = *positions.entry(entry.beatmap_set_id).or_insert_with(|| {
                sets.push((entry.beatmap_set_id, Vec::new()));
                sets.len() - 1
            });
            sets[slot].1.push(entry);
        }
        sets
    }
}

/// Lazy `osu!.db` reader.
///
/// Yields entries in file order. After the last entry it reads the trailing
/// user permissions; a failure there is yielded as a final error.
#[derive(Debug, Clone)]
pub struct BeatmapStream<'a> {
    header: BeatmapDbHeader,
    records: RecordStream<'a, BeatmapEntry>,
    user_permissions: Option<UserPermissions>,
    trailer_done: bool,
}

impl<'a> BeatmapStream<'a> {
    pub fn header(&self) -> &BeatmapDbHeader {
        &self.header
    }

    /// Available once every entry has been read.
    pub fn user_permissions(&self) -> Option<UserPermissions> {
        self.user_permissions
    }

    pub fn position(&self) -> usize {
        self.records.position()
    }

    fn read_trailer(&mut self) -> Result<UserPermissions> {
        self.trailer_done = true;
        let buf = self.records.buffer_mut();
        let permissions = UserPermissions::from_bits_retain(buf.read_u32()?);
        note_trailing(buf, "osu!.db");
        self.user_permissions = Some(permissions);
        Ok(permissions)
    }

    fn collect_entries(&mut self) -> Result<Vec<BeatmapEntry>> {
        self.records.collect_all()
    }

    /// Reads the trailer if iteration has not done so yet.
    fn finish(&mut self) -> Result<UserPermissions> {
        match self.user_permissions {
            Some(permissions) => Ok(permissions),
            None => self.read_trailer(),
        }
    }
}

impl Iterator for BeatmapStream<'_> {
    type Item = Result<BeatmapEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(entry) = self.records.next() {
            return Some(entry);
        }
        if self.trailer_done || !self.records.is_complete() {
            return None;
        }
        match self.read_trailer() {
            Ok(_) => None,
            Err(e) => Some(Err(e)),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (_, upper) = self.records.size_hint();
        (0, upper.map(|n| n + 1))
    }
}
