use serde::Serialize;

use crate::codec::ByteBuffer;
use crate::collection::Collection;
use crate::config::DecodeOptions;
use crate::db::stream::{note_trailing, read_version, RecordStream};
use crate::error::Result;

/// Fully decoded `collection.db`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionDatabase {
    pub version: u32,
    pub version_validated: bool,
    pub collections: Vec<Collection>,
}

impl CollectionDatabase {
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Self::decode_with(bytes, DecodeOptions::default())
    }

    pub fn decode_with(bytes: &[u8], options: DecodeOptions) -> Result<Self> {
        let mut stream = Self::stream_with(bytes, options)?;
        let collections = stream.collect_all()?;
        note_trailing(stream.buffer_mut(), "collection.db");
        tracing::debug!(collections = collections.len(), "Decoded collection.db");
        Ok(Self {
            version: stream.version(),
            version_validated: stream.version_validated(),
            collections,
        })
    }

    pub fn stream(bytes: &[u8]) -> Result<RecordStream<'_, Collection>> {
        Self::stream_with(bytes, DecodeOptions::default())
    }

    pub fn stream_with(bytes: &[u8], options: DecodeOptions) -> Result<RecordStream<'_, Collection>> {
        let mut buf = ByteBuffer::new(bytes);
        let (ctx, validated) = read_version(&mut buf, options)?;
        RecordStream::new(buf, ctx, validated)
    }

    /// First collection with this name.
    pub fn get(&self, name: &str) -> Option<&Collection> {
        self.collections.iter().find(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    /// Sum of hashes over all collections, duplicates counted.
    pub fn total_hashes(&self) -> usize {
        self.collections.iter().map(Collection::len).sum()
    }
}
