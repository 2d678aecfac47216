//! Encoder mirroring `ByteBuffer`.
//!
//! Every `write_*` produces exactly the bytes the matching `read_*` consumes.
//! It exists to build database images for tests and to check that decoding is
//! the inverse of encoding; it does not rewrite files.

use chrono::{DateTime, Utc};

use crate::codec::buffer::{STRING_ABSENT, STRING_PRESENT};
use crate::codec::datetime::datetime_to_ticks;

#[derive(Debug, Clone, Default)]
pub struct ByteWriter {
    data: Vec<u8>,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.data.extend_from_slice(bytes);
        self
    }

    pub fn write_u8(&mut self, value: u8) -> &mut Self {
        self.data.push(value);
        self
    }

    pub fn write_i8(&mut self, value: i8) -> &mut Self {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_u16(&mut self, value: u16) -> &mut Self {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_i16(&mut self, value: i16) -> &mut Self {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_u32(&mut self, value: u32) -> &mut Self {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_i32(&mut self, value: i32) -> &mut Self {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_u64(&mut self, value: u64) -> &mut Self {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_i64(&mut self, value: i64) -> &mut Self {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_f32(&mut self, value: f32) -> &mut Self {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_f64(&mut self, value: f64) -> &mut Self {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_bool(&mut self, value: bool) -> &mut Self {
        self.write_u8(u8::from(value))
    }

    pub fn write_uleb128(&mut self, mut value: u64) -> &mut Self {
        loop {
            let byte = (value & 0x7f) as u8;
            value >>= 7;
            if value == 0 {
                self.data.push(byte);
                return self;
            }
            self.data.push(byte | 0x80);
        }
    }

    /// Writes a present string: flag, ULEB128 length, UTF-8 bytes.
    pub fn write_string(&mut self, value: &str) -> &mut Self {
        self.write_u8(STRING_PRESENT);
        self.write_uleb128(value.len() as u64);
        self.write_bytes(value.as_bytes())
    }

    /// Writes the single-byte absent string.
    pub fn write_absent_string(&mut self) -> &mut Self {
        self.write_u8(STRING_ABSENT)
    }

    /// Writes `None` as an absent string and `Some` as a present one.
    pub fn write_optional_string(&mut self, value: Option<&str>) -> &mut Self {
        match value {
            Some(s) => self.write_string(s),
            None => self.write_absent_string(),
        }
    }

    pub fn write_datetime(&mut self, value: &DateTime<Utc>) -> &mut Self {
        self.write_i64(datetime_to_ticks(value))
    }

    /// Writes a `u32` count followed by each element.
    pub fn write_array<T, F>(&mut self, items: &[T], mut element: F) -> &mut Self
    where
        F: FnMut(&mut Self, &T),
    {
        self.write_u32(items.len() as u32);
        for item in items {
            element(self, item);
        }
        self
    }
}
