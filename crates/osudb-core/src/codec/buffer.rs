//! Cursor over a database file.
//!
//! `ByteBuffer` decodes the primitive encodings shared by every osu! database
//! file. Each read either consumes exactly the bytes of one value and advances
//! the position, or fails with an error carrying the offset the read started at.

use chrono::{DateTime, Utc};

use crate::codec::datetime::ticks_to_datetime;
use crate::config::Strictness;
use crate::error::{DecodeError, DecodeErrorKind, Result};

/// Flag byte preceding a present string.
pub const STRING_PRESENT: u8 = 0x0b;

/// Flag byte standing for an absent string. Nothing follows it.
pub const STRING_ABSENT: u8 = 0x00;

/// A position-tracking reader over a borrowed byte slice.
///
/// # Example
///
/// ```
/// use osudb_core::codec::ByteBuffer;
///
/// let data = [0x80, 0x01, 0x00];
/// let mut buf = ByteBuffer::new(&data);
///
/// assert_eq!(buf.read_uleb128().unwrap(), 128);
/// assert_eq!(buf.read_string().unwrap(), "");
/// assert_eq!(buf.position(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct ByteBuffer<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteBuffer<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of bytes remaining from the current position.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Sets the current read position.
    ///
    /// # Errors
    ///
    /// Returns `TruncatedInput` if the position is beyond the buffer length.
    pub fn set_position(&mut self, pos: usize) -> Result<()> {
        if pos > self.data.len() {
            return Err(DecodeError::truncated(self.pos, pos - self.pos, self.remaining()).into());
        }
        self.pos = pos;
        Ok(())
    }

    /// Skips the specified number of bytes.
    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.read_bytes(count).map(|_| ())
    }

    /// Reads the specified number of bytes and advances the position.
    ///
    /// # Errors
    ///
    /// Returns `TruncatedInput` if there are not enough bytes remaining.
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        if count > self.remaining() {
            return Err(DecodeError::truncated(self.pos, count, self.remaining()).into());
        }
        let result = &self.data[self.pos..self.pos + count];
        self.pos += count;
        Ok(result)
    }

    fn read_array_of<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_array_of::<1>()?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(i8::from_le_bytes(self.read_array_of()?))
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.read_array_of()?))
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(i16::from_le_bytes(self.read_array_of()?))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_array_of()?))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(i32::from_le_bytes(self.read_array_of()?))
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        Ok(u64::from_le_bytes(self.read_array_of()?))
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(i64::from_le_bytes(self.read_array_of()?))
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_le_bytes(self.read_array_of()?))
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(f64::from_le_bytes(self.read_array_of()?))
    }

    /// Reads a one-byte boolean.
    ///
    /// The client only writes 0 and 1. Under `Strictness::Lenient` any other
    /// value reads as `true`.
    pub fn read_bool(&mut self, strictness: Strictness) -> Result<bool> {
        let start = self.pos;
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => match strictness {
                Strictness::Strict => Err(DecodeError::invalid(
                    start,
                    format!("boolean byte {other:#04x} is neither 0 nor 1"),
                )
                .into()),
                Strictness::Lenient => {
                    tracing::warn!(offset = start, value = other, "Non-canonical boolean byte read as true");
                    Ok(true)
                }
            },
        }
    }

    /// Reads a ULEB128 variable-length unsigned integer.
    ///
    /// # Errors
    ///
    /// `TruncatedInput` if the input ends before a byte without the
    /// continuation bit; `InvalidEncoding` if the value does not fit in 64 bits.
    pub fn read_uleb128(&mut self) -> Result<u64> {
        let start = self.pos;
        let mut result: u64 = 0;
        let mut shift = 0u32;

        loop {
            let Some(&byte) = self.data.get(self.pos) else {
                let consumed = self.pos - start;
                self.pos = start;
                return Err(DecodeError::truncated(start, consumed + 1, consumed).into());
            };
            self.pos += 1;

            let low = u64::from(byte & 0x7f);
            if shift > 63 || (shift == 63 && low > 1) {
                return Err(DecodeError::invalid(start, "ULEB128 value exceeds 64 bits").into());
            }
            result |= low << shift;

            if byte & 0x80 == 0 {
                return Ok(result);
            }
            shift += 7;
        }
    }

    /// Reads an optionally-present UTF-8 string.
    ///
    /// An absent string (`0x00`) consumes exactly one byte and yields `""`.
    /// A present string (`0x0b`) is followed by a ULEB128 length and the bytes.
    pub fn read_string(&mut self) -> Result<String> {
        let start = self.pos;
        match self.read_u8()? {
            STRING_ABSENT => Ok(String::new()),
            STRING_PRESENT => {
                let len_offset = self.pos;
                let len = self.read_uleb128()?;
                let len = usize::try_from(len).map_err(|_| {
                    DecodeError::truncated(len_offset, usize::MAX, self.remaining())
                })?;
                let bytes = self.read_bytes(len)?;
                String::from_utf8(bytes.to_vec()).map_err(|e| {
                    DecodeError::invalid(start, format!("string is not valid UTF-8: {e}")).into()
                })
            }
            other => Err(DecodeError::invalid(
                start,
                format!("unknown string flag {other:#04x}"),
            )
            .into()),
        }
    }

    /// Reads a .NET tick count (100 ns units since 0001-01-01 UTC).
    pub fn read_datetime(&mut self) -> Result<DateTime<Utc>> {
        let start = self.pos;
        let ticks = self.read_i64()?;
        ticks_to_datetime(ticks).ok_or_else(|| {
            DecodeError::invalid(start, format!("tick count {ticks} is not a valid date-time")).into()
        })
    }

    /// Validates a declared element count against the remaining input.
    ///
    /// `offset` is where the count itself was read, used for the error.
    pub fn check_count(&self, count: u64, min_size: usize, offset: usize) -> Result<usize> {
        let overflow = || {
            DecodeError::new(
                DecodeErrorKind::CountOverflow {
                    count,
                    min_size,
                    remaining: self.remaining(),
                },
                offset,
            )
        };
        let count_usize = usize::try_from(count).map_err(|_| overflow())?;
        let needed = count_usize.checked_mul(min_size).ok_or_else(overflow)?;
        if needed > self.remaining() {
            return Err(overflow().into());
        }
        Ok(count_usize)
    }

    /// Reads a `u32` element count and validates it against the remaining input.
    pub fn read_count(&mut self, min_size: usize) -> Result<usize> {
        let offset = self.pos;
        let count = self.read_u32()?;
        self.check_count(u64::from(count), min_size, offset)
    }

    /// Reads a `u32`-count-prefixed array using `element` for each item.
    ///
    /// A failure inside element `i` is reported under the `label #i` path
    /// segment.
    pub fn read_array<T, F>(&mut self, label: &'static str, min_size: usize, mut element: F) -> Result<Vec<T>>
    where
        F: FnMut(&mut Self) -> Result<T>,
    {
        let count = self.read_count(min_size)?;
        let mut items = Vec::with_capacity(count);
        for i in 0..count {
            items.push(element(self).map_err(|e| e.within(label, i))?);
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeErrorKind;

    #[test]
    fn test_read_fixed_width_little_endian() {
        let data = [
            0x78, 0x56, 0x34, 0x12, // u32
            0xFF, 0xFF, // i16: -1
            0x00, 0x00, 0x80, 0x3F, // f32: 1.0
        ];
        let mut buf = ByteBuffer::new(&data);

        assert_eq!(buf.read_u32().unwrap(), 0x12345678);
        assert_eq!(buf.read_i16().unwrap(), -1);
        assert_eq!(buf.read_f32().unwrap(), 1.0);
        assert_eq!(buf.remaining(), 0);
    }

    #[test]
    fn test_uleb128_known_values() {
        assert_eq!(ByteBuffer::new(&[0x01]).read_uleb128().unwrap(), 1);
        assert_eq!(ByteBuffer::new(&[0x80, 0x01]).read_uleb128().unwrap(), 128);
        assert_eq!(ByteBuffer::new(&[0xE5, 0x8E, 0x26]).read_uleb128().unwrap(), 624_485);
    }

    #[test]
    fn test_uleb128_missing_terminator_is_truncated() {
        let mut buf = ByteBuffer::new(&[0x80]);
        let err = buf.read_uleb128().unwrap_err();
        assert!(matches!(err.kind(), DecodeErrorKind::TruncatedInput { .. }));
        assert_eq!(err.offset(), 0);
    }

    #[test]
    fn test_uleb128_overlong_is_invalid() {
        let data = [0xFF; 10];
        let mut with_terminator = data.to_vec();
        with_terminator.push(0x01);
        let err = ByteBuffer::new(&with_terminator).read_uleb128().unwrap_err();
        assert!(matches!(err.kind(), DecodeErrorKind::InvalidEncoding(_)));
    }

    #[test]
    fn test_absent_string_consumes_one_byte() {
        let data = [0x00, 0x0b, 0x01, b'x'];
        let mut buf = ByteBuffer::new(&data);
        assert_eq!(buf.read_string().unwrap(), "");
        assert_eq!(buf.position(), 1);
        assert_eq!(buf.read_string().unwrap(), "x");
        assert_eq!(buf.position(), 4);
    }

    #[test]
    fn test_present_empty_string_has_length_byte() {
        let mut buf = ByteBuffer::new(&[0x0b, 0x00]);
        assert_eq!(buf.read_string().unwrap(), "");
        assert_eq!(buf.position(), 2);
    }

    #[test]
    fn test_string_invalid_utf8() {
        let mut buf = ByteBuffer::new(&[0x0b, 0x02, 0xC3, 0x28]);
        let err = buf.read_string().unwrap_err();
        assert!(matches!(err.kind(), DecodeErrorKind::InvalidEncoding(_)));
    }

    #[test]
    fn test_string_unknown_flag() {
        let err = ByteBuffer::new(&[0x05]).read_string().unwrap_err();
        assert!(matches!(err.kind(), DecodeErrorKind::InvalidEncoding(_)));
    }

    #[test]
    fn test_string_length_beyond_input() {
        let err = ByteBuffer::new(&[0x0b, 0x05, b'a']).read_string().unwrap_err();
        assert!(matches!(
            err.kind(),
            DecodeErrorKind::TruncatedInput { needed: 5, remaining: 1 }
        ));
    }

    #[test]
    fn test_read_bool_strictness() {
        assert!(ByteBuffer::new(&[1]).read_bool(Strictness::Strict).unwrap());
        assert!(!ByteBuffer::new(&[0]).read_bool(Strictness::Strict).unwrap());
        assert!(ByteBuffer::new(&[2]).read_bool(Strictness::Strict).is_err());
        assert!(ByteBuffer::new(&[2]).read_bool(Strictness::Lenient).unwrap());
    }

    #[test]
    fn test_read_array_count_overflow() {
        // count = 1_000_000 elements of 4 bytes, only 4 bytes available
        let data = [0x40, 0x42, 0x0F, 0x00, 1, 2, 3, 4];
        let mut buf = ByteBuffer::new(&data);
        let err = buf.read_array("Item", 4, |b| b.read_u32()).unwrap_err();
        assert!(matches!(
            err.kind(),
            DecodeErrorKind::CountOverflow { count: 1_000_000, min_size: 4, remaining: 4 }
        ));
        assert_eq!(err.offset(), 0);
    }

    #[test]
    fn test_read_array_reports_element_path() {
        // two u16 elements declared, second is cut short
        let data = [0x02, 0x00, 0x00, 0x00, 0x01, 0x00, 0x02];
        let mut buf = ByteBuffer::new(&data);
        let err = buf.read_array("Item", 1, |b| b.read_u16()).unwrap_err();
        assert_eq!(err.path().to_string(), "Item #1");
        assert_eq!(err.offset(), 6);
    }

    #[test]
    fn test_set_position_bounds() {
        let data = [0u8; 4];
        let mut buf = ByteBuffer::new(&data);
        buf.set_position(4).unwrap();
        assert_eq!(buf.remaining(), 0);
        assert!(buf.set_position(5).is_err());
    }
}
