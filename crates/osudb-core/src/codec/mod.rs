//! Primitive encodings shared by `osu!.db`, `collection.db` and `scores.db`.
//!
//! - `ByteBuffer` - cursor decoding integers, floats, booleans, ULEB128,
//!   optional strings, tick date-times and count-prefixed arrays
//! - `ByteWriter` - the matching encoder
//! - tick <-> `chrono` conversion

mod buffer;
pub mod datetime;
mod writer;

pub use buffer::*;
pub use writer::*;
