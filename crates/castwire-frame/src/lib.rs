//! Length-prefixed stream framing for Cast-style connections.
//!
//! Every message on the wire is:
//! - A 4-byte big-endian payload length
//! - Followed by exactly that many payload bytes
//!
//! No magic, no checksum, no padding. [`FrameBuffer`] turns an arbitrarily
//! chunked byte stream back into whole payloads; [`FrameReader`] and
//! [`FrameWriter`] drive it over blocking streams, and `CastCodec` (feature
//! `async`) does the same for tokio transports.

pub mod buffer;
pub mod codec;
pub mod error;
pub mod reader;
pub mod shared;
pub mod writer;

#[cfg(feature = "async")]
pub mod async_codec;

pub use buffer::FrameBuffer;
pub use codec::{
    decode_frame, encode_frame, Frame, FrameConfig, DEFAULT_HIGH_WATER_MARK, DEFAULT_MAX_PAYLOAD,
    HEADER_SIZE,
};
pub use error::{FrameError, Result};
pub use reader::{FrameReader, Frames};
pub use shared::SharedFrameBuffer;
pub use writer::FrameWriter;

#[cfg(feature = "async")]
pub use async_codec::CastCodec;
