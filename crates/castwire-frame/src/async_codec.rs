//! tokio-util codec for async transports.
//!
//! Wrap any `AsyncRead + AsyncWrite` in `Framed::new(io, CastCodec::new())`
//! to get a `Stream` of [`Frame`]s and a `Sink` of payloads.

use bytes::{Bytes, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use crate::codec::{decode_frame, encode_frame, Frame, DEFAULT_MAX_PAYLOAD};
use crate::error::{FrameError, Result};

/// Length-prefixed frame codec.
#[derive(Debug, Clone)]
pub struct CastCodec {
    max_payload_size: usize,
}

impl CastCodec {
    /// Create a codec with the default 16 MiB payload limit.
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_payload(DEFAULT_MAX_PAYLOAD)
    }

    /// Create a codec with a custom payload limit.
    #[must_use]
    pub fn with_max_payload(max_payload_size: usize) -> Self {
        Self { max_payload_size }
    }

    /// The largest payload this codec will decode or encode.
    #[must_use]
    pub fn max_payload_size(&self) -> usize {
        self.max_payload_size
    }

    fn check_outgoing(&self, len: usize) -> Result<()> {
        if len > self.max_payload_size {
            return Err(FrameError::FrameTooLarge {
                size: len,
                max: self.max_payload_size,
            });
        }
        Ok(())
    }
}

impl Default for CastCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for CastCodec {
    type Item = Frame;
    type Error = FrameError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Frame>> {
        decode_frame(src, self.max_payload_size)
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Frame>> {
        match self.decode(src)? {
            Some(frame) => Ok(Some(frame)),
            None if src.is_empty() => Ok(None),
            None => Err(FrameError::ConnectionClosed),
        }
    }
}

impl Encoder<Bytes> for CastCodec {
    type Error = FrameError;

    fn encode(&mut self, payload: Bytes, dst: &mut BytesMut) -> Result<()> {
        self.check_outgoing(payload.len())?;
        encode_frame(&payload, dst)
    }
}

impl Encoder<&[u8]> for CastCodec {
    type Error = FrameError;

    fn encode(&mut self, payload: &[u8], dst: &mut BytesMut) -> Result<()> {
        self.check_outgoing(payload.len())?;
        encode_frame(payload, dst)
    }
}

impl Encoder<Frame> for CastCodec {
    type Error = FrameError;

    fn encode(&mut self, frame: Frame, dst: &mut BytesMut) -> Result<()> {
        Encoder::<Bytes>::encode(self, frame.payload, dst)
    }
}
