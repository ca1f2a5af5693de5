//! Blocking frame output.
//!
//! [`FrameWriter`] encodes each payload behind its big-endian length and
//! pushes the whole frame to the stream before returning. A stream that stops
//! accepting bytes surfaces as an error: a socket write timeout shows up as
//! `WouldBlock` or `TimedOut` and is returned rather than retried.

use std::io::{ErrorKind, Write};
use std::net::TcpStream;

use bytes::BytesMut;
use tracing::{debug, trace};

use crate::codec::{encode_frame, Frame, FrameConfig, HEADER_SIZE};
use crate::error::{FrameError, Result};

/// Writes length-prefixed frames to any `Write` stream.
pub struct FrameWriter<T> {
    inner: T,
    // Encoded header and payload of the frame in flight.
    pending: BytesMut,
    config: FrameConfig,
}

impl<T: Write> FrameWriter<T> {
    /// Create a new frame writer with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, FrameConfig::default())
    }

    /// Create a new frame writer with explicit configuration.
    pub fn with_config(inner: T, config: FrameConfig) -> Self {
        Self {
            inner,
            pending: BytesMut::new(),
            config,
        }
    }

    /// Write a complete frame (blocking).
    pub fn write_frame(&mut self, frame: &Frame) -> Result<()> {
        self.send(frame.payload.as_ref())
    }

    /// Prefix `payload` with its length, write the frame and flush.
    ///
    /// Oversized payloads are rejected before anything reaches the stream.
    pub fn send(&mut self, payload: &[u8]) -> Result<()> {
        let max = self.config.max_payload_size;
        if payload.len() > max {
            return Err(FrameError::FrameTooLarge {
                size: payload.len(),
                max,
            });
        }

        self.pending.clear();
        self.pending.reserve(HEADER_SIZE + payload.len());
        encode_frame(payload, &mut self.pending)?;
        self.write_pending()?;
        trace!(size = payload.len(), "sent frame");

        self.flush()
    }

    fn write_pending(&mut self) -> Result<()> {
        let total = self.pending.len();
        let mut written = 0usize;
        while written < total {
            match self.inner.write(&self.pending[written..]) {
                Ok(0) => return Err(FrameError::ConnectionClosed),
                Ok(n) => written += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => {}
                Err(err) => {
                    if is_timeout(&err) {
                        debug!(written, total, "frame write timed out");
                    }
                    return Err(FrameError::Io(err));
                }
            }
        }
        Ok(())
    }

    /// Flush the underlying stream.
    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => {}
                Err(err) => return Err(FrameError::Io(err)),
            }
        }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the writer and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Update maximum payload size for subsequent sends.
    pub fn set_max_payload_size(&mut self, max_payload_size: usize) {
        self.config.max_payload_size = max_payload_size;
    }

    /// Current writer configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}

impl FrameWriter<TcpStream> {
    /// Create a writer for a TCP stream, applying `write_timeout` from config.
    pub fn with_config_tcp(inner: TcpStream, config: FrameConfig) -> Result<Self> {
        inner.set_write_timeout(config.write_timeout)?;
        Ok(Self::with_config(inner, config))
    }
}

fn is_timeout(err: &std::io::Error) -> bool {
    matches!(err.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut)
}
