//! Incremental reassembly of length-prefixed frames.
//!
//! [`FrameBuffer`] accumulates whatever the transport hands it and yields
//! complete frames once all of their bytes have arrived. Consumed bytes are
//! tracked with a read cursor and reclaimed in bulk once storage reaches the
//! configured high-water mark, so a long-lived connection carrying many small
//! messages does not grow its buffer without bound.

use bytes::{Bytes, BytesMut};
use tracing::{debug, trace, warn};

use crate::codec::{read_length, Frame, FrameConfig, DEFAULT_HIGH_WATER_MARK, HEADER_SIZE};
use crate::error::{FrameError, Result};

/// Accumulates stream bytes and extracts complete frames in wire order.
///
/// Invariant: `read_pos <= storage.len()`. Bytes before `read_pos` have been
/// returned as frames; `storage[read_pos..]` is the unconsumed tail.
#[derive(Debug)]
pub struct FrameBuffer {
    storage: BytesMut,
    read_pos: usize,
    config: FrameConfig,
}

impl FrameBuffer {
    /// Create a new buffer with default configuration.
    pub fn new() -> Self {
        Self::with_config(FrameConfig::default())
    }

    /// Create a new buffer with explicit configuration.
    pub fn with_config(config: FrameConfig) -> Self {
        Self {
            storage: BytesMut::with_capacity(initial_capacity(&config)),
            read_pos: 0,
            config,
        }
    }

    /// Append freshly read bytes. No parsing happens here.
    pub fn append(&mut self, data: &[u8]) {
        if data.is_empty() {
            return;
        }
        self.storage.extend_from_slice(data);
        trace!(
            appended = data.len(),
            remaining = self.remaining(),
            "buffered stream bytes"
        );
    }

    /// Try to extract the next complete frame.
    ///
    /// Returns `Ok(None)` while the header or payload is still incomplete;
    /// nothing is consumed in that case. A declared length above
    /// `max_payload_size` yields [`FrameError::FrameTooLarge`], also without
    /// consuming the header, so the error repeats until the caller drops the
    /// connection.
    pub fn next_message(&mut self) -> Result<Option<Frame>> {
        let unconsumed = &self.storage[self.read_pos..];
        if unconsumed.len() < HEADER_SIZE {
            return Ok(None);
        }

        let payload_len = read_length(unconsumed);
        if payload_len > self.config.max_payload_size {
            warn!(
                size = payload_len,
                max = self.config.max_payload_size,
                "rejecting oversized frame"
            );
            return Err(FrameError::FrameTooLarge {
                size: payload_len,
                max: self.config.max_payload_size,
            });
        }

        let body = &unconsumed[HEADER_SIZE..];
        if body.len() < payload_len {
            return Ok(None);
        }

        let payload = Bytes::copy_from_slice(&body[..payload_len]);
        self.read_pos += HEADER_SIZE + payload_len;
        trace!(size = payload_len, "extracted frame");

        self.compact();
        Ok(Some(Frame { payload }))
    }

    /// Extract every complete frame currently buffered.
    ///
    /// If an oversized frame is hit after some frames were already extracted,
    /// those frames are returned and the error surfaces on the next call.
    pub fn drain_messages(&mut self) -> Result<Vec<Frame>> {
        let mut frames = Vec::new();
        loop {
            match self.next_message() {
                Ok(Some(frame)) => frames.push(frame),
                Ok(None) => return Ok(frames),
                Err(err) if frames.is_empty() => return Err(err),
                Err(_) => return Ok(frames),
            }
        }
    }

    /// Reclaim consumed bytes once storage has reached the high-water mark.
    fn compact(&mut self) {
        let len = self.storage.len();
        if len < self.config.high_water_mark {
            return;
        }

        if self.read_pos == len {
            self.storage = BytesMut::with_capacity(initial_capacity(&self.config));
            debug!(reclaimed = len, "compacted frame buffer (reset)");
        } else {
            let consumed = self.read_pos;
            self.storage.copy_within(consumed.., 0);
            self.storage.truncate(len - consumed);
            debug!(
                reclaimed = consumed,
                kept = self.storage.len(),
                "compacted frame buffer (shift)"
            );
        }
        self.read_pos = 0;
    }

    /// Total bytes held in storage, consumed prefix included.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Bytes received but not yet returned as frames.
    pub fn remaining(&self) -> usize {
        self.storage.len() - self.read_pos
    }

    /// True when there are no unconsumed bytes.
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Offset of the first unconsumed byte.
    pub fn read_position(&self) -> usize {
        self.read_pos
    }

    /// Allocated storage capacity.
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// Drop all buffered bytes.
    pub fn clear(&mut self) {
        self.storage.clear();
        self.read_pos = 0;
    }

    /// Update maximum payload size for subsequent extractions.
    pub fn set_max_payload_size(&mut self, max_payload_size: usize) {
        self.config.max_payload_size = max_payload_size;
    }

    /// Current buffer configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}

// The high-water mark is a compaction threshold; storage grows on demand past
// the first allocation.
fn initial_capacity(config: &FrameConfig) -> usize {
    config.high_water_mark.min(DEFAULT_HIGH_WATER_MARK)
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}
