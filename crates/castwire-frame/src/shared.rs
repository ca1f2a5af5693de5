use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::buffer::FrameBuffer;
use crate::codec::{Frame, FrameConfig};
use crate::error::Result;

/// A [`FrameBuffer`] that a reader loop and a consumer loop can share.
///
/// Each operation holds the lock only for its own duration, so appends and
/// extractions from different threads never interleave mid-update.
#[derive(Debug, Clone, Default)]
pub struct SharedFrameBuffer {
    inner: Arc<Mutex<FrameBuffer>>,
}

impl SharedFrameBuffer {
    /// Create a new shared buffer with default configuration.
    pub fn new() -> Self {
        Self::with_config(FrameConfig::default())
    }

    /// Create a new shared buffer with explicit configuration.
    pub fn with_config(config: FrameConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(FrameBuffer::with_config(config))),
        }
    }

    /// Append freshly read bytes.
    pub fn append(&self, data: &[u8]) {
        self.lock().append(data);
    }

    /// Try to extract the next complete frame.
    pub fn next_message(&self) -> Result<Option<Frame>> {
        self.lock().next_message()
    }

    /// Extract every complete frame currently buffered.
    pub fn drain_messages(&self) -> Result<Vec<Frame>> {
        self.lock().drain_messages()
    }

    /// Bytes received but not yet returned as frames.
    pub fn remaining(&self) -> usize {
        self.lock().remaining()
    }

    // A panic while holding the lock cannot leave the cursor past the end of
    // storage, so the buffer is still usable after poisoning.
    fn lock(&self) -> MutexGuard<'_, FrameBuffer> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl From<FrameBuffer> for SharedFrameBuffer {
    fn from(buffer: FrameBuffer) -> Self {
        Self {
            inner: Arc::new(Mutex::new(buffer)),
        }
    }
}
