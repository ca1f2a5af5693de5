/// Errors that can occur while framing or reassembling a byte stream.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// A frame's payload length exceeds the configured maximum.
    ///
    /// On the read side this means the peer declared an oversized length
    /// prefix; the connection should be dropped.
    #[error("frame too large ({size} bytes, max {max})")]
    FrameTooLarge { size: usize, max: usize },

    /// An I/O error occurred while reading or writing frames.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream ended before a complete frame was received.
    #[error("connection closed (incomplete frame)")]
    ConnectionClosed,
}

pub type Result<T> = std::result::Result<T, FrameError>;
