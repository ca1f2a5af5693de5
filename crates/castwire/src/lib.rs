//! Length-prefixed stream framing for Cast-style connections.
//!
//! castwire turns the raw byte stream of a Cast connection into whole
//! messages and back. It does not interpret the messages themselves.
//!
//! # Crate Structure
//!
//! - [`frame`] — Wire format, reassembly buffer, blocking reader/writer, and
//!   the tokio codec (behind the `async` feature)

/// Re-export frame types.
pub mod frame {
    pub use castwire_frame::*;
}
