//! Frame envelope
//!
//! Minimal view over decoded inbound frames: just enough structure to route them.

mod inbound;

pub use inbound::{FrameError, InboundFrame};
