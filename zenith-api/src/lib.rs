//! Zenith API - Shared value types for the AZenith manager's dialog layer.
//!
//! Everything here is plain data: the payload a confirmation dialog shows,
//! the outcome it produces, and the snapshot a host saves when its UI is torn
//! down and recreated.

pub mod codec;
mod dialog;
mod visuals;

pub use codec::CodecError;
pub use dialog::*;
pub use visuals::*;
