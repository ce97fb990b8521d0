//! sACN (E1.31) protocol encoding.
//!
//! A packet is a tree of PDUs: the root layer wraps a framing layer, which
//! wraps either a DMP layer (data), nothing (sync) or a universe discovery
//! layer. Each layer's Flags-and-Length field counts from itself to the end
//! of that layer, so lengths are composed bottom-up through [`pdu::Pdu`].
//!
//! Inputs are validated before any byte is written. Wire-format details are
//! defined in `layout`.
//!
pub mod discovery;
pub mod dmp;
pub mod error;
pub mod framing;
pub mod layout;
pub mod packet;
pub mod pdu;
pub mod root;
pub mod writer;

pub use packet::SacnEncoder;
