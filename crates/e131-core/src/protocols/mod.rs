//! Protocol encoding modules.
//!
//! Each protocol follows a layered structure:
//! - `layout`: byte offsets, lengths and constants (source of truth)
//! - `writer`: byte emission in network order
//! - `pdu`: length accounting shared by nested layers
//! - one module per layer, plus `packet` to assemble them
//! - `error`: explicit, actionable errors
//!
//! Encoders are pure and contain no I/O; transport is left to the caller.

pub mod sacn;
