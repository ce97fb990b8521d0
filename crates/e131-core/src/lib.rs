//! E1.31 (sACN) packet encoder.
//!
//! This crate turns lighting-control state into byte-exact Streaming ACN
//! packets: DMX data, universe synchronization and universe discovery.
//! Encoding is byte-oriented and side-effect free; sockets, retransmission
//! and sequence bookkeeping belong to the caller. The only I/O lives in
//! `capture`, which writes encoded packets to a pcapng file.
//!
//! Invariants:
//! - Every Flags-and-Length field is `0x7000 | length`, where length counts
//!   from that field to the end of its own layer.
//! - Invalid input is rejected before any byte is written; no partial
//!   packet is ever returned.
//! - The same inputs and identity always produce the same bytes.
//!
//! References (normative):
//! - ANSI E1.31-2018, Entertainment Technology - Lightweight streaming
//!   protocol for transport of DMX512 using ACN
//!
//! Version française (résumé):
//! Cette crate encode des paquets sACN (données DMX, synchronisation,
//! découverte d'univers) octet par octet, sans E/S. Les champs de longueur
//! sont relatifs à leur propre couche ; toute entrée invalide est rejetée
//! avant l'écriture du premier octet.
//!
//! # Examples
//! ```
//! use e131_core::{DataOptions, SacnEncoder, SourceIdentity, Universe};
//!
//! let encoder = SacnEncoder::new(SourceIdentity::default());
//! let universe = Universe::from_slots(1, &[0x80; 512])?;
//! let packet = encoder.data_packet(0, 1, DataOptions::default(), &universe)?;
//! // Send `packet` to universe.multicast_addr() with any UDP socket.
//! assert_eq!(packet.len(), 638);
//! # Ok::<(), e131_core::ValidationError>(())
//! ```

mod capture;
mod identity;
mod protocols;
mod universe;

pub use capture::{Capture, CaptureError, udp_frame};
pub use identity::config::parse_cid;
pub use identity::{
    ConfigError, IdentityConfig, Priority, SharedIdentity, SourceIdentity, SourceName,
};
pub use protocols::sacn::discovery::DiscoveryPage;
pub use protocols::sacn::error::ValidationError;
pub use protocols::sacn::framing::DataOptions;
pub use protocols::sacn::layout::{
    ACN_SDT_MULTICAST_PORT, DATA_PACKET_LEN, DISCOVERY_UNIVERSE, DISCOVERY_UNIVERSES_PER_PAGE,
    DMX_MAX_SLOTS, SYNC_PACKET_LEN, UNIVERSE_MAX, UNIVERSE_MIN,
};
pub use protocols::sacn::SacnEncoder;
pub use protocols::sacn::layout;
pub use universe::{Universe, multicast_addr};
pub use uuid::Uuid;
