//! Offline capture of encoded packets.
//!
//! Packets are wrapped in Ethernet/IPv4/UDP frames addressed to their
//! multicast group and written as pcapng, so the codec output can be
//! inspected with standard tools without opening a socket.

pub mod error;
pub mod pcapng;

use std::fs;
use std::net::{Ipv4Addr, SocketAddrV4};
use std::path::Path;

use etherparse::PacketBuilder;

pub use error::CaptureError;

/// Locally administered MAC used as the frame source.
pub const SOURCE_MAC: [u8; 6] = [0x02, 0x00, 0x00, 0x00, 0x00, 0x01];
pub const MULTICAST_TTL: u8 = 64;

/// Ethernet address an IPv4 multicast group maps to.
pub fn multicast_mac(group: Ipv4Addr) -> [u8; 6] {
    let [_, b, c, d] = group.octets();
    [0x01, 0x00, 0x5e, b & 0x7f, c, d]
}

/// Builds one Ethernet II frame carrying `payload` over UDP.
pub fn udp_frame(
    source: SocketAddrV4,
    destination: SocketAddrV4,
    payload: &[u8],
) -> Result<Vec<u8>, CaptureError> {
    let builder = PacketBuilder::ethernet2(SOURCE_MAC, multicast_mac(*destination.ip()))
        .ipv4(
            source.ip().octets(),
            destination.ip().octets(),
            MULTICAST_TTL,
        )
        .udp(source.port(), destination.port());
    let mut frame = Vec::with_capacity(builder.size(payload.len()));
    builder
        .write(&mut frame, payload)
        .map_err(|e| CaptureError::Build(e.to_string()))?;
    Ok(frame)
}

/// In-memory capture, written in one go.
///
/// # Examples
/// ```
/// use std::net::{Ipv4Addr, SocketAddrV4};
///
/// use e131_core::{Capture, multicast_addr};
///
/// let mut capture = Capture::new(SocketAddrV4::new(Ipv4Addr::new(10, 0, 0, 1), 5568));
/// capture.push(0, multicast_addr(1), &[0u8; 16])?;
/// assert_eq!(capture.len(), 1);
/// # Ok::<(), e131_core::CaptureError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Capture {
    source: SocketAddrV4,
    frames: Vec<(u64, Vec<u8>)>,
}

impl Capture {
    pub fn new(source: SocketAddrV4) -> Self {
        Self {
            source,
            frames: Vec::new(),
        }
    }

    /// Appends one packet sent at `ts_us` (microseconds since the epoch).
    pub fn push(
        &mut self,
        ts_us: u64,
        destination: SocketAddrV4,
        payload: &[u8],
    ) -> Result<(), CaptureError> {
        let frame = udp_frame(self.source, destination, payload)?;
        if frame.len() > pcapng::SNAP_LEN as usize {
            return Err(CaptureError::FrameTooLarge { len: frame.len() });
        }
        tracing::trace!(%destination, len = frame.len(), "captured frame");
        self.frames.push((ts_us, frame));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn to_pcapng(&self) -> Vec<u8> {
        let mut output = Vec::new();
        output.extend_from_slice(&pcapng::block(
            pcapng::BLOCK_SECTION_HEADER,
            &pcapng::section_header_body(),
        ));
        output.extend_from_slice(&pcapng::block(
            pcapng::BLOCK_INTERFACE_DESCRIPTION,
            &pcapng::interface_description_body(),
        ));
        for (ts_us, frame) in &self.frames {
            output.extend_from_slice(&pcapng::block(
                pcapng::BLOCK_ENHANCED_PACKET,
                &pcapng::enhanced_packet_body(*ts_us, frame),
            ));
        }
        output
    }

    pub fn write_pcapng(&self, path: &Path) -> Result<(), CaptureError> {
        fs::write(path, self.to_pcapng()).map_err(|source| CaptureError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), frames = self.frames.len(), "capture written");
        Ok(())
    }
}
