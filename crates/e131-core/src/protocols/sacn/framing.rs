//! E1.31 framing layer variants.
//!
//! Each variant wraps its payload layer (if any) and sizes itself from the
//! payload's own PDU length.

use super::error::ValidationError;
use super::layout;
use super::pdu::{Pdu, write_pdu};
use super::writer::SacnWriter;

/// Options byte of a data packet.
///
/// # Examples
/// ```
/// use e131_core::DataOptions;
///
/// let options = DataOptions {
///     stream_terminated: true,
///     ..DataOptions::default()
/// };
/// assert_eq!(options.bits(), 0x40);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DataOptions {
    /// Data is intended for visualisers, not live output.
    pub preview_data: bool,
    /// Source is ceasing transmission on this universe.
    pub stream_terminated: bool,
    /// Receivers keep processing data after sync packets stop arriving.
    pub force_synchronization: bool,
}

impl DataOptions {
    pub fn bits(self) -> u8 {
        let mut bits = 0;
        if self.preview_data {
            bits |= layout::OPTION_PREVIEW_DATA;
        }
        if self.stream_terminated {
            bits |= layout::OPTION_STREAM_TERMINATED;
        }
        if self.force_synchronization {
            bits |= layout::OPTION_FORCE_SYNCHRONIZATION;
        }
        bits
    }

    /// Decodes a raw options byte; reserved bits must be zero.
    pub fn from_bits(value: u8) -> Result<Self, ValidationError> {
        if value & layout::OPTION_RESERVED_MASK != 0 {
            return Err(ValidationError::ReservedOptionBits { value });
        }
        Ok(Self {
            preview_data: value & layout::OPTION_PREVIEW_DATA != 0,
            stream_terminated: value & layout::OPTION_STREAM_TERMINATED != 0,
            force_synchronization: value & layout::OPTION_FORCE_SYNCHRONIZATION != 0,
        })
    }
}

pub struct DataFraming<'a, P> {
    pub source_name: &'a [u8; layout::SOURCE_NAME_LEN],
    pub priority: u8,
    pub sync_address: u16,
    pub sequence: u8,
    pub options: DataOptions,
    pub universe: u16,
    pub dmp: P,
}

impl<P: Pdu> Pdu for DataFraming<'_, P> {
    fn body_len(&self) -> usize {
        layout::DATA_FRAMING_BODY_LEN + self.dmp.pdu_len()
    }

    fn write_body(&self, writer: &mut SacnWriter) -> Result<(), ValidationError> {
        writer.write_u32_be(layout::FRAMING_VECTOR_DMX);
        writer.write_slice(self.source_name);
        writer.write_u8(self.priority);
        writer.write_u16_be(self.sync_address);
        writer.write_u8(self.sequence);
        writer.write_u8(self.options.bits());
        writer.write_u16_be(self.universe);
        write_pdu(writer, &self.dmp)
    }
}

pub struct SyncFraming {
    pub sequence: u8,
    pub sync_address: u16,
}

impl Pdu for SyncFraming {
    fn body_len(&self) -> usize {
        layout::SYNC_FRAMING_BODY_LEN
    }

    fn write_body(&self, writer: &mut SacnWriter) -> Result<(), ValidationError> {
        writer.write_u32_be(layout::FRAMING_VECTOR_SYNC);
        writer.write_u8(self.sequence);
        writer.write_u16_be(self.sync_address);
        writer.write_zeros(layout::SYNC_RESERVED_RANGE.len());
        Ok(())
    }
}

pub struct DiscoveryFraming<'a, P> {
    pub source_name: &'a [u8; layout::SOURCE_NAME_LEN],
    pub discovery: P,
}

impl<P: Pdu> Pdu for DiscoveryFraming<'_, P> {
    fn body_len(&self) -> usize {
        layout::DISCOVERY_FRAMING_BODY_LEN + self.discovery.pdu_len()
    }

    fn write_body(&self, writer: &mut SacnWriter) -> Result<(), ValidationError> {
        writer.write_u32_be(layout::FRAMING_VECTOR_DISCOVERY);
        writer.write_slice(self.source_name);
        writer.write_zeros(layout::DISCOVERY_RESERVED_RANGE.len());
        write_pdu(writer, &self.discovery)
    }
}
