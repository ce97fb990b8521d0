use super::discovery::{DiscoveryPage, UniverseDiscoveryLayer, check_page_len, normalize_universes};
use super::dmp::DmpLayer;
use super::error::ValidationError;
use super::framing::{DataFraming, DataOptions, DiscoveryFraming, SyncFraming};
use super::layout;
use super::root::{RootLayer, RootVector, encode_packet};
use crate::identity::{SharedIdentity, SourceIdentity};
use crate::universe::{Universe, validate_sync_address, validate_universe};

/// Assembles complete E1.31 packets for one source identity.
///
/// Every method is a pure function of its arguments and the identity at the
/// time of the call; sequence numbering is left to the caller.
///
/// # Examples
/// ```
/// use e131_core::{DataOptions, SacnEncoder, SourceIdentity, Universe};
///
/// let encoder = SacnEncoder::new(SourceIdentity::default());
/// let mut universe = Universe::new(1)?;
/// universe.set_channel(1, 255)?;
///
/// let packet = encoder.data_packet(0, 0, DataOptions::default(), &universe)?;
/// assert_eq!(packet.len(), 638);
/// # Ok::<(), e131_core::ValidationError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct SacnEncoder {
    identity: SharedIdentity,
}

impl SacnEncoder {
    pub fn new(identity: SourceIdentity) -> Self {
        Self::with_shared(SharedIdentity::new(identity))
    }

    pub fn with_shared(identity: SharedIdentity) -> Self {
        Self { identity }
    }

    pub fn identity(&self) -> &SharedIdentity {
        &self.identity
    }

    /// Encodes one universe of DMX data (638 bytes).
    pub fn data_packet(
        &self,
        sync_address: u16,
        sequence: u8,
        options: DataOptions,
        universe: &Universe,
    ) -> Result<Vec<u8>, ValidationError> {
        validate_universe(universe.number())
            .and_then(|()| validate_sync_address(sync_address))
            .inspect_err(|err| tracing::debug!(error = %err, "rejected data packet"))?;

        let identity = self.identity.read();
        let root = RootLayer {
            vector: RootVector::Data,
            cid: identity.cid_bytes(),
            framing: DataFraming {
                source_name: identity.source_name().field(),
                priority: identity.priority().value(),
                sync_address,
                sequence,
                options,
                universe: universe.number(),
                dmp: DmpLayer {
                    start_code: universe.start_code(),
                    slots: universe.slots(),
                },
            },
        };
        let packet = encode_packet(&root)?;
        tracing::trace!(
            universe = universe.number(),
            sequence,
            len = packet.len(),
            "encoded data packet"
        );
        Ok(packet)
    }

    /// Encodes a synchronization packet (49 bytes).
    ///
    /// The packet is sent on its synchronization universe, so 0 is not a
    /// valid address here.
    pub fn sync_packet(&self, sync_address: u16, sequence: u8) -> Result<Vec<u8>, ValidationError> {
        validate_universe(sync_address)
            .map_err(|_| ValidationError::InvalidSyncAddress {
                value: sync_address,
            })
            .inspect_err(|err| tracing::debug!(error = %err, "rejected sync packet"))?;

        let identity = self.identity.read();
        let root = RootLayer {
            vector: RootVector::Extended,
            cid: identity.cid_bytes(),
            framing: SyncFraming {
                sequence,
                sync_address,
            },
        };
        let packet = encode_packet(&root)?;
        tracing::trace!(sync_address, sequence, "encoded sync packet");
        Ok(packet)
    }

    /// Encodes a single-page universe discovery packet.
    ///
    /// The list is validated, sorted ascending and deduplicated; more than
    /// 512 distinct universes is an error, see [`Self::discovery_packets`].
    pub fn discovery_packet(&self, universes: &[u16]) -> Result<Vec<u8>, ValidationError> {
        let universes = normalize_universes(universes)
            .and_then(|list| check_page_len(list.len()).map(|()| list))
            .inspect_err(|err| tracing::debug!(error = %err, "rejected discovery packet"))?;
        self.encode_discovery(&universes, DiscoveryPage::SINGLE)
    }

    /// Encodes one page of a paginated discovery advertisement.
    ///
    /// `universes` is the content of this page only; it is normalized the
    /// same way as [`Self::discovery_packet`].
    pub fn discovery_packet_page(
        &self,
        universes: &[u16],
        page: DiscoveryPage,
    ) -> Result<Vec<u8>, ValidationError> {
        let universes = normalize_universes(universes)
            .and_then(|list| check_page_len(list.len()).map(|()| list))
            .inspect_err(|err| tracing::debug!(error = %err, "rejected discovery page"))?;
        self.encode_discovery(&universes, page)
    }

    /// Splits the full advertised list into as many discovery pages as
    /// needed. An empty list yields one empty page.
    pub fn discovery_packets(&self, universes: &[u16]) -> Result<Vec<Vec<u8>>, ValidationError> {
        let universes = normalize_universes(universes)
            .inspect_err(|err| tracing::debug!(error = %err, "rejected discovery list"))?;
        if universes.is_empty() {
            return Ok(vec![self.encode_discovery(&[], DiscoveryPage::SINGLE)?]);
        }

        let pages: Vec<&[u16]> = universes
            .chunks(layout::DISCOVERY_UNIVERSES_PER_PAGE)
            .collect();
        // At most 63999 / 512 + 1 pages, always below 256.
        let last_page = (pages.len() - 1) as u8;
        pages
            .iter()
            .enumerate()
            .map(|(index, chunk)| {
                let page = DiscoveryPage::new(index as u8, last_page)?;
                self.encode_discovery(chunk, page)
            })
            .collect()
    }

    fn encode_discovery(
        &self,
        universes: &[u16],
        page: DiscoveryPage,
    ) -> Result<Vec<u8>, ValidationError> {
        let identity = self.identity.read();
        let root = RootLayer {
            vector: RootVector::Extended,
            cid: identity.cid_bytes(),
            framing: DiscoveryFraming {
                source_name: identity.source_name().field(),
                discovery: UniverseDiscoveryLayer { page, universes },
            },
        };
        let packet = encode_packet(&root)?;
        tracing::trace!(
            count = universes.len(),
            page = page.page(),
            last_page = page.last_page(),
            "encoded discovery packet"
        );
        Ok(packet)
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::SacnEncoder;
    use crate::identity::{Priority, SourceIdentity, SourceName};
    use crate::protocols::sacn::discovery::DiscoveryPage;
    use crate::protocols::sacn::error::ValidationError;
    use crate::protocols::sacn::framing::DataOptions;
    use crate::protocols::sacn::layout;
    use crate::universe::Universe;

    fn cid() -> Uuid {
        Uuid::from_bytes([
            0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d,
            0x0e, 0x0f,
        ])
    }

    fn encoder() -> SacnEncoder {
        SacnEncoder::new(SourceIdentity::new(
            cid(),
            SourceName::new("Source_A").unwrap(),
            Priority::new(100).unwrap(),
        ))
    }

    fn flags_length(bytes: &[u8], range: std::ops::Range<usize>) -> (u16, usize) {
        let raw = u16::from_be_bytes([bytes[range.start], bytes[range.start + 1]]);
        (raw & 0xF000, usize::from(raw & layout::PDU_LENGTH_MASK))
    }

    #[test]
    fn data_packet_fields() {
        let mut universe = Universe::new(1).unwrap();
        universe.set_channel(1, 0xff).unwrap();
        universe.set_channel(512, 0x80).unwrap();
        let options = DataOptions {
            preview_data: true,
            ..DataOptions::default()
        };

        let bytes = encoder().data_packet(7962, 154, options, &universe).unwrap();

        assert_eq!(bytes.len(), layout::DATA_PACKET_LEN);
        assert_eq!(&bytes[layout::ROOT_VECTOR_RANGE], &[0, 0, 0, 4]);
        assert_eq!(&bytes[layout::CID_RANGE], cid().as_bytes());
        assert_eq!(&bytes[layout::FRAMING_VECTOR_RANGE], &[0, 0, 0, 2]);
        assert_eq!(&bytes[44..52], b"Source_A");
        assert!(bytes[52..108].iter().all(|b| *b == 0));
        assert_eq!(bytes[layout::PRIORITY_OFFSET], 100);
        assert_eq!(&bytes[layout::SYNC_ADDRESS_RANGE], &7962u16.to_be_bytes());
        assert_eq!(bytes[layout::SEQUENCE_OFFSET], 154);
        assert_eq!(bytes[layout::OPTIONS_OFFSET], 0x80);
        assert_eq!(&bytes[layout::UNIVERSE_RANGE], &[0, 1]);
        assert_eq!(bytes[layout::DMP_VECTOR_OFFSET], 0x02);
        assert_eq!(bytes[layout::DMP_ADDRESS_TYPE_OFFSET], 0xa1);
        assert_eq!(&bytes[layout::DMP_FIRST_PROPERTY_ADDRESS_RANGE], &[0, 0]);
        assert_eq!(&bytes[layout::DMP_ADDRESS_INCREMENT_RANGE], &[0, 1]);
        assert_eq!(&bytes[layout::DMP_PROPERTY_VALUE_COUNT_RANGE], &[0x02, 0x01]);
        assert_eq!(bytes[layout::START_CODE_OFFSET], 0x00);
        assert_eq!(bytes[layout::DMX_DATA_OFFSET], 0xff);
        assert_eq!(bytes[637], 0x80);
    }

    #[test]
    fn data_packet_lengths_count_from_own_field() {
        let universe = Universe::new(1).unwrap();
        let bytes = encoder()
            .data_packet(0, 0, DataOptions::default(), &universe)
            .unwrap();

        for range in [
            layout::ROOT_FLAGS_LENGTH_RANGE,
            layout::FRAMING_FLAGS_LENGTH_RANGE,
            layout::DMP_FLAGS_LENGTH_RANGE,
        ] {
            let (flags, length) = flags_length(&bytes, range.clone());
            assert_eq!(flags, 0x7000);
            assert_eq!(length, bytes.len() - range.start);
        }
        assert_eq!(flags_length(&bytes, layout::ROOT_FLAGS_LENGTH_RANGE).1, 622);
        assert_eq!(flags_length(&bytes, layout::FRAMING_FLAGS_LENGTH_RANGE).1, 600);
        assert_eq!(flags_length(&bytes, layout::DMP_FLAGS_LENGTH_RANGE).1, 523);
    }

    #[test]
    fn data_packet_is_deterministic() {
        let universe = Universe::from_slots(9, &[0x42; 512]).unwrap();
        let encoder = encoder();
        let first = encoder
            .data_packet(3, 17, DataOptions::default(), &universe)
            .unwrap();
        let second = encoder
            .data_packet(3, 17, DataOptions::default(), &universe)
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn data_packet_rejects_bad_sync_address() {
        let universe = Universe::new(1).unwrap();
        let err = encoder()
            .data_packet(64000, 0, DataOptions::default(), &universe)
            .unwrap_err();
        assert_eq!(err, ValidationError::InvalidSyncAddress { value: 64000 });
    }

    #[test]
    fn identity_changes_apply_to_next_packet() {
        let encoder = encoder();
        let universe = Universe::new(1).unwrap();
        encoder.identity().set_priority(200).unwrap();
        encoder.identity().set_source_name("B").unwrap();
        let bytes = encoder
            .data_packet(0, 0, DataOptions::default(), &universe)
            .unwrap();
        assert_eq!(bytes[layout::PRIORITY_OFFSET], 200);
        assert_eq!(bytes[44], b'B');
        assert_eq!(bytes[45], 0);
    }

    #[test]
    fn sync_packet_layout() {
        let bytes = encoder().sync_packet(7, 42).unwrap();
        assert_eq!(bytes.len(), layout::SYNC_PACKET_LEN);
        assert_eq!(bytes.len(), 49);
        assert_eq!(&bytes[layout::ROOT_VECTOR_RANGE], &[0, 0, 0, 8]);
        assert_eq!(flags_length(&bytes, layout::ROOT_FLAGS_LENGTH_RANGE).1, 33);
        assert_eq!(flags_length(&bytes, layout::FRAMING_FLAGS_LENGTH_RANGE).1, 11);
        assert_eq!(&bytes[layout::FRAMING_VECTOR_RANGE], &[0, 0, 0, 1]);
        assert_eq!(bytes[layout::SYNC_SEQUENCE_OFFSET], 42);
        assert_eq!(&bytes[layout::SYNC_SYNC_ADDRESS_RANGE], &[0, 7]);
        assert_eq!(&bytes[layout::SYNC_RESERVED_RANGE], &[0, 0]);
    }

    #[test]
    fn sync_packet_rejects_discovery_universe() {
        assert!(encoder().sync_packet(layout::DISCOVERY_UNIVERSE, 0).is_err());
    }

    #[test]
    fn sync_packet_requires_a_universe() {
        assert_eq!(
            encoder().sync_packet(0, 1).unwrap_err(),
            ValidationError::InvalidSyncAddress { value: 0 }
        );
        assert!(encoder().sync_packet(1, 1).is_ok());
        assert!(encoder().sync_packet(63999, 1).is_ok());
    }

    #[test]
    fn data_packet_allows_unsynchronized() {
        let universe = Universe::new(1).unwrap();
        let bytes = encoder()
            .data_packet(0, 0, DataOptions::default(), &universe)
            .unwrap();
        assert_eq!(&bytes[layout::SYNC_ADDRESS_RANGE], &[0, 0]);
    }

    #[test]
    fn discovery_packet_sorts_universes() {
        let bytes = encoder().discovery_packet(&[5, 1, 3]).unwrap();
        assert_eq!(bytes.len(), layout::DISCOVERY_PACKET_MIN_LEN + 6);
        assert_eq!(&bytes[layout::ROOT_VECTOR_RANGE], &[0, 0, 0, 8]);
        assert_eq!(&bytes[layout::FRAMING_VECTOR_RANGE], &[0, 0, 0, 2]);
        assert_eq!(&bytes[layout::DISCOVERY_RESERVED_RANGE], &[0, 0, 0, 0]);
        assert_eq!(&bytes[layout::UDL_VECTOR_RANGE], &[0, 0, 0, 1]);
        assert_eq!(bytes[layout::UDL_PAGE_OFFSET], 0);
        assert_eq!(bytes[layout::UDL_LAST_PAGE_OFFSET], 0);
        assert_eq!(
            &bytes[layout::UDL_UNIVERSES_OFFSET..],
            &[0, 1, 0, 3, 0, 5]
        );

        for range in [
            layout::ROOT_FLAGS_LENGTH_RANGE,
            layout::FRAMING_FLAGS_LENGTH_RANGE,
            layout::UDL_FLAGS_LENGTH_RANGE,
        ] {
            let (_, length) = flags_length(&bytes, range.clone());
            assert_eq!(length, bytes.len() - range.start);
        }
    }

    #[test]
    fn discovery_packet_rejects_second_page() {
        let universes: Vec<u16> = (1..=513).collect();
        let err = encoder().discovery_packet(&universes).unwrap_err();
        assert_eq!(err, ValidationError::TooManyUniverses {
            count: 513,
            max: 512
        });

        let full: Vec<u16> = (1..=512).collect();
        let bytes = encoder().discovery_packet(&full).unwrap();
        assert_eq!(bytes.len(), layout::DISCOVERY_PACKET_MIN_LEN + 1024);
    }

    #[test]
    fn discovery_packet_rejects_invalid_universe() {
        let err = encoder().discovery_packet(&[1, 0]).unwrap_err();
        assert_eq!(err, ValidationError::InvalidUniverse { value: 0 });
    }

    #[test]
    fn discovery_page_carries_page_numbers() {
        let page = DiscoveryPage::new(2, 4).unwrap();
        let bytes = encoder().discovery_packet_page(&[10, 2], page).unwrap();
        assert_eq!(bytes[layout::UDL_PAGE_OFFSET], 2);
        assert_eq!(bytes[layout::UDL_LAST_PAGE_OFFSET], 4);
        assert_eq!(&bytes[layout::UDL_UNIVERSES_OFFSET..], &[0, 2, 0, 10]);
    }

    #[test]
    fn discovery_packets_paginate() {
        let universes: Vec<u16> = (1..=1100).rev().collect();
        let packets = encoder().discovery_packets(&universes).unwrap();
        assert_eq!(packets.len(), 3);

        let counts: Vec<usize> = packets
            .iter()
            .map(|p| (p.len() - layout::DISCOVERY_PACKET_MIN_LEN) / 2)
            .collect();
        assert_eq!(counts, vec![512, 512, 76]);
        for (index, packet) in packets.iter().enumerate() {
            assert_eq!(packet[layout::UDL_PAGE_OFFSET], index as u8);
            assert_eq!(packet[layout::UDL_LAST_PAGE_OFFSET], 2);
        }
        // Second page starts where the first ended.
        assert_eq!(
            &packets[1][layout::UDL_UNIVERSES_OFFSET..layout::UDL_UNIVERSES_OFFSET + 2],
            &513u16.to_be_bytes()
        );
    }

    #[test]
    fn discovery_packets_empty_list() {
        let packets = encoder().discovery_packets(&[]).unwrap();
        assert_eq!(packets.len(), 1);
        assert_eq!(packets[0].len(), layout::DISCOVERY_PACKET_MIN_LEN);
    }
}
