use super::error::ValidationError;
use super::layout;
use super::pdu::{Pdu, flags_and_length, write_pdu};
use super::writer::SacnWriter;

/// Root layer vector, selecting how receivers interpret the framing layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootVector {
    /// Framing layer carries DMX data.
    Data,
    /// Framing layer carries a sync or discovery message.
    Extended,
}

impl RootVector {
    pub fn value(self) -> u32 {
        match self {
            RootVector::Data => layout::ROOT_VECTOR_DATA,
            RootVector::Extended => layout::ROOT_VECTOR_EXTENDED,
        }
    }
}

/// ACN root layer PDU wrapping one framing layer.
pub struct RootLayer<'a, P> {
    pub vector: RootVector,
    pub cid: &'a [u8; layout::CID_LEN],
    pub framing: P,
}

impl<P: Pdu> Pdu for RootLayer<'_, P> {
    fn body_len(&self) -> usize {
        layout::ROOT_BODY_LEN + self.framing.pdu_len()
    }

    fn write_body(&self, writer: &mut SacnWriter) -> Result<(), ValidationError> {
        writer.write_u32_be(self.vector.value());
        writer.write_slice(self.cid);
        write_pdu(writer, &self.framing)
    }
}

/// Serializes the preamble and the full PDU tree below `root`.
///
/// The root length is checked before any byte is written; nested layers are
/// always shorter than the root, so they cannot overflow once it fits.
pub fn encode_packet<P: Pdu>(root: &RootLayer<'_, P>) -> Result<Vec<u8>, ValidationError> {
    flags_and_length(root.pdu_len())?;

    let mut writer = SacnWriter::with_capacity(layout::PREAMBLE_LEN + root.pdu_len());
    writer.write_u16_be(layout::PREAMBLE_SIZE);
    writer.write_u16_be(layout::POSTAMBLE_SIZE);
    writer.write_slice(layout::ACN_PID);
    write_pdu(&mut writer, root)?;
    Ok(writer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::{RootLayer, RootVector, encode_packet};
    use crate::protocols::sacn::error::ValidationError;
    use crate::protocols::sacn::layout;
    use crate::protocols::sacn::pdu::Pdu;
    use crate::protocols::sacn::writer::SacnWriter;

    struct Opaque(usize);

    impl Pdu for Opaque {
        fn body_len(&self) -> usize {
            self.0
        }

        fn write_body(&self, writer: &mut SacnWriter) -> Result<(), ValidationError> {
            writer.write_zeros(self.0);
            Ok(())
        }
    }

    const CID: [u8; 16] = [
        0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee,
        0xff,
    ];

    #[test]
    fn root_header_fields() {
        let root = RootLayer {
            vector: RootVector::Extended,
            cid: &CID,
            framing: Opaque(0),
        };
        let bytes = encode_packet(&root).unwrap();

        // Empty framing still carries its own 2-byte length field.
        assert_eq!(bytes.len(), layout::ROOT_FIXED_LEN + 2);
        assert_eq!(&bytes[layout::PREAMBLE_SIZE_RANGE], &[0x00, 0x10]);
        assert_eq!(&bytes[layout::POSTAMBLE_SIZE_RANGE], &[0x00, 0x00]);
        assert_eq!(&bytes[layout::ACN_PID_RANGE], layout::ACN_PID);
        assert_eq!(&bytes[layout::ROOT_FLAGS_LENGTH_RANGE], &[0x70, 24]);
        assert_eq!(&bytes[layout::ROOT_VECTOR_RANGE], &[0, 0, 0, 8]);
        assert_eq!(&bytes[layout::CID_RANGE], &CID);
    }

    #[test]
    fn data_vector_value() {
        assert_eq!(RootVector::Data.value(), 4);
        assert_eq!(RootVector::Extended.value(), 8);
    }

    #[test]
    fn root_rejects_length_overflow() {
        let root = RootLayer {
            vector: RootVector::Data,
            cid: &CID,
            framing: Opaque(4096),
        };
        let err = encode_packet(&root).unwrap_err();
        assert!(matches!(err, ValidationError::LengthOverflow { .. }));
    }
}
