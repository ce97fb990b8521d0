use super::error::ValidationError;
use super::layout;
use super::pdu::Pdu;
use super::writer::SacnWriter;

/// DMP "set property" PDU carrying a start code and one full universe.
pub struct DmpLayer<'a> {
    pub start_code: u8,
    pub slots: &'a [u8; layout::DMX_MAX_SLOTS],
}

impl Pdu for DmpLayer<'_> {
    fn body_len(&self) -> usize {
        layout::DMP_BODY_LEN
    }

    fn write_body(&self, writer: &mut SacnWriter) -> Result<(), ValidationError> {
        writer.write_u8(layout::DMP_VECTOR_SET_PROPERTY);
        writer.write_u8(layout::DMP_ADDRESS_TYPE_DATA_TYPE);
        writer.write_u16_be(layout::DMP_FIRST_PROPERTY_ADDRESS);
        writer.write_u16_be(layout::DMP_ADDRESS_INCREMENT);
        writer.write_u16_be(layout::DMP_PROPERTY_VALUE_COUNT);
        writer.write_u8(self.start_code);
        writer.write_slice(self.slots);
        Ok(())
    }
}
