//! Flags-and-Length accounting shared by every layer.
//!
//! A layer's length field counts from the first byte of the field itself to
//! the end of the layer, nested layers included. Layers report only the
//! bytes that follow their own field (`body_len`); `pdu_len` adds the field
//! back, so an outer layer can size itself from its child's `pdu_len`.

use super::error::ValidationError;
use super::layout;
use super::writer::SacnWriter;

pub trait Pdu {
    /// Bytes following this layer's Flags-and-Length field.
    fn body_len(&self) -> usize;

    /// Emits everything after the Flags-and-Length field.
    fn write_body(&self, writer: &mut SacnWriter) -> Result<(), ValidationError>;

    fn pdu_len(&self) -> usize {
        layout::FLAGS_AND_LENGTH_LEN + self.body_len()
    }
}

/// Packs a PDU length into the Flags-and-Length field value.
pub fn flags_and_length(pdu_len: usize) -> Result<u16, ValidationError> {
    if pdu_len > usize::from(layout::PDU_LENGTH_MASK) {
        return Err(ValidationError::LengthOverflow { length: pdu_len });
    }
    Ok(layout::PDU_FLAGS | pdu_len as u16)
}

pub fn write_pdu<P: Pdu + ?Sized>(writer: &mut SacnWriter, pdu: &P) -> Result<(), ValidationError> {
    writer.write_u16_be(flags_and_length(pdu.pdu_len())?);
    let start = writer.position();
    pdu.write_body(writer)?;
    debug_assert_eq!(writer.position() - start, pdu.body_len());
    Ok(())
}
