use thiserror::Error;

/// Errors returned when an input cannot be encoded as an sACN packet.
///
/// Every check runs before the first byte is written, so a failed call never
/// yields a partial packet.
///
/// # Examples
/// ```
/// use e131_core::ValidationError;
///
/// let err = ValidationError::InvalidUniverse { value: 0 };
/// assert!(err.to_string().contains("invalid universe"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("source name must not be empty")]
    SourceNameEmpty,
    #[error("source name too long: {len} bytes, max 63")]
    SourceNameTooLong { len: usize },
    #[error("source name must not contain NUL bytes")]
    SourceNameContainsNul,
    #[error("priority out of range: {value} (expected 0-200)")]
    PriorityOutOfRange { value: i32 },
    #[error("invalid slot count: {count} (expected 512)")]
    InvalidSlotCount { count: usize },
    #[error("invalid channel: {channel} (expected 1-512)")]
    InvalidChannel { channel: u16 },
    #[error("invalid universe: {value} (expected 1-63999)")]
    InvalidUniverse { value: u16 },
    #[error("invalid synchronization address: {value}")]
    InvalidSyncAddress { value: u16 },
    #[error("too many universes for one discovery page: {count}, max {max}")]
    TooManyUniverses { count: usize, max: usize },
    #[error("invalid discovery page: page {page} after last page {last_page}")]
    InvalidPage { page: u8, last_page: u8 },
    #[error("reserved option bits set: {value:#04x}")]
    ReservedOptionBits { value: u8 },
    #[error("PDU length {length} does not fit the 12-bit length field")]
    LengthOverflow { length: usize },
    #[error("invalid CID: {value}")]
    InvalidCid { value: String },
}
