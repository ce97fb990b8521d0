// Root layer (shared by every packet kind).
pub const PREAMBLE_SIZE_RANGE: std::ops::Range<usize> = 0..2;
pub const POSTAMBLE_SIZE_RANGE: std::ops::Range<usize> = 2..4;
pub const ACN_PID_RANGE: std::ops::Range<usize> = 4..16;
pub const ROOT_FLAGS_LENGTH_RANGE: std::ops::Range<usize> = 16..18;
pub const ROOT_VECTOR_RANGE: std::ops::Range<usize> = 18..22;
pub const CID_RANGE: std::ops::Range<usize> = 22..38;

// Framing layer, data variant.
pub const FRAMING_FLAGS_LENGTH_RANGE: std::ops::Range<usize> = 38..40;
pub const FRAMING_VECTOR_RANGE: std::ops::Range<usize> = 40..44;
pub const SOURCE_NAME_RANGE: std::ops::Range<usize> = 44..108;
pub const PRIORITY_OFFSET: usize = 108;
pub const SYNC_ADDRESS_RANGE: std::ops::Range<usize> = 109..111;
pub const SEQUENCE_OFFSET: usize = 111;
pub const OPTIONS_OFFSET: usize = 112;
pub const UNIVERSE_RANGE: std::ops::Range<usize> = 113..115;

// DMP layer.
pub const DMP_FLAGS_LENGTH_RANGE: std::ops::Range<usize> = 115..117;
pub const DMP_VECTOR_OFFSET: usize = 117;
pub const DMP_ADDRESS_TYPE_OFFSET: usize = 118;
pub const DMP_FIRST_PROPERTY_ADDRESS_RANGE: std::ops::Range<usize> = 119..121;
pub const DMP_ADDRESS_INCREMENT_RANGE: std::ops::Range<usize> = 121..123;
pub const DMP_PROPERTY_VALUE_COUNT_RANGE: std::ops::Range<usize> = 123..125;
pub const START_CODE_OFFSET: usize = 125;
pub const DMX_DATA_OFFSET: usize = 126;

// Framing layer, sync variant.
pub const SYNC_SEQUENCE_OFFSET: usize = 44;
pub const SYNC_SYNC_ADDRESS_RANGE: std::ops::Range<usize> = 45..47;
pub const SYNC_RESERVED_RANGE: std::ops::Range<usize> = 47..49;

// Framing and discovery layers, discovery variant.
pub const DISCOVERY_RESERVED_RANGE: std::ops::Range<usize> = 108..112;
pub const UDL_FLAGS_LENGTH_RANGE: std::ops::Range<usize> = 112..114;
pub const UDL_VECTOR_RANGE: std::ops::Range<usize> = 114..118;
pub const UDL_PAGE_OFFSET: usize = 118;
pub const UDL_LAST_PAGE_OFFSET: usize = 119;
pub const UDL_UNIVERSES_OFFSET: usize = 120;

pub const ACN_PID: &[u8; 12] = b"ASC-E1.17\0\0\0";
pub const PREAMBLE_SIZE: u16 = 0x0010;
pub const POSTAMBLE_SIZE: u16 = 0x0000;

pub const PDU_FLAGS: u16 = 0x7000;
pub const PDU_LENGTH_MASK: u16 = 0x0FFF;
pub const FLAGS_AND_LENGTH_LEN: usize = 2;

pub const ROOT_VECTOR_DATA: u32 = 0x0000_0004;
pub const ROOT_VECTOR_EXTENDED: u32 = 0x0000_0008;
pub const FRAMING_VECTOR_DMX: u32 = 0x0000_0002;
pub const FRAMING_VECTOR_SYNC: u32 = 0x0000_0001;
pub const FRAMING_VECTOR_DISCOVERY: u32 = 0x0000_0002;
pub const DMP_VECTOR_SET_PROPERTY: u8 = 0x02;
pub const DMP_ADDRESS_TYPE_DATA_TYPE: u8 = 0xa1;
pub const DMP_FIRST_PROPERTY_ADDRESS: u16 = 0x0000;
pub const DMP_ADDRESS_INCREMENT: u16 = 0x0001;
pub const UDL_VECTOR_UNIVERSE_LIST: u32 = 0x0000_0001;

pub const CID_LEN: usize = 16;
pub const SOURCE_NAME_LEN: usize = 64;
pub const SOURCE_NAME_MAX_BYTES: usize = SOURCE_NAME_LEN - 1;

pub const DMX_START_CODE: u8 = 0x00;
pub const DMX_MAX_SLOTS: usize = 512;
pub const DMP_PROPERTY_VALUE_COUNT: u16 = (DMX_MAX_SLOTS + 1) as u16;

/// Bytes preceding the root layer's Flags-and-Length field.
pub const PREAMBLE_LEN: usize = ACN_PID_RANGE.end;
/// Preamble plus the root PDU header (flags, vector, CID).
pub const ROOT_FIXED_LEN: usize = CID_RANGE.end;

// Bytes after each layer's Flags-and-Length field, nested layers excluded.
pub const ROOT_BODY_LEN: usize = 4 + CID_LEN;
pub const DATA_FRAMING_BODY_LEN: usize = 4 + SOURCE_NAME_LEN + 1 + 2 + 1 + 1 + 2;
pub const SYNC_FRAMING_BODY_LEN: usize = 4 + 1 + 2 + 2;
pub const DISCOVERY_FRAMING_BODY_LEN: usize = 4 + SOURCE_NAME_LEN + 4;
pub const DMP_BODY_LEN: usize = 1 + 1 + 2 + 2 + 2 + 1 + DMX_MAX_SLOTS;
pub const UDL_BODY_LEN: usize = 4 + 1 + 1;

pub const DATA_FRAMING_LEN: usize = FLAGS_AND_LENGTH_LEN + DATA_FRAMING_BODY_LEN;
pub const SYNC_FRAMING_LEN: usize = FLAGS_AND_LENGTH_LEN + SYNC_FRAMING_BODY_LEN;
pub const DMP_LEN: usize = FLAGS_AND_LENGTH_LEN + DMP_BODY_LEN;

pub const DATA_PACKET_LEN: usize = ROOT_FIXED_LEN + DATA_FRAMING_LEN + DMP_LEN;
pub const SYNC_PACKET_LEN: usize = ROOT_FIXED_LEN + SYNC_FRAMING_LEN;
pub const DISCOVERY_PACKET_MIN_LEN: usize = UDL_UNIVERSES_OFFSET;

pub const UNIVERSE_MIN: u16 = 1;
pub const UNIVERSE_MAX: u16 = 63999;
pub const DISCOVERY_UNIVERSE: u16 = 64214;
pub const DISCOVERY_UNIVERSES_PER_PAGE: usize = 512;

pub const PRIORITY_MAX: u8 = 200;
pub const PRIORITY_DEFAULT: u8 = 100;

pub const OPTION_PREVIEW_DATA: u8 = 0x80;
pub const OPTION_STREAM_TERMINATED: u8 = 0x40;
pub const OPTION_FORCE_SYNCHRONIZATION: u8 = 0x20;
pub const OPTION_RESERVED_MASK: u8 = 0x1F;

pub const ACN_SDT_MULTICAST_PORT: u16 = 5568;
pub const MULTICAST_PREFIX: [u8; 2] = [239, 255];
