//! DMX universe values handed to the encoder.

use std::net::{Ipv4Addr, SocketAddrV4};

use crate::protocols::sacn::error::ValidationError;
use crate::protocols::sacn::layout;

/// One DMX-512 universe: a universe number and exactly 512 slots.
///
/// Slot 0 is channel 1. The start code is not stored; it is prefixed at
/// encode time.
///
/// # Examples
/// ```
/// use e131_core::Universe;
///
/// let mut universe = Universe::new(1)?;
/// universe.set_channel(1, 255)?;
/// assert_eq!(universe.slots()[0], 255);
/// assert_eq!(universe.multicast_addr().to_string(), "239.255.0.1:5568");
/// # Ok::<(), e131_core::ValidationError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Universe {
    number: u16,
    slots: [u8; layout::DMX_MAX_SLOTS],
}

impl Universe {
    /// Creates a universe with every slot at zero.
    pub fn new(number: u16) -> Result<Self, ValidationError> {
        validate_universe(number)?;
        Ok(Self {
            number,
            slots: [0; layout::DMX_MAX_SLOTS],
        })
    }

    /// Creates a universe from a full slot buffer.
    ///
    /// The protocol has no sparse form, so `slots` must hold exactly 512
    /// values.
    pub fn from_slots(number: u16, slots: &[u8]) -> Result<Self, ValidationError> {
        validate_universe(number)?;
        let slots: [u8; layout::DMX_MAX_SLOTS] = slots
            .try_into()
            .map_err(|_| ValidationError::InvalidSlotCount { count: slots.len() })?;
        Ok(Self { number, slots })
    }

    pub fn number(&self) -> u16 {
        self.number
    }

    pub fn start_code(&self) -> u8 {
        layout::DMX_START_CODE
    }

    pub fn slots(&self) -> &[u8; layout::DMX_MAX_SLOTS] {
        &self.slots
    }

    pub fn slots_mut(&mut self) -> &mut [u8; layout::DMX_MAX_SLOTS] {
        &mut self.slots
    }

    /// Sets a channel by its 1-based DMX address.
    pub fn set_channel(&mut self, channel: u16, value: u8) -> Result<(), ValidationError> {
        let index = usize::from(channel)
            .checked_sub(1)
            .filter(|index| *index < layout::DMX_MAX_SLOTS)
            .ok_or(ValidationError::InvalidChannel { channel })?;
        self.slots[index] = value;
        Ok(())
    }

    pub fn multicast_addr(&self) -> SocketAddrV4 {
        multicast_addr(self.number)
    }
}

pub fn validate_universe(number: u16) -> Result<(), ValidationError> {
    if !(layout::UNIVERSE_MIN..=layout::UNIVERSE_MAX).contains(&number) {
        return Err(ValidationError::InvalidUniverse { value: number });
    }
    Ok(())
}

/// Sync address in a data packet: 0 (unsynchronized) or a valid universe.
pub fn validate_sync_address(address: u16) -> Result<(), ValidationError> {
    if address == 0 || validate_universe(address).is_ok() {
        Ok(())
    } else {
        Err(ValidationError::InvalidSyncAddress { value: address })
    }
}

/// Multicast group and port a universe is transmitted on
/// (`239.255.<high byte>.<low byte>:5568`).
pub fn multicast_addr(number: u16) -> SocketAddrV4 {
    let [high, low] = number.to_be_bytes();
    let [a, b] = layout::MULTICAST_PREFIX;
    SocketAddrV4::new(
        Ipv4Addr::new(a, b, high, low),
        layout::ACN_SDT_MULTICAST_PORT,
    )
}
