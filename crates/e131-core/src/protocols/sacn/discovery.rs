use super::error::ValidationError;
use super::layout;
use super::pdu::Pdu;
use super::writer::SacnWriter;
use crate::universe::validate_universe;

/// Position of one discovery packet within a paginated advertisement.
///
/// # Examples
/// ```
/// use e131_core::DiscoveryPage;
///
/// let page = DiscoveryPage::new(1, 2)?;
/// assert_eq!(page.page(), 1);
/// assert!(DiscoveryPage::new(3, 2).is_err());
/// # Ok::<(), e131_core::ValidationError>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiscoveryPage {
    page: u8,
    last_page: u8,
}

impl DiscoveryPage {
    /// Page 0 of 0, the only page of a short list.
    pub const SINGLE: DiscoveryPage = DiscoveryPage {
        page: 0,
        last_page: 0,
    };

    pub fn new(page: u8, last_page: u8) -> Result<Self, ValidationError> {
        if page > last_page {
            return Err(ValidationError::InvalidPage { page, last_page });
        }
        Ok(Self { page, last_page })
    }

    pub fn page(&self) -> u8 {
        self.page
    }

    pub fn last_page(&self) -> u8 {
        self.last_page
    }
}

/// Universe discovery PDU listing the universes on one page.
pub struct UniverseDiscoveryLayer<'a> {
    pub page: DiscoveryPage,
    /// Sorted ascending, at most one page long.
    pub universes: &'a [u16],
}

impl Pdu for UniverseDiscoveryLayer<'_> {
    fn body_len(&self) -> usize {
        layout::UDL_BODY_LEN + self.universes.len() * 2
    }

    fn write_body(&self, writer: &mut SacnWriter) -> Result<(), ValidationError> {
        writer.write_u32_be(layout::UDL_VECTOR_UNIVERSE_LIST);
        writer.write_u8(self.page.page);
        writer.write_u8(self.page.last_page);
        for universe in self.universes {
            writer.write_u16_be(*universe);
        }
        Ok(())
    }
}

/// Validates, sorts and deduplicates an advertised universe list.
pub fn normalize_universes(universes: &[u16]) -> Result<Vec<u16>, ValidationError> {
    let mut sorted = Vec::with_capacity(universes.len());
    for &universe in universes {
        validate_universe(universe)?;
        sorted.push(universe);
    }
    sorted.sort_unstable();
    sorted.dedup();
    Ok(sorted)
}

/// Rejects lists that do not fit one discovery page.
pub fn check_page_len(count: usize) -> Result<(), ValidationError> {
    if count > layout::DISCOVERY_UNIVERSES_PER_PAGE {
        return Err(ValidationError::TooManyUniverses {
            count,
            max: layout::DISCOVERY_UNIVERSES_PER_PAGE,
        });
    }
    Ok(())
}
