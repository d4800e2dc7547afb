use super::ScanDirection;

/// The packed return bits of a point record.
///
/// Point formats zero through five pack return information into one byte:
///
/// | Bits | Field |
/// | ---- | ----- |
/// | 0-2 | Return number |
/// | 3-5 | Number of returns |
/// | 6 | Scan direction flag |
/// | 7 | Edge of flight line |
///
/// Point formats six through ten use two bytes:
///
/// | Bits | Field |
/// | ---- | ----- |
/// | 0-3 | Return number |
/// | 4-7 | Number of returns |
/// | 8-11 | Classification flags (synthetic, key-point, withheld, overlap) |
/// | 12-13 | Scanner channel |
/// | 14 | Scan direction flag |
/// | 15 | Edge of flight line |
///
/// The mask is kept as it was stored and decoded on demand.
///
/// # Examples
///
/// ```
/// use las_reader::point::ReturnInfo;
/// let legacy = ReturnInfo::Legacy(0b0001_0010);
/// assert_eq!(2, legacy.return_number());
/// assert_eq!(2, legacy.number_of_returns());
///
/// let extended = ReturnInfo::Extended(0x00_9A);
/// assert_eq!(10, extended.return_number());
/// assert_eq!(9, extended.number_of_returns());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReturnInfo {
    /// The 8-bit mask of point formats zero through five.
    Legacy(u8),
    /// The 16-bit mask of point formats six through ten.
    Extended(u16),
}

impl ReturnInfo {
    /// Returns the return number of this pulse.
    ///
    /// The value is taken straight from the mask, so a zero or out-of-range value is returned
    /// as-is.
    pub fn return_number(&self) -> u8 {
        match *self {
            ReturnInfo::Legacy(n) => n & 0b0000_0111,
            ReturnInfo::Extended(n) => (n & 0x000F) as u8,
        }
    }

    /// Returns the number of returns of this pulse.
    pub fn number_of_returns(&self) -> u8 {
        match *self {
            ReturnInfo::Legacy(n) => (n >> 3) & 0b0000_0111,
            ReturnInfo::Extended(n) => ((n >> 4) & 0x000F) as u8,
        }
    }

    /// Returns the direction the scanner mirror was traveling.
    pub fn scan_direction(&self) -> ScanDirection {
        let bit = match *self {
            ReturnInfo::Legacy(n) => n & 0b0100_0000 != 0,
            ReturnInfo::Extended(n) => n & 0x4000 != 0,
        };
        if bit {
            ScanDirection::LeftToRight
        } else {
            ScanDirection::RightToLeft
        }
    }

    /// Is this point at the edge of a flight line?
    pub fn is_edge_of_flight_line(&self) -> bool {
        match *self {
            ReturnInfo::Legacy(n) => n & 0b1000_0000 != 0,
            ReturnInfo::Extended(n) => n & 0x8000 != 0,
        }
    }

    /// Returns the four classification flag bits, or `None` for the legacy mask.
    ///
    /// Legacy formats keep their flags in the high bits of the classification byte instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_reader::point::ReturnInfo;
    /// assert_eq!(None, ReturnInfo::Legacy(0xFF).classification_flags());
    /// assert_eq!(Some(0b1010), ReturnInfo::Extended(0x0A00).classification_flags());
    /// ```
    pub fn classification_flags(&self) -> Option<u8> {
        match *self {
            ReturnInfo::Legacy(_) => None,
            ReturnInfo::Extended(n) => Some(((n >> 8) & 0x000F) as u8),
        }
    }

    /// Returns the scanner channel, always zero for the legacy mask.
    pub fn scanner_channel(&self) -> u8 {
        match *self {
            ReturnInfo::Legacy(_) => 0,
            ReturnInfo::Extended(n) => ((n >> 12) & 0x0003) as u8,
        }
    }

    /// Returns the mask as stored, widened to 16 bits.
    pub fn mask(&self) -> u16 {
        match *self {
            ReturnInfo::Legacy(n) => u16::from(n),
            ReturnInfo::Extended(n) => n,
        }
    }
}

impl Default for ReturnInfo {
    fn default() -> ReturnInfo {
        ReturnInfo::Legacy(0)
    }
}
