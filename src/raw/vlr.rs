use super::read_exactly;
use crate::{layout, Result};
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Read;

/// A raw variable length record.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Vlr {
    /// **las 1.0**: the record signature, 0xAABB. **las 1.1 and later**: reserved, usually zero.
    pub reserved: u16,

    /// ASCII data which identifies the user which created the variable length record.
    pub user_id: [u8; 16],

    /// The ID of this record, dependent on the user id.
    pub record_id: u16,

    /// The number of bytes after the end of the header.
    pub record_length_after_header: RecordLength,

    /// Optional, null terminated text description of the data.
    pub description: [u8; 32],

    /// The data.
    pub data: Vec<u8>,
}

/// The length of the data in the vlr.
///
/// Regular vlrs store this as a u16, extended vlrs as a u64.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RecordLength {
    /// A regular vlr.
    Vlr(u16),
    /// An extended vlr.
    Evlr(u64),
}

impl Vlr {
    /// Reads a raw vlr or evlr.
    ///
    /// The payload must be complete: a record that claims more bytes than the reader holds fails
    /// with [Error::ShortRead](crate::Error::ShortRead).
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use las_reader::raw::Vlr;
    /// let mut bytes = vec![0u8; 54];
    /// bytes[20] = 2; // record length after header
    /// bytes.extend([42, 43]);
    /// let vlr = Vlr::read_from(Cursor::new(bytes), false).unwrap();
    /// assert_eq!(vec![42, 43], vlr.data);
    /// ```
    pub fn read_from<R: Read>(mut read: R, extended: bool) -> Result<Vlr> {
        let reserved = read.read_u16::<LittleEndian>()?;
        let mut user_id = [0; 16];
        read.read_exact(&mut user_id)?;
        let record_id = read.read_u16::<LittleEndian>()?;
        let record_length_after_header = if extended {
            RecordLength::Evlr(read.read_u64::<LittleEndian>()?)
        } else {
            RecordLength::Vlr(read.read_u16::<LittleEndian>()?)
        };
        let mut description = [0; 32];
        read.read_exact(&mut description)?;
        let data = read_exactly(read, u64::from(record_length_after_header))?;
        Ok(Vlr {
            reserved,
            user_id,
            record_id,
            record_length_after_header,
            description,
            data,
        })
    }

    /// Is this an extended vlr?
    pub fn is_extended(&self) -> bool {
        matches!(self.record_length_after_header, RecordLength::Evlr(_))
    }

    /// Returns the total number of bytes this record occupies on disk, header included.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_reader::raw::{RecordLength, Vlr};
    /// let vlr = Vlr {
    ///     record_length_after_header: RecordLength::Vlr(10),
    ///     ..Default::default()
    /// };
    /// assert_eq!(64, vlr.len());
    /// ```
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> u64 {
        match self.record_length_after_header {
            RecordLength::Vlr(n) => layout::VLR_HEADER_SIZE + u64::from(n),
            RecordLength::Evlr(n) => layout::EVLR_HEADER_SIZE.saturating_add(n),
        }
    }
}

impl Default for RecordLength {
    fn default() -> RecordLength {
        RecordLength::Vlr(0)
    }
}

impl From<RecordLength> for u64 {
    fn from(record_length: RecordLength) -> u64 {
        match record_length {
            RecordLength::Vlr(n) => u64::from(n),
            RecordLength::Evlr(n) => n,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::io::Cursor;

    fn vlr_bytes(extended: bool, length: u64, data: &[u8]) -> Vec<u8> {
        let mut bytes = vec![0xBB, 0xAA];
        let mut user_id = [0; 16];
        user_id[..9].copy_from_slice(b"LASF_Spec");
        bytes.extend(user_id);
        bytes.extend(42u16.to_le_bytes());
        if extended {
            bytes.extend(length.to_le_bytes());
        } else {
            bytes.extend((length as u16).to_le_bytes());
        }
        bytes.extend([0; 32]);
        bytes.extend(data);
        bytes
    }

    #[test]
    fn read_vlr() {
        let vlr = Vlr::read_from(Cursor::new(vlr_bytes(false, 3, &[1, 2, 3])), false).unwrap();
        assert_eq!(0xAABB, vlr.reserved);
        assert_eq!(b"LASF_Spec", &vlr.user_id[..9]);
        assert_eq!(42, vlr.record_id);
        assert_eq!(RecordLength::Vlr(3), vlr.record_length_after_header);
        assert_eq!(vec![1, 2, 3], vlr.data);
        assert_eq!(57, vlr.len());
        assert!(!vlr.is_extended());
    }

    #[test]
    fn read_evlr() {
        let vlr = Vlr::read_from(Cursor::new(vlr_bytes(true, 2, &[1, 2])), true).unwrap();
        assert_eq!(RecordLength::Evlr(2), vlr.record_length_after_header);
        assert_eq!(62, vlr.len());
        assert!(vlr.is_extended());
    }

    #[test]
    fn data_too_short() {
        assert!(matches!(
            Vlr::read_from(Cursor::new(vlr_bytes(false, 10, &[1, 2])), false),
            Err(Error::ShortRead {
                expected: 10,
                actual: 2
            })
        ));
    }

    #[test]
    fn evlr_length_past_the_end() {
        assert!(matches!(
            Vlr::read_from(Cursor::new(vlr_bytes(true, 1 << 50, &[1, 2])), true),
            Err(Error::ShortRead {
                expected: 1125899906842624,
                actual: 2
            })
        ));
    }

    #[test]
    fn header_too_short() {
        let mut bytes = vlr_bytes(false, 0, &[]);
        bytes.truncate(30);
        assert!(Vlr::read_from(Cursor::new(bytes), false).is_err());
    }

    #[test]
    fn trailing_bytes_are_left_alone() {
        let mut cursor = Cursor::new(vlr_bytes(false, 1, &[1, 2]));
        let vlr = Vlr::read_from(&mut cursor, false).unwrap();
        assert_eq!(vec![1], vlr.data);
        assert_eq!(55, cursor.position());
    }
}
