//! Variable length records are used to store additional metadata not defined in the header.
//!
//! Variable length records (VLRs) can be "regular" or "extended". "Regular" vlrs are stored right
//! after the header, before the point records. "Extended" vlrs (EVLRs) are las 1.4 only, and are
//! stored at the end of the file, after the point records.
//!
//! Neither kind has an index on disk: record `n` is found by walking every record before it.

use crate::{feature::VlrSignature, layout, raw, utils::AsLasStr, Version};

/// A variable length record.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Vlr {
    /// The first two bytes of the record, as stored.
    ///
    /// In las 1.0 these hold the record signature, 0xAABB. Later versions reserve them, and they
    /// are usually zero. Use [Vlr::signature] to read them in light of the version.
    pub reserved: u16,

    /// The user that created this record.
    ///
    /// This value is often an official, "registered" user_id, such as "LASF_Spec" or
    /// "LASF_Projection".
    pub user_id: String,

    /// This value specifies the type of record, and depends on the user id.
    pub record_id: u16,

    /// Textual description of these data.
    pub description: String,

    /// The data themselves.
    pub data: Vec<u8>,

    /// Was this record stored as an extended vlr?
    pub is_extended: bool,
}

impl Vlr {
    /// Creates a vlr from a raw vlr.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_reader::{raw, Vlr};
    /// let mut raw_vlr = raw::Vlr::default();
    /// raw_vlr.user_id[..4].copy_from_slice(b"LASF");
    /// let vlr = Vlr::new(raw_vlr);
    /// assert_eq!("LASF", vlr.user_id);
    /// ```
    pub fn new(raw_vlr: raw::Vlr) -> Vlr {
        Vlr {
            reserved: raw_vlr.reserved,
            user_id: raw_vlr.user_id.as_las_string(),
            record_id: raw_vlr.record_id,
            description: raw_vlr.description.as_las_string(),
            is_extended: raw_vlr.is_extended(),
            data: raw_vlr.data,
        }
    }

    /// Returns the record signature, if this version of las defines one.
    ///
    /// Only las 1.0 does. The value is returned as stored, even if it is not 0xAABB.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_reader::{Version, Vlr};
    /// let vlr = Vlr { reserved: 0xAABB, ..Default::default() };
    /// assert_eq!(Some(0xAABB), vlr.signature(Version::new(1, 0)));
    /// assert_eq!(None, vlr.signature(Version::new(1, 2)));
    /// ```
    pub fn signature(&self, version: Version) -> Option<u16> {
        version.supports::<VlrSignature>().then_some(self.reserved)
    }

    /// Returns the total length of this vlr on disk, header and data.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_reader::Vlr;
    /// let vlr = Vlr { data: vec![0; 10], ..Default::default() };
    /// assert_eq!(64, vlr.len());
    /// let evlr = Vlr { is_extended: true, ..vlr };
    /// assert_eq!(70, evlr.len());
    /// ```
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> u64 {
        let header_size = if self.is_extended {
            layout::EVLR_HEADER_SIZE
        } else {
            layout::VLR_HEADER_SIZE
        };
        header_size + self.data.len() as u64
    }

    /// Does this record carry a 1.0 signature that is not 0xAABB?
    pub(crate) fn has_bad_signature(&self, version: Version) -> bool {
        self.signature(version)
            .is_some_and(|signature| signature != layout::VLR_SIGNATURE_1_0)
    }
}
