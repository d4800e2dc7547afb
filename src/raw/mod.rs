//! Raw structures that map directly onto structures as defined in the las format specifications.
//!
//! These structures are "dumb": they hold exactly the bytes on disk, and do no more validation
//! than is needed to know how many bytes to read. For example, the point data format id still
//! carries the laszip compression bits:
//!
//! ```
//! let raw_header = las_reader::raw::Header {
//!     point_data_format_id: 0x83,
//!     ..Default::default()
//! };
//! assert!(raw_header.is_compressed());
//! ```
//!
//! Prefer [Header](crate::Header) and [Vlr](crate::Vlr), which are version-normalized.

mod header;
mod vlr;

pub use self::header::{Evlr, Header, LargeFile};
pub use self::vlr::{RecordLength, Vlr};

use crate::{Error, Result};
use std::io::Read;

/// The file magic number used for all las files.
pub const LASF: [u8; 4] = *b"LASF";

/// Reads exactly `n` bytes, or fails with [Error::ShortRead].
///
/// Other io errors are passed through.
///
/// The buffer grows with what is actually read, so a length field that claims more than the file
/// holds costs no more memory than the file itself.
pub(crate) fn read_exactly<R: Read>(read: R, n: u64) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let actual = read.take(n).read_to_end(&mut buf)? as u64;
    if actual == n {
        Ok(buf)
    } else {
        Err(Error::ShortRead {
            expected: n,
            actual,
        })
    }
}
