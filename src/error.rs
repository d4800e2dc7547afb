use crate::{point::Format, Version};
use std::path::PathBuf;
use thiserror::Error;

/// Crate-specific error enum.
#[derive(Debug, Error)]
pub enum Error {
    /// The file does not exist.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Wrapper around `std::io::Error`.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The file signature was not "LASF".
    #[error("file signature must be LASF, found {:?}", String::from_utf8_lossy(.0))]
    InvalidSignature([u8; 4]),

    /// The header size field does not match the size of the header for its version.
    #[error("las {version} headers are {expected} bytes, but the header size field is {declared}")]
    HeaderSizeMismatch {
        /// The version read from the header.
        version: Version,
        /// The header size field.
        declared: u16,
        /// The number of bytes in a header of this version.
        expected: u16,
    },

    /// The las version is not 1.0 through 1.4.
    #[error("unsupported las version: {major}.{minor}")]
    UnsupportedVersion {
        /// The major version.
        major: u8,
        /// The minor version.
        minor: u8,
    },

    /// The point format is not 0 through 10.
    #[error("unsupported point format: {0}")]
    UnsupportedPointFormat(u8),

    /// The point data record length is too short for the point format.
    #[error("point format {format} needs {} bytes per record, but the header declares {length}", format.len())]
    PointDataRecordLength {
        /// The point format.
        format: Format,
        /// The declared point data record length.
        length: u16,
    },

    /// Fewer bytes were available than a fixed-size structure demands.
    #[error("expected to read {expected} bytes, but only {actual} were available")]
    ShortRead {
        /// The number of bytes required.
        expected: u64,
        /// The number of bytes read.
        actual: u64,
    },

    /// The compressed backend could not open the file.
    #[error("could not open {} for decompression: {reason}", path.display())]
    BackendOpenFailure {
        /// The path being opened.
        path: PathBuf,
        /// Why it failed.
        reason: String,
    },

    /// The file extension is neither las nor laz.
    #[error("cannot pick a backend for {}, expected a .las or .laz extension", .0.display())]
    UnknownExtension(PathBuf),

    /// A `.las` file declares compressed point data.
    #[error("{} has a .las extension but its point data are laszip-compressed", .0.display())]
    CompressedDataInRawFile(PathBuf),

    /// Wrapper around `laz::LasZipError`.
    #[cfg(feature = "laz")]
    #[error(transparent)]
    Laszip(#[from] laz::LasZipError),

    /// Laszip support was not compiled in.
    #[error("laszip support is not enabled, rebuild with the `laz` feature")]
    LaszipNotEnabled,

    /// There is no vlr at this index.
    #[error("vlr index {index} is out of range, there are {count} vlrs")]
    VlrIndex {
        /// The requested index.
        index: u32,
        /// The number of vlrs.
        count: u32,
    },

    /// There is no extended vlr at this index.
    #[error("evlr index {index} is out of range, there are {count} evlrs")]
    EvlrIndex {
        /// The requested index.
        index: u32,
        /// The number of evlrs.
        count: u32,
    },
}

impl Error {
    /// Converts an io error raised while opening `path` into a crate error.
    ///
    /// A missing file becomes [Error::FileNotFound], everything else is passed through.
    pub(crate) fn from_open(err: std::io::Error, path: PathBuf) -> Error {
        if err.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound(path)
        } else {
            Error::Io(err)
        }
    }
}
