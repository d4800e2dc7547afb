use crate::{feature::Feature, layout, Error, Result};
use std::fmt;

/// LAS version.
///
/// Only 1.0 through 1.4 can be opened, but any pair of bytes can be held so that error messages
/// can report what was actually in the file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    /// The major version.
    ///
    /// For now, always 1.
    pub major: u8,

    /// The minor version.
    pub minor: u8,
}

impl Version {
    /// Creates a new version.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_reader::Version;
    /// let version = Version::new(1, 2);
    /// assert_eq!(1, version.major);
    /// assert_eq!(2, version.minor);
    /// ```
    pub fn new(major: u8, minor: u8) -> Version {
        Version { major, minor }
    }

    /// Checks that this version is one we can read.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_reader::Version;
    /// assert!(Version::new(1, 4).verify().is_ok());
    /// assert!(Version::new(1, 5).verify().is_err());
    /// assert!(Version::new(2, 0).verify().is_err());
    /// ```
    pub fn verify(&self) -> Result<()> {
        self.header_size().map(|_| ())
    }

    /// Returns the size of the header for this version.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_reader::Version;
    /// assert_eq!(227, Version::new(1, 2).header_size().unwrap());
    /// assert_eq!(235, Version::new(1, 3).header_size().unwrap());
    /// assert_eq!(375, Version::new(1, 4).header_size().unwrap());
    /// ```
    pub fn header_size(&self) -> Result<u16> {
        if self.major == 1 {
            if let Some(size) = layout::header_size(self.minor) {
                return Ok(size);
            }
        }
        Err(Error::UnsupportedVersion {
            major: self.major,
            minor: self.minor,
        })
    }

    /// Does this version support the feature?
    ///
    /// # Examples
    ///
    /// ```
    /// use las_reader::feature::Waveforms;
    /// use las_reader::Version;
    /// assert!(!Version::new(1, 2).supports::<Waveforms>());
    /// assert!(Version::new(1, 3).supports::<Waveforms>());
    /// ```
    pub fn supports<F: Feature>(&self) -> bool {
        F::is_supported_by(*self)
    }
}

impl From<(u8, u8)> for Version {
    fn from((major, minor): (u8, u8)) -> Version {
        Version { major, minor }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}
