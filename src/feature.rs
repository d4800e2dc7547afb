//! Programmatically determine whether a las version carries a header field or a behavior.
//!
//! Features are structures that implement the [Feature] trait. The most common way to use
//! features is via [Version::supports]:
//!
//! ```
//! use las_reader::feature::Waveforms;
//! use las_reader::Version;
//!
//! assert!(!Version::new(1, 2).supports::<Waveforms>());
//! assert!(Version::new(1, 4).supports::<Waveforms>());
//! ```

use crate::Version;

const MAJOR: u8 = 1;

/// A trait implemented by each feature.
pub trait Feature {
    /// Is this feature supported by this version?
    ///
    /// # Examples
    ///
    /// ```
    /// use las_reader::feature::{Feature, Waveforms};
    /// use las_reader::Version;
    /// assert!(!Waveforms::is_supported_by(Version::new(1, 2)));
    /// assert!(Waveforms::is_supported_by(Version::new(1, 4)));
    /// ```
    fn is_supported_by(version: Version) -> bool;

    /// Returns the name of this feature.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_reader::feature::{Feature, Waveforms};
    /// assert_eq!("Waveforms", Waveforms::name());
    /// ```
    fn name() -> &'static str;
}

macro_rules! features {
    (   $(
            $(#[$meta:meta])*
            $name:ident ($($versions:expr),+);
        )+
    ) => {
        $(
            $(#[$meta])*
            #[derive(Clone, Copy, Debug)]
            pub struct $name {}

            impl Feature for $name {
                fn is_supported_by(version: Version) -> bool {
                    version.major == MAJOR && [$($versions),+].contains(&version.minor)
                }

                fn name() -> &'static str {
                    stringify!($name)
                }
            }
        )+
    }
}

features! {
    /// Does the header carry a file source id, or is that field reserved?
    FileSourceId(1, 2, 3, 4);
    /// Is there a bit flag to set the type of time value in each point?
    GpsStandardTime(2, 3, 4);
    /// Does the header point at waveform data packets?
    Waveforms(3, 4);
    /// Is there a bit flag to indicate synthetic return numbers?
    SyntheticReturnNumbers(3, 4);
    /// Does the header carry 64-bit point counts?
    LargeFiles(4);
    /// Can the file hold extended variable length records?
    Evlrs(4);
    /// Is the first vlr field the 0xAABB record signature rather than a reserved word?
    VlrSignature(0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn other_majors_support_nothing() {
        assert!(!FileSourceId::is_supported_by(Version::new(2, 1)));
    }

    #[test]
    fn vlr_signature_only_in_1_0() {
        assert!(VlrSignature::is_supported_by(Version::new(1, 0)));
        assert!(!VlrSignature::is_supported_by(Version::new(1, 1)));
    }

    #[test]
    fn name() {
        assert_eq!("LargeFiles", LargeFiles::name());
    }
}
