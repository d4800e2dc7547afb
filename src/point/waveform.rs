use crate::Result;
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Read;

/// Waveform packet fields, carried by point formats 4, 5, 9, and 10.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Waveform {
    /// This value plus 99 is the record id of the waveform packet descriptor vlr.
    ///
    /// Zero means there is no waveform associated with this point.
    pub wave_packet_descriptor_index: u8,

    /// The location of this point's packet, relative to the start of the waveform data packet
    /// record (or the start of an external file).
    pub byte_offset_to_waveform_data: u64,

    /// The size, in bytes, of the waveform packet.
    pub waveform_packet_size_in_bytes: u32,

    /// The offset in picoseconds from the first digitized value to the return.
    pub return_point_waveform_location: f32,

    /// Parametric line offsets for extrapolating points along the waveform.
    pub x_t: f32,
    #[allow(missing_docs)]
    pub y_t: f32,
    #[allow(missing_docs)]
    pub z_t: f32,
}

impl Waveform {
    pub(crate) fn read_from<R: Read>(mut read: R) -> Result<Waveform> {
        Ok(Waveform {
            wave_packet_descriptor_index: read.read_u8()?,
            byte_offset_to_waveform_data: read.read_u64::<LittleEndian>()?,
            waveform_packet_size_in_bytes: read.read_u32::<LittleEndian>()?,
            return_point_waveform_location: read.read_f32::<LittleEndian>()?,
            x_t: read.read_f32::<LittleEndian>()?,
            y_t: read.read_f32::<LittleEndian>()?,
            z_t: read.read_f32::<LittleEndian>()?,
        })
    }
}
