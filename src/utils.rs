/// Converts a fixed-width, nul-padded las text field into a string.
pub(crate) trait AsLasStr {
    /// Returns everything before the first nul, decoding invalid UTF-8 lossily.
    fn as_las_string(&self) -> String;
}

impl AsLasStr for [u8] {
    fn as_las_string(&self) -> String {
        let end = self.iter().position(|&b| b == 0).unwrap_or(self.len());
        String::from_utf8_lossy(&self[..end]).into_owned()
    }
}
