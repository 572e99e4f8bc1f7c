//! Conversion options.

/// Compare-buffer capacity of the reference CSVF player, in bytes.
pub const DEFAULT_MAX_COMPARE_BYTES: usize = 128;

/// Default initial reservation for the intermediate and output buffers.
pub const DEFAULT_BUFFER_CAPACITY: usize = 0x20000;

/// Options controlling an XSVF to CSVF conversion.
///
/// # Example
///
/// ```rust
/// use csvf::ConvertOptions;
///
/// // A player built with a 256-byte compare buffer
/// let options = ConvertOptions::new().max_compare_bytes(256);
/// assert_eq!(options.max_compare_bytes, 256);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Largest XSDRTDO vector, in bytes, the target player can compare.
    pub max_compare_bytes: usize,
    /// Initial capacity reserved for the normalized stream.
    pub normalized_capacity: usize,
    /// Initial capacity reserved for the compressed stream.
    pub compressed_capacity: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            max_compare_bytes: DEFAULT_MAX_COMPARE_BYTES,
            normalized_capacity: DEFAULT_BUFFER_CAPACITY,
            compressed_capacity: DEFAULT_BUFFER_CAPACITY,
        }
    }
}

impl ConvertOptions {
    /// Creates options matching the reference player.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the compare-buffer capacity of the target player.
    pub fn max_compare_bytes(mut self, bytes: usize) -> Self {
        self.max_compare_bytes = bytes;
        self
    }

    /// Sets the initial capacity of the normalized stream buffer.
    pub fn normalized_capacity(mut self, bytes: usize) -> Self {
        self.normalized_capacity = bytes;
        self
    }

    /// Sets the initial capacity of the compressed stream buffer.
    pub fn compressed_capacity(mut self, bytes: usize) -> Self {
        self.compressed_capacity = bytes;
        self
    }
}
