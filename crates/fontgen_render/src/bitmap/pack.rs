use super::intensity::IntensityMap;

/// Pixels per packed byte.
const CHUNK_BITS: usize = 8;

/// Converts intensity rows into packed table bytes: one bit per pixel,
/// foreground only on strict `intensity > threshold`, every row padded
/// with 0-bits up to the next byte boundary.
#[derive(Clone, Copy, Debug)]
pub struct RowPacker {
    threshold: u8,
}

impl RowPacker {
    pub fn new(threshold: u8) -> Self {
        Self { threshold }
    }

    pub fn pack(&self, map: &IntensityMap) -> PackedGlyph {
        let bytes_per_row = (map.width() as usize).div_ceil(CHUNK_BITS);
        let mut bytes = Vec::with_capacity(bytes_per_row * map.height() as usize);

        for row in map.rows() {
            for chunk in row.chunks(CHUNK_BITS) {
                // Bit positions past the chunk end stay 0: the right-padding.
                let mut byte = 0u8;
                for (bit, &intensity) in chunk.iter().enumerate() {
                    if intensity > self.threshold {
                        byte |= 1 << (7 - bit);
                    }
                }
                bytes.push(byte);
            }
        }

        PackedGlyph { bytes, bytes_per_row }
    }
}

/// One glyph's contribution to the font table: bytes in row-major order,
/// `ceil(width / 8)` of them per row, leftmost pixel in the high bit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackedGlyph {
    bytes: Vec<u8>,
    bytes_per_row: usize,
}

impl PackedGlyph {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn bytes_per_row(&self) -> usize {
        self.bytes_per_row
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.bytes.chunks(self.bytes_per_row)
    }

    /// Table literals: `0x` plus exactly two lowercase hex digits.
    pub fn hex_literals(&self) -> impl Iterator<Item = String> + '_ {
        self.bytes.iter().map(|byte| format!("{:#04x}", byte))
    }
}
