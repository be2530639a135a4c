use crate::raster::cell::GlyphCell;

/// Per-pixel 0-255 intensities for one cell, taken from channel 0 of the
/// rendered buffer. Rendering writes identical channels, so reading a
/// single one is exact; no averaging happens anywhere.
#[derive(Clone, Debug)]
pub struct IntensityMap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl IntensityMap {
    pub fn from_cell(cell: &GlyphCell) -> Self {
        let mut data = Vec::with_capacity(cell.width() as usize * cell.height() as usize);
        for pixel in cell.image().pixels() {
            data.push(pixel.0[0]);
        }

        Self { width: cell.width(), height: cell.height(), data }
    }

    /// Builds a map from raw row-major samples, e.g. for synthetic cells.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Self {
        assert!(width > 0 && height > 0);
        assert_eq!(width as usize * height as usize, data.len());
        Self { width, height, data }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Rows top to bottom, each `width` samples long.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks(self.width as usize)
    }
}

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};

    use super::*;
    use crate::raster::cell::GlyphCell;

    #[test]
    fn takes_channel_zero_only() {
        let mut image = RgbImage::new(2, 1);
        image.put_pixel(0, 0, Rgb([10, 200, 200]));
        image.put_pixel(1, 0, Rgb([0, 255, 255]));

        let map = IntensityMap::from_cell(&GlyphCell::new(image));
        assert_eq!(map.rows().next().unwrap(), &[10, 0][..]);
    }

    #[test]
    fn shape_matches_cell() {
        let map = IntensityMap::from_cell(&GlyphCell::new(RgbImage::new(22, 36)));
        assert_eq!((map.width(), map.height()), (22, 36));
        assert_eq!(map.rows().count(), 36);
        assert!(map.rows().all(|row| row.len() == 22));
    }

    #[test]
    #[should_panic]
    fn from_raw_rejects_shape_mismatch() {
        IntensityMap::from_raw(3, 2, vec![0; 5]);
    }
}
