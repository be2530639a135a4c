mod bitmap;
mod raster;

use std::ops::RangeInclusive;
use std::path::Path;

pub use bitmap::{
    intensity::IntensityMap,
    pack::{PackedGlyph, RowPacker},
};
pub use raster::{cell::GlyphCell, glyph::GlyphRasterizer};

/// Code points emitted into the table: printable ASCII, space through tilde.
pub const PRINTABLE_ASCII: RangeInclusive<u8> = 32..=126;

#[derive(Debug, thiserror::Error)]
pub enum FontGenError {
    #[error("failed to read font file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse font: {0}")]
    Font(&'static str),
    #[error("failed to write raster image: {0}")]
    Image(#[from] image::ImageError),
    #[error("unsupported cell geometry")]
    InvalidCell,
}

#[derive(Clone, Debug)]
pub struct TableOptions {
    /// Cell height in pixels.
    pub height: u32,
    /// Cell width in pixels.
    pub width: u32,
    /// Intensity cutoff in [0, 255]; a pixel becomes foreground only when
    /// its intensity exceeds this value.
    pub threshold: u8,
    /// Vertical margin subtracted from the cell height to get the font size.
    pub font_offset: u32,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self { height: 36, width: 22, threshold: 120, font_offset: 4 }
    }
}

impl TableOptions {
    /// Font size handed to the rasterizer, in pixels.
    pub fn font_px(&self) -> f32 {
        (self.height - self.font_offset) as f32
    }

    pub(crate) fn validate(&self) -> Result<(), FontGenError> {
        if self.width == 0 || self.height == 0 || self.font_offset >= self.height {
            return Err(FontGenError::InvalidCell);
        }
        Ok(())
    }
}

pub struct TableRenderer {
    rasterizer: GlyphRasterizer,
}

impl TableRenderer {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, FontGenError> {
        let data = std::fs::read(path)?;
        Self::from_bytes(data)
    }

    pub fn from_bytes(data: Vec<u8>) -> Result<Self, FontGenError> {
        Ok(Self { rasterizer: GlyphRasterizer::from_bytes(data)? })
    }

    /// Runs the raster stage only: the glyph drawn into its cell buffer.
    pub fn render_glyph(
        &self,
        ch: char,
        options: &TableOptions,
    ) -> Result<GlyphCell, FontGenError> {
        self.rasterizer.render_cell(ch, options)
    }

    /// Runs the full pipeline: rasterize, extract intensities, pack rows.
    pub fn pack_glyph(
        &self,
        ch: char,
        options: &TableOptions,
    ) -> Result<PackedGlyph, FontGenError> {
        let cell = self.render_glyph(ch, options)?;
        let map = IntensityMap::from_cell(&cell);
        Ok(RowPacker::new(options.threshold).pack(&map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_describe_the_36x22_cell() {
        let options = TableOptions::default();
        assert_eq!((options.height, options.width), (36, 22));
        assert_eq!((options.threshold, options.font_offset), (120, 4));
        assert_eq!(options.font_px(), 32.0);
    }

    #[test]
    fn printable_ascii_spans_space_to_tilde() {
        assert_eq!(PRINTABLE_ASCII.count(), 95);
        assert_eq!(*PRINTABLE_ASCII.start(), b' ');
        assert_eq!(*PRINTABLE_ASCII.end(), b'~');
    }

    #[test]
    fn degenerate_cells_are_rejected() {
        let zero_width = TableOptions { width: 0, ..TableOptions::default() };
        assert!(matches!(zero_width.validate(), Err(FontGenError::InvalidCell)));

        let offset_eats_height =
            TableOptions { height: 4, font_offset: 4, ..TableOptions::default() };
        assert!(matches!(offset_eats_height.validate(), Err(FontGenError::InvalidCell)));
    }
}
