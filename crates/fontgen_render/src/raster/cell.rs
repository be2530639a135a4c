use std::path::Path;

use image::RgbImage;

use crate::FontGenError;

/// One glyph rendered into its fixed-size cell: black background, the
/// glyph's coverage written into every channel.
#[derive(Clone, Debug)]
pub struct GlyphCell {
    image: RgbImage,
}

impl GlyphCell {
    pub(crate) fn new(image: RgbImage) -> Self {
        assert!(image.width() > 0 && image.height() > 0);
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Persists the cell for debugging; the format follows the extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), FontGenError> {
        self.image.save(path)?;
        Ok(())
    }
}
