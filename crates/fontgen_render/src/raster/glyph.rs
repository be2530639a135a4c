use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};

use super::cell::GlyphCell;
use crate::{FontGenError, TableOptions};

/// Smooth filter used for the horizontal squeeze of over-wide glyphs.
const SQUEEZE_FILTER: FilterType = FilterType::CatmullRom;

pub struct GlyphRasterizer {
    font: fontdue::Font,
}

impl GlyphRasterizer {
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, FontGenError> {
        let font = fontdue::Font::from_bytes(data, fontdue::FontSettings::default())
            .map_err(FontGenError::Font)?;
        Ok(Self { font })
    }

    /// Renders `ch` into a `width × height` cell. A glyph whose natural
    /// advance exceeds the cell width is drawn at natural size and squeezed
    /// horizontally into the cell; the height is never scaled.
    pub fn render_cell(
        &self,
        ch: char,
        options: &TableOptions,
    ) -> Result<GlyphCell, FontGenError> {
        options.validate()?;

        let px = options.font_px();
        let advance = self.font.metrics(ch, px).advance_width;

        let image = if advance > options.width as f32 {
            let mut wide = RgbImage::new(advance as u32, options.height);
            self.draw(&mut wide, ch, px);
            imageops::resize(&wide, options.width, options.height, SQUEEZE_FILTER)
        } else {
            let mut cell = RgbImage::new(options.width, options.height);
            self.draw(&mut cell, ch, px);
            cell
        };

        Ok(GlyphCell::new(image))
    }

    /// Draws `ch` with the pen at the buffer origin: ascender line on the
    /// top edge, left side bearing applied, overflow clipped.
    fn draw(&self, target: &mut RgbImage, ch: char, px: f32) {
        let (metrics, coverage) = self.font.rasterize(ch, px);
        if coverage.is_empty() {
            return;
        }

        let ascent = self.font.horizontal_line_metrics(px).map(|m| m.ascent).unwrap_or(px);
        let glyph_top = ascent - metrics.ymin as f32 - metrics.height as f32;
        blit(
            target,
            &coverage,
            metrics.width,
            metrics.height,
            metrics.xmin,
            glyph_top.round() as i32,
        );
    }
}

/// Copies a coverage bitmap into the target at `(left, top)`, clipping to
/// the target bounds and writing each sample into all three channels.
fn blit(target: &mut RgbImage, coverage: &[u8], width: usize, height: usize, left: i32, top: i32) {
    for sy in 0..height {
        let dy = top + sy as i32;
        if dy < 0 || dy >= target.height() as i32 {
            continue;
        }

        for sx in 0..width {
            let dx = left + sx as i32;
            if dx < 0 || dx >= target.width() as i32 {
                continue;
            }

            let sample = coverage[sy * width + sx];
            target.put_pixel(dx as u32, dy as u32, Rgb([sample, sample, sample]));
        }
    }
}
