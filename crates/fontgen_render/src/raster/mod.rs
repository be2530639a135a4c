pub mod cell;
pub mod glyph;
