//! Bitmap text for labels, drawn from the 8x8 `font8x8` glyph set.

use font8x8::{UnicodeFonts, BASIC_FONTS, LATIN_FONTS};
use plotters::coord::Shift;
use plotters::prelude::{DrawingArea, DrawingBackend, RGBColor};

use crate::error::{PunchError, Result};

const GLYPH_CELL: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Center,
    Bottom,
}

#[derive(Debug, Clone, Copy)]
pub struct Face {
    /// Glyph cell edge in pixels.
    pub size: u32,
    pub bold: bool,
    pub color: RGBColor,
}

impl Face {
    pub fn text_width(&self, text: &str) -> i32 {
        text.chars().count() as i32 * self.size as i32
    }

    /// Draws `text` so that `anchor` sits at the requested alignment point.
    pub fn draw<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        text: &str,
        anchor: (i32, i32),
        halign: HAlign,
        valign: VAlign,
    ) -> Result<()> {
        let size = self.size as i32;
        let left = match halign {
            HAlign::Left => anchor.0,
            HAlign::Center => anchor.0 - self.text_width(text) / 2,
        };
        let top = match valign {
            VAlign::Top => anchor.1,
            VAlign::Center => anchor.1 - size / 2,
            VAlign::Bottom => anchor.1 - size,
        };

        for (i, ch) in text.chars().enumerate() {
            let rows = glyph(ch);
            let x0 = left + i as i32 * size;
            for ty in 0..self.size {
                let bits = rows[(ty * GLYPH_CELL / self.size) as usize];
                for tx in 0..self.size {
                    if (bits >> (tx * GLYPH_CELL / self.size)) & 1 == 0 {
                        continue;
                    }
                    let (x, y) = (x0 + tx as i32, top + ty as i32);
                    self.put(area, x, y)?;
                    if self.bold {
                        self.put(area, x + 1, y)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn put<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>, x: i32, y: i32) -> Result<()> {
        area.draw_pixel((x, y), &self.color)
            .map_err(|e| PunchError::Render(e.to_string()))
    }
}

fn glyph(ch: char) -> [u8; 8] {
    BASIC_FONTS
        .get(ch)
        .or_else(|| LATIN_FONTS.get(ch))
        .or_else(|| BASIC_FONTS.get('?'))
        .unwrap_or([0; 8])
}
