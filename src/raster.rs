//! Indexed-color rasterization of symbols, used by the GIF converters.
//!
//! The PNG and TIFF encoders pack bits directly and do not go through a
//! pixel canvas; this module serves the paths that need one.

use crate::ModuleMatrix;

/// Palette index of a dark pixel.
pub const BLACK: u8 = 0;
/// Palette index of a light pixel.
pub const WHITE: u8 = 1;

/// An in-memory indexed-color canvas, one byte per pixel.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Canvas {
    /// Creates a canvas filled with [`WHITE`].
    pub fn new(width: usize, height: usize) -> Canvas {
        Canvas {
            width,
            height,
            pixels: vec![WHITE; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.pixels[y * self.width + x]
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: u8) {
        self.pixels[y * self.width + x] = color;
    }

    pub fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u8) {
        for row in y..y + h {
            let start = row * self.width + x;
            self.pixels[start..start + w].fill(color);
        }
    }
}

/// Draws one symbol with its top-left module at pixel `(xoffset, yoffset)`:
/// the three finder patterns first, then every remaining dark module.
pub fn draw_symbol(
    canvas: &mut Canvas,
    symbol: &ModuleMatrix,
    xoffset: usize,
    yoffset: usize,
    magnify: usize,
) {
    let dim = symbol.dim();
    draw_finder_patterns(canvas, dim, xoffset, yoffset, magnify);

    // three disjoint bands covering everything outside the finder corners
    let m = dim - 8;
    draw_dark_modules(canvas, symbol, 8, 0, m, 8, xoffset, yoffset, magnify);
    draw_dark_modules(canvas, symbol, 0, 8, dim, m, xoffset, yoffset, magnify);
    draw_dark_modules(canvas, symbol, 8, m, dim, dim, xoffset, yoffset, magnify);
}

/// Draws the three nested-square position detection patterns at the
/// top-left, top-right, and bottom-left corners of a symbol.
fn draw_finder_patterns(canvas: &mut Canvas, dim: usize, xoffset: usize, yoffset: usize, magnify: usize) {
    let corners = [
        (xoffset, yoffset),
        (xoffset + (dim - 7) * magnify, yoffset),
        (xoffset, yoffset + (dim - 7) * magnify),
    ];
    for (x, y) in corners {
        canvas.fill_rect(x, y, 7 * magnify, 7 * magnify, BLACK);
        canvas.fill_rect(x + magnify, y + magnify, 5 * magnify, 5 * magnify, WHITE);
        canvas.fill_rect(x + 2 * magnify, y + 2 * magnify, 3 * magnify, 3 * magnify, BLACK);
    }
}

/// Paints the dark modules of the half-open region
/// `cols [xfrom, xto) x rows [yfrom, yto)`.
#[allow(clippy::too_many_arguments)]
fn draw_dark_modules(
    canvas: &mut Canvas,
    symbol: &ModuleMatrix,
    xfrom: usize,
    yfrom: usize,
    xto: usize,
    yto: usize,
    xoffset: usize,
    yoffset: usize,
    magnify: usize,
) {
    if magnify == 1 {
        for i in yfrom..yto {
            for j in xfrom..xto {
                if symbol.is_black(i, j) {
                    canvas.set_pixel(j + xoffset, i + yoffset, BLACK);
                }
            }
        }
    } else {
        for i in yfrom..yto {
            for j in xfrom..xto {
                if symbol.is_black(i, j) {
                    canvas.fill_rect(
                        j * magnify + xoffset,
                        i * magnify + yoffset,
                        magnify,
                        magnify,
                        BLACK,
                    );
                }
            }
        }
    }
}
