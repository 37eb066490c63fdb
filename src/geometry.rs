use crate::{Error, RenderOptions};

/// Pixel-space layout derived from a symbol dimension and render options.
///
/// A single symbol occupies `imgdim = dim*magnify + 2*separator*magnify`
/// pixels per side. A structured-append grid places symbols at a pitch of
/// `sepdim + zdim`, so adjacent symbols share one separator; the canvas is
/// `cols/rows * imgdim`, and the spare width goes to the right and bottom
/// margins. A one-cell grid is laid out exactly like a single symbol.
#[derive(Debug, Clone)]
pub struct Geometry {
    /// Matrix side length, in modules.
    pub dim: usize,
    /// Pixels per module.
    pub magnify: usize,
    /// Separator width, in pixels.
    pub sepdim: usize,
    /// Symbol body side length, in pixels (`dim * magnify`).
    pub zdim: usize,
    /// Single-symbol image side length, in pixels (`zdim + 2 * sepdim`).
    pub imgdim: usize,
    /// Grid shape; `1 x 1` for a single symbol.
    pub cols: usize,
    pub rows: usize,
    /// Full canvas size in pixels (`cols/rows * imgdim`).
    pub xdim: usize,
    pub ydim: usize,
    column_major: bool,
}

impl Geometry {
    /// Layout for a single symbol.
    pub fn single(dim: usize, options: &RenderOptions) -> Result<Geometry, Error> {
        Geometry::grid(dim, 1, options)
    }

    /// Layout for a structured-append grid of `num` symbols.
    pub fn grid(dim: usize, num: usize, options: &RenderOptions) -> Result<Geometry, Error> {
        options.validate()?;
        let magnify = options.magnify as usize;
        let sepdim = options.separator as usize * magnify;
        let zdim = dim * magnify;
        let imgdim = zdim + 2 * sepdim;

        let (cols, rows) = if options.order > 0 {
            let cols = options.order as usize;
            (cols, num.div_ceil(cols))
        } else if options.order < 0 {
            let rows = options.order.unsigned_abs() as usize;
            (num.div_ceil(rows), rows)
        } else {
            let cols = ceil_sqrt(num);
            (cols, num.div_ceil(cols))
        };

        Ok(Geometry {
            dim,
            magnify,
            sepdim,
            zdim,
            imgdim,
            cols,
            rows,
            xdim: cols * imgdim,
            ydim: rows * imgdim,
            column_major: options.order < 0,
        })
    }

    /// Top-left pixel of the symbol placed in grid cell `(row, col)`.
    pub fn origin(&self, row: usize, col: usize) -> (usize, usize) {
        let pitch = self.sepdim + self.zdim;
        (col * pitch + self.sepdim, row * pitch + self.sepdim)
    }

    /// Sequence index of the symbol placed in grid cell `(row, col)`.
    ///
    /// Row-major for `order >= 0`, column-major for `order < 0`. The result
    /// may point past the end of the set for the unpopulated tail cells of
    /// an incomplete grid.
    pub fn index(&self, row: usize, col: usize) -> usize {
        if self.column_major {
            row + self.rows * col
        } else {
            self.cols * row + col
        }
    }
}

fn ceil_sqrt(n: usize) -> usize {
    let mut c = 1;
    while c * c < n {
        c += 1;
    }
    c
}
