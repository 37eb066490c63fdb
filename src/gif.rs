//! GIF conversion through the `image` crate's GIF backend.
//!
//! Symbols are rasterized onto an indexed [`Canvas`] and handed to
//! [`image::codecs::gif::GifEncoder`], which owns the header, frame, and
//! trailer layout. A structured-append set becomes one animation, one
//! symbol per frame, looping forever with a shared delay.

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, Rgba, RgbaImage};

use crate::geometry::Geometry;
use crate::raster::{self, BLACK, Canvas};
use crate::{Error, ModuleMatrix, RenderOptions, SymbolSet};

/// Converts a single symbol to a single-frame GIF.
pub fn encode_symbol(symbol: &ModuleMatrix, options: &RenderOptions) -> Result<Vec<u8>, Error> {
    let geo = Geometry::single(symbol.dim(), options)?;
    let mut canvas = Canvas::new(geo.imgdim, geo.imgdim);
    raster::draw_symbol(&mut canvas, symbol, geo.sepdim, geo.sepdim, geo.magnify);

    let mut out = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut out);
        encoder
            .encode_frame(Frame::new(canvas_to_rgba(&canvas)))
            .map_err(frame_error)?;
    }
    Ok(out)
}

/// Converts a structured-append set to one static GIF laying the symbols
/// out on a grid.
pub fn encode_set(set: &SymbolSet, options: &RenderOptions) -> Result<Vec<u8>, Error> {
    set.require_finalized()?;
    if set.num() == 1 {
        return encode_symbol(set.get(0), options);
    }
    let geo = Geometry::grid(set.dim(), set.num(), options)?;
    let mut canvas = Canvas::new(geo.xdim, geo.ydim);
    for gr in 0..geo.rows {
        for gc in 0..geo.cols {
            if let Some(symbol) = set.symbols().get(geo.index(gr, gc)) {
                let (x, y) = geo.origin(gr, gc);
                raster::draw_symbol(&mut canvas, symbol, x, y, geo.magnify);
            }
        }
    }

    let mut out = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut out);
        encoder
            .encode_frame(Frame::new(canvas_to_rgba(&canvas)))
            .map_err(frame_error)?;
    }
    Ok(out)
}

/// Converts a structured-append set to an animated GIF, one symbol per
/// frame. All frames share `options.delay` (centiseconds) and the
/// animation loops forever.
pub fn encode_set_animation(set: &SymbolSet, options: &RenderOptions) -> Result<Vec<u8>, Error> {
    set.require_finalized()?;
    if set.num() == 1 {
        return encode_symbol(set.get(0), options);
    }
    let geo = Geometry::single(set.dim(), options)?;

    let mut out = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut out);
        encoder.set_repeat(Repeat::Infinite).map_err(frame_error)?;
        for symbol in set.symbols() {
            let mut canvas = Canvas::new(geo.imgdim, geo.imgdim);
            raster::draw_symbol(&mut canvas, symbol, geo.sepdim, geo.sepdim, geo.magnify);
            let delay = Delay::from_numer_denom_ms(options.delay * 10, 1);
            let frame = Frame::from_parts(canvas_to_rgba(&canvas), 0, 0, delay);
            encoder.encode_frame(frame).map_err(frame_error)?;
        }
    }
    Ok(out)
}

fn canvas_to_rgba(canvas: &Canvas) -> RgbaImage {
    RgbaImage::from_fn(canvas.width() as u32, canvas.height() as u32, |x, y| {
        if canvas.pixel(x as usize, y as usize) == BLACK {
            Rgba([0, 0, 0, 255])
        } else {
            Rgba([255, 255, 255, 255])
        }
    })
}

fn frame_error(err: image::ImageError) -> Error {
    Error::ImageFrame(err.to_string())
}
