//! SVG 1.1 emitter.
//!
//! The document declares one unit-square `<rect id="m">` for a dark module
//! and one `<g id="p">` for a finder pattern, then places everything with
//! `<use>` references at matrix coordinates inside a per-symbol
//! `translate(..) scale(..)` group.

use std::fmt::Write;

use crate::geometry::Geometry;
use crate::{EcLevel, Error, ModuleMatrix, RenderOptions, SymbolSet};

/// Converts a single symbol to an SVG document.
pub fn encode_symbol(symbol: &ModuleMatrix, options: &RenderOptions) -> Result<Vec<u8>, Error> {
    let geo = Geometry::single(symbol.dim(), options)?;
    let mut doc = preamble(&geo, symbol.version(), symbol.ecl(), None);
    write_symbol_group(&mut doc, &geo, symbol, 0, 0);
    doc.push_str("</svg>\n");
    Ok(doc.into_bytes())
}

/// Converts a structured-append set to one SVG laying the symbols out on a
/// grid.
pub fn encode_set(set: &SymbolSet, options: &RenderOptions) -> Result<Vec<u8>, Error> {
    set.require_finalized()?;
    if set.num() == 1 {
        return encode_symbol(set.get(0), options);
    }
    let geo = Geometry::grid(set.dim(), set.num(), options)?;
    let first = set.get(0);
    let mut doc = preamble(&geo, first.version(), first.ecl(), Some(set.num()));
    for gr in 0..geo.rows {
        for gc in 0..geo.cols {
            if let Some(symbol) = set.symbols().get(geo.index(gr, gc)) {
                write_symbol_group(&mut doc, &geo, symbol, gr, gc);
            }
        }
    }
    doc.push_str("</svg>\n");
    Ok(doc.into_bytes())
}

fn preamble(geo: &Geometry, version: usize, ecl: EcLevel, num: Option<usize>) -> String {
    let mut doc = String::with_capacity(4096);
    let extra = match num {
        Some(num) => format!(", structured-append={num}"),
        None => String::new(),
    };
    let _ = write!(
        doc,
        "<?xml version=\"1.0\" standalone=\"no\"?>\n\
         <!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\"\n\
         \x20 \"http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd\">\n\
         <svg width=\"{xdim}\" height=\"{ydim}\" version=\"1.1\"\n\
         \x20 xmlns=\"http://www.w3.org/2000/svg\"\n\
         \x20 xmlns:xlink=\"http://www.w3.org/1999/xlink\">\n\
         \x20<desc>QR Code (version={version}, ecl={ecl}{extra})</desc>\n\
         \x20<defs>\n\
         \x20 <rect id=\"m\" width=\"1\" height=\"1\" fill=\"black\"/>\n\
         \x20 <g id=\"p\">\n\
         \x20  <rect x=\"0\" y=\"0\" width=\"7\" height=\"7\" fill=\"black\"/>\n\
         \x20  <rect x=\"1\" y=\"1\" width=\"5\" height=\"5\" fill=\"white\"/>\n\
         \x20  <rect x=\"2\" y=\"2\" width=\"3\" height=\"3\" fill=\"black\"/>\n\
         \x20 </g>\n\
         \x20</defs>\n\
         \x20<rect x=\"0\" y=\"0\" width=\"{xdim}\" height=\"{ydim}\" fill=\"white\"/>\n",
        xdim = geo.xdim,
        ydim = geo.ydim,
        version = version,
        ecl = ecl.as_str(),
        extra = extra,
    );
    doc
}

/// One `<g>` per symbol: the three finder patterns, then every dark module
/// outside the finder corners, all in module units under the group's scale.
fn write_symbol_group(doc: &mut String, geo: &Geometry, symbol: &ModuleMatrix, gr: usize, gc: usize) {
    let (x, y) = geo.origin(gr, gc);
    let dim = symbol.dim();
    let _ = write!(
        doc,
        "\x20<g transform=\"translate({x}, {y}) scale({mag})\">\n\
         \x20 <use xlink:href=\"#p\"/>\n\
         \x20 <use xlink:href=\"#p\" transform=\"translate({d}, 0)\"/>\n\
         \x20 <use xlink:href=\"#p\" transform=\"translate(0, {d})\"/>\n",
        x = x,
        y = y,
        mag = geo.magnify,
        d = dim - 7,
    );
    for i in 0..8 {
        for j in 8..dim - 8 {
            write_module(doc, symbol, i, j);
        }
    }
    for i in 8..dim - 8 {
        for j in 0..dim {
            write_module(doc, symbol, i, j);
        }
    }
    for i in dim - 8..dim {
        for j in 8..dim {
            write_module(doc, symbol, i, j);
        }
    }
    doc.push_str(" </g>\n");
}

fn write_module(doc: &mut String, symbol: &ModuleMatrix, i: usize, j: usize) {
    if symbol.is_black(i, j) {
        let _ = write!(doc, "  <use xlink:href=\"#m\" x=\"{j}\" y=\"{i}\"/>\n");
    }
}
