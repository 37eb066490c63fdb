//! Monochrome 1-bit non-interlaced PNG encoder.
//!
//! The whole image is one IDAT chunk holding a single zlib stream, fed
//! scanline by scanline. Bit polarity follows the PNG grayscale convention:
//! a set bit is white, a cleared bit is a dark module.

use crate::bits::BitRow;
use crate::deflate::ZlibStream;
use crate::geometry::Geometry;
use crate::{Error, ModuleMatrix, RenderOptions, SymbolSet};

/// Row buffer allocation unit; rows wider than this cannot be encoded.
const BUFFER_UNIT: usize = 8192;

const SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Converts a single symbol to a PNG byte buffer.
pub fn encode_symbol(symbol: &ModuleMatrix, options: &RenderOptions) -> Result<Vec<u8>, Error> {
    let geo = Geometry::single(symbol.dim(), options)?;
    encode_image(&geo, std::slice::from_ref(symbol))
}

/// Converts a structured-append set to one PNG laying the symbols out on a
/// grid. Grid cells past the end of the set are left white.
pub fn encode_set(set: &SymbolSet, options: &RenderOptions) -> Result<Vec<u8>, Error> {
    set.require_finalized()?;
    if set.num() == 1 {
        return encode_symbol(set.get(0), options);
    }
    let geo = Geometry::grid(set.dim(), set.num(), options)?;
    encode_image(&geo, set.symbols())
}

fn encode_image(geo: &Geometry, symbols: &[ModuleMatrix]) -> Result<Vec<u8>, Error> {
    // one filter-type byte plus the packed pixels
    let rowbytes = geo.xdim.div_ceil(8) + 1;
    if BUFFER_UNIT / rowbytes == 0 {
        return Err(Error::WidthTooLarge(geo.xdim));
    }

    let mut out = Vec::with_capacity(BUFFER_UNIT);
    out.extend_from_slice(&SIGNATURE);
    write_chunk(&mut out, b"IHDR", &ihdr(geo.xdim as u32, geo.ydim as u32));

    let mut deflater = ZlibStream::new();

    let mut sep_row = BitRow::new(rowbytes - 1);
    sep_row.push_run(true, geo.xdim);

    // cells share one separator, so each gets a left separator and the
    // canvas keeps the leftover width as a right margin
    let pitch = geo.sepdim + geo.zdim;
    let mut row = BitRow::new(rowbytes - 1);
    for gr in 0..geo.rows {
        for _ in 0..geo.sepdim {
            write_scanline(&mut deflater, &sep_row)?;
        }
        for i in 0..geo.dim {
            row.clear();
            for gc in 0..geo.cols {
                row.push_run(true, geo.sepdim);
                match symbols.get(geo.index(gr, gc)) {
                    Some(symbol) => {
                        for j in 0..geo.dim {
                            row.push_run(!symbol.is_black(i, j), geo.magnify);
                        }
                    }
                    None => row.push_run(true, geo.zdim),
                }
            }
            row.push_run(true, geo.xdim - geo.cols * pitch);
            for _ in 0..geo.magnify {
                write_scanline(&mut deflater, &row)?;
            }
        }
    }
    for _ in 0..geo.ydim - geo.rows * pitch {
        write_scanline(&mut deflater, &sep_row)?;
    }

    let idat = deflater.finish()?;
    write_chunk(&mut out, b"IDAT", &idat);
    write_chunk(&mut out, b"IEND", &[]);
    Ok(out)
}

fn write_scanline(deflater: &mut ZlibStream, row: &BitRow) -> Result<(), Error> {
    deflater.write(&[0])?; // filter type: None
    deflater.write(row.as_bytes())
}

fn ihdr(width: u32, height: u32) -> [u8; 13] {
    let mut data = [0u8; 13];
    data[0..4].copy_from_slice(&width.to_be_bytes());
    data[4..8].copy_from_slice(&height.to_be_bytes());
    data[8] = 1; // bit depth
    data[9] = 0; // color type: grayscale
    // compression, filter, interlace stay 0
    data
}

fn write_chunk(out: &mut Vec<u8>, tag: &[u8; 4], data: &[u8]) {
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    out.extend_from_slice(tag);
    out.extend_from_slice(data);
    out.extend_from_slice(&crc32(&[tag, data]).to_be_bytes());
}

const CRC_TABLE: [u32; 256] = crc_table();

const fn crc_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut n = 0;
    while n < 256 {
        let mut c = n as u32;
        let mut k = 0;
        while k < 8 {
            c = if c & 1 != 0 { 0xedb8_8320 ^ (c >> 1) } else { c >> 1 };
            k += 1;
        }
        table[n] = c;
        n += 1;
    }
    table
}

/// CRC-32 over the concatenation of `parts` (PNG chunk type + data).
fn crc32(parts: &[&[u8]]) -> u32 {
    let mut c = 0xffff_ffffu32;
    for part in parts {
        for &byte in *part {
            c = CRC_TABLE[((c ^ byte as u32) & 0xff) as usize] ^ (c >> 8);
        }
    }
    c ^ 0xffff_ffff
}
