//! Big-endian bilevel TIFF encoder.
//!
//! The image is stored in strips of at most [`STRIP_SIZE`] bytes. When
//! `magnify > 1` each strip is independently ZIP (DEFLATE) compressed; at
//! 1x the data is written raw, trading a few bytes for reader
//! compatibility. Bit polarity is PhotometricInterpretation 0 ("white is
//! zero"): a set bit is a dark module.

use crate::bits::BitRow;
use crate::deflate::compress_zlib;
use crate::geometry::Geometry;
use crate::{Error, ModuleMatrix, RenderOptions, SymbolSet};

/// Maximum size of one uncompressed strip.
const STRIP_SIZE: usize = 8192;

const HEADER_SIZE: usize = 8;
const IFD_ENTRIES: usize = 12;
/// Entry count word, the entries, and a two-byte next-IFD terminator.
const IFD_SIZE: usize = 2 + 12 * IFD_ENTRIES + 2;
/// Offset of the StripByteCounts value field, patched for single-strip files.
const STRIPBYTECOUNTS_VALUE_OFFSET: usize = HEADER_SIZE + 2 + 12 * 7 + 8;
/// Offset of the strip info tables (or the image data when there is one strip).
const DATA_OFFSET: usize = HEADER_SIZE + IFD_SIZE + 8 + 8;

const TYPE_SHORT: u16 = 3;
const TYPE_LONG: u16 = 4;
const TYPE_RATIONAL: u16 = 5;

const COMPRESSION_NONE: u16 = 1;
const COMPRESSION_ZIP: u16 = 8;

/// Converts a single symbol to a TIFF byte buffer.
pub fn encode_symbol(symbol: &ModuleMatrix, options: &RenderOptions) -> Result<Vec<u8>, Error> {
    let geo = Geometry::single(symbol.dim(), options)?;
    encode_image(&geo, std::slice::from_ref(symbol))
}

/// Converts a structured-append set to one TIFF laying the symbols out on a
/// grid. Grid cells past the end of the set are left white, as in PNG.
pub fn encode_set(set: &SymbolSet, options: &RenderOptions) -> Result<Vec<u8>, Error> {
    set.require_finalized()?;
    if set.num() == 1 {
        return encode_symbol(set.get(0), options);
    }
    let geo = Geometry::grid(set.dim(), set.num(), options)?;
    encode_image(&geo, set.symbols())
}

fn encode_image(geo: &Geometry, symbols: &[ModuleMatrix]) -> Result<Vec<u8>, Error> {
    let compression = if geo.magnify > 1 { COMPRESSION_ZIP } else { COMPRESSION_NONE };

    let rowbytes = geo.xdim.div_ceil(8);
    let mut rowsperstrip = STRIP_SIZE / rowbytes;
    if rowsperstrip == 0 {
        return Err(Error::WidthTooLarge(geo.xdim));
    }
    if rowsperstrip > geo.ydim {
        rowsperstrip = geo.ydim;
    }
    let totalstrips = geo.ydim.div_ceil(rowsperstrip);

    let mut out = write_header(geo, rowsperstrip, totalstrips, compression);

    let mut writer = StripWriter {
        out: &mut out,
        strip: Vec::with_capacity(rowsperstrip * rowbytes),
        rowsperstrip,
        totalstrips,
        rows_in_strip: 0,
        strip_number: 0,
        compression,
    };

    // shared-separator pitch, as in PNG; the zeroed row buffer already
    // holds the light right margin
    let pitch = geo.sepdim + geo.zdim;
    let sep_row = BitRow::new(rowbytes);
    let mut row = BitRow::new(rowbytes);
    for gr in 0..geo.rows {
        for _ in 0..geo.sepdim {
            writer.push_row(sep_row.as_bytes())?;
        }
        for i in 0..geo.dim {
            row.clear();
            for gc in 0..geo.cols {
                row.push_run(false, geo.sepdim);
                match symbols.get(geo.index(gr, gc)) {
                    Some(symbol) => {
                        for j in 0..geo.dim {
                            row.push_run(symbol.is_black(i, j), geo.magnify);
                        }
                    }
                    None => row.push_run(false, geo.zdim),
                }
            }
            for _ in 0..geo.magnify {
                writer.push_row(row.as_bytes())?;
            }
        }
    }
    for _ in 0..geo.ydim - geo.rows * pitch {
        writer.push_row(sep_row.as_bytes())?;
    }
    writer.finish()?;

    Ok(out)
}

/// Accumulates rows into strips and flushes each full strip to the output,
/// keeping the IFD strip bookkeeping up to date.
struct StripWriter<'a> {
    out: &'a mut Vec<u8>,
    strip: Vec<u8>,
    rowsperstrip: usize,
    totalstrips: usize,
    rows_in_strip: usize,
    strip_number: usize,
    compression: u16,
}

impl StripWriter<'_> {
    fn push_row(&mut self, row: &[u8]) -> Result<(), Error> {
        self.strip.extend_from_slice(row);
        self.rows_in_strip += 1;
        if self.rows_in_strip == self.rowsperstrip {
            self.flush()?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Error> {
        let data = if self.compression == COMPRESSION_ZIP {
            compress_zlib(&self.strip)?
        } else {
            std::mem::take(&mut self.strip)
        };
        let offset = self.out.len();
        if self.totalstrips > 1 {
            // parallel offset and byte count tables, one entry per strip
            let optr = DATA_OFFSET + 4 * self.strip_number;
            let sptr = DATA_OFFSET + 4 * self.totalstrips + 4 * self.strip_number;
            self.out[optr..optr + 4].copy_from_slice(&(offset as u32).to_be_bytes());
            self.out[sptr..sptr + 4].copy_from_slice(&(data.len() as u32).to_be_bytes());
        } else {
            let sptr = STRIPBYTECOUNTS_VALUE_OFFSET;
            self.out[sptr..sptr + 4].copy_from_slice(&(data.len() as u32).to_be_bytes());
        }
        self.out.extend_from_slice(&data);
        self.strip.clear();
        self.rows_in_strip = 0;
        self.strip_number += 1;
        Ok(())
    }

    fn finish(mut self) -> Result<(), Error> {
        if !self.strip.is_empty() {
            self.flush()?;
        }
        Ok(())
    }
}

fn write_header(geo: &Geometry, rowsperstrip: usize, totalstrips: usize, compression: u16) -> Vec<u8> {
    let xresoffset = HEADER_SIZE + IFD_SIZE;
    let yresoffset = xresoffset + 8;
    // with one strip the data follows the rationals directly; otherwise the
    // offset table does, and StripByteCounts points at the second table
    let stripoffsets = yresoffset + 8;
    let stripbytecounts = if totalstrips > 1 { stripoffsets + 4 * totalstrips } else { 0 };

    let mut out = Vec::with_capacity(DATA_OFFSET + 8 * totalstrips);

    // header: "MM" byte order mark, magic, IFD offset
    out.extend_from_slice(b"MM");
    put_u16(&mut out, 42);
    put_u32(&mut out, HEADER_SIZE as u32);

    put_u16(&mut out, IFD_ENTRIES as u16);
    ifd_entry(&mut out, 0x0100, TYPE_LONG, 1, geo.xdim as u32); // ImageWidth
    ifd_entry(&mut out, 0x0101, TYPE_LONG, 1, geo.ydim as u32); // ImageLength
    ifd_entry(&mut out, 0x0102, TYPE_SHORT, 1, 1); // BitsPerSample
    ifd_entry(&mut out, 0x0103, TYPE_SHORT, 1, compression as u32); // Compression
    ifd_entry(&mut out, 0x0106, TYPE_SHORT, 1, 0); // PhotometricInterpretation
    ifd_entry(&mut out, 0x0111, TYPE_LONG, totalstrips as u32, stripoffsets as u32); // StripOffsets
    ifd_entry(&mut out, 0x0116, TYPE_LONG, 1, rowsperstrip as u32); // RowsPerStrip
    ifd_entry(&mut out, 0x0117, TYPE_LONG, totalstrips as u32, stripbytecounts as u32); // StripByteCounts
    ifd_entry(&mut out, 0x011A, TYPE_RATIONAL, 1, xresoffset as u32); // XResolution
    ifd_entry(&mut out, 0x011B, TYPE_RATIONAL, 1, yresoffset as u32); // YResolution
    ifd_entry(&mut out, 0x0128, TYPE_SHORT, 1, 2); // ResolutionUnit: inch
    ifd_entry(&mut out, 0x0140, TYPE_SHORT, 6, 0); // ColorMap: none

    // next-IFD terminator, written as a 16-bit zero; together with the high
    // half of the XResolution numerator that follows, readers see a 32-bit
    // zero pointer
    put_u16(&mut out, 0);

    put_u32(&mut out, 150); // XResolution: 150 dpi
    put_u32(&mut out, 1);
    put_u32(&mut out, 150); // YResolution
    put_u32(&mut out, 1);

    if totalstrips > 1 {
        // strip offset and byte count tables, patched as strips are flushed
        out.resize(out.len() + 8 * totalstrips, 0);
    }

    out
}

fn ifd_entry(out: &mut Vec<u8>, tag: u16, field_type: u16, count: u32, value: u32) {
    put_u16(out, tag);
    put_u16(out, field_type);
    put_u32(out, count);
    if field_type == TYPE_SHORT {
        put_u16(out, value as u16);
        put_u16(out, 0);
    } else {
        put_u32(out, value);
    }
}

fn put_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_be_bytes());
}

fn put_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_be_bytes());
}
