use std::{io::Write, path::Path};

use crate::{Error, Format, ModuleMatrix, RenderOptions, SymbolSet, gif, png, svg, tiff};

/// Converts a single symbol to the requested format, returning the encoded
/// bytes.
pub fn encode_to_memory(
    symbol: &ModuleMatrix,
    format: Format,
    options: &RenderOptions,
) -> Result<Vec<u8>, Error> {
    match format {
        Format::Png => png::encode_symbol(symbol, options),
        Format::Tiff => tiff::encode_symbol(symbol, options),
        Format::Svg => svg::encode_symbol(symbol, options),
        Format::Gif => gif::encode_symbol(symbol, options),
    }
}

pub fn encode_to_writer(
    symbol: &ModuleMatrix,
    format: Format,
    options: &RenderOptions,
    writer: impl Write,
) -> Result<Vec<u8>, Error> {
    let encoded = encode_to_memory(symbol, format, options)?;
    let mut writer = std::io::BufWriter::new(writer);
    writer.write_all(&encoded).map_err(|_| Error::Io)?;
    writer.flush().map_err(|_| Error::Io)?;
    Ok(encoded)
}

pub fn encode_to_file(
    symbol: &ModuleMatrix,
    format: Format,
    options: &RenderOptions,
    path: impl AsRef<Path>,
) -> Result<Vec<u8>, Error> {
    let file = std::fs::File::create(path).map_err(|_| Error::Io)?;
    encode_to_writer(symbol, format, options, file)
}

/// Converts a structured-append set to the requested format.
///
/// PNG, TIFF, and SVG lay the symbols out on a grid; GIF produces an
/// animation with one symbol per frame. A one-symbol set encodes exactly
/// like the single-symbol functions.
pub fn encode_set_to_memory(
    set: &SymbolSet,
    format: Format,
    options: &RenderOptions,
) -> Result<Vec<u8>, Error> {
    match format {
        Format::Png => png::encode_set(set, options),
        Format::Tiff => tiff::encode_set(set, options),
        Format::Svg => svg::encode_set(set, options),
        Format::Gif => gif::encode_set_animation(set, options),
    }
}

pub fn encode_set_to_writer(
    set: &SymbolSet,
    format: Format,
    options: &RenderOptions,
    writer: impl Write,
) -> Result<Vec<u8>, Error> {
    let encoded = encode_set_to_memory(set, format, options)?;
    let mut writer = std::io::BufWriter::new(writer);
    writer.write_all(&encoded).map_err(|_| Error::Io)?;
    writer.flush().map_err(|_| Error::Io)?;
    Ok(encoded)
}

pub fn encode_set_to_file(
    set: &SymbolSet,
    format: Format,
    options: &RenderOptions,
    path: impl AsRef<Path>,
) -> Result<Vec<u8>, Error> {
    let file = std::fs::File::create(path).map_err(|_| Error::Io)?;
    encode_set_to_writer(set, format, options, file)
}
