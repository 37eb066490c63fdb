//! Streaming zlib compression on top of `miniz_oxide`.

use miniz_oxide::deflate::core::{
    CompressorOxide, TDEFLFlush, TDEFLStatus, compress, create_comp_flags_from_zip_params,
};

use crate::Error;

const DEFLATE_LEVEL: i32 = 6;
const OUT_CHUNK: usize = 8192;

/// An incremental zlib (RFC 1950) stream.
///
/// The PNG encoder feeds scanlines through one stream for the whole image;
/// the TIFF encoder opens a fresh stream per strip.
pub(crate) struct ZlibStream {
    comp: Box<CompressorOxide>,
    out: Vec<u8>,
}

impl ZlibStream {
    pub fn new() -> ZlibStream {
        // positive window bits select the zlib wrapper
        let flags = create_comp_flags_from_zip_params(DEFLATE_LEVEL, 15, 0);
        ZlibStream {
            comp: Box::new(CompressorOxide::new(flags)),
            out: Vec::new(),
        }
    }

    pub fn write(&mut self, data: &[u8]) -> Result<(), Error> {
        self.drive(data, TDEFLFlush::None)
    }

    pub fn finish(mut self) -> Result<Vec<u8>, Error> {
        self.drive(&[], TDEFLFlush::Finish)?;
        Ok(self.out)
    }

    fn drive(&mut self, mut data: &[u8], flush: TDEFLFlush) -> Result<(), Error> {
        let mut chunk = [0u8; OUT_CHUNK];
        loop {
            let (status, consumed, written) = compress(&mut self.comp, data, &mut chunk, flush);
            self.out.extend_from_slice(&chunk[..written]);
            data = &data[consumed..];
            match status {
                TDEFLStatus::Done => return Ok(()),
                TDEFLStatus::Okay => {
                    if data.is_empty() && matches!(flush, TDEFLFlush::None) {
                        return Ok(());
                    }
                }
                _ => return Err(Error::Deflate("deflate()".to_owned())),
            }
        }
    }
}

/// Compresses one block as a self-contained zlib stream.
pub(crate) fn compress_zlib(data: &[u8]) -> Result<Vec<u8>, Error> {
    let mut stream = ZlibStream::new();
    stream.write(data)?;
    stream.finish()
}
