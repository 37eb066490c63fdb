/// A fixed-width scanline of MSB-first packed bits, reused row by row.
///
/// The PNG and TIFF encoders assemble each output row into one of these
/// before handing it to the compressor; what a set bit means (dark or
/// light) is the caller's convention.
pub(crate) struct BitRow {
    bytes: Vec<u8>,
    pos: usize,
}

impl BitRow {
    pub fn new(nbytes: usize) -> BitRow {
        BitRow {
            bytes: vec![0; nbytes],
            pos: 0,
        }
    }

    pub fn clear(&mut self) {
        self.bytes.fill(0);
        self.pos = 0;
    }

    pub fn push(&mut self, bit: bool) {
        if bit {
            self.bytes[self.pos >> 3] |= 0x80 >> (self.pos & 7);
        }
        self.pos += 1;
    }

    pub fn push_run(&mut self, bit: bool, count: usize) {
        for _ in 0..count {
            self.push(bit);
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}
