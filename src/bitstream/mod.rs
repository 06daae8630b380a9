//! The bitstream module forms the I/O subsystem for the compressor.
//!
//! The coder only needs two capabilities: a sink it can write single bits to, and a source it
//! can read single bits from after asking whether any are left. Those are the BitSink and
//! BitSource traits below.
//!
//! Files are handled by BitWriter and BitReader, which pack bits most significant bit first. The
//! last byte of a stream is padded with zero bits; the decoder never reads them because it stops
//! at the end-of-stream code.
//!
//! `Vec<bool>` and BitCursor implement the traits in memory, for diagnostics and tests.
//!
pub mod bitreader;
pub mod bitwriter;

use std::io;

/// Somewhere to put bits, one at a time.
pub trait BitSink {
    /// Append one bit. `true` is a 1.
    fn write_bit(&mut self, bit: bool) -> io::Result<()>;
}

/// Somewhere to take bits from, one at a time.
pub trait BitSource {
    /// True when no bits are left. Must be checked before every read.
    fn at_end(&mut self) -> io::Result<bool>;

    /// Take the next bit. Reading past the end is an `UnexpectedEof` error.
    fn read_bit(&mut self) -> io::Result<bool>;
}

impl BitSink for Vec<bool> {
    fn write_bit(&mut self, bit: bool) -> io::Result<()> {
        self.push(bit);
        Ok(())
    }
}

/// Reads bits back out of a slice.
#[derive(Debug, Clone)]
pub struct BitCursor<'a> {
    bits: &'a [bool],
    pos: usize,
}

impl<'a> BitCursor<'a> {
    pub fn new(bits: &'a [bool]) -> Self {
        Self { bits, pos: 0 }
    }
}

impl BitSource for BitCursor<'_> {
    fn at_end(&mut self) -> io::Result<bool> {
        Ok(self.pos >= self.bits.len())
    }

    fn read_bit(&mut self) -> io::Result<bool> {
        let bit = self
            .bits
            .get(self.pos)
            .copied()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no bits left"))?;
        self.pos += 1;
        Ok(bit)
    }
}

/// Render bits as `0` and `1` characters.
pub fn bits_to_string(bits: &[bool]) -> String {
    bits.iter().map(|&b| if b { '1' } else { '0' }).collect()
}
