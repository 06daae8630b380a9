//! Frequency counting for the compressor.
//!
//! Bytes are tallied into a flat 256 slot array first, then every byte that occurred is put into
//! the ordered frequency map, followed by a single count for the end-of-stream symbol.
//!

use std::io::{self, Read};

use log::debug;

use crate::error::Result;
use crate::huffman_coding::symbol::Symbol;
use crate::huffman_coding::FrequencyMap;

const CHUNK_SIZE: usize = 64 * 1024;

/// Returns a frequency count of the input data, indexed by byte value.
pub fn freqs(data: &[u8]) -> Vec<u64> {
    let mut freqs = vec![0_u64; 256];
    data.iter().for_each(|&el| freqs[el as usize] += 1);
    freqs
}

/// Build the frequency map for a byte string.
pub fn count_bytes(data: &[u8]) -> Result<FrequencyMap> {
    to_frequency_map(&freqs(data))
}

/// Build the frequency map for everything `reader` yields.
pub fn count_reader<R: Read>(mut reader: R) -> Result<FrequencyMap> {
    let mut counts = vec![0_u64; 256];
    let mut buf = vec![0_u8; CHUNK_SIZE];
    loop {
        let size = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(size) => size,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        buf[..size].iter().for_each(|&el| counts[el as usize] += 1);
    }
    to_frequency_map(&counts)
}

fn to_frequency_map(counts: &[u64]) -> Result<FrequencyMap> {
    let mut map = FrequencyMap::new();
    for (byte, &count) in counts.iter().enumerate() {
        if count > 0 {
            map.put(Symbol::Byte(byte as u8), count)?;
        }
    }
    map.put(Symbol::PseudoEof, 1)?;
    debug!("Counted {} distinct symbols", map.len());
    Ok(map)
}
