//! The frequency header written at the front of every compressed file.
//!
//! The header is plain text so it can be read and diffed by eye:
//!
//! `{97:3, 98:2, 99:1, 256:1}`
//!
//! Each entry is a symbol code (a byte value, or 256 for end-of-stream) and its count, in
//! ascending symbol order. The closing brace ends the header; the packed bits follow directly.
//!

use std::fmt::Write;

use crate::error::{Error, Result};
use crate::huffman_coding::symbol::Symbol;
use crate::huffman_coding::FrequencyMap;

/// Serialize `freqs` as a header.
pub fn write_header(freqs: &FrequencyMap) -> String {
    let mut header = String::from("{");
    for (i, (symbol, count)) in freqs.iter().enumerate() {
        if i > 0 {
            header.push_str(", ");
        }
        // Writing to a String cannot fail
        let _ = write!(header, "{}:{}", symbol.code(), count);
    }
    header.push('}');
    header
}

/// Parse a header from the front of `data`. Returns the frequency map and the number of bytes
/// the header took up. The end-of-stream symbol is always present in the result with a count
/// of one, whether or not the header listed it.
pub fn read_header(data: &[u8]) -> Result<(FrequencyMap, usize)> {
    if data.first() != Some(&b'{') {
        return Err(Error::MalformedHeader("missing opening brace".to_string()));
    }
    let end = data
        .iter()
        .position(|&b| b == b'}')
        .ok_or_else(|| Error::MalformedHeader("missing closing brace".to_string()))?;
    let body = std::str::from_utf8(&data[1..end])
        .map_err(|_| Error::MalformedHeader("header is not text".to_string()))?;

    let mut freqs = FrequencyMap::new();
    let mut total: u64 = 0;
    if !body.trim().is_empty() {
        for entry in body.split(',') {
            let (symbol, count) = parse_entry(entry.trim())?;
            if freqs.contains(&symbol) {
                return Err(Error::MalformedHeader(format!("{} listed twice", symbol)));
            }
            total = total
                .checked_add(count)
                .ok_or_else(|| Error::MalformedHeader("counts overflow".to_string()))?;
            freqs.put(symbol, count)?;
        }
    }
    freqs.put(Symbol::PseudoEof, 1)?;

    Ok((freqs, end + 1))
}

fn parse_entry(entry: &str) -> Result<(Symbol, u64)> {
    let bad = || Error::MalformedHeader(format!("bad entry '{}'", entry));
    let (code, count) = entry.split_once(':').ok_or_else(bad)?;
    let code: u16 = code.trim().parse().map_err(|_| bad())?;
    let count: u64 = count.trim().parse().map_err(|_| bad())?;
    let symbol = Symbol::from_code(code).ok_or_else(bad)?;
    if count == 0 {
        return Err(bad());
    }
    Ok((symbol, count))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tools::freq_count::count_bytes;

    #[test]
    fn write_test() {
        let freqs = count_bytes(b"aaabbc").unwrap();
        assert_eq!(write_header(&freqs), "{97:3, 98:2, 99:1, 256:1}");
    }

    #[test]
    fn read_back_test() {
        let freqs = count_bytes(b"hello, world").unwrap();
        let mut data = write_header(&freqs).into_bytes();
        let header_len = data.len();
        data.extend_from_slice(&[0b1010_0000, 0xff]);
        let (parsed, used) = read_header(&data).unwrap();
        assert_eq!(used, header_len);
        assert_eq!(parsed.to_vec(), freqs.to_vec());
    }

    #[test]
    fn eof_is_restored_test() {
        let (parsed, used) = read_header(b"{120:2}").unwrap();
        assert_eq!(used, 7);
        assert_eq!(
            parsed.to_vec(),
            vec![(Symbol::Byte(b'x'), 2), (Symbol::PseudoEof, 1)]
        );
    }

    #[test]
    fn empty_header_test() {
        let (parsed, used) = read_header(b"{}").unwrap();
        assert_eq!(used, 2);
        assert_eq!(parsed.to_vec(), vec![(Symbol::PseudoEof, 1)]);
    }

    #[test]
    fn malformed_test() {
        for bad in [
            &b"97:3}"[..],
            b"{97:3",
            b"{97-3}",
            b"{x:3}",
            b"{300:1}",
            b"{97:0}",
            b"{97:1, 97:2}",
            b"{97:18446744073709551615, 98:1}",
        ] {
            assert!(
                matches!(read_header(bad), Err(Error::MalformedHeader(_))),
                "accepted {:?}",
                String::from_utf8_lossy(bad)
            );
        }
    }
}
