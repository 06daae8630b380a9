use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::bitstream::bitwriter::BitWriter;
use crate::error::{Error, Result};
use crate::huffman_coding::code_table::build_code_table;
use crate::huffman_coding::code_tree::build_code_tree;
use crate::tools::cli::Options;
use crate::tools::freq_count::count_bytes;
use crate::tools::header::write_header;
use crate::tools::naming::compressed_name;

use super::encode::Encoder;

/// Size accounting for one compressed stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressionReport {
    /// Bytes taken by the frequency header.
    pub header_bytes: usize,
    /// Huffman coded bits, including the end-of-stream code.
    pub payload_bits: u64,
    /// Header bytes plus the payload rounded up to whole bytes.
    pub compressed_size: u64,
    /// The payload as `0`/`1` text, when it was asked for.
    pub bit_string: Option<String>,
}

/// Compress `input` into `writer`: frequency header first, then the coded bits.
/// Hands the writer back with the size report.
pub fn compress_to<W: Write>(
    input: &[u8],
    writer: W,
    record_bits: bool,
) -> Result<(W, CompressionReport)> {
    let freqs = count_bytes(input)?;
    let tree = build_code_tree(&freqs)?;
    let table = build_code_table(&tree)?;
    debug!(
        "{} symbols, longest code is {} bits",
        table.len(),
        tree.depth()
    );

    let header = write_header(&freqs);
    let mut bw = BitWriter::new(writer);
    bw.put_bytes(header.as_bytes())?;

    let encoded = Encoder::new(&table)
        .record_bits(record_bits)
        .encode(input, &mut bw)?;
    let (writer, bytes_written) = bw.finish()?;

    let report = CompressionReport {
        header_bytes: header.len(),
        payload_bits: encoded.bits_written,
        compressed_size: header.len() as u64 + (encoded.bits_written + 7) / 8,
        bit_string: encoded.bit_string,
    };
    debug_assert_eq!(report.compressed_size, bytes_written);
    Ok((writer, report))
}

/// Compress `input` in memory.
pub fn compress_bytes(input: &[u8]) -> Result<(Vec<u8>, CompressionReport)> {
    compress_to(input, Vec::new(), false)
}

/// Compress the file at `path` to `path.huf`. Returns the name of the file written.
pub fn compress_file(path: &Path, opts: &Options) -> Result<PathBuf> {
    let out_name = compressed_name(path);
    if out_name.exists() && !opts.force_overwrite {
        warn!("Refusing to overwrite {}", out_name.display());
        return Err(Error::OutputExists(out_name));
    }

    let input = fs::read(path)?;
    info!("Compressing {} ({} bytes)", path.display(), input.len());

    let f_out = File::create(&out_name)?;
    let (_, report) = compress_to(&input, f_out, opts.show_bits)?;

    info!(
        "Wrote {}: {} header bytes + {} payload bits = {} bytes",
        out_name.display(),
        report.header_bytes,
        report.payload_bits,
        report.compressed_size
    );
    if let Some(bits) = &report.bit_string {
        info!("{}", bits);
    }
    Ok(out_name)
}

/// The frequency map, code table and map shape for `input`, as printable text.
pub fn code_table_report(input: &[u8]) -> Result<String> {
    let freqs = count_bytes(input)?;
    let tree = build_code_tree(&freqs)?;
    let table = build_code_table(&tree)?;

    let mut report = String::new();
    report.push_str("Frequencies:\n");
    report.push_str(&freqs.to_string());
    report.push_str("Codes:\n");
    report.push_str(&table.to_string());
    report.push_str("Code table balance:\n");
    report.push_str(&table.balance_report());
    Ok(report)
}
