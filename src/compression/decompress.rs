use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::bitstream::bitreader::BitReader;
use crate::error::{Error, Result};
use crate::huffman_coding::code_tree::build_code_tree;
use crate::tools::cli::Options;
use crate::tools::header::read_header;
use crate::tools::naming::decompressed_name;

use super::decode::decode;

/// Restore the original bytes from a compressed stream held in memory.
pub fn decompress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let (freqs, header_bytes) = read_header(data)?;
    debug!(
        "Read a {} byte header with {} symbols",
        header_bytes,
        freqs.len()
    );
    // Same frequencies, same deterministic builder, same tree as the compressor used
    let tree = build_code_tree(&freqs)?;

    let mut br = BitReader::new(&data[header_bytes..]);
    let out = decode(&mut br, &tree)?;
    debug!("Stopped reading at {}", br.loc());
    Ok(out)
}

/// Decompress `name.ext.huf` to `name_unc.ext`. Returns the name of the file written.
pub fn decompress_file(path: &Path, opts: &Options) -> Result<PathBuf> {
    let out_name = decompressed_name(path);
    if out_name.exists() && !opts.force_overwrite {
        warn!("Refusing to overwrite {}", out_name.display());
        return Err(Error::OutputExists(out_name));
    }

    let data = fs::read(path)?;
    info!("Decompressing {} ({} bytes)", path.display(), data.len());

    let out = decompress_bytes(&data)?;
    fs::write(&out_name, &out)?;

    info!("Wrote {} ({} bytes)", out_name.display(), out.len());
    Ok(out_name)
}
