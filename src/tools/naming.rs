//! Output file names.
//!
//! - Compressing `name` writes `name.huf`.
//! - Decompressing `name.ext.huf` writes `name_unc.ext`, and `name.huf` writes `name_unc`.
//!

use std::path::{Path, PathBuf};

pub const EXTENSION: &str = ".huf";
const UNCOMPRESSED_TAG: &str = "_unc";

/// Where the compressed copy of `path` goes.
pub fn compressed_name(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(EXTENSION);
    PathBuf::from(name)
}

/// Where the decompressed copy of `path` goes.
pub fn decompressed_name(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stripped = file_name
        .strip_suffix(EXTENSION)
        .unwrap_or(file_name.as_str());

    // Split at the first dot that is not a leading one
    let new_name = match stripped.get(1..).and_then(|rest| rest.find('.')) {
        Some(pos) => {
            let (stem, ext) = stripped.split_at(pos + 1);
            format!("{}{}{}", stem, UNCOMPRESSED_TAG, ext)
        }
        None => format!("{}{}", stripped, UNCOMPRESSED_TAG),
    };
    path.with_file_name(new_name)
}
