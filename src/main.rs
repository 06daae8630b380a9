//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]

use std::fs;

use huffpack::compression::compress::{code_table_report, compress_file};
use huffpack::compression::decompress::decompress_file;
use huffpack::tools::cli::{init_options, Mode};

use log::{error, info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() -> Result<(), huffpack::Error> {
    // Available log levels are Error, Warn, Info, Debug, Trace
    if let Err(e) = TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Could not start the logger: {}", e);
    }

    let options = init_options();

    //----- Figure what we need to do and go do it, one file at a time
    for file in &options.files {
        let result = match options.mode {
            Mode::Compress => compress_file(file, &options).map(|_| ()),
            Mode::Decompress => decompress_file(file, &options).map(|_| ()),
            Mode::Table => fs::read(file)
                .map_err(huffpack::Error::from)
                .and_then(|data| code_table_report(&data))
                .map(|report| println!("{}:\n{}", file.display(), report)),
        };
        if let Err(e) = result {
            error!("{}: {}", file.display(), e);
            return Err(e);
        }
    }

    info!("Done.\n");
    Ok(())
}
