use std::path::PathBuf;
use std::{fmt::Display, fmt::Formatter};

use clap::Parser;
use log::{info, LevelFilter};

/// Verbosity of user information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Errors,
    Warnings,
    Info,
    Debug,
    Trace,
}

impl Verbosity {
    pub fn level_filter(self) -> LevelFilter {
        match self {
            Verbosity::Quiet => LevelFilter::Off,
            Verbosity::Errors => LevelFilter::Error,
            Verbosity::Warnings => LevelFilter::Warn,
            Verbosity::Info => LevelFilter::Info,
            Verbosity::Debug => LevelFilter::Debug,
            Verbosity::Trace => LevelFilter::Trace,
        }
    }
}

/// Compress, Decompress, or print the coding tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Compress,
    Decompress,
    Table,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Every user settable option that controls program behavior.
#[derive(Debug, Clone)]
pub struct Options {
    /// Files to process
    pub files: Vec<PathBuf>,
    /// Compress/Decompress/Table
    pub mode: Mode,
    /// Silently overwrite existing files with the same name
    pub force_overwrite: bool,
    /// Log the encoded bit string while compressing
    pub show_bits: bool,
    /// Verbosity of user information
    pub verbose: Verbosity,
}

impl Options {
    pub fn new() -> Self {
        Self {
            files: vec![],
            mode: Mode::Compress,
            force_overwrite: false,
            show_bits: false,
            verbose: Verbosity::Warnings,
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new()
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "A Huffman coding file compressor",
    long_about = "
    Compresses each input file to <file>.huf, or with -d restores <name>.<ext>.huf to
    <name>_unc.<ext>. A compressed file holds a text header with the byte frequencies,
    followed by the Huffman coded data."
)]
pub struct Args {
    /// Files to process
    #[clap(required = true)]
    files: Vec<String>,

    /// Perform compression on the input files (default)
    #[clap(short = 'z', long = "compress")]
    compress: bool,

    /// Perform decompression on the input files
    #[clap(short = 'd', long = "decompress", conflicts_with_all = &["compress", "table"])]
    decompress: bool,

    /// Print the frequency map and code table of each input instead of compressing
    #[clap(short = 't', long = "table", conflicts_with = "compress")]
    table: bool,

    /// Force overwriting output files
    #[clap(short = 'f', long = "force")]
    force: bool,

    /// Log the encoded bit string of each file
    #[clap(short = 'b', long = "show-bits")]
    show_bits: bool,

    /// Be verbose (a 2nd -v gives more)
    #[clap(short = 'v', long = "verbose", parse(from_occurrences))]
    verbose: u64,

    /// Suppress everything but errors
    #[clap(short = 'q', long = "quiet")]
    quiet: bool,
}

impl From<Args> for Options {
    fn from(args: Args) -> Self {
        let mode = if args.decompress {
            Mode::Decompress
        } else if args.table {
            Mode::Table
        } else {
            Mode::Compress
        };
        let verbose = if args.quiet {
            Verbosity::Errors
        } else {
            match args.verbose {
                0 => Verbosity::Warnings,
                1 => Verbosity::Info,
                2 => Verbosity::Debug,
                _ => Verbosity::Trace,
            }
        };
        Options {
            files: args.files.into_iter().map(PathBuf::from).collect(),
            mode,
            force_overwrite: args.force,
            show_bits: args.show_bits,
            verbose,
        }
    }
}

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parse the command line, set the log level to match, and report what we are going to do.
pub fn init_options() -> Options {
    let opts = Options::from(Args::parse());

    log::set_max_level(opts.verbose.level_filter());

    info!("huffpack, a Huffman file compressor. Rust version {}", VERSION);
    info!("Verbosity set to {}", log::max_level());
    info!("Operational mode set to {}", opts.mode);
    if opts.force_overwrite {
        info!("Forcing file overwriting")
    };
    opts
}
