//! Command-line configuration for the huffpack tool.
//!
//! Parses arguments with clap and resolves defaults (output paths, log
//! level). All defaults are derived from the arguments alone so runs are
//! reproducible.

use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Extension appended to compressed files
pub const CONTAINER_EXTENSION: &str = "huff";

/// Default size of generated sample data (64 KiB)
pub const DEFAULT_SAMPLE_BYTES: usize = 64 * 1024;

/// huffpack: lossless Huffman compression into self-describing containers
#[derive(Parser, Debug)]
#[command(name = "huffpack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Overwrite output files that already exist
    #[arg(long, global = true)]
    pub force: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compress a file into a container
    Compress {
        /// File to compress
        input: PathBuf,

        /// Output container (default: <INPUT>.huff)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also print the code table
        #[arg(long)]
        codes: bool,
    },

    /// Restore the original file from a container
    Decompress {
        /// Container to decompress
        input: PathBuf,

        /// Output file (default: INPUT without .huff, else INPUT.out)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print a container's header and code table without writing anything
    Inspect {
        /// Container to inspect
        input: PathBuf,
    },

    /// Write deterministic sample data with mixed compressibility
    Sample {
        /// Output file
        #[arg(short, long, default_value = "sample.bin")]
        output: PathBuf,

        /// Size in bytes
        #[arg(long, default_value_t = DEFAULT_SAMPLE_BYTES)]
        size: usize,

        /// Random seed
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

impl Cli {
    /// Log filter implied by the verbosity count.
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

/// Default container path for `input`: the input path with `.huff` appended.
pub fn compressed_path(input: &Path) -> PathBuf {
    let mut name: OsString = input.as_os_str().to_owned();
    name.push(".");
    name.push(CONTAINER_EXTENSION);
    PathBuf::from(name)
}

/// Default output path for decompressing `input`.
///
/// Strips a trailing `.huff`; otherwise appends `.out`.
pub fn decompressed_path(input: &Path) -> PathBuf {
    if input.extension().is_some_and(|ext| ext == CONTAINER_EXTENSION) {
        input.with_extension("")
    } else {
        let mut name: OsString = input.as_os_str().to_owned();
        name.push(".out");
        PathBuf::from(name)
    }
}
