//! huffpack: command-line front end for the huffpack codec.
//!
//! Reads and writes files, renders statistics and code tables, and leaves
//! every codec decision to `huffpack_core`.

mod config;
mod input_gen;

use anyhow::{bail, Context, Result};
use clap::Parser;
use config::{Cli, Command};
use huffpack_core::{CodeBook, Container, FrequencyTable};
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    match cli.command {
        Command::Compress {
            input,
            output,
            codes,
        } => {
            let output = output.unwrap_or_else(|| config::compressed_path(&input));
            ensure_writable(&output, cli.force)?;

            let compressed = huffpack_core::compress_file(&input, &output)
                .with_context(|| format!("failed to compress {}", input.display()))?;

            if codes {
                print_code_table(&compressed.frequencies, &compressed.codebook);
            }
            println!("{}", compressed.stats);
            println!("Saved to {}", output.display());
        }

        Command::Decompress { input, output } => {
            let output = output.unwrap_or_else(|| config::decompressed_path(&input));
            ensure_writable(&output, cli.force)?;

            let decompressed = huffpack_core::decompress_file(&input, &output)
                .with_context(|| format!("failed to decompress {}", input.display()))?;

            println!("{}", decompressed.stats);
            println!("Restored to {}", output.display());
        }

        Command::Inspect { input } => {
            let container = Container::read_file(&input)
                .with_context(|| format!("failed to read container {}", input.display()))?;

            println!("Container:  {}", input.display());
            println!("Symbols:    {}", container.frequencies.len());
            println!("Original:   {} bytes", container.frequencies.total());
            println!(
                "Payload:    {} bits in {} bytes",
                container.bit_len,
                container.payload.len()
            );
            println!("Checksum:   {:#010x}", container.crc32);
            println!("Entropy:    {:.3} bits/symbol", container.frequencies.entropy());
            println!();
            print_code_table(&container.frequencies, &container.codebook());
        }

        Command::Sample { output, size, seed } => {
            ensure_writable(&output, cli.force)?;
            let data = input_gen::generate_sample_data(seed, size);
            std::fs::write(&output, &data)
                .with_context(|| format!("failed to write {}", output.display()))?;
            println!(
                "Wrote {} bytes of sample data (seed {}) to {}",
                data.len(),
                seed,
                output.display()
            );
        }
    }

    Ok(())
}

/// Refuse to clobber an existing file unless `--force` was given.
fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    Ok(())
}

/// Print symbol, count and code for every entry, in first-observed order.
fn print_code_table(frequencies: &FrequencyTable, codes: &CodeBook) {
    println!("{:<8} {:>12}  Code", "Symbol", "Count");
    for (symbol, count) in frequencies.iter() {
        let code = codes
            .code(symbol)
            .map(|code| code.to_string())
            .unwrap_or_default();
        println!("{:<8} {:>12}  {}", symbol_label(symbol), count, code);
    }
    println!(
        "Average code length: {:.3} bits/symbol",
        codes.average_code_len(frequencies)
    );
    println!();
}

fn symbol_label(symbol: u8) -> String {
    match symbol {
        b' ' => "' '".to_string(),
        b'\n' => "'\\n'".to_string(),
        b'\t' => "'\\t'".to_string(),
        s if s.is_ascii_graphic() => format!("'{}'", s as char),
        s => format!("{s:#04x}"),
    }
}
