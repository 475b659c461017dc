use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use berdump::{DecodeOptions, InputFormat, decode_with};
use clap::Parser;

/// Dump the structure of a BER/DER encoded file without a schema
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// File holding the encoded message
    der_file: PathBuf,

    /// 1 if the file holds raw bytes, 0 if it holds hex text
    #[arg(default_value_t = 1, value_parser = clap::value_parser!(u8).range(0..=1))]
    is_bin: u8,

    /// Spaces per nesting level
    #[arg(long, default_value_t = 4)]
    indent: usize,
}

fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let data = fs::read(&cli.der_file)
        .with_context(|| format!("failed to read {}", cli.der_file.display()))?;

    let options = DecodeOptions::new()
        .input_format(InputFormat::from_is_bin(cli.is_bin == 1))
        .indent(cli.indent);

    match decode_with(&data, &options) {
        Ok(report) => {
            print!("{}", report);
            Ok(ExitCode::SUCCESS)
        }
        Err(failure) => {
            print!("{}", failure.partial);
            log::error!("{}: {}", cli.der_file.display(), failure.kind());
            eprintln!("error: {}", failure);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
