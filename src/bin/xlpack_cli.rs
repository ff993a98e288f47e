//! CLI tool for xlpack - builds an XLSX package from a JSON description
//!
//! Usage:
//!   xlpack_cli <input.json>                # Write input.xlsx next to the input
//!   xlpack_cli <input.json> -o out.xlsx    # Write to the given file
//!   xlpack_cli <input.json> --dir out/     # Write the unpacked parts
//!   xlpack_cli --version
//!
//! `XLPACK_LOG=debug` prints each part as it is written.

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::path::PathBuf;

use xlpack::document::WorkbookDocument;
use xlpack::{to_xlsx_bytes, DirStorage, PackageWriter, XlsxError};

enum Output {
    File(PathBuf),
    Dir(PathBuf),
}

/// Minimal stderr logger, installed only when `XLPACK_LOG` is set.
struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging() {
    let Ok(level) = env::var("XLPACK_LOG") else {
        return;
    };
    let filter = level.parse().unwrap_or(log::LevelFilter::Info);
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(filter);
    }
}

fn main() {
    init_logging();
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: xlpack_cli <input.json> [-o output.xlsx | --dir output_dir]");
        std::process::exit(1);
    }

    if args[1] == "--version" {
        println!("xlpack_cli {}", xlpack::version());
        return;
    }

    let input_path = &args[1];
    let output = if args.len() > 3 && args[2] == "-o" {
        Output::File(PathBuf::from(&args[3]))
    } else if args.len() > 3 && args[2] == "--dir" {
        Output::Dir(PathBuf::from(&args[3]))
    } else {
        Output::File(PathBuf::from(input_path).with_extension("xlsx"))
    };

    let data = match fs::read(input_path) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error reading {}: {}", input_path, e);
            std::process::exit(1);
        }
    };

    let document = match WorkbookDocument::from_slice(&data) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Error parsing {}: {}", input_path, e);
            std::process::exit(1);
        }
    };

    let workbook = match document.to_workbook() {
        Ok(wb) => wb,
        Err(e) => {
            eprintln!("Invalid workbook: {}", e);
            std::process::exit(1);
        }
    };

    let options = document.options.clone();
    let result = match &output {
        Output::File(path) => to_xlsx_bytes(&workbook, options)
            .and_then(|bytes| fs::write(path, bytes).map_err(XlsxError::from)),
        Output::Dir(path) => PackageWriter::with_options(DirStorage::new(path), options)
            .write(&workbook)
            .map(|_| ()),
    };

    match result {
        Ok(()) => match output {
            Output::File(path) | Output::Dir(path) => eprintln!("Written: {}", path.display()),
        },
        Err(e) => {
            eprintln!("Error writing package: {}", e);
            std::process::exit(1);
        }
    }
}
