//! datapump CLI entry point
//!
//! A minimal entrypoint: parse arguments, dispatch, print the error to
//! stderr and exit non-zero on failure. All logic lives in the library.

use datapump::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
