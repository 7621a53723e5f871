//! brick - Command-line tool for converting images into brick mosaics

use std::process::ExitCode;

use brickmosaic::cli;

fn main() -> ExitCode {
    cli::run()
}
