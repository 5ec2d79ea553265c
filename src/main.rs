//! lessonguard CLI entry point
//!
//! Parses arguments, dispatches to the CLI module and exits with the code
//! it returns. Errors go to stderr with exit code 1.

use lessonguard::cli;
use lessonguard::observability::Logger;

fn main() {
    match cli::run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            Logger::fatal("CLI_FAILED", &[("code", e.code_str())]);
            eprintln!("{}", e);
            std::process::exit(cli::EXIT_FAILED);
        }
    }
}
