//! # Tau CLI
//!
//! The binary is thin: it calls `cli::run()` and turns an error into a message
//! on stderr and a non-zero exit. Argument parsing, collaborator wiring and
//! rendering live in `cli/`; everything else is the `tau` library.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
