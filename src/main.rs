//! mkproj - Main Entry Point
//!
//! Installs the signal handlers, loads the configuration, and runs the
//! interactive scaffolding workflow.

use std::io;
use std::process;

use mkproj::abort;
use mkproj::scaffold::{self, ScaffoldConfig};

fn main() {
    // Ctrl+C or a terminate signal must unwind safely at any point, not
    // just inside an active prompt.
    abort::install_signal_handlers();

    let config = ScaffoldConfig::load();

    if let Err(e) = scaffold::run(&config) {
        match e.kind() {
            io::ErrorKind::Unsupported => {
                eprintln!("ERROR: {}", e);
                eprintln!("mkproj needs an interactive terminal; run it from a TTY.");
            }
            io::ErrorKind::AlreadyExists => {
                eprintln!("ERROR: {}", e);
                eprintln!("Pick a different project name or remove the directory.");
            }
            _ => {
                eprintln!("ERROR: {}", e);
                eprintln!("Please check your terminal compatibility and try again.");
            }
        }
        process::exit(1);
    }
}
