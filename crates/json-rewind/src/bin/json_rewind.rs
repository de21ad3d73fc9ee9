//! `json-rewind` — reconstruct the previous value of a JSON Pointer path.
//!
//! Usage:
//!   json-rewind '<pointer>' <changes.json>
//!
//! The current document is read from stdin. The change log (a JSON array of
//! `{path, old_value?}` records, most recent first) is read from the named
//! file. Prints the value the pointer held before every change in the log,
//! or `undefined` if the path never existed.

use json_rewind::cli::rewind_pointer;
use std::io::{self, Read, Write};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let pointer = match args.get(1) {
        Some(p) => p.clone(),
        None => {
            eprintln!("First argument must be a JSON Pointer.");
            std::process::exit(1);
        }
    };
    let changes_path = match args.get(2) {
        Some(p) => p.clone(),
        None => {
            eprintln!("Second argument must be a change log file.");
            std::process::exit(1);
        }
    };

    let changes_json = match std::fs::read_to_string(&changes_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match rewind_pointer(buf.trim(), changes_json.trim(), &pointer) {
        Ok(result) => {
            io::stdout().write_all(result.as_bytes()).unwrap();
            io::stdout().write_all(b"\n").unwrap();
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
