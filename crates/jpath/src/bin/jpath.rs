//! `jpath`: query or update a JSON document with a path expression.
//!
//! Usage:
//!   jpath get '<path>'
//!   jpath set '<path>' '<json-value>'
//!   jpath iter '<path>'
//!
//! The document is read from stdin. Set `RUST_LOG=debug` to trace evaluation.

use jpath::cli::{run, USAGE};
use std::io::{self, Read, Write};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("{USAGE}");
        std::process::exit(1);
    }

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match run(&args, &buf) {
        Ok(result) => {
            let mut stdout = io::stdout();
            let written = stdout
                .write_all(result.as_bytes())
                .and_then(|_| if result.ends_with('\n') { Ok(()) } else { stdout.write_all(b"\n") });
            if let Err(e) = written {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
