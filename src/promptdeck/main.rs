//! # Promptdeck CLI
//!
//! The binary is thin: it hands over to `cli::run()`, which installs logging,
//! and turns an error into an exit code. Everything user-facing lives in `cli/`.
//!
//! Logs go to stderr so that rendered output on stdout stays clean. The level
//! comes from `RUST_LOG` when set, else `--verbose` (debug), else warnings only.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
