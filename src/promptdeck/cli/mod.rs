//! # CLI Layer
//!
//! One client of the promptdeck API, and the only place that touches the
//! terminal: argument parsing, stdout/stderr, the clipboard write and the
//! interactive `browse` loop.
//!
//! ## Structure
//!
//! - `setup`: clap definitions
//! - `commands`: `run()`, context setup and one `handle_*` per subcommand
//! - `browse`: the line-oriented interactive session
//! - `render`, `templates`, `output`, `styles`: turning `CmdResult`s into text
//!
//! Business rules live in the library; tests here cover parsing and output.

mod browse;
mod commands;
mod output;
mod render;
pub mod setup;
mod styles;
mod templates;

pub use commands::run;
