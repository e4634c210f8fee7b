//! tsdetect-cli: argument parsing, batch input loading and the parallel
//! run driver behind the `tsdetect` binary.

pub mod cli;
pub mod input;
pub mod run;

pub use cli::{Cli, OutputFormat};
pub use input::{load_file_pairs, parse_file_pairs, relative_path};
pub use run::{analyse, run, RunSummary};
