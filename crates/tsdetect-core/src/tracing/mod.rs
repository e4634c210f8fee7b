//! Observability for tsdetect.
//! `tracing` crate with `EnvFilter`, logs on stderr.

pub mod setup;

pub use setup::init_tracing;
