//! Java parsing: tree-sitter front end lowered into the owned syntax model.

pub mod errors;
pub mod java;
mod lower;

pub use java::JavaParser;
