//! Zeilenorientierte Text-Persistenz fuer Schaltungen.

pub mod parser;
pub mod writer;

pub use parser::parse_circuit_file;
pub use writer::{save_to_path, write_circuit_file};
