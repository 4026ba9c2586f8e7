//! Gemeinsame Konfiguration und Konstanten.

pub mod options;

pub use options::EditorOptions;
