//! Logic Circuit Editor Library.
//! Core-Funktionalitaet als Library exportiert fuer Tests und Wiederverwendung.

pub mod app;
pub mod core;
pub mod persistence;
pub mod shared;

pub use app::{AppState, Interaction, Mode, SimulationControl};
pub use core::{
    evaluate, Circuit, EvaluationState, Gate, GateId, GateKind, Port, PortId, PortKind,
};
pub use persistence::{parse_circuit_file, write_circuit_file};
pub use shared::EditorOptions;
