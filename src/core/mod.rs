//! Core-Domaenentypen: Gatter, Ports, Circuit und der Takt-Auswerter.

pub mod circuit;
pub mod evaluator;
pub mod gate;
pub mod port;

pub use circuit::Circuit;
pub use evaluator::evaluate;
pub use gate::{edge_positions, EvaluationState, Gate, GateId, GateKind};
pub use port::{Port, PortId, PortKind};
