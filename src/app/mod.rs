//! Application-Layer: App-State, Interaktion, Simulation und Datei-I/O.

pub mod file_io;
pub mod interaction;
pub mod simulation;
pub mod state;

pub use file_io::{load_file, save_current_file, save_file_as};
pub use interaction::{Interaction, Mode};
pub use simulation::SimulationControl;
pub use state::AppState;
