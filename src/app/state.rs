//! Hauptzustand der Anwendung.

use crate::app::{Interaction, SimulationControl};
use crate::core::Circuit;
use crate::shared::EditorOptions;
use std::path::PathBuf;
use std::time::Duration;

/// Buendelt Schaltung, Interaktion, Simulation und Optionen.
///
/// Der Treiber-Loop besitzt genau einen `AppState` und ruft Eingabe-
/// Verarbeitung, Auswertung und Persistenz strikt nacheinander auf;
/// nichts hiervon laeuft nebenlaeufig.
pub struct AppState {
    /// Die bearbeitete Schaltung
    pub circuit: Circuit,
    /// Zeiger-Gesten-Maschine
    pub interaction: Interaction,
    /// Ablaufsteuerung der Takt-Simulation
    pub simulation: SimulationControl,
    /// Laufzeit-Optionen
    pub options: EditorOptions,
    /// Aktuell geladene Datei (None = ungespeicherte Schaltung)
    pub current_file: Option<PathBuf>,
}

impl AppState {
    /// Erstellt einen leeren App-State mit den gegebenen Optionen
    pub fn new(options: EditorOptions) -> Self {
        let simulation = SimulationControl::new(Duration::from_millis(options.tick_interval_ms));
        Self {
            circuit: Circuit::new(),
            interaction: Interaction::new(),
            simulation,
            options,
            current_file: None,
        }
    }

    /// Anzahl der Gatter (fuer Anzeige und Logging)
    pub fn gate_count(&self) -> usize {
        self.circuit.gate_count()
    }

    /// Anzahl der ungerichteten Verbindungen
    pub fn connection_count(&self) -> usize {
        self.circuit.connection_count()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(EditorOptions::default())
    }
}
