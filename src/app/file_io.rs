//! Use-Cases: Schaltung laden und speichern.
//!
//! Fehler werden geloggt und die Operation abgebrochen; der bisherige
//! Zustand bleibt dann unveraendert. Teilweise geschriebene Dateien
//! werden nicht zurueckgerollt.

use crate::app::AppState;
use crate::persistence::{parse_circuit_file, save_to_path};
use anyhow::Context;
use std::path::{Path, PathBuf};

/// Laedt eine Schaltung aus einer Datei und ersetzt die aktuelle
pub fn load_file(state: &mut AppState, path: impl Into<PathBuf>) -> anyhow::Result<()> {
    let path = path.into();
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Datei nicht lesbar: {}", path.display()))?;
    let circuit = parse_circuit_file(&content)
        .with_context(|| format!("Datei nicht parsebar: {}", path.display()))?;

    log::info!(
        "Geladen: {} ({} Gatter, {} Verbindungen)",
        path.display(),
        circuit.gate_count(),
        circuit.connection_count()
    );
    state.circuit = circuit;
    state.current_file = Some(path);
    Ok(())
}

/// Speichert die aktuelle Schaltung in die zuletzt geladene Datei
pub fn save_current_file(state: &AppState) -> anyhow::Result<()> {
    let path = state
        .current_file
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("Keine Datei geladen"))?;
    write_to_path(state, path)
}

/// Speichert die aktuelle Schaltung unter neuem Pfad
pub fn save_file_as(state: &mut AppState, path: impl Into<PathBuf>) -> anyhow::Result<()> {
    let path = path.into();
    write_to_path(state, &path)?;
    state.current_file = Some(path);
    Ok(())
}

fn write_to_path(state: &AppState, path: &Path) -> anyhow::Result<()> {
    save_to_path(&state.circuit, path)?;
    log::info!(
        "Gespeichert: {} ({} Gatter, {} Verbindungen)",
        path.display(),
        state.gate_count(),
        state.connection_count()
    );
    Ok(())
}
