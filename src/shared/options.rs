//! Zentrale Konfiguration des Editors.
//!
//! `EditorOptions` enthaelt alle zur Laufzeit aenderbaren Werte;
//! die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

/// Standard-Breite neuer Gatter in Welteinheiten.
pub const GATE_WIDTH_WORLD: f32 = 2.0;
/// Standard-Hoehe neuer Gatter in Welteinheiten.
pub const GATE_HEIGHT_WORLD: f32 = 1.0;
/// Standard-Kadenz der Takt-Simulation in Millisekunden.
pub const TICK_INTERVAL_MS: u64 = 250;

/// Alle zur Laufzeit aenderbaren Editor-Optionen.
/// Wird als `logic_circuit_editor.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EditorOptions {
    /// Breite neuer Gatter in Welteinheiten
    pub gate_width_world: f32,
    /// Hoehe neuer Gatter in Welteinheiten
    pub gate_height_world: f32,
    /// Kadenz der Takt-Simulation in Millisekunden (0 = so schnell wie moeglich)
    pub tick_interval_ms: u64,
    /// Beim Beenden automatisch in die zuletzt geladene Datei speichern
    pub autosave_on_exit: bool,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            gate_width_world: GATE_WIDTH_WORLD,
            gate_height_world: GATE_HEIGHT_WORLD,
            tick_interval_ms: TICK_INTERVAL_MS,
            autosave_on_exit: false,
        }
    }
}

impl EditorOptions {
    /// Laedt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(options) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    options
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("logic_circuit_editor"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("logic_circuit_editor.toml")
    }

    /// Standard-Abmessungen neuer Gatter als Vektor
    pub fn gate_dimensions(&self) -> glam::Vec2 {
        glam::Vec2::new(self.gate_width_world, self.gate_height_world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_roundtrip() {
        let mut options = EditorOptions::default();
        options.tick_interval_ms = 50;
        options.autosave_on_exit = true;

        let text = toml::to_string_pretty(&options).expect("Serialisierung fehlgeschlagen");
        let parsed: EditorOptions = toml::from_str(&text).expect("Parsing fehlgeschlagen");

        assert_eq!(parsed, options);
    }
}
