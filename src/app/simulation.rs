//! Ablaufsteuerung der Takt-Simulation: kontinuierlich oder Einzelschritt.

use crate::core::{evaluate, Circuit};
use std::time::Duration;

/// Steuert, wann [`evaluate`] aufgerufen wird.
///
/// Der Treiber-Loop meldet verstrichene Wallclock-Zeit an `advance`;
/// im laufenden Betrieb wird daraus ueber die Tick-Kadenz die Anzahl
/// faelliger Ticks. `step` erzwingt unabhaengig davon genau einen Tick.
#[derive(Debug)]
pub struct SimulationControl {
    /// Ob die Simulation kontinuierlich laeuft
    pub running: bool,
    tick_interval: Duration,
    accumulator: Duration,
}

impl SimulationControl {
    /// Erstellt eine angehaltene Simulation mit der gegebenen Kadenz
    pub fn new(tick_interval: Duration) -> Self {
        Self {
            running: false,
            tick_interval,
            accumulator: Duration::ZERO,
        }
    }

    /// Aktuelle Tick-Kadenz
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Setzt die Tick-Kadenz (z.B. aus den Optionen)
    pub fn set_tick_interval(&mut self, interval: Duration) {
        self.tick_interval = interval;
    }

    /// Startet bzw. pausiert den kontinuierlichen Lauf.
    /// Beim Pausieren wird angesparte Zeit verworfen.
    pub fn toggle_running(&mut self) {
        self.running = !self.running;
        if !self.running {
            self.accumulator = Duration::ZERO;
        }
        log::info!(
            "Simulation {}",
            if self.running { "laeuft" } else { "pausiert" }
        );
    }

    /// Fuehrt genau einen Tick aus (Einzelschritt, auch im Pausen-Zustand)
    pub fn step(&self, circuit: &mut Circuit) {
        evaluate(circuit);
    }

    /// Meldet verstrichene Zeit und fuehrt alle faelligen Ticks aus.
    /// Gibt die Anzahl der ausgefuehrten Ticks zurueck.
    pub fn advance(&mut self, circuit: &mut Circuit, elapsed: Duration) -> u32 {
        if !self.running {
            return 0;
        }
        if self.tick_interval.is_zero() {
            // Kadenz 0: ein Tick pro Meldung, sonst draengelt der Loop
            evaluate(circuit);
            return 1;
        }

        self.accumulator += elapsed;
        let mut ticks = 0;
        while self.accumulator >= self.tick_interval {
            self.accumulator -= self.tick_interval;
            evaluate(circuit);
            ticks += 1;
        }
        ticks
    }
}
