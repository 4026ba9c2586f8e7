//! Interaktions-Zustandsmaschine fuer Zeiger-Gesten.
//!
//! Statt eines Modus-Enums mit ad-hoc-Verzweigungen in den Callbacks gibt
//! es hier einen expliziten Maschinentyp, der nur die legalen Uebergaenge
//! anbietet (`begin_move`, `end_move`, `begin_link`, `commit_link`,
//! `cancel_link`, Kamera-Pan). Die `pointer_*`-Methoden bilden rohe
//! Zeiger-Ereignisse auf diese Uebergaenge ab; einen anderen Pfad in die
//! Mutations-API gibt es nicht.

use crate::core::{Circuit, GateId, PortId};
use glam::Vec2;

/// Aktueller Gesten-Modus.
///
/// `Idle ⇄ CameraPanning`, `Idle ⇄ GateMoving`, `Idle ⇄ PortLinking`;
/// der Loslass-Event fuehrt aus jedem Modus bedingungslos nach `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Keine Geste aktiv
    #[default]
    Idle,
    /// Kamera wird gezogen (die View-Schicht konsumiert das Pan-Delta)
    CameraPanning,
    /// Ein Gatter haengt am Zeiger
    GateMoving(GateId),
    /// Eine Leitung wird vom gemerkten Quell-Port aus gezogen
    PortLinking(PortId),
}

/// Zustandsmaschine fuer die Zeiger-Interaktion
#[derive(Debug, Default)]
pub struct Interaction {
    mode: Mode,
    /// Orthogonaler Loesch-Modifikator: deutet Klicks als Loeschen um.
    /// Nur im `Idle`-Modus umschaltbar.
    delete_modifier: bool,
    /// Letzte bekannte Zeiger-Position (Welt-Koordinaten)
    last_pointer: Vec2,
}

impl Interaction {
    /// Erstellt die Maschine im `Idle`-Modus
    pub fn new() -> Self {
        Self::default()
    }

    /// Aktueller Modus
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Ob der Loesch-Modifikator aktiv ist
    pub fn delete_modifier(&self) -> bool {
        self.delete_modifier
    }

    /// Letzte bekannte Zeiger-Position
    pub fn last_pointer(&self) -> Vec2 {
        self.last_pointer
    }

    // ── Legale Uebergaenge ───────────────────────────────────────

    /// Schaltet den Loesch-Modifikator um (Modifikator-Taste).
    /// Waehrend einer laufenden Geste wird der Wechsel ignoriert.
    pub fn toggle_delete_modifier(&mut self) {
        if self.mode != Mode::Idle {
            return;
        }
        self.delete_modifier = !self.delete_modifier;
        log::debug!("Loesch-Modifikator: {}", self.delete_modifier);
    }

    /// `Idle → GateMoving`
    pub fn begin_move(&mut self, gate: GateId) {
        debug_assert_eq!(self.mode, Mode::Idle);
        self.mode = Mode::GateMoving(gate);
    }

    /// `GateMoving → Idle`
    pub fn end_move(&mut self) {
        self.mode = Mode::Idle;
    }

    /// `Idle → PortLinking`: legt den Ghost-Port mit umgekehrter Art an,
    /// damit die entstehende Leitung den Zeiger visualisieren kann.
    pub fn begin_link(&mut self, circuit: &mut Circuit, source: PortId, pointer: Vec2) {
        debug_assert_eq!(self.mode, Mode::Idle);
        let ghost_kind = circuit.ports[&source].kind.invert();
        circuit.create_ghost_port(source, pointer, ghost_kind);
        self.mode = Mode::PortLinking(source);
        log::debug!("Link-Geste gestartet an Port {}", source);
    }

    /// `PortLinking → Idle` mit erfolgreicher Verbindung
    pub fn commit_link(&mut self, circuit: &mut Circuit, target: PortId) {
        if let Mode::PortLinking(source) = self.mode {
            circuit.connect_ports(source, target);
            log::info!("Ports {} und {} verbunden", source, target);
        }
        self.mode = Mode::Idle;
    }

    /// `PortLinking → Idle` ohne Verbindung (Abbruch)
    pub fn cancel_link(&mut self, circuit: &mut Circuit) {
        if let Mode::PortLinking(source) = self.mode {
            circuit.remove_ghost_port(source);
            log::debug!("Link-Geste abgebrochen");
        }
        self.mode = Mode::Idle;
    }

    // ── Abbildung roher Zeiger-Ereignisse ────────────────────────

    /// Zeiger gedrueckt: startet die zur Trefferlage passende Geste.
    ///
    /// Mit aktivem Loesch-Modifikator wird ein getroffenes Gatter sofort
    /// geloescht; eine haengende "currently moved"-Referenz kann dabei
    /// nicht entstehen, weil Loeschen nur im `Idle`-Modus erreichbar ist.
    pub fn pointer_pressed(&mut self, circuit: &mut Circuit, pointer: Vec2) {
        self.last_pointer = pointer;
        if self.mode != Mode::Idle {
            return;
        }

        if self.delete_modifier {
            if let Some(gate_id) = circuit.gate_at(pointer) {
                let kind = circuit.gates[&gate_id].kind;
                circuit.delete_gate(gate_id);
                log::info!("Gatter {} ({:?}) geloescht", gate_id, kind);
            }
            return;
        }

        // Ports liegen auf den Gatter-Kanten und haben Vorrang
        if let Some(port_id) = circuit.port_at(pointer) {
            self.begin_link(circuit, port_id, pointer);
        } else if let Some(gate_id) = circuit.gate_at(pointer) {
            self.begin_move(gate_id);
        } else {
            self.mode = Mode::CameraPanning;
        }
    }

    /// Zeiger bewegt: zieht Gatter bzw. Ghost-Port mit.
    ///
    /// Im `CameraPanning`-Modus wird das Delta zurueckgegeben, damit die
    /// View-Schicht die Kamera verschieben kann; sonst `Vec2::ZERO`.
    pub fn pointer_moved(&mut self, circuit: &mut Circuit, pointer: Vec2) -> Vec2 {
        let delta = pointer - self.last_pointer;
        self.last_pointer = pointer;
        match self.mode {
            Mode::GateMoving(gate_id) => {
                circuit.move_gate(gate_id, delta);
                Vec2::ZERO
            }
            Mode::PortLinking(_) => {
                circuit.move_ghost_port(delta);
                Vec2::ZERO
            }
            Mode::CameraPanning => delta,
            Mode::Idle => Vec2::ZERO,
        }
    }

    /// Zeiger losgelassen: loest die laufende Geste auf und kehrt in
    /// jedem Fall nach `Idle` zurueck.
    ///
    /// Eine Link-Geste verbindet nur beim Loslassen ueber einem Port der
    /// *entgegengesetzten* Art; gleiche Art oder Leere bricht ab
    /// (Policy-Entscheidung, nicht Port-Invariante).
    pub fn pointer_released(&mut self, circuit: &mut Circuit, pointer: Vec2) {
        self.last_pointer = pointer;
        match self.mode {
            Mode::PortLinking(source) => {
                let source_kind = circuit.ports[&source].kind;
                let target = circuit
                    .port_at(pointer)
                    .filter(|t| circuit.ports[t].kind != source_kind);
                match target {
                    Some(target) => self.commit_link(circuit, target),
                    None => self.cancel_link(circuit),
                }
            }
            Mode::GateMoving(_) => self.end_move(),
            Mode::CameraPanning | Mode::Idle => self.mode = Mode::Idle,
        }
    }
}
