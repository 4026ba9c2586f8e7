//! Taktweise boolesche Auswertung der Schaltung.
//!
//! Zwei Phasen pro Tick: erst wird fuer jedes Gatter `prev_value`
//! eingefroren, dann berechnet jedes Gatter seinen neuen Wert
//! ausschliesslich aus den `prev_value`-Staenden seiner Eingaenge.
//! Eine Signal-Aenderung braucht dadurch genau einen Tick pro Gatter,
//! auch ueber kombinatorische Gatter hinweg (siehe Latenz-Tests).

use super::{Circuit, GateId, GateKind, PortId};

/// Liest den Eingangswert eines Eingangs-Ports.
///
/// Genau eine Verbindung → `prev_value` des Partner-Gatters; unverbunden
/// oder mehrdeutig → logisch Low. Ein eigentuemerloser Partner (Ghost-
/// oder freistehender Port) liest ebenfalls Low.
fn input_value(circuit: &Circuit, port_id: PortId) -> bool {
    let port = &circuit.ports[&port_id];
    if port.connections.len() != 1 {
        return false;
    }
    let Some(partner) = circuit.ports.get(&port.connections[0]) else {
        return false;
    };
    let Some(owner) = partner.owner else {
        return false;
    };
    circuit
        .gates
        .get(&owner)
        .is_some_and(|gate| gate.evaluation.prev_value)
}

fn binary_inputs(circuit: &Circuit, gate_id: GateId) -> (bool, bool) {
    let gate = &circuit.gates[&gate_id];
    assert_eq!(
        gate.in_ports.len(),
        2,
        "{:?}-Gatter hat nicht exakt 2 Eingaenge",
        gate.kind
    );
    (
        input_value(circuit, gate.in_ports[0]),
        input_value(circuit, gate.in_ports[1]),
    )
}

/// Fuehrt genau einen Tick ueber alle Gatter aus.
///
/// Gatter werden in Einfuege-Reihenfolge berechnet; weil nur `prev_value`
/// gelesen wird, haengt das Ergebnis kombinatorischer Gatter nicht von
/// dieser Reihenfolge ab. Falsche Port-Stelligkeit ist ein Programmierfehler
/// und fuehrt zum sofortigen Abbruch.
pub fn evaluate(circuit: &mut Circuit) {
    // Phase 1: Zustand des vorherigen Ticks einfrieren
    for gate in circuit.gates.values_mut() {
        gate.evaluation.prev_value = gate.evaluation.value;
    }

    // Phase 2: Neue Werte aus den eingefrorenen Eingaengen berechnen
    let gate_ids: Vec<GateId> = circuit.gates.keys().copied().collect();
    for gate_id in gate_ids {
        let kind = circuit.gates[&gate_id].kind;
        let new_value = match kind {
            GateKind::And => {
                let (in1, in2) = binary_inputs(circuit, gate_id);
                in1 && in2
            }
            GateKind::Or => {
                let (in1, in2) = binary_inputs(circuit, gate_id);
                in1 || in2
            }
            GateKind::Xor => {
                let (in1, in2) = binary_inputs(circuit, gate_id);
                in1 != in2
            }
            GateKind::Nand => {
                let (in1, in2) = binary_inputs(circuit, gate_id);
                !(in1 && in2)
            }
            GateKind::Nor => {
                let (in1, in2) = binary_inputs(circuit, gate_id);
                !(in1 || in2)
            }
            GateKind::Xnor => {
                let (in1, in2) = binary_inputs(circuit, gate_id);
                in1 == in2
            }
            GateKind::Not => {
                let gate = &circuit.gates[&gate_id];
                assert_eq!(
                    gate.in_ports.len(),
                    1,
                    "NOT-Gatter hat nicht exakt 1 Eingang"
                );
                !input_value(circuit, gate.in_ports[0])
            }
            GateKind::Input => {
                // Wert wird nur durch Nutzer-Interaktion gesetzt
                continue;
            }
            GateKind::Clock => {
                // Taktgeber: value UND prev_value invertieren, damit
                // jeder Tick eine Taktflanke ist
                let gate = &mut circuit.gates[&gate_id];
                gate.evaluation.value = !gate.evaluation.value;
                gate.evaluation.prev_value = !gate.evaluation.prev_value;
                continue;
            }
        };
        circuit.gates[&gate_id].evaluation.value = new_value;
    }
}
