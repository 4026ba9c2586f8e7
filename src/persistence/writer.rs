//! Writer fuer das zeilenorientierte Schaltungs-Dateiformat.
//!
//! Drei Sektionen, jeweils mit Abschluss-Token:
//!
//! ```text
//! gate <dim.x> <dim.y> <pos.x> <pos.y> <kind>
//! endgates
//! port <id> <pos.x> <pos.y> <kind>
//! endports
//! connection <a> <b>
//! endconnections
//! ```
//!
//! Ports werden mit ihrer stabilen Id geschrieben; `connection`-Zeilen
//! referenzieren diese Ids statt Koordinaten, damit der Loader raeumlich
//! zusammenfallende Ports auseinanderhalten kann. Jede ungerichtete
//! Verbindung erscheint zweimal (einmal pro Endpunkt); der Loader ist
//! dagegen idempotent.

use crate::core::Circuit;
use anyhow::Context;
use std::fmt::Write as _;
use std::path::Path;

/// Serialisiert eine Schaltung in das Textformat.
///
/// Ein eventueller Ghost-Port samt seiner provisorischen Verbindung ist
/// Gesten-Zustand, kein Dokument-Zustand, und wird nicht geschrieben.
pub fn write_circuit_file(circuit: &Circuit) -> String {
    let mut output = String::new();
    let ghost = circuit.ghost_port();

    for gate in circuit.gates.values() {
        // writeln! auf String ist infallibel
        let _ = writeln!(
            output,
            "gate {} {} {} {} {}",
            gate.dimensions.x,
            gate.dimensions.y,
            gate.coordinates.x,
            gate.coordinates.y,
            gate.kind.to_index()
        );
    }
    output.push_str("endgates\n");

    for (port_id, port) in &circuit.ports {
        if Some(*port_id) == ghost {
            continue;
        }
        let _ = writeln!(
            output,
            "port {} {} {} {}",
            port_id,
            port.coordinates.x,
            port.coordinates.y,
            port.kind.to_index()
        );
    }
    output.push_str("endports\n");

    for (port_id, port) in &circuit.ports {
        if Some(*port_id) == ghost {
            continue;
        }
        for partner in &port.connections {
            if Some(*partner) == ghost {
                continue;
            }
            let _ = writeln!(output, "connection {} {}", port_id, partner);
        }
    }
    output.push_str("endconnections\n");

    output
}

/// Schreibt die Schaltung in eine Datei
pub fn save_to_path(circuit: &Circuit, path: &Path) -> anyhow::Result<()> {
    let content = write_circuit_file(circuit);
    std::fs::write(path, content)
        .with_context(|| format!("Datei nicht schreibbar: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GateKind, PortKind};
    use glam::Vec2;

    #[test]
    fn test_sektionen_und_reihenfolge() {
        let mut circuit = Circuit::new();
        let input = circuit.add_gate(Vec2::new(1.0, 1.0), Vec2::ZERO, GateKind::Input);
        let not = circuit.add_gate(Vec2::new(1.0, 1.0), Vec2::new(4.0, 0.0), GateKind::Not);
        circuit.connect(
            circuit.gates[&input].out_ports[0],
            circuit.gates[&not].in_ports[0],
        );

        let text = write_circuit_file(&circuit);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "gate 1 1 0 0 7");
        assert_eq!(lines[1], "gate 1 1 4 0 6");
        assert_eq!(lines[2], "endgates");
        // 3 Ports (INPUT: 1 out, NOT: 1 in + 1 out), dann endports
        assert!(lines[3].starts_with("port "));
        assert_eq!(lines[6], "endports");
        // Jede ungerichtete Verbindung erscheint zweimal
        assert!(lines[7].starts_with("connection "));
        assert!(lines[8].starts_with("connection "));
        assert_eq!(lines[9], "endconnections");
        assert_eq!(lines.len(), 10);
    }

    #[test]
    fn test_ghost_port_wird_nicht_geschrieben() {
        let mut circuit = Circuit::new();
        let input = circuit.add_gate(Vec2::new(1.0, 1.0), Vec2::ZERO, GateKind::Input);
        let src = circuit.gates[&input].out_ports[0];
        circuit.create_ghost_port(src, Vec2::new(2.0, 0.5), PortKind::In);

        let text = write_circuit_file(&circuit);

        // Nur der eine echte Port, keine provisorische Verbindung
        assert_eq!(text.lines().filter(|l| l.starts_with("port ")).count(), 1);
        assert_eq!(
            text.lines().filter(|l| l.starts_with("connection ")).count(),
            0
        );
    }
}
