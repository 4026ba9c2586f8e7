//! Parser fuer das zeilenorientierte Schaltungs-Dateiformat.
//!
//! `gate`-Datensaetze werden ueber `Circuit::add_gate` wieder eingespielt,
//! wodurch frische Ports in derselben deterministischen Reihenfolge
//! entstehen, in der der Writer sie abgelaufen ist; die Original-Ids der
//! Ports bleiben nicht erhalten. Eine Tabelle alte Id → neue Id ueberbrueckt
//! das: der i-te `port`-Datensatz gehoert zum i-ten regenerierten Port,
//! ueberzaehlige Datensaetze werden zu freistehenden Ports. `connection`-
//! Datensaetze loesen beide Ids ueber die Tabelle auf; ein unbekannter
//! Verweis wird mit Warnung verworfen.

use crate::core::{Circuit, GateKind, PortId, PortKind};
use anyhow::{bail, Context, Result};
use glam::Vec2;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Gates,
    Ports,
    Connections,
    Done,
}

/// Parsed eine Schaltung aus dem Textformat
pub fn parse_circuit_file(content: &str) -> Result<Circuit> {
    let mut circuit = Circuit::new();
    let mut section = Section::Gates;

    // Tabelle: Port-Id aus der Datei → regenerierte Port-Id
    let mut remap: HashMap<u64, PortId> = HashMap::new();
    // Durch add_gate regenerierte Ports, in Writer-Reihenfolge
    let mut regenerated: Vec<PortId> = Vec::new();
    let mut port_index = 0usize;
    let mut dropped_connections = 0usize;

    for (index, raw_line) in content.lines().enumerate() {
        let line_number = index + 1;
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        let mut tokens = line.split_whitespace();
        let record = tokens.next().unwrap_or_default();
        let fields: Vec<&str> = tokens.collect();

        match (record, section) {
            ("gate", Section::Gates) => {
                let dim_x: f32 = parse_field(&fields, 0, "dim.x", line_number)?;
                let dim_y: f32 = parse_field(&fields, 1, "dim.y", line_number)?;
                let pos_x: f32 = parse_field(&fields, 2, "pos.x", line_number)?;
                let pos_y: f32 = parse_field(&fields, 3, "pos.y", line_number)?;
                let kind_index: u8 = parse_field(&fields, 4, "kind", line_number)?;
                let Some(kind) = GateKind::from_index(kind_index) else {
                    bail!("Zeile {}: unbekannte Gatter-Art {}", line_number, kind_index);
                };
                circuit.add_gate(Vec2::new(dim_x, dim_y), Vec2::new(pos_x, pos_y), kind);
            }
            ("endgates", Section::Gates) => {
                section = Section::Ports;
                regenerated = circuit.ports.keys().copied().collect();
            }
            ("port", Section::Ports) => {
                let recorded_id: u64 = parse_field(&fields, 0, "id", line_number)?;
                let pos_x: f32 = parse_field(&fields, 1, "pos.x", line_number)?;
                let pos_y: f32 = parse_field(&fields, 2, "pos.y", line_number)?;
                let kind_index: u8 = parse_field(&fields, 3, "kind", line_number)?;
                let Some(kind) = PortKind::from_index(kind_index) else {
                    bail!("Zeile {}: unbekannte Port-Art {}", line_number, kind_index);
                };

                if let Some(port_id) = regenerated.get(port_index).copied() {
                    if circuit.ports[&port_id].kind != kind {
                        log::warn!(
                            "Zeile {}: Port-Art passt nicht zum regenerierten Port {}, Datei von Hand geaendert?",
                            line_number,
                            port_id
                        );
                    }
                    remap.insert(recorded_id, port_id);
                } else {
                    // Ueberzaehliger Datensatz: freistehender Port
                    let port_id = circuit.add_free_port(Vec2::new(pos_x, pos_y), kind);
                    remap.insert(recorded_id, port_id);
                }
                port_index += 1;
            }
            ("endports", Section::Ports) => {
                section = Section::Connections;
            }
            ("connection", Section::Connections) => {
                let a: u64 = parse_field(&fields, 0, "a", line_number)?;
                let b: u64 = parse_field(&fields, 1, "b", line_number)?;
                match (remap.get(&a), remap.get(&b)) {
                    (Some(&a), Some(&b)) => circuit.connect(a, b),
                    _ => {
                        log::warn!(
                            "Zeile {}: connection {} {} verweist auf unbekannte Ports, verworfen",
                            line_number,
                            a,
                            b
                        );
                        dropped_connections += 1;
                    }
                }
            }
            ("endconnections", Section::Connections) => {
                section = Section::Done;
            }
            _ => {
                bail!(
                    "Zeile {}: unerwarteter Datensatz '{}' in Sektion {:?}",
                    line_number,
                    record,
                    section
                );
            }
        }
    }

    if dropped_connections > 0 {
        log::warn!("{} connection-Datensaetze verworfen", dropped_connections);
    }
    Ok(circuit)
}

fn parse_field<T>(fields: &[&str], index: usize, name: &str, line_number: usize) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let token = fields
        .get(index)
        .ok_or_else(|| anyhow::anyhow!("Zeile {}: Feld '{}' fehlt", line_number, name))?;
    token
        .parse()
        .with_context(|| format!("Zeile {}: Feld '{}' ungueltig: '{}'", line_number, name, token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimale_datei() {
        let circuit = parse_circuit_file(
            "gate 1 1 0 0 7\nendgates\nport 2 1 0.5 1\nendports\nendconnections\n",
        )
        .expect("Parsing fehlgeschlagen");

        assert_eq!(circuit.gate_count(), 1);
        assert_eq!(circuit.port_count(), 1);
        assert_eq!(circuit.connection_count(), 0);
    }

    #[test]
    fn test_unbekannte_gatter_art_ist_parse_fehler() {
        let result = parse_circuit_file("gate 1 1 0 0 42\nendgates\nendports\nendconnections\n");
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("unbekannte Gatter-Art 42"), "{}", message);
    }

    #[test]
    fn test_kaputte_zahl_ist_parse_fehler_mit_zeilennummer() {
        let result = parse_circuit_file("gate 1 1 zwei 0 0\n");
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("Zeile 1"), "{}", message);
        assert!(message.contains("pos.x"), "{}", message);
    }

    #[test]
    fn test_unerwarteter_datensatz_ist_parse_fehler() {
        let result = parse_circuit_file("port 1 0 0 0\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_verwaiste_connection_wird_verworfen() {
        let circuit = parse_circuit_file(
            "gate 1 1 0 0 7\nendgates\nport 2 1 0.5 1\nendports\nconnection 2 99\nendconnections\n",
        )
        .expect("Parsing fehlgeschlagen");

        assert_eq!(circuit.connection_count(), 0);
    }

    #[test]
    fn test_self_loop_connection_wird_verworfen() {
        // "connection 1 1" darf die Kardinalitaet des Eingangs-Ports
        // nicht verletzen: kein Port verbindet sich mit sich selbst
        let circuit = parse_circuit_file(
            "gate 1 1 0 0 0\nendgates\nport 1 0 0.25 0\nport 2 0 0.75 0\nport 3 1 0.5 1\nendports\nconnection 1 1\nendconnections\n",
        )
        .expect("Parsing fehlgeschlagen");

        assert_eq!(circuit.connection_count(), 0);
        for port in circuit.ports.values() {
            assert!(port.connections.is_empty());
        }
    }

    #[test]
    fn test_ueberzaehlige_port_datensaetze_werden_freistehende_ports() {
        // Ein INPUT regeneriert genau einen Port; der zweite Datensatz
        // ist ein freistehender Port aus der Datei
        let circuit = parse_circuit_file(
            "gate 1 1 0 0 7\nendgates\nport 2 1 0.5 1\nport 9 5 5 0\nendports\nconnection 2 9\nendconnections\n",
        )
        .expect("Parsing fehlgeschlagen");

        assert_eq!(circuit.gate_count(), 1);
        assert_eq!(circuit.port_count(), 2);
        assert_eq!(circuit.connection_count(), 1);
        let free = circuit.ports.values().find(|p| p.owner.is_none()).unwrap();
        assert_eq!(free.kind, PortKind::In);
        assert_eq!(free.coordinates, Vec2::new(5.0, 5.0));
    }
}
