//! Ports: typisierte Verbindungs-Endpunkte der Gatter.

use super::GateId;
use glam::Vec2;

/// Stabile Kennung eines Ports.
///
/// Ids werden vom `Circuit` monoton vergeben und nie wiederverwendet;
/// eine veraltete Id schlaegt beim Map-Lookup fehl statt zu "danglen".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PortId(pub u64);

impl std::fmt::Display for PortId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Art des Ports: Eingang oder Ausgang
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortKind {
    /// Eingang (maximal eine Verbindung)
    In,
    /// Ausgang (beliebig viele Verbindungen)
    Out,
}

impl PortKind {
    /// Kehrt die Art um (In ⇔ Out). Der Ghost-Port erhaelt beim
    /// Link-Start die umgekehrte Art seines Quell-Ports.
    pub fn invert(self) -> PortKind {
        match self {
            PortKind::In => PortKind::Out,
            PortKind::Out => PortKind::In,
        }
    }

    /// Roh-Wert fuer die Persistenz (0 = In, 1 = Out)
    pub fn to_index(self) -> u8 {
        match self {
            PortKind::In => 0,
            PortKind::Out => 1,
        }
    }

    /// Umkehrung von [`to_index`](Self::to_index). Unbekannte Werte → `None`.
    pub fn from_index(index: u8) -> Option<PortKind> {
        match index {
            0 => Some(PortKind::In),
            1 => Some(PortKind::Out),
            _ => None,
        }
    }
}

/// Kreisfoermiger Verbindungs-Endpunkt.
///
/// Die `connections`-Liste wird ausschliesslich vom `Circuit` symmetrisch
/// gepflegt (A listet B genau dann, wenn B A listet).
#[derive(Debug, Clone)]
pub struct Port {
    /// Art des Ports (In/Out)
    pub kind: PortKind,
    /// Mittelpunkt des kreisfoermigen Trefferbereichs
    pub coordinates: Vec2,
    /// Radius des Trefferbereichs
    pub radius: f32,
    /// Gatter, zu dem der Port gehoert. `None` fuer den transienten
    /// Ghost-Port und fuer freistehende Ports aus einer geladenen Datei.
    /// Reine Rueckreferenz, nie fuer Lifetime-Verwaltung benutzt.
    pub owner: Option<GateId>,
    /// Partner-Ports (Set-Semantik, keine Duplikate)
    pub connections: Vec<PortId>,
}

impl Port {
    /// Standard-Radius des Trefferbereichs in Welteinheiten.
    pub const DEFAULT_RADIUS: f32 = 0.11;

    /// Erstellt einen neuen, unverbundenen Port
    pub fn new(coordinates: Vec2, kind: PortKind, owner: Option<GateId>) -> Self {
        Self {
            kind,
            coordinates,
            radius: Self::DEFAULT_RADIUS,
            owner,
            connections: Vec::new(),
        }
    }

    /// Verschiebt den Port. Die Verbindungs-Topologie bleibt unberuehrt.
    pub fn translate(&mut self, offset: Vec2) {
        self.coordinates += offset;
    }

    /// Hit-Test: Punkt liegt auf dem Port, wenn der quadrierte Abstand
    /// zum Mittelpunkt ≤ radius² ist.
    pub fn hit(&self, point: Vec2) -> bool {
        point.distance_squared(self.coordinates) <= self.radius * self.radius
    }

    /// Prueft ob dieser Port mit `other` verbunden ist
    pub fn is_connected_to(&self, other: PortId) -> bool {
        self.connections.contains(&other)
    }

    /// Gibt die Koordinaten des Ports zurueck
    pub fn get_coordinates(&self) -> Vec2 {
        self.coordinates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_innerhalb_und_ausserhalb_des_radius() {
        let port = Port::new(Vec2::new(2.0, 3.0), PortKind::In, None);

        assert!(port.hit(Vec2::new(2.0, 3.0)));
        // Exakt auf dem Rand zaehlt als Treffer
        assert!(port.hit(Vec2::new(2.0 + Port::DEFAULT_RADIUS, 3.0)));
        assert!(!port.hit(Vec2::new(2.0 + Port::DEFAULT_RADIUS + 0.01, 3.0)));
    }

    #[test]
    fn test_translate_laesst_verbindungen_unberuehrt() {
        let mut port = Port::new(Vec2::ZERO, PortKind::Out, None);
        port.connections.push(PortId(7));

        port.translate(Vec2::new(1.5, -0.5));

        assert_eq!(port.coordinates, Vec2::new(1.5, -0.5));
        assert_eq!(port.connections, vec![PortId(7)]);
    }

    #[test]
    fn test_invert_port_kind() {
        assert_eq!(PortKind::In.invert(), PortKind::Out);
        assert_eq!(PortKind::Out.invert(), PortKind::In);
    }

    #[test]
    fn test_kind_index_roundtrip() {
        assert_eq!(PortKind::from_index(PortKind::In.to_index()), Some(PortKind::In));
        assert_eq!(PortKind::from_index(PortKind::Out.to_index()), Some(PortKind::Out));
        assert_eq!(PortKind::from_index(2), None);
    }
}
