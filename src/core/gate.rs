//! Gatter: Logik-Elemente mit fester Port-Stelligkeit und 1-Bit-Zustand.

use super::PortId;
use glam::Vec2;

/// Stabile Kennung eines Gatters (monoton vergeben, nie wiederverwendet).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GateId(pub u64);

impl std::fmt::Display for GateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Art des Logik-Gatters.
///
/// Die Reihenfolge der Varianten ist Teil des Dateiformats
/// (Roh-Wert 0..=8, siehe `to_index`/`from_index`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateKind {
    /// UND-Gatter (2 Eingaenge)
    And,
    /// ODER-Gatter (2 Eingaenge)
    Or,
    /// Exklusiv-ODER (2 Eingaenge)
    Xor,
    /// Negiertes UND (2 Eingaenge)
    Nand,
    /// Negiertes ODER (2 Eingaenge)
    Nor,
    /// Negiertes Exklusiv-ODER (2 Eingaenge)
    Xnor,
    /// Inverter (1 Eingang)
    Not,
    /// Schalter: Wert wird nur durch Nutzer-Interaktion gesetzt (0 Eingaenge)
    Input,
    /// Taktgeber: invertiert sich bei jedem Tick selbst (0 Eingaenge)
    Clock,
}

impl GateKind {
    /// Anzahl der Eingangs-Ports fuer diese Gatter-Art (0, 1 oder 2)
    pub fn fan_in(self) -> usize {
        match self {
            GateKind::And
            | GateKind::Or
            | GateKind::Xor
            | GateKind::Nand
            | GateKind::Nor
            | GateKind::Xnor => 2,
            GateKind::Not => 1,
            GateKind::Input | GateKind::Clock => 0,
        }
    }

    /// Anzahl der Ausgangs-Ports (immer 1)
    pub fn fan_out(self) -> usize {
        1
    }

    /// Roh-Wert fuer die Persistenz
    pub fn to_index(self) -> u8 {
        match self {
            GateKind::And => 0,
            GateKind::Or => 1,
            GateKind::Xor => 2,
            GateKind::Nand => 3,
            GateKind::Nor => 4,
            GateKind::Xnor => 5,
            GateKind::Not => 6,
            GateKind::Input => 7,
            GateKind::Clock => 8,
        }
    }

    /// Umkehrung von [`to_index`](Self::to_index). Unbekannte Werte → `None`.
    pub fn from_index(index: u8) -> Option<GateKind> {
        match index {
            0 => Some(GateKind::And),
            1 => Some(GateKind::Or),
            2 => Some(GateKind::Xor),
            3 => Some(GateKind::Nand),
            4 => Some(GateKind::Nor),
            5 => Some(GateKind::Xnor),
            6 => Some(GateKind::Not),
            7 => Some(GateKind::Input),
            8 => Some(GateKind::Clock),
            _ => None,
        }
    }
}

/// 1-Bit-Auswertungszustand eines Gatters.
///
/// `prev_value` haelt den Wert zum Ende des vorherigen Ticks fest;
/// die Auswertung liest ausschliesslich `prev_value` der Nachbarn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvaluationState {
    /// Aktueller Ausgangswert
    pub value: bool,
    /// Ausgangswert zum Ende des vorherigen Ticks
    pub prev_value: bool,
}

/// Ein Logik-Gatter als achsenparalleles Rechteck mit festen Port-Gruppen.
///
/// Die Port-Listen werden bei der Konstruktion durch `Circuit::add_gate`
/// befuellt und danach nie mehr veraendert (Stelligkeit ist invariant).
#[derive(Debug, Clone)]
pub struct Gate {
    /// Art des Gatters
    pub kind: GateKind,
    /// Obere linke Ecke des Rechtecks
    pub coordinates: Vec2,
    /// Breite (x) und Hoehe (y) des Rechtecks
    pub dimensions: Vec2,
    /// Eingangs-Ports entlang der linken Kante
    pub in_ports: Vec<PortId>,
    /// Ausgangs-Ports entlang der rechten Kante
    pub out_ports: Vec<PortId>,
    /// Auswertungszustand
    pub evaluation: EvaluationState,
}

impl Gate {
    /// Erstellt ein Gatter mit bereits angelegten Port-Ids
    pub fn new(
        dimensions: Vec2,
        coordinates: Vec2,
        kind: GateKind,
        in_ports: Vec<PortId>,
        out_ports: Vec<PortId>,
    ) -> Self {
        Self {
            kind,
            coordinates,
            dimensions,
            in_ports,
            out_ports,
            evaluation: EvaluationState::default(),
        }
    }

    /// Verschiebt nur das Rechteck. Die Ports verschiebt `Circuit::move_gate`
    /// im selben Zug, da sie zentral im Circuit liegen.
    pub fn translate(&mut self, offset: Vec2) {
        self.coordinates += offset;
    }

    /// Hit-Test: Punkt liegt im Rechteck `[coordinates, coordinates + dimensions]`
    pub fn hit(&self, point: Vec2) -> bool {
        point.x >= self.coordinates.x
            && point.x <= self.coordinates.x + self.dimensions.x
            && point.y >= self.coordinates.y
            && point.y <= self.coordinates.y + self.dimensions.y
    }
}

/// Berechnet die Port-Mittelpunkte entlang einer vertikalen Gatter-Kante.
///
/// Abstand = `height / count`, Versatz des i-ten Ports = `(i + 0.5) * Abstand`;
/// Ports liegen dadurch nie exakt auf den Ecken.
pub fn edge_positions(edge_x: f32, top_y: f32, height: f32, count: usize) -> Vec<Vec2> {
    if count == 0 {
        return Vec::new();
    }
    let spacing = height / count as f32;
    (0..count)
        .map(|i| Vec2::new(edge_x, top_y + (i as f32 + 0.5) * spacing))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fan_in_nach_gatter_art() {
        assert_eq!(GateKind::And.fan_in(), 2);
        assert_eq!(GateKind::Xnor.fan_in(), 2);
        assert_eq!(GateKind::Not.fan_in(), 1);
        assert_eq!(GateKind::Input.fan_in(), 0);
        assert_eq!(GateKind::Clock.fan_in(), 0);
    }

    #[test]
    fn test_kind_index_roundtrip() {
        for index in 0..=8u8 {
            let kind = GateKind::from_index(index).expect("Gatter-Art erwartet");
            assert_eq!(kind.to_index(), index);
        }
        assert_eq!(GateKind::from_index(9), None);
    }

    #[test]
    fn test_hit_rechteck_grenzen() {
        let gate = Gate::new(
            Vec2::new(2.0, 1.0),
            Vec2::new(10.0, 20.0),
            GateKind::And,
            vec![],
            vec![],
        );

        assert!(gate.hit(Vec2::new(10.0, 20.0))); // obere linke Ecke
        assert!(gate.hit(Vec2::new(12.0, 21.0))); // untere rechte Ecke
        assert!(gate.hit(Vec2::new(11.0, 20.5)));
        assert!(!gate.hit(Vec2::new(12.01, 20.5)));
        assert!(!gate.hit(Vec2::new(11.0, 19.99)));
    }

    #[test]
    fn test_edge_positions_mittig_verteilt() {
        // Zwei Ports auf Hoehe 1.0: Versaetze 0.25 und 0.75
        let positions = edge_positions(0.0, 0.0, 1.0, 2);
        assert_eq!(positions.len(), 2);
        assert_relative_eq!(positions[0].y, 0.25);
        assert_relative_eq!(positions[1].y, 0.75);

        // Ein Port sitzt in der Kanten-Mitte, nie auf einer Ecke
        let single = edge_positions(3.0, 2.0, 4.0, 1);
        assert_relative_eq!(single[0].x, 3.0);
        assert_relative_eq!(single[0].y, 4.0);

        assert!(edge_positions(0.0, 0.0, 1.0, 0).is_empty());
    }
}
