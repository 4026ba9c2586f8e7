//! Die zentrale Circuit-Datenstruktur: Gatter, Ports und ihre Verbindungen.
//!
//! Gatter und Ports liegen in insertion-geordneten Id-Maps; Verbindungen
//! sind symmetrische Id-Paare. Saemtliche Topologie-Mutationen laufen ueber
//! dieses Modul, damit die Invarianten (Symmetrie, maximal eine Verbindung
//! pro Eingangs-Port) an einer Stelle durchgesetzt werden.

use super::{edge_positions, Gate, GateId, GateKind, Port, PortId, PortKind};
use glam::Vec2;
use indexmap::IndexMap;

/// Container fuer die gesamte Schaltung
#[derive(Debug, Clone, Default)]
pub struct Circuit {
    /// Alle Gatter in Einfuege-Reihenfolge
    pub gates: IndexMap<GateId, Gate>,
    /// Alle Ports in Einfuege-Reihenfolge (der Ghost-Port ist stets der letzte)
    pub ports: IndexMap<PortId, Port>,
    /// Transienter Ghost-Port einer laufenden Link-Geste
    ghost_port: Option<PortId>,
    next_gate_id: u64,
    next_port_id: u64,
}

impl Circuit {
    /// Erstellt eine neue, leere Schaltung
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc_gate_id(&mut self) -> GateId {
        self.next_gate_id += 1;
        GateId(self.next_gate_id)
    }

    fn alloc_port_id(&mut self) -> PortId {
        self.next_port_id += 1;
        PortId(self.next_port_id)
    }

    // ── Gatter ───────────────────────────────────────────────────

    /// Fuegt ein Gatter hinzu und legt seine Ports an.
    ///
    /// Eingangs-Ports werden gleichmaessig entlang der linken Kante verteilt,
    /// Ausgangs-Ports entlang der rechten. Die Stelligkeit folgt der
    /// Gatter-Art und ist danach unveraenderlich.
    pub fn add_gate(&mut self, dimensions: Vec2, coordinates: Vec2, kind: GateKind) -> GateId {
        let gate_id = self.alloc_gate_id();

        let mut in_ports = Vec::with_capacity(kind.fan_in());
        for position in edge_positions(coordinates.x, coordinates.y, dimensions.y, kind.fan_in()) {
            let port_id = self.alloc_port_id();
            self.ports
                .insert(port_id, Port::new(position, PortKind::In, Some(gate_id)));
            in_ports.push(port_id);
        }

        let mut out_ports = Vec::with_capacity(kind.fan_out());
        for position in edge_positions(
            coordinates.x + dimensions.x,
            coordinates.y,
            dimensions.y,
            kind.fan_out(),
        ) {
            let port_id = self.alloc_port_id();
            self.ports
                .insert(port_id, Port::new(position, PortKind::Out, Some(gate_id)));
            out_ports.push(port_id);
        }

        self.gates.insert(
            gate_id,
            Gate::new(dimensions, coordinates, kind, in_ports, out_ports),
        );
        gate_id
    }

    /// Entfernt ein Gatter samt aller seiner Ports.
    ///
    /// Jede Verbindung eines entfernten Ports wird zuvor auf beiden Seiten
    /// geloest, damit kein ueberlebender Port auf eine tote Id zeigt.
    pub fn delete_gate(&mut self, gate_id: GateId) -> Option<Gate> {
        let gate = self.gates.shift_remove(&gate_id)?;
        for port_id in gate.in_ports.iter().chain(gate.out_ports.iter()) {
            self.sever_all(*port_id);
            self.ports.shift_remove(port_id);
        }
        Some(gate)
    }

    /// Verschiebt ein Gatter und alle seine Ports um denselben Versatz
    pub fn move_gate(&mut self, gate_id: GateId, offset: Vec2) {
        let Some(gate) = self.gates.get_mut(&gate_id) else {
            return;
        };
        gate.translate(offset);
        let port_ids: Vec<PortId> = gate
            .in_ports
            .iter()
            .chain(gate.out_ports.iter())
            .copied()
            .collect();
        for port_id in port_ids {
            if let Some(port) = self.ports.get_mut(&port_id) {
                port.translate(offset);
            }
        }
    }

    /// Fuegt einen freistehenden, eigentuemerlosen Port hinzu.
    /// Wird beim Laden einer Datei fuer Ports ohne Gatter benutzt.
    pub fn add_free_port(&mut self, coordinates: Vec2, kind: PortKind) -> PortId {
        let port_id = self.alloc_port_id();
        self.ports.insert(port_id, Port::new(coordinates, kind, None));
        port_id
    }

    /// Setzt den Wert eines INPUT-Gatters um (Nutzer-Interaktion).
    ///
    /// Fuer alle anderen Gatter-Arten ein No-Op mit `false` als Rueckgabe.
    pub fn toggle_input(&mut self, gate_id: GateId) -> bool {
        match self.gates.get_mut(&gate_id) {
            Some(gate) if gate.kind == GateKind::Input => {
                gate.evaluation.value = !gate.evaluation.value;
                true
            }
            _ => false,
        }
    }

    // ── Hit-Tests ────────────────────────────────────────────────

    /// Findet das erste Gatter unter dem Punkt (linearer Scan)
    pub fn gate_at(&self, point: Vec2) -> Option<GateId> {
        self.gates
            .iter()
            .find(|(_, gate)| gate.hit(point))
            .map(|(id, _)| *id)
    }

    /// Findet den ersten Port unter dem Punkt.
    ///
    /// Der Ghost-Port wird uebersprungen; er darf waehrend einer
    /// Link-Geste nie selbst als Verbindungsziel waehlbar sein.
    pub fn port_at(&self, point: Vec2) -> Option<PortId> {
        self.ports
            .iter()
            .filter(|(id, _)| Some(**id) != self.ghost_port)
            .find(|(_, port)| port.hit(point))
            .map(|(id, _)| *id)
    }

    // ── Verbindungen ─────────────────────────────────────────────

    /// Verbindet zwei Ports symmetrisch.
    ///
    /// Set-Semantik: eine bereits bestehende Verbindung wird nicht
    /// dupliziert, Self-Loops werden verworfen. Haelt ein Eingangs-Port
    /// schon eine Verbindung, wird
    /// der alte Partner zuerst beidseitig entfernt (Verdraengung statt
    /// Ablehnung).
    pub fn connect(&mut self, a: PortId, b: PortId) {
        if a == b {
            log::warn!("Self-Loop nicht erlaubt (Port {})", a);
            return;
        }
        if !self.ports.contains_key(&a) || !self.ports.contains_key(&b) {
            log::warn!("Verbindung {}–{} nicht moeglich: Port existiert nicht", a, b);
            return;
        }
        if self.ports[&a].is_connected_to(b) {
            log::debug!("Verbindung {}–{} existiert bereits", a, b);
            return;
        }

        self.evict_if_occupied(a);
        self.evict_if_occupied(b);

        self.ports[&a].connections.push(b);
        self.ports[&b].connections.push(a);
    }

    /// Entfernt bei einem belegten Eingangs-Port die bestehende Verbindung
    fn evict_if_occupied(&mut self, port_id: PortId) {
        if self.ports[&port_id].kind != PortKind::In {
            return;
        }
        while let Some(old_partner) = self.ports[&port_id].connections.first().copied() {
            self.disconnect(port_id, old_partner);
        }
    }

    /// Loest eine Verbindung auf beiden Seiten
    pub fn disconnect(&mut self, a: PortId, b: PortId) {
        if let Some(port) = self.ports.get_mut(&a) {
            port.connections.retain(|id| *id != b);
        }
        if let Some(port) = self.ports.get_mut(&b) {
            port.connections.retain(|id| *id != a);
        }
    }

    /// Loest alle Verbindungen eines Ports (beidseitig)
    pub fn sever_all(&mut self, port_id: PortId) {
        let Some(port) = self.ports.get_mut(&port_id) else {
            return;
        };
        let partners = std::mem::take(&mut port.connections);
        for partner_id in partners {
            if let Some(partner) = self.ports.get_mut(&partner_id) {
                partner.connections.retain(|id| *id != port_id);
            }
        }
    }

    /// Zaehlt die ungerichteten Verbindungen in der Schaltung
    pub fn connection_count(&self) -> usize {
        let endpoints: usize = self.ports.values().map(|p| p.connections.len()).sum();
        endpoints / 2
    }

    // ── Ghost-Port (Link-Geste) ──────────────────────────────────

    /// Erstellt den Ghost-Port einer beginnenden Link-Geste.
    ///
    /// Der Ghost ist eigentuemerlos, haengt als letztes Element in der
    /// Port-Map und wird provisorisch mit `source` verbunden, damit die
    /// entstehende Leitung dem Zeiger folgen kann. Aufrufer uebergeben
    /// als `kind` die umgekehrte Art des Quell-Ports.
    pub fn create_ghost_port(&mut self, source: PortId, coordinates: Vec2, kind: PortKind) -> PortId {
        debug_assert!(
            self.ghost_port.is_none(),
            "Ghost-Port existiert bereits, Link-Geste nicht abgeschlossen?"
        );
        let ghost_id = self.alloc_port_id();
        self.ports.insert(ghost_id, Port::new(coordinates, kind, None));
        // Provisorische Verbindung; bei belegtem Eingangs-Port verdraengt
        // sie wie jede andere Verbindung den bisherigen Partner.
        self.connect(source, ghost_id);
        self.ghost_port = Some(ghost_id);
        ghost_id
    }

    /// Verschiebt den Ghost-Port (Leitung folgt dem Zeiger)
    pub fn move_ghost_port(&mut self, offset: Vec2) {
        if let Some(ghost_id) = self.ghost_port {
            if let Some(ghost) = self.ports.get_mut(&ghost_id) {
                ghost.translate(offset);
            }
        }
    }

    /// Entfernt den Ghost-Port und seine provisorische Verbindung zu `source`.
    ///
    /// Wird beim Abbruch der Geste gerufen und als erster Schritt von
    /// [`connect_ports`](Self::connect_ports).
    pub fn remove_ghost_port(&mut self, source: PortId) {
        let Some(ghost_id) = self.ghost_port.take() else {
            return;
        };
        self.disconnect(source, ghost_id);
        self.ports.shift_remove(&ghost_id);
    }

    /// Schliesst eine Link-Geste ab: verwirft den Ghost-Port und stellt
    /// die echte Verbindung zwischen `p1` und `p2` her (Verdraengungsregel
    /// fuer Eingangs-Ports gilt).
    pub fn connect_ports(&mut self, p1: PortId, p2: PortId) {
        self.remove_ghost_port(p1);
        self.connect(p1, p2);
    }

    /// Id des aktuellen Ghost-Ports, falls eine Link-Geste laeuft
    pub fn ghost_port(&self) -> Option<PortId> {
        self.ghost_port
    }

    // ── Zaehler fuer Anzeige und Logging ─────────────────────────

    /// Anzahl der Gatter
    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }

    /// Anzahl der Ports (inklusive eines eventuellen Ghost-Ports)
    pub fn port_count(&self) -> usize {
        self.ports.len()
    }
}
