//! Logic Circuit Editor, headless Treiber.
//!
//! Laedt eine Schaltungs-Datei, laesst die Takt-Simulation eine feste
//! Anzahl Ticks laufen (kontinuierlich mit Kadenz oder im Schnelldurchlauf)
//! und schreibt das Ergebnis auf Wunsch zurueck. Die grafische Oberflaeche
//! setzt auf dieselbe Library auf.

use anyhow::bail;
use logic_circuit_editor::{app, AppState, EditorOptions};
use std::time::{Duration, Instant};

struct Args {
    file: String,
    ticks: u64,
    fast: bool,
    save: bool,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut file = None;
    let mut ticks = 1u64;
    let mut fast = false;
    let mut save = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--ticks" => {
                let value = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--ticks braucht einen Wert"))?;
                ticks = value.parse()?;
            }
            "--fast" => fast = true,
            "--save" => save = true,
            _ if arg.starts_with("--") => bail!("Unbekannte Option: {}", arg),
            _ => file = Some(arg),
        }
    }

    let Some(file) = file else {
        bail!("Aufruf: logic-circuit-editor [--ticks N] [--fast] [--save] <datei>");
    };
    Ok(Args { file, ticks, fast, save })
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Logic Circuit Editor v{}", env!("CARGO_PKG_VERSION"));

    let args = parse_args()?;
    let options = EditorOptions::load_from_file(&EditorOptions::config_path());
    let mut state = AppState::new(options);

    app::load_file(&mut state, args.file)?;

    if args.fast {
        for _ in 0..args.ticks {
            state.simulation.step(&mut state.circuit);
        }
    } else {
        // Kontinuierlicher Lauf mit der konfigurierten Kadenz
        state.simulation.toggle_running();
        let mut done = 0u64;
        let mut last = Instant::now();
        while done < args.ticks {
            std::thread::sleep(Duration::from_millis(5));
            let now = Instant::now();
            done += u64::from(state.simulation.advance(&mut state.circuit, now - last));
            last = now;
        }
    }
    log::info!("{} Ticks ausgefuehrt", args.ticks);

    for (gate_id, gate) in &state.circuit.gates {
        log::info!(
            "Gatter {} ({:?}): {}",
            gate_id,
            gate.kind,
            if gate.evaluation.value { 1 } else { 0 }
        );
    }

    if args.save {
        app::save_current_file(&state)?;
    }
    Ok(())
}
