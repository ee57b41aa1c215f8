//! cathode console
//!
//! Thin line-oriented frontend for the CAT engine: opens the serial port
//! (or a built-in virtual rig with `--sim`), runs the engine actor, prints
//! its events, and turns typed lines into engine commands. Preset files and
//! menu snapshots are JSON.

mod commands;
mod settings;

use std::path::Path;

use anyhow::Context;
use cat_engine::{run_engine_actor, EngineCommand, EngineError, EngineEvent};
use cat_rigsim::{run_virtual_rig_task, VirtualRig};
use cat_wire::{MenuReading, OperatingMode, PresetRecord};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commands::ConsoleCommand;
use settings::ConsoleSettings;

#[derive(Parser, Clone, Debug)]
#[command(name = "cathode", version, about = "Console CAT control for the Yaesu FT-991A")]
pub struct Cli {
    /// Serial port of the radio, e.g. /dev/ttyUSB0
    #[arg(short, long)]
    pub port: Option<String>,

    /// Serial baud rate
    #[arg(short, long)]
    pub baud: Option<u32>,

    /// Drive a built-in virtual rig instead of hardware
    #[arg(long, default_value_t = false)]
    pub sim: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "cathode=info,cat_engine=info,cat_wire=info,cat_rigsim=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let mut settings = ConsoleSettings::load();
    if let Some(port) = &cli.port {
        settings.port = Some(port.clone());
    }
    if let Some(baud) = cli.baud {
        settings.engine.baud_rate = baud;
    }
    if cli.port.is_some() || cli.baud.is_some() {
        if let Err(e) = settings.save() {
            warn!("Could not save settings: {}", e);
        }
    }

    let config = settings.engine.clone();
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (event_tx, event_rx) = mpsc::channel(256);

    if cli.sim {
        info!("Running against the built-in virtual rig");
        let (engine_io, rig_io) = tokio::io::duplex(1024);
        let (rig_cmd_tx, rig_cmd_rx) = mpsc::channel(16);
        let (state_tx, _) = broadcast::channel(64);
        tokio::spawn(run_virtual_rig_task(rig_io, demo_rig(), rig_cmd_rx, state_tx));
        tokio::spawn(run_engine_actor(engine_io, config, cmd_rx, event_tx));
        tokio::spawn(print_events(event_rx));

        let result = repl(cmd_tx).await;
        // The virtual rig shuts down when its command channel closes
        drop(rig_cmd_tx);
        result
    } else {
        let port = settings
            .port
            .clone()
            .context("no serial port configured; pass --port /dev/ttyUSB0 or use --sim")?;
        let stream = cat_engine::transport::open_serial(&port, settings.engine.baud_rate)?;
        tokio::spawn(run_engine_actor(stream, config, cmd_rx, event_tx));
        tokio::spawn(print_events(event_rx));

        repl(cmd_tx).await
    }
}

/// Virtual rig served in `--sim` mode, with a small programmed bank
fn demo_rig() -> VirtualRig {
    let mut rig = VirtualRig::new();
    rig.program_channel(7, "CAL", 146_520_000, OperatingMode::Fm);
    rig.program_channel(59, "FT8", 7_074_000, OperatingMode::DataU);
    rig
}

/// Read console lines and dispatch them until quit or EOF
async fn repl(cmd_tx: mpsc::Sender<EngineCommand>) -> anyhow::Result<()> {
    print_help();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match commands::parse(line) {
            Ok(ConsoleCommand::Quit) => break,
            Ok(cmd) => dispatch(&cmd_tx, cmd).await?,
            Err(msg) => println!("{}", msg),
        }
    }

    let _ = cmd_tx.send(EngineCommand::Shutdown).await;
    Ok(())
}

/// Send one parsed command to the engine and print its outcome
///
/// Operation failures print and the console keeps running; only a dead
/// engine ends the loop. State changes that succeed are not echoed here,
/// they come back through the event stream.
async fn dispatch(
    cmd_tx: &mpsc::Sender<EngineCommand>,
    cmd: ConsoleCommand,
) -> anyhow::Result<()> {
    match cmd {
        ConsoleCommand::ShowFrequency => {
            let state = send_engine(cmd_tx, |tx| EngineCommand::QueryState { response: tx }).await?;
            println!("Frequency: {}", state.frequency_display());
        }

        ConsoleCommand::Status => {
            let state = send_engine(cmd_tx, |tx| EngineCommand::QueryState { response: tx }).await?;
            println!("{}", state.summary());
        }

        ConsoleCommand::AdjustDigit {
            digit_index,
            direction,
        } => {
            let result = send_engine(cmd_tx, |tx| EngineCommand::AdjustDigit {
                digit_index,
                direction,
                response: tx,
            })
            .await?;
            if let Err(e) = result {
                println!("Edit failed: {}", e);
            }
        }

        ConsoleCommand::StepMemory { direction } => {
            let result = send_engine(cmd_tx, |tx| EngineCommand::StepMemory {
                direction,
                response: tx,
            })
            .await?;
            match result {
                Ok(_) => {}
                // The engine reports exhaustion through the event stream
                Err(EngineError::SearchExhausted) => {}
                Err(e) => println!("Memory step failed: {}", e),
            }
        }

        ConsoleCommand::Recall { channel } => {
            let result = send_engine(cmd_tx, |tx| EngineCommand::RecallChannel {
                channel,
                response: tx,
            })
            .await?;
            if let Err(e) = result {
                println!("Recall failed: {}", e);
            }
        }

        ConsoleCommand::Mode(mode) => {
            let result =
                send_engine(cmd_tx, |tx| EngineCommand::SetMode { mode, response: tx }).await?;
            if let Err(e) = result {
                println!("Mode change failed: {}", e);
            }
        }

        ConsoleCommand::ToggleVfoMemory => {
            let result =
                send_engine(cmd_tx, |tx| EngineCommand::ToggleVfoMemory { response: tx }).await?;
            if let Err(e) = result {
                println!("Toggle failed: {}", e);
            }
        }

        ConsoleCommand::Apply(path) => {
            apply_preset_file(cmd_tx, &path).await?;
        }

        ConsoleCommand::Snapshot(path) => {
            write_snapshot_file(cmd_tx, &path).await?;
        }

        ConsoleCommand::Raw(text) => {
            let result = send_engine(cmd_tx, |tx| EngineCommand::RawCommand {
                text,
                response: tx,
            })
            .await?;
            match result {
                Ok(Some(reply)) => println!("<< {}", reply),
                Ok(None) => println!("(no reply)"),
                Err(e) => println!("Send failed: {}", e),
            }
        }

        ConsoleCommand::Help => print_help(),

        // Handled by the repl before dispatch
        ConsoleCommand::Quit => {}
    }

    Ok(())
}

/// Load a JSON preset file and apply it through the engine
async fn apply_preset_file(
    cmd_tx: &mpsc::Sender<EngineCommand>,
    path: &Path,
) -> anyhow::Result<()> {
    let text = match tokio::fs::read_to_string(path).await {
        Ok(text) => text,
        Err(e) => {
            println!("Could not read {}: {}", path.display(), e);
            return Ok(());
        }
    };
    let records: Vec<PresetRecord> = match serde_json::from_str(&text) {
        Ok(records) => records,
        Err(e) => {
            println!("Could not parse {}: {}", path.display(), e);
            return Ok(());
        }
    };

    let total = records.len();
    let result = send_engine(cmd_tx, |tx| EngineCommand::ApplyPreset {
        records,
        response: tx,
    })
    .await?;
    match result {
        Ok(applied) => println!("Applied {} of {} preset records", applied, total),
        Err(e) => println!("Preset apply failed: {}", e),
    }
    Ok(())
}

/// Snapshot every menu item and write the readings to a JSON file
async fn write_snapshot_file(
    cmd_tx: &mpsc::Sender<EngineCommand>,
    path: &Path,
) -> anyhow::Result<()> {
    let result = send_engine(cmd_tx, |tx| EngineCommand::ReadMenus { response: tx }).await?;
    let readings: Vec<MenuReading> = match result {
        Ok(readings) => readings,
        Err(e) => {
            println!("Snapshot failed: {}", e);
            return Ok(());
        }
    };

    let json = serde_json::to_string_pretty(&readings)
        .context("serializing snapshot")?;
    match tokio::fs::write(path, json).await {
        Ok(()) => println!("Wrote {} menu readings to {}", readings.len(), path.display()),
        Err(e) => println!("Could not write {}: {}", path.display(), e),
    }
    Ok(())
}

/// Send one command to the engine actor and await its reply
async fn send_engine<R>(
    cmd_tx: &mpsc::Sender<EngineCommand>,
    make: impl FnOnce(oneshot::Sender<R>) -> EngineCommand,
) -> anyhow::Result<R> {
    let (tx, rx) = oneshot::channel();
    cmd_tx
        .send(make(tx))
        .await
        .map_err(|_| anyhow::anyhow!("engine stopped"))?;
    rx.await.map_err(|_| anyhow::anyhow!("engine stopped"))
}

/// Print engine events as console lines
///
/// Meter readings are deliberately not printed (they arrive five times a
/// second and are visible via `status`); transmit status prints only on
/// change for the same reason.
async fn print_events(mut event_rx: mpsc::Receiver<EngineEvent>) {
    let mut last_transmit: Option<bool> = None;

    while let Some(event) = event_rx.recv().await {
        match event {
            EngineEvent::Status { text } => println!("{}", text),
            EngineEvent::Identified { id, recognized } => {
                if recognized {
                    println!("Connected to FT-991A (ID{})", id);
                } else {
                    println!("Unrecognized rig ID{}, continuing anyway", id);
                }
            }
            EngineEvent::Error { source, message } => {
                println!("{} failed: {}", source, message);
            }
            EngineEvent::Frequency { display, .. } => println!("Frequency: {}", display),
            EngineEvent::Mode { mode } => println!("Mode: {}", mode.label()),
            EngineEvent::Channel { channel, tag } => match (channel, tag) {
                (Some(ch), Some(tag)) => println!("Memory {:03} [{}]", ch, tag),
                (Some(ch), None) => println!("Memory {:03}", ch),
                (None, _) => println!("VFO"),
            },
            EngineEvent::Meter { .. } => {}
            EngineEvent::Transmit { active } => {
                if last_transmit != Some(active) {
                    last_transmit = Some(active);
                    println!("{}", if active { "TX" } else { "RX" });
                }
            }
            EngineEvent::PresetProgress {
                index,
                total,
                applied,
            } => {
                println!("Preset {}/{} ({} applied)", index, total, applied);
            }
            EngineEvent::SnapshotProgress { index, total, .. } => {
                if index % 25 == 0 || index == total {
                    println!("Snapshot {}/{}", index, total);
                }
            }
        }
    }
}

fn print_help() {
    println!("Commands:");
    println!("  freq             show the current frequency");
    println!("  up <d> / dn <d>  nudge frequency digit d (0 = 100 MHz .. 8 = 1 Hz)");
    println!("  mem+ / mem-      step to the next programmed memory channel");
    println!("  mem <ch>         recall memory channel 1-124");
    println!("  mode <name>      set operating mode (USB, LSB, CW, DATA-U, ...)");
    println!("  vm               toggle VFO / memory tuning");
    println!("  apply <file>     apply a JSON preset file");
    println!("  snapshot <file>  read all menus into a JSON file");
    println!("  raw <cmd>        send a CAT command verbatim");
    println!("  status           show the rig state summary");
    println!("  quit             exit");
}
