//! Engine actor
//!
//! One task owns the session, and with it the transport; everything else
//! talks to it through channels. Foreground commands and background polls
//! interleave through a single select loop, which is what serializes the
//! half-duplex wire: while a command flow runs, no poll can start, and a
//! poll tick that lands during a foreground operation is simply skipped
//! rather than queued.
//!
//! # Example
//!
//! ```rust,ignore
//! use cat_engine::{run_engine_actor, EngineCommand, EngineConfig};
//! use tokio::sync::mpsc;
//!
//! let (cmd_tx, cmd_rx) = mpsc::channel(64);
//! let (event_tx, mut event_rx) = mpsc::channel(256);
//!
//! // Spawn the actor on an open transport
//! tokio::spawn(run_engine_actor(stream, EngineConfig::default(), cmd_rx, event_tx));
//!
//! // Send commands and drain events
//! ```

use cat_wire::{
    ident, ChannelReply, MenuReading, MeterChannel, OperatingMode, PresetRecord, CHANNEL_MIN,
};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::{mpsc, oneshot};
use tokio::time::{interval, sleep, Duration, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::events::EngineEvent;
use crate::memory::{self, MemoryHit};
use crate::preset;
use crate::session::CatSession;
use crate::snapshot;
use crate::state::{RigState, TuningMode};
use crate::tuning;

/// Commands sent to the engine actor
#[derive(Debug)]
pub enum EngineCommand {
    /// Nudge one frequency digit up or down
    AdjustDigit {
        /// Editable digit index, 0 (hundreds of MHz) through 8 (single Hz)
        digit_index: usize,
        /// +1 or -1
        direction: i32,
        /// Channel to send back the confirmed frequency
        response: oneshot::Sender<Result<u64, EngineError>>,
    },

    /// Step to the next programmed memory channel
    StepMemory {
        /// +1 or -1
        direction: i32,
        /// Channel to send back the landing
        response: oneshot::Sender<Result<MemoryHit, EngineError>>,
    },

    /// Recall a specific memory channel
    RecallChannel {
        /// Channel number, 1 through 124
        channel: u32,
        /// Channel to send back the landing
        response: oneshot::Sender<Result<MemoryHit, EngineError>>,
    },

    /// Change the operating mode
    SetMode {
        /// Mode to select
        mode: OperatingMode,
        /// Channel to send back the mode the rig confirmed
        response: oneshot::Sender<Result<OperatingMode, EngineError>>,
    },

    /// Toggle between VFO and memory operation
    ToggleVfoMemory {
        /// Channel to send back the tuning source after the toggle
        response: oneshot::Sender<Result<TuningMode, EngineError>>,
    },

    /// Apply a preset batch in order
    ApplyPreset {
        /// Records to apply
        records: Vec<PresetRecord>,
        /// Channel to send back the applied count
        response: oneshot::Sender<Result<usize, EngineError>>,
    },

    /// Snapshot every known menu item
    ReadMenus {
        /// Channel to send back the readings
        response: oneshot::Sender<Result<Vec<MenuReading>, EngineError>>,
    },

    /// Send operator-typed text and return the raw reply
    RawCommand {
        /// Command text, terminator optional
        text: String,
        /// Channel to send back whatever the rig answered
        response: oneshot::Sender<Result<Option<String>, EngineError>>,
    },

    /// Snapshot the last known rig state
    QueryState {
        /// Channel to send back the state
        response: oneshot::Sender<RigState>,
    },

    /// Stop the actor
    Shutdown,
}

/// Identify the rig and take the first state readings
///
/// The ID probe is advisory: an unexpected or missing identity is reported
/// and logged, never fatal. Operators run this against all sorts of
/// Yaesu-dialect rigs.
async fn greet<T>(
    session: &mut CatSession<T>,
    event_tx: &mpsc::Sender<EngineEvent>,
) -> Result<(), EngineError>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    match session.identify().await? {
        Some(reply) => {
            let recognized = ident::is_ft991a(&reply);
            let id = reply.strip_prefix("ID").unwrap_or(&reply).to_string();
            if recognized {
                info!("Rig identified as FT-991A (ID{})", id);
            } else {
                warn!("Unexpected rig identity {:?}", reply);
            }
            let _ = event_tx.send(EngineEvent::Identified { id, recognized }).await;
        }
        None => warn!("Rig did not answer the ID probe"),
    }

    if let Some(hz) = session.read_frequency().await? {
        let _ = event_tx
            .send(EngineEvent::Frequency {
                hz,
                display: session.state().frequency_display(),
            })
            .await;
    }
    if let Some(mode) = session.read_mode().await? {
        let _ = event_tx.send(EngineEvent::Mode { mode }).await;
    }
    if session.query_channel().await?.is_some() {
        let _ = event_tx
            .send(EngineEvent::Channel {
                channel: session.state().channel,
                tag: session.state().channel_tag.clone(),
            })
            .await;
    }

    let _ = event_tx
        .send(EngineEvent::Status {
            text: session.state().summary(),
        })
        .await;

    Ok(())
}

/// Step to the next programmed channel from wherever the rig is now
async fn step_memory<T>(
    session: &mut CatSession<T>,
    direction: i32,
) -> Result<MemoryHit, EngineError>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    let from = match session.query_channel().await? {
        Some(ChannelReply::Channel(ch)) => ch,
        _ => CHANNEL_MIN,
    };
    memory::find_next_channel(session, from, direction).await
}

/// Command a mode change and read back what the rig settled on
async fn change_mode<T>(
    session: &mut CatSession<T>,
    mode: OperatingMode,
) -> Result<OperatingMode, EngineError>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    session.set_mode(mode).await?;
    sleep(session.config().set_settle()).await;
    Ok(session.read_mode().await?.unwrap_or(mode))
}

/// Toggle the tuning source and read back where the rig landed
async fn toggle_tuning<T>(session: &mut CatSession<T>) -> Result<TuningMode, EngineError>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    session.set_inhibit(session.config().memory_inhibit());
    match session.state().tuning {
        TuningMode::Memory => session.select_vfo().await?,
        TuningMode::Vfo => session.select_memory_mode().await?,
    }
    sleep(session.config().set_settle()).await;
    session.query_channel().await?;
    Ok(session.state().tuning)
}

/// Report an engine failure through the event stream
async fn report_error(event_tx: &mpsc::Sender<EngineEvent>, source: &str, error: &EngineError) {
    warn!("{} failed: {}", source, error);
    let _ = event_tx
        .send(EngineEvent::Error {
            source: source.to_string(),
            message: error.to_string(),
        })
        .await;
}

/// Run the engine actor until shutdown or transport failure
///
/// # Arguments
///
/// * `io` - Transport the session will own; a serial port or a duplex pipe
/// * `config` - Timing configuration
/// * `cmd_rx` - Receiver for commands sent to the actor
/// * `event_tx` - Sender for events emitted by the actor
pub async fn run_engine_actor<T>(
    io: T,
    config: EngineConfig,
    mut cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
) where
    T: AsyncRead + AsyncWrite + Unpin + Send,
{
    let mut session = CatSession::new(io, config.clone());
    info!("Engine actor started");

    if let Err(e) = greet(&mut session, &event_tx).await {
        report_error(&event_tx, "startup", &e).await;
        if e.is_fatal() {
            return;
        }
    }

    let mut meter_timer = interval(Duration::from_millis(config.meter_poll_ms));
    meter_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut freq_timer = interval(Duration::from_millis(config.frequency_poll_ms));
    freq_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut tx_timer = interval(Duration::from_millis(config.tx_poll_ms));
    tx_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

    // RM1 and RM5 share a cadence; each tick reads one and flips
    let mut next_meter = MeterChannel::Signal;
    let mut freq_ticks: u64 = 0;

    loop {
        tokio::select! {
            cmd = cmd_rx.recv() => {
                let Some(cmd) = cmd else { break; };
                match cmd {
                    EngineCommand::AdjustDigit { digit_index, direction, response } => {
                        let result = tuning::adjust_digit(&mut session, digit_index, direction).await;
                        if let Ok(hz) = &result {
                            let _ = event_tx.send(EngineEvent::Frequency {
                                hz: *hz,
                                display: session.state().frequency_display(),
                            }).await;
                        }
                        let fatal = result.as_ref().err().map_or(false, |e| e.is_fatal());
                        let _ = response.send(result);
                        if fatal { break; }
                    }

                    EngineCommand::StepMemory { direction, response } => {
                        let result = step_memory(&mut session, direction).await;
                        match &result {
                            Ok(hit) => {
                                let _ = event_tx.send(EngineEvent::Channel {
                                    channel: Some(hit.channel),
                                    tag: hit.tag.clone(),
                                }).await;
                                if let Some(hz) = hit.frequency_hz {
                                    let _ = event_tx.send(EngineEvent::Frequency {
                                        hz,
                                        display: session.state().frequency_display(),
                                    }).await;
                                }
                            }
                            // Exhaustion is informational, not a fault
                            Err(EngineError::SearchExhausted) => {
                                let _ = event_tx.send(EngineEvent::Status {
                                    text: "No additional programmed memory channels".to_string(),
                                }).await;
                            }
                            Err(_) => {}
                        }
                        let fatal = result.as_ref().err().map_or(false, |e| e.is_fatal());
                        let _ = response.send(result);
                        if fatal { break; }
                    }

                    EngineCommand::RecallChannel { channel, response } => {
                        let result = memory::recall_channel(&mut session, channel).await;
                        if let Ok(hit) = &result {
                            let _ = event_tx.send(EngineEvent::Channel {
                                channel: Some(hit.channel),
                                tag: hit.tag.clone(),
                            }).await;
                            if let Some(hz) = hit.frequency_hz {
                                let _ = event_tx.send(EngineEvent::Frequency {
                                    hz,
                                    display: session.state().frequency_display(),
                                }).await;
                            }
                        }
                        let fatal = result.as_ref().err().map_or(false, |e| e.is_fatal());
                        let _ = response.send(result);
                        if fatal { break; }
                    }

                    EngineCommand::SetMode { mode, response } => {
                        let result = change_mode(&mut session, mode).await;
                        if let Ok(confirmed) = &result {
                            let _ = event_tx.send(EngineEvent::Mode { mode: *confirmed }).await;
                        }
                        let fatal = result.as_ref().err().map_or(false, |e| e.is_fatal());
                        let _ = response.send(result);
                        if fatal { break; }
                    }

                    EngineCommand::ToggleVfoMemory { response } => {
                        let result = toggle_tuning(&mut session).await;
                        if result.is_ok() {
                            let _ = event_tx.send(EngineEvent::Channel {
                                channel: session.state().channel,
                                tag: session.state().channel_tag.clone(),
                            }).await;
                        }
                        let fatal = result.as_ref().err().map_or(false, |e| e.is_fatal());
                        let _ = response.send(result);
                        if fatal { break; }
                    }

                    EngineCommand::ApplyPreset { records, response } => {
                        let result = preset::apply(&mut session, &records, &event_tx).await;
                        let fatal = result.as_ref().err().map_or(false, |e| e.is_fatal());
                        let _ = response.send(result);
                        if fatal { break; }
                    }

                    EngineCommand::ReadMenus { response } => {
                        let result = snapshot::read_all(&mut session, &event_tx).await;
                        let fatal = result.as_ref().err().map_or(false, |e| e.is_fatal());
                        let _ = response.send(result);
                        if fatal { break; }
                    }

                    EngineCommand::RawCommand { text, response } => {
                        let result = session.raw_command(&text).await;
                        let fatal = result.as_ref().err().map_or(false, |e| e.is_fatal());
                        let _ = response.send(result);
                        if fatal { break; }
                    }

                    EngineCommand::QueryState { response } => {
                        let _ = response.send(session.state().clone());
                    }

                    EngineCommand::Shutdown => {
                        info!("Shutdown requested");
                        break;
                    }
                }
            }

            _ = meter_timer.tick() => {
                if session.inhibited() {
                    debug!("Meter poll inhibited for {}ms", session.inhibit_remaining_ms());
                } else {
                    let channel = next_meter;
                    next_meter = next_meter.other();
                    match session.read_meter(channel).await {
                        Ok(Some(value)) => {
                            let _ = event_tx.send(EngineEvent::Meter { channel, value }).await;
                        }
                        Ok(None) => {}
                        Err(e) => {
                            report_error(&event_tx, "meter poll", &e).await;
                            if e.is_fatal() { break; }
                        }
                    }
                }
            }

            _ = freq_timer.tick() => {
                if session.inhibited() {
                    debug!("Frequency poll inhibited for {}ms", session.inhibit_remaining_ms());
                } else {
                    freq_ticks += 1;
                    let before = session.state().frequency_hz;
                    match session.read_frequency().await {
                        Ok(Some(hz)) => {
                            if before != Some(hz) {
                                let _ = event_tx.send(EngineEvent::Frequency {
                                    hz,
                                    display: session.state().frequency_display(),
                                }).await;
                            }
                        }
                        Ok(None) => {}
                        Err(e) => {
                            report_error(&event_tx, "frequency poll", &e).await;
                            if e.is_fatal() { break; }
                        }
                    }

                    // Channel context rides every other frequency tick
                    if freq_ticks % 2 == 0 {
                        let before = (session.state().tuning, session.state().channel);
                        match session.query_channel().await {
                            Ok(Some(_)) => {
                                let now = (session.state().tuning, session.state().channel);
                                if now != before {
                                    let _ = event_tx.send(EngineEvent::Channel {
                                        channel: session.state().channel,
                                        tag: session.state().channel_tag.clone(),
                                    }).await;
                                }
                            }
                            Ok(None) => {}
                            Err(e) => {
                                report_error(&event_tx, "channel poll", &e).await;
                                if e.is_fatal() { break; }
                            }
                        }
                    }
                }
            }

            _ = tx_timer.tick() => {
                if session.inhibited() {
                    debug!("TX poll inhibited for {}ms", session.inhibit_remaining_ms());
                } else {
                    match session.read_transmit().await {
                        Ok(active) => {
                            let _ = event_tx.send(EngineEvent::Transmit { active }).await;
                        }
                        Err(e) => {
                            report_error(&event_tx, "transmit poll", &e).await;
                            if e.is_fatal() { break; }
                        }
                    }
                }
            }
        }
    }

    info!("Engine actor stopped");
}
