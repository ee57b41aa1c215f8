//! Virtual rig actor task
//!
//! Owns a [`VirtualRig`] and serves one controller over an async stream.
//! The task frames incoming bytes on the `;` terminator, feeds each command
//! through the rig, and writes replies back. The rig never speaks first,
//! matching the half-duplex discipline of the hardware.

use std::io;

use cat_wire::{OperatingMode, ReplyFramer};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::VirtualRig;

/// Commands that can be sent to a virtual rig actor
///
/// These stand in for front-panel operation, letting tests change rig
/// state out of band from the serial conversation.
#[derive(Debug)]
pub enum VirtualRigCommand {
    /// Tune to a new frequency
    SetFrequency(u64),
    /// Key or unkey the transmitter
    SetTransmit(bool),
    /// Drain the log of CAT commands the rig has processed
    TakeCommandLog {
        /// Channel to send back the logged commands, oldest first
        response: oneshot::Sender<Vec<String>>,
    },
    /// Shut down the virtual rig actor
    Shutdown,
}

/// State event emitted when the rig's tuning or transmit state changes
#[derive(Debug, Clone)]
pub struct RigStateEvent {
    /// Current tuned frequency in Hz
    pub frequency_hz: u64,
    /// Current operating mode
    pub mode: OperatingMode,
    /// Whether the rig is in memory mode
    pub memory_mode: bool,
    /// Selected memory channel
    pub channel: u32,
    /// Transmit state
    pub transmit: bool,
}

impl RigStateEvent {
    fn snapshot(rig: &VirtualRig) -> Self {
        Self {
            frequency_hz: rig.frequency_hz(),
            mode: rig.mode(),
            memory_mode: rig.memory_mode(),
            channel: rig.current_channel(),
            transmit: rig.transmit(),
        }
    }
}

/// Run the virtual rig actor task
///
/// Processes CAT commands read from the stream and control commands from
/// the channel. State changes are emitted via the broadcast channel so
/// tests and monitors can observe the rig without polling it.
pub async fn run_virtual_rig_task<S>(
    mut stream: S,
    mut rig: VirtualRig,
    mut cmd_rx: mpsc::Receiver<VirtualRigCommand>,
    state_tx: broadcast::Sender<RigStateEvent>,
) -> io::Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut framer = ReplyFramer::new();
    let mut buf = [0u8; 1024];

    info!("starting virtual rig task");

    // Emit initial state
    let _ = state_tx.send(RigStateEvent::snapshot(&rig));

    loop {
        tokio::select! {
            result = stream.read(&mut buf) => {
                match result {
                    Ok(0) => {
                        debug!("virtual rig stream closed");
                        break;
                    }
                    Ok(n) => {
                        framer.push_bytes(&buf[..n]);
                        let mut changed = false;
                        while let Some(cmd) = framer.next_reply() {
                            debug!(command = %cmd, "virtual rig processing");
                            let outcome = rig.handle_command(&cmd);
                            changed |= outcome.state_changed;
                            if let Some(reply) = outcome.reply {
                                debug!(reply = %reply, "virtual rig answering");
                                stream.write_all(reply.as_bytes()).await?;
                                stream.flush().await?;
                            }
                        }
                        if changed {
                            let _ = state_tx.send(RigStateEvent::snapshot(&rig));
                        }
                    }
                    Err(e) => {
                        warn!("virtual rig stream error: {}", e);
                        return Err(e);
                    }
                }
            }

            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(VirtualRigCommand::SetFrequency(hz)) => {
                        debug!(hz, "virtual rig tuned from the front panel");
                        rig.set_frequency(hz);
                        let _ = state_tx.send(RigStateEvent::snapshot(&rig));
                    }
                    Some(VirtualRigCommand::SetTransmit(active)) => {
                        debug!(active, "virtual rig transmit toggled");
                        rig.set_transmit(active);
                        let _ = state_tx.send(RigStateEvent::snapshot(&rig));
                    }
                    Some(VirtualRigCommand::TakeCommandLog { response }) => {
                        let _ = response.send(rig.take_command_log());
                    }
                    Some(VirtualRigCommand::Shutdown) => {
                        info!("shutdown requested for virtual rig");
                        break;
                    }
                    None => {
                        debug!("command channel closed for virtual rig");
                        break;
                    }
                }
            }
        }
    }

    info!("virtual rig task ended");
    Ok(())
}
