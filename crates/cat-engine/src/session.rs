//! Serialized CAT exchange over a single transport
//!
//! The FT-991A speaks a half-duplex request/reply dialect with no message
//! IDs, so reply attribution is purely positional: whatever arrives next
//! belongs to whatever was written last. [`CatSession`] owns the transport
//! and enforces the discipline that makes that safe: stale input is drained
//! before every write, and at most one command is ever awaiting a reply.
//! Exclusive access is structural (`&mut self`); the engine actor is the
//! runtime serialization point for concurrent callers.
//!
//! Generic over the I/O type to support both real serial ports and virtual
//! rigs. For virtual rigs, use `DuplexStream` from `tokio::io::duplex()`.

use std::io::ErrorKind;
use std::time::Duration;

use cat_wire::{
    freq, memory, menu, meter, mode, status, CatCommand, ChannelReply, EncodeCommand,
    MeterChannel, OperatingMode, ReplyFramer,
};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::{sleep, timeout, Instant};
use tracing::{debug, trace};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::state::RigState;

/// VFO enforcement attempts before giving up
const VFO_ATTEMPTS: u32 = 4;

/// Raw power meter reading at or above this counts as transmitting
const TX_POWER_FLOOR: u16 = 10;

/// Rounds of the pre-write drain; each round reads whatever is buffered
const DRAIN_ROUNDS: usize = 8;

/// Per-round drain poll; long enough to pick up buffered bytes, short
/// enough that an idle port costs almost nothing
const DRAIN_POLL: Duration = Duration::from_millis(2);

/// Exclusive owner of one CAT transport
///
/// All rig I/O goes through here. Queries return `Ok(None)` when the rig
/// stays silent past the deadline or answers with a foreign frame; only
/// transport failures are `Err`. Absent values are routine on this bus and
/// pollers treat them as a skipped sample.
pub struct CatSession<T> {
    io: T,
    config: EngineConfig,
    framer: ReplyFramer,
    state: RigState,
    inhibit_until: Option<Instant>,
    buffer: Vec<u8>,
}

impl<T> CatSession<T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    /// Take ownership of a transport
    pub fn new(io: T, config: EngineConfig) -> Self {
        Self {
            io,
            config,
            framer: ReplyFramer::new(),
            state: RigState::new(),
            inhibit_until: None,
            buffer: vec![0u8; 1024],
        }
    }

    /// Last known rig state
    pub fn state(&self) -> &RigState {
        &self.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut RigState {
        &mut self.state
    }

    /// Timing configuration in effect
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Suppress background polling for the given window, measured from now
    ///
    /// Back-to-back operations extend rather than shorten the window.
    pub fn set_inhibit(&mut self, window: Duration) {
        let until = Instant::now() + window;
        if self.inhibit_until.map_or(true, |t| t < until) {
            self.inhibit_until = Some(until);
        }
    }

    /// Whether background polling is currently suppressed
    pub fn inhibited(&self) -> bool {
        self.inhibit_until.is_some_and(|t| Instant::now() < t)
    }

    /// Milliseconds left in the inhibit window, 0 when none is active
    pub fn inhibit_remaining_ms(&self) -> u64 {
        self.inhibit_until
            .map(|t| t.saturating_duration_since(Instant::now()).as_millis() as u64)
            .unwrap_or(0)
    }

    // -------------------------------------------------------------------------
    // Exchange primitives
    // -------------------------------------------------------------------------

    /// Write a fire-and-forget command; no reply is expected or read
    pub async fn send(&mut self, cmd: &CatCommand) -> Result<(), EngineError> {
        self.drain_input().await?;
        self.write_command(cmd).await
    }

    /// Drain stale input, write one command, and wait for its reply
    ///
    /// `Ok(None)` covers both a silent rig and a reply without the expected
    /// mnemonic. Commands with no reply prefix degrade to [`Self::send`].
    pub async fn execute(&mut self, cmd: &CatCommand) -> Result<Option<String>, EngineError> {
        self.execute_with_timeout(cmd, self.config.reply_timeout())
            .await
    }

    async fn execute_with_timeout(
        &mut self,
        cmd: &CatCommand,
        deadline: Duration,
    ) -> Result<Option<String>, EngineError> {
        let Some(expected) = cmd.reply_prefix() else {
            self.send(cmd).await?;
            return Ok(None);
        };

        self.drain_input().await?;
        self.write_command(cmd).await?;

        match self.read_reply(deadline).await? {
            Some(reply) if reply.starts_with(&expected) => Ok(Some(reply)),
            Some(reply) => {
                debug!("Discarding foreign reply {:?} (expected {})", reply, expected);
                Ok(None)
            }
            None => {
                debug!("No reply to {} within {}ms", expected, deadline.as_millis());
                Ok(None)
            }
        }
    }

    /// Send arbitrary operator-typed text and return whatever comes back
    ///
    /// No mnemonic check here: the terminal wants to see the `?;` the rig
    /// sends for a rejected command.
    pub async fn raw_command(&mut self, text: &str) -> Result<Option<String>, EngineError> {
        let cmd = CatCommand::raw(text)?;
        self.drain_input().await?;
        self.write_command(&cmd).await?;
        self.read_reply(self.config.raw_timeout()).await
    }

    async fn write_command(&mut self, cmd: &CatCommand) -> Result<(), EngineError> {
        let bytes = cmd.encode();
        trace!("-> {}", String::from_utf8_lossy(&bytes));
        self.io.write_all(&bytes).await?;
        self.io.flush().await?;
        Ok(())
    }

    /// Discard anything the rig sent since the last exchange
    ///
    /// Stale meter replies would otherwise be attributed to the next query.
    /// Bounded so a chattering port cannot hold the session.
    async fn drain_input(&mut self) -> Result<(), EngineError> {
        self.framer.clear();
        for _ in 0..DRAIN_ROUNDS {
            match timeout(DRAIN_POLL, self.io.read(&mut self.buffer)).await {
                Ok(Ok(0)) => return Err(EngineError::TransportClosed),
                Ok(Ok(n)) => trace!("Drained {} stale bytes", n),
                Ok(Err(e)) if e.kind() == ErrorKind::WouldBlock => break,
                Ok(Err(e)) => return Err(e.into()),
                Err(_) => break,
            }
        }
        Ok(())
    }

    /// Read until the framer yields one reply or the deadline passes
    async fn read_reply(&mut self, deadline: Duration) -> Result<Option<String>, EngineError> {
        let started = Instant::now();
        loop {
            if let Some(reply) = self.framer.next_reply() {
                trace!("<- {}", reply);
                return Ok(Some(reply));
            }
            let Some(remaining) = deadline.checked_sub(started.elapsed()) else {
                return Ok(None);
            };
            match timeout(remaining, self.io.read(&mut self.buffer)).await {
                Ok(Ok(0)) => return Err(EngineError::TransportClosed),
                Ok(Ok(n)) => self.framer.push_bytes(&self.buffer[..n]),
                Ok(Err(e)) if e.kind() == ErrorKind::WouldBlock => {
                    // Serial streams surface WouldBlock between bytes
                    sleep(Duration::from_millis(1)).await;
                }
                Ok(Err(e)) => return Err(e.into()),
                Err(_) => return Ok(None),
            }
        }
    }

    // -------------------------------------------------------------------------
    // Frequency
    // -------------------------------------------------------------------------

    /// Poll the VFO-A frequency; absent on timeout or unusable reply
    pub async fn read_frequency(&mut self) -> Result<Option<u64>, EngineError> {
        let reply = self.execute(&CatCommand::GetFrequency).await?;
        let hz = reply.as_deref().and_then(freq::parse_reply).map(freq::clip);
        if let Some(hz) = hz {
            self.state.set_frequency(hz);
        }
        Ok(hz)
    }

    /// Read the frequency for an operation that cannot proceed without it
    pub async fn require_frequency(&mut self) -> Result<u64, EngineError> {
        match self.execute(&CatCommand::GetFrequency).await? {
            Some(reply) => match freq::parse_reply(&reply) {
                Some(hz) => {
                    let hz = freq::clip(hz);
                    self.state.set_frequency(hz);
                    Ok(hz)
                }
                None => Err(EngineError::MalformedReply {
                    expected: "FA".to_string(),
                    got: reply,
                }),
            },
            None => Err(EngineError::Timeout {
                ms: self.config.reply_timeout_ms,
            }),
        }
    }

    /// Command a new VFO-A frequency, clipped to the tunable range
    pub async fn set_frequency(&mut self, hz: u64) -> Result<u64, EngineError> {
        let clipped = freq::clip(hz);
        self.send(&CatCommand::SetFrequency { hz: clipped }).await?;
        Ok(clipped)
    }

    // -------------------------------------------------------------------------
    // Channel and tuning source
    // -------------------------------------------------------------------------

    /// Ask which channel the rig is on; `Vfo` means it follows the dial
    pub async fn query_channel(&mut self) -> Result<Option<ChannelReply>, EngineError> {
        let reply = self.execute(&CatCommand::GetChannel).await?;
        let parsed = reply.as_deref().and_then(memory::parse_channel_reply);
        match parsed {
            Some(ChannelReply::Vfo) => self.state.set_vfo(),
            Some(ChannelReply::Channel(ch)) => self.state.set_channel(ch),
            None => {}
        }
        Ok(parsed)
    }

    /// Ask the rig to select a memory channel; unprogrammed channels are
    /// refused silently, so callers verify with [`Self::query_channel`]
    pub async fn select_channel(&mut self, channel: u32) -> Result<(), EngineError> {
        if !memory::in_range(channel) {
            return Err(EngineError::InvalidChannel { requested: channel });
        }
        self.send(&CatCommand::SelectChannel { channel }).await
    }

    /// Switch the rig to VFO operation
    pub async fn select_vfo(&mut self) -> Result<(), EngineError> {
        self.send(&CatCommand::SelectVfo).await
    }

    /// Switch the rig to memory operation
    pub async fn select_memory_mode(&mut self) -> Result<(), EngineError> {
        self.send(&CatCommand::SelectMemory).await
    }

    /// Force the rig onto the VFO before a frequency edit
    ///
    /// A panel-initiated memory recall or a stuck tag-edit state makes `FA`
    /// writes land nowhere. Checks `MC`, nudges with `VM0`/`MT0`, and
    /// re-checks with a growing delay; gives up after a few rounds so the
    /// edit can still proceed best-effort.
    pub async fn ensure_vfo(&mut self) -> Result<bool, EngineError> {
        for attempt in 0..VFO_ATTEMPTS {
            if matches!(self.query_channel().await?, Some(ChannelReply::Vfo)) {
                return Ok(true);
            }
            self.send(&CatCommand::SelectVfo).await?;
            self.send(&CatCommand::ClearTagEdit).await?;
            sleep(self.config.vfo_check_delay(attempt)).await;
        }
        debug!("Rig still not on VFO after {} attempts", VFO_ATTEMPTS);
        Ok(false)
    }

    /// Read the tag text stored with a channel; empty and placeholder tags
    /// read as `None`
    pub async fn read_tag(&mut self, channel: u32) -> Result<Option<String>, EngineError> {
        let reply = self.execute(&CatCommand::GetTag { channel }).await?;
        Ok(reply.as_deref().and_then(memory::parse_tag_reply))
    }

    /// Probe whether a channel holds anything without selecting it
    pub async fn memory_programmed(&mut self, channel: u32) -> Result<bool, EngineError> {
        if !memory::in_range(channel) {
            return Err(EngineError::InvalidChannel { requested: channel });
        }
        let reply = self.execute(&CatCommand::GetMemoryContents { channel }).await?;
        Ok(reply.as_deref().is_some_and(memory::contents_programmed))
    }

    // -------------------------------------------------------------------------
    // Mode
    // -------------------------------------------------------------------------

    /// Poll the operating mode
    pub async fn read_mode(&mut self) -> Result<Option<OperatingMode>, EngineError> {
        let reply = self.execute(&CatCommand::GetMode).await?;
        let parsed = reply.as_deref().and_then(mode::parse_reply);
        if let Some(m) = parsed {
            self.state.set_mode(m);
        }
        Ok(parsed)
    }

    /// Command an operating mode change
    pub async fn set_mode(&mut self, mode: OperatingMode) -> Result<(), EngineError> {
        self.send(&CatCommand::SetMode { mode }).await
    }

    // -------------------------------------------------------------------------
    // Meters and transmit status
    // -------------------------------------------------------------------------

    /// Read one meter channel, scaled to 0-100
    pub async fn read_meter(&mut self, channel: MeterChannel) -> Result<Option<u8>, EngineError> {
        let reply = self.execute(&CatCommand::ReadMeter { meter: channel }).await?;
        let value = reply
            .as_deref()
            .and_then(meter::parse_reply)
            .map(meter::scale_raw);
        if let Some(v) = value {
            match channel {
                MeterChannel::Signal => self.state.signal_level = Some(v),
                MeterChannel::Power => self.state.power_level = Some(v),
            }
        }
        Ok(value)
    }

    /// Determine transmit status, falling through `TX`, `IF`, and finally
    /// the power meter
    ///
    /// `TX` answers `2` (or nothing) on some firmware, and `IF` field
    /// positions drift between revisions. The meter is the probe of last
    /// resort: any real forward power means a transmission, and an absent
    /// reading counts as receiving.
    pub async fn read_transmit(&mut self) -> Result<bool, EngineError> {
        let from_tx = self
            .execute(&CatCommand::GetTxStatus)
            .await?
            .as_deref()
            .and_then(status::parse_tx_reply);

        let active = match from_tx {
            Some(v) => v,
            None => {
                let from_info = self
                    .execute(&CatCommand::GetInfo)
                    .await?
                    .as_deref()
                    .and_then(status::parse_info_transmit);
                match from_info {
                    Some(v) => v,
                    None => {
                        let raw = self
                            .execute(&CatCommand::ReadMeter {
                                meter: MeterChannel::Power,
                            })
                            .await?
                            .as_deref()
                            .and_then(meter::parse_reply)
                            .unwrap_or(0);
                        raw >= TX_POWER_FLOOR
                    }
                }
            }
        };

        self.state.set_transmitting(active);
        Ok(active)
    }

    // -------------------------------------------------------------------------
    // Menus and identification
    // -------------------------------------------------------------------------

    /// Read one menu item value; absent on timeout or a wrong echo
    pub async fn read_menu(&mut self, code: &str) -> Result<Option<String>, EngineError> {
        let cmd = CatCommand::menu_query(code)?;
        let reply = self
            .execute_with_timeout(&cmd, self.config.menu_timeout())
            .await?;
        Ok(reply.as_deref().and_then(|r| menu::parse_value(r, code)))
    }

    /// Write one menu item; the rig does not acknowledge
    pub async fn set_menu(&mut self, code: &str, value: &str) -> Result<(), EngineError> {
        let cmd = CatCommand::menu_set(code, value)?;
        self.send(&cmd).await
    }

    /// Ask the rig to identify itself; returns the raw `ID` payload
    pub async fn identify(&mut self) -> Result<Option<String>, EngineError> {
        self.execute(&CatCommand::Identify).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::DuplexStream;

    fn fast_config() -> EngineConfig {
        EngineConfig {
            reply_timeout_ms: 80,
            raw_timeout_ms: 80,
            menu_timeout_ms: 40,
            vfo_check_delay_ms: 1,
            ..Default::default()
        }
    }

    /// Peer task that waits for one expected command and sends one reply
    async fn reply_once(mut rig: DuplexStream, expect: &[u8], reply: &[u8]) -> DuplexStream {
        let mut buf = vec![0u8; 64];
        let mut seen = Vec::new();
        while !seen
            .windows(expect.len())
            .any(|w| w == expect)
        {
            let n = rig.read(&mut buf).await.unwrap();
            assert!(n > 0, "session closed before sending {:?}", expect);
            seen.extend_from_slice(&buf[..n]);
        }
        rig.write_all(reply).await.unwrap();
        rig
    }

    #[tokio::test]
    async fn test_stale_input_is_drained_before_the_query() {
        let (mut rig, local) = tokio::io::duplex(256);
        // A stale meter reply is already sitting in the buffer
        rig.write_all(b"RM1100;").await.unwrap();

        let peer = tokio::spawn(reply_once(rig, b"MC;", b"MC007;"));
        let mut session = CatSession::new(local, fast_config());

        let reply = session.execute(&CatCommand::GetChannel).await.unwrap();
        assert_eq!(reply.as_deref(), Some("MC007"));
        peer.await.unwrap();
    }

    #[tokio::test]
    async fn test_silent_rig_reads_as_absent() {
        let (rig, local) = tokio::io::duplex(256);
        let mut session = CatSession::new(local, fast_config());

        let started = std::time::Instant::now();
        let reply = session.execute(&CatCommand::GetChannel).await.unwrap();
        assert_eq!(reply, None);
        assert!(started.elapsed() >= Duration::from_millis(80));
        drop(rig);
    }

    #[tokio::test]
    async fn test_foreign_reply_reads_as_absent() {
        let (rig, local) = tokio::io::duplex(256);
        let peer = tokio::spawn(reply_once(rig, b"MC;", b"FA00007074000;"));
        let mut session = CatSession::new(local, fast_config());

        let reply = session.execute(&CatCommand::GetChannel).await.unwrap();
        assert_eq!(reply, None);
        peer.await.unwrap();
    }

    #[tokio::test]
    async fn test_closed_transport_is_fatal() {
        let (rig, local) = tokio::io::duplex(256);
        drop(rig);
        let mut session = CatSession::new(local, fast_config());

        let err = session.execute(&CatCommand::GetChannel).await.unwrap_err();
        assert!(matches!(err, EngineError::TransportClosed));
        assert!(err.is_fatal());
    }

    #[tokio::test]
    async fn test_require_frequency_flags_malformed_replies() {
        let (rig, local) = tokio::io::duplex(256);
        let peer = tokio::spawn(reply_once(rig, b"FA;", b"FAgarbage;"));
        let mut session = CatSession::new(local, fast_config());

        let err = session.require_frequency().await.unwrap_err();
        assert!(matches!(err, EngineError::MalformedReply { .. }));
        assert!(!err.is_fatal());
        peer.await.unwrap();
    }

    #[tokio::test]
    async fn test_memory_programmed_probe() {
        let (rig, local) = tokio::io::duplex(256);
        let peer = tokio::spawn(reply_once(rig, b"MR059;", b"MR05900007074000+000000C0;"));
        let mut session = CatSession::new(local, fast_config());

        assert!(session.memory_programmed(59).await.unwrap());
        peer.await.unwrap();

        // The rig rejects probes of empty channels
        let (rig, local) = tokio::io::duplex(256);
        let peer = tokio::spawn(reply_once(rig, b"MR023;", b"?;"));
        let mut session = CatSession::new(local, fast_config());

        assert!(!session.memory_programmed(23).await.unwrap());
        peer.await.unwrap();

        assert!(matches!(
            session.memory_programmed(200).await,
            Err(EngineError::InvalidChannel { requested: 200 })
        ));
    }

    #[tokio::test]
    async fn test_raw_command_returns_rejections_verbatim() {
        let (rig, local) = tokio::io::duplex(256);
        let peer = tokio::spawn(reply_once(rig, b"ZZ99;", b"?;"));
        let mut session = CatSession::new(local, fast_config());

        let reply = session.raw_command("ZZ99").await.unwrap();
        assert_eq!(reply.as_deref(), Some("?"));
        peer.await.unwrap();
    }

    #[tokio::test]
    async fn test_inhibit_window_expires() {
        let (rig, local) = tokio::io::duplex(256);
        let mut session = CatSession::new(local, fast_config());

        assert!(!session.inhibited());
        session.set_inhibit(Duration::from_millis(40));
        assert!(session.inhibited());
        assert!(session.inhibit_remaining_ms() <= 40);

        sleep(Duration::from_millis(60)).await;
        assert!(!session.inhibited());
        assert_eq!(session.inhibit_remaining_ms(), 0);
        drop(rig);
    }

    #[tokio::test]
    async fn test_back_to_back_inhibits_extend() {
        let (rig, local) = tokio::io::duplex(256);
        let mut session = CatSession::new(local, fast_config());

        session.set_inhibit(Duration::from_millis(500));
        session.set_inhibit(Duration::from_millis(10));
        assert!(session.inhibit_remaining_ms() > 100);
        drop(rig);
    }
}
