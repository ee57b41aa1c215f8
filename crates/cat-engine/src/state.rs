//! Transceiver state tracking
//!
//! One [`RigState`] lives inside the session and is only written through the
//! serialized command path, so readers always see values that came off the
//! wire in order.

use cat_wire::{freq, OperatingMode};

/// Which tuning source the rig is following
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TuningMode {
    /// Frequency comes from the VFO dial
    #[default]
    Vfo,
    /// Frequency comes from a recalled memory channel
    Memory,
}

impl TuningMode {
    /// Get human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Vfo => "VFO",
            Self::Memory => "MEMORY",
        }
    }
}

/// Last known state of the transceiver
///
/// Every field is best-effort: a `None` means the value has not been read
/// yet or the last read produced nothing usable.
#[derive(Debug, Clone, Default)]
pub struct RigState {
    /// Tuning source
    pub tuning: TuningMode,
    /// Current memory channel (only meaningful in memory mode)
    pub channel: Option<u32>,
    /// Tag of the current memory channel
    pub channel_tag: Option<String>,
    /// Current frequency in Hz
    pub frequency_hz: Option<u64>,
    /// Current operating mode
    pub mode: Option<OperatingMode>,
    /// Transmitting right now
    pub transmitting: bool,
    /// Received signal strength, 0-100
    pub signal_level: Option<u8>,
    /// Transmit power, 0-100
    pub power_level: Option<u8>,
}

impl RigState {
    /// Create a fresh state with nothing known yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frequency read, returning true if the value changed
    pub fn set_frequency(&mut self, hz: u64) -> bool {
        let changed = self.frequency_hz != Some(hz);
        self.frequency_hz = Some(hz);
        changed
    }

    /// Record that the rig is following the VFO dial
    pub fn set_vfo(&mut self) {
        self.tuning = TuningMode::Vfo;
        self.channel = None;
        self.channel_tag = None;
    }

    /// Record the current memory channel
    pub fn set_channel(&mut self, channel: u32) {
        if self.channel != Some(channel) {
            self.channel_tag = None;
        }
        self.tuning = TuningMode::Memory;
        self.channel = Some(channel);
    }

    /// Record an operating mode read, returning true if the value changed
    pub fn set_mode(&mut self, mode: OperatingMode) -> bool {
        let changed = self.mode != Some(mode);
        self.mode = Some(mode);
        changed
    }

    /// Record a transmit status read, returning true if the value changed
    pub fn set_transmitting(&mut self, active: bool) -> bool {
        let changed = self.transmitting != active;
        self.transmitting = active;
        changed
    }

    /// Format frequency for display
    pub fn frequency_display(&self) -> String {
        freq::format_display(self.frequency_hz)
    }

    /// One-line summary for status display
    pub fn summary(&self) -> String {
        let mode = self
            .mode
            .map(|m| m.label().to_string())
            .unwrap_or_else(|| "---".to_string());
        let source = match (self.tuning, self.channel) {
            (TuningMode::Memory, Some(ch)) => match &self.channel_tag {
                Some(tag) => format!("CH {:03} [{}]", ch, tag),
                None => format!("CH {:03}", ch),
            },
            _ => "VFO".to_string(),
        };
        let tx = if self.transmitting { "TX" } else { "RX" };
        format!("{}  {}  {}  {}", self.frequency_display(), mode, source, tx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_frequency_reports_change() {
        let mut state = RigState::new();
        assert!(state.set_frequency(7_255_000));
        assert!(!state.set_frequency(7_255_000));
        assert!(state.set_frequency(7_256_000));
    }

    #[test]
    fn test_vfo_clears_channel() {
        let mut state = RigState::new();
        state.set_channel(59);
        state.channel_tag = Some("FT8".to_string());
        assert_eq!(state.tuning, TuningMode::Memory);

        state.set_vfo();
        assert_eq!(state.tuning, TuningMode::Vfo);
        assert_eq!(state.channel, None);
        assert_eq!(state.channel_tag, None);
    }

    #[test]
    fn test_channel_change_drops_stale_tag() {
        let mut state = RigState::new();
        state.set_channel(7);
        state.channel_tag = Some("CALLING".to_string());

        state.set_channel(8);
        assert_eq!(state.channel_tag, None);

        state.channel_tag = Some("NETS".to_string());
        state.set_channel(8);
        assert_eq!(state.channel_tag.as_deref(), Some("NETS"));
    }

    #[test]
    fn test_summary_reads_naturally() {
        let mut state = RigState::new();
        state.set_frequency(7_074_000);
        state.set_mode(OperatingMode::DataU);
        state.set_channel(59);
        state.channel_tag = Some("FT8".to_string());

        let line = state.summary();
        assert!(line.contains("7.074.000"));
        assert!(line.contains("DATA-U"));
        assert!(line.contains("CH 059 [FT8]"));
        assert!(line.contains("RX"));
    }
}
