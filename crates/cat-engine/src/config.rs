//! Engine timing and port configuration
//!
//! Every delay the engine observes on the wire lives here. Defaults match
//! FT-991A behavior at 38400 baud; tests override them with near-zero values.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Timing and port parameters for the engine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Serial baud rate
    pub baud_rate: u32,
    /// Reply deadline for a normal query (ms)
    pub reply_timeout_ms: u64,
    /// Reply deadline for a raw passthrough command (ms)
    pub raw_timeout_ms: u64,
    /// Reply deadline per menu item during a snapshot (ms)
    pub menu_timeout_ms: u64,
    /// Meter poll cadence (ms)
    pub meter_poll_ms: u64,
    /// Frequency poll cadence (ms)
    pub frequency_poll_ms: u64,
    /// Transmit status poll cadence (ms)
    pub tx_poll_ms: u64,
    /// Poll inhibit window after a frequency edit (ms)
    pub tune_inhibit_ms: u64,
    /// Poll inhibit window after a memory operation (ms)
    pub memory_inhibit_ms: u64,
    /// Poll inhibit window after a preset batch completes (ms)
    pub preset_inhibit_ms: u64,
    /// Pacing between preset records (ms)
    pub preset_pacing_ms: u64,
    /// Settle time after a frequency set before the verify read (ms)
    pub set_settle_ms: u64,
    /// Settle time after entering memory mode during a search probe (ms)
    pub probe_mode_settle_ms: u64,
    /// Settle time after a channel select during a search probe (ms)
    pub probe_select_settle_ms: u64,
    /// Settle time after entering memory mode during a direct recall (ms)
    pub recall_mode_settle_ms: u64,
    /// Settle time after a channel select during a direct recall (ms)
    pub recall_select_settle_ms: u64,
    /// Base delay before re-checking VFO state (ms)
    pub vfo_check_delay_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            baud_rate: 38400,
            reply_timeout_ms: 500,
            raw_timeout_ms: 800,
            menu_timeout_ms: 500,
            meter_poll_ms: 200,
            frequency_poll_ms: 500,
            tx_poll_ms: 250,
            tune_inhibit_ms: 350,
            memory_inhibit_ms: 400,
            preset_inhibit_ms: 600,
            preset_pacing_ms: 20,
            set_settle_ms: 120,
            probe_mode_settle_ms: 60,
            probe_select_settle_ms: 100,
            recall_mode_settle_ms: 120,
            recall_select_settle_ms: 150,
            vfo_check_delay_ms: 160,
        }
    }
}

impl EngineConfig {
    /// Reply deadline for a normal query
    pub fn reply_timeout(&self) -> Duration {
        Duration::from_millis(self.reply_timeout_ms)
    }

    /// Reply deadline for a raw passthrough command
    pub fn raw_timeout(&self) -> Duration {
        Duration::from_millis(self.raw_timeout_ms)
    }

    /// Reply deadline per menu item during a snapshot
    pub fn menu_timeout(&self) -> Duration {
        Duration::from_millis(self.menu_timeout_ms)
    }

    /// Poll inhibit window after a frequency edit
    pub fn tune_inhibit(&self) -> Duration {
        Duration::from_millis(self.tune_inhibit_ms)
    }

    /// Poll inhibit window after a memory operation
    pub fn memory_inhibit(&self) -> Duration {
        Duration::from_millis(self.memory_inhibit_ms)
    }

    /// Poll inhibit window after a preset batch completes
    pub fn preset_inhibit(&self) -> Duration {
        Duration::from_millis(self.preset_inhibit_ms)
    }

    /// Pacing between preset records
    pub fn preset_pacing(&self) -> Duration {
        Duration::from_millis(self.preset_pacing_ms)
    }

    /// Settle time after a frequency set before the verify read
    pub fn set_settle(&self) -> Duration {
        Duration::from_millis(self.set_settle_ms)
    }

    /// Settle time after entering memory mode during a search probe
    pub fn probe_mode_settle(&self) -> Duration {
        Duration::from_millis(self.probe_mode_settle_ms)
    }

    /// Settle time after a channel select during a search probe
    pub fn probe_select_settle(&self) -> Duration {
        Duration::from_millis(self.probe_select_settle_ms)
    }

    /// Settle time after entering memory mode during a direct recall
    pub fn recall_mode_settle(&self) -> Duration {
        Duration::from_millis(self.recall_mode_settle_ms)
    }

    /// Settle time after a channel select during a direct recall
    pub fn recall_select_settle(&self) -> Duration {
        Duration::from_millis(self.recall_select_settle_ms)
    }

    /// Delay before the nth VFO re-check, growing with each attempt
    pub fn vfo_check_delay(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.vfo_check_delay_ms + 60 * u64::from(attempt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_hardware_tuning() {
        let config = EngineConfig::default();
        assert_eq!(config.baud_rate, 38400);
        assert_eq!(config.reply_timeout_ms, 500);
        assert_eq!(config.meter_poll_ms, 200);
        assert_eq!(config.tune_inhibit_ms, 350);
        assert_eq!(config.memory_inhibit_ms, 400);
    }

    #[test]
    fn test_vfo_check_delay_grows_per_attempt() {
        let config = EngineConfig::default();
        assert_eq!(config.vfo_check_delay(0), Duration::from_millis(160));
        assert_eq!(config.vfo_check_delay(1), Duration::from_millis(220));
        assert_eq!(config.vfo_check_delay(3), Duration::from_millis(340));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"baud_rate": 4800}"#).unwrap();
        assert_eq!(config.baud_rate, 4800);
        assert_eq!(config.reply_timeout_ms, 500);
    }
}
