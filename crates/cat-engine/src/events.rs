//! Unified event stream for the engine
//!
//! Everything the engine learns from the rig (poll results, operation
//! progress, errors) is emitted through a single event channel. The frontend
//! never polls the engine; it just drains this stream.

use cat_wire::{MenuReading, MeterChannel, OperatingMode};

/// Unified event enum for all engine activity
#[derive(Debug, Clone)]
pub enum EngineEvent {
    // -------------------------------------------------------------------------
    // Lifecycle events
    // -------------------------------------------------------------------------
    /// Human-readable status line
    Status {
        /// Text to show the operator
        text: String,
    },

    /// The rig answered the identification query
    Identified {
        /// Raw ID payload from the rig
        id: String,
        /// Whether the ID matches an FT-991A
        recognized: bool,
    },

    /// An error occurred inside the engine
    Error {
        /// Source of the error
        source: String,
        /// Error message
        message: String,
    },

    // -------------------------------------------------------------------------
    // Rig state events
    // -------------------------------------------------------------------------
    /// The operating frequency changed
    Frequency {
        /// Frequency in Hz
        hz: u64,
        /// Grouped display string ("7.074.000")
        display: String,
    },

    /// The operating mode changed
    Mode {
        /// New operating mode
        mode: OperatingMode,
    },

    /// The tuning source changed (VFO or a memory channel)
    Channel {
        /// Current memory channel, or None when following the VFO
        channel: Option<u32>,
        /// Tag of the current channel, when known
        tag: Option<String>,
    },

    /// A meter reading arrived
    Meter {
        /// Which meter was read
        channel: MeterChannel,
        /// Scaled value, 0-100
        value: u8,
    },

    /// Transmit status was read
    Transmit {
        /// PTT active
        active: bool,
    },

    // -------------------------------------------------------------------------
    // Batch operation progress
    // -------------------------------------------------------------------------
    /// A preset record was processed
    PresetProgress {
        /// Records processed so far (including skipped ones)
        index: usize,
        /// Total records in the batch
        total: usize,
        /// Records actually written so far
        applied: usize,
    },

    /// A menu item was read during a snapshot
    SnapshotProgress {
        /// The reading that was just taken
        reading: MenuReading,
        /// Items processed so far
        index: usize,
        /// Total items in the snapshot
        total: usize,
    },
}

impl EngineEvent {
    /// Check if this is a meter reading (frontends often throttle these)
    pub fn is_meter(&self) -> bool {
        matches!(self, EngineEvent::Meter { .. })
    }

    /// Check if this is batch operation progress
    pub fn is_progress(&self) -> bool {
        matches!(
            self,
            EngineEvent::PresetProgress { .. } | EngineEvent::SnapshotProgress { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meter_event_classification() {
        let meter = EngineEvent::Meter {
            channel: MeterChannel::Signal,
            value: 42,
        };
        assert!(meter.is_meter());
        assert!(!meter.is_progress());

        let progress = EngineEvent::PresetProgress {
            index: 1,
            total: 10,
            applied: 1,
        };
        assert!(progress.is_progress());
        assert!(!progress.is_meter());
    }
}
