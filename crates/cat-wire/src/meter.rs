//! Meter reads: channel selection, raw scaling, reply parsing
//!
//! The radio exposes its meters through `RM{n};`. Two channels matter here:
//! the S-meter while receiving and the power meter while transmitting. Raw
//! readings are 0..=255 and normalize to a 0..=100 gauge value.

/// One of the two meter channels the poller alternates between
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MeterChannel {
    /// Received signal strength (`RM1;`)
    Signal,
    /// Transmit output power (`RM5;`)
    Power,
}

impl MeterChannel {
    /// The digit that selects this channel in an `RM` command
    pub fn arg(&self) -> char {
        match self {
            MeterChannel::Signal => '1',
            MeterChannel::Power => '5',
        }
    }

    /// The other channel; the poller flips on every meter tick
    pub fn other(&self) -> Self {
        match self {
            MeterChannel::Signal => MeterChannel::Power,
            MeterChannel::Power => MeterChannel::Signal,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MeterChannel::Signal => "signal",
            MeterChannel::Power => "power",
        }
    }
}

/// Scale a raw meter reading to the 0..=100 gauge range
///
/// Linear over the device's 0..=255 scale, rounded to nearest; raw values
/// past 255 (the reply field is three digits wide) saturate at 100.
pub fn scale_raw(raw: u16) -> u8 {
    (((u32::from(raw) * 100) + 127) / 255).min(100) as u8
}

/// Pull the raw reading out of a (terminator-stripped) `RM` reply
///
/// Replies look like `RM1123`: mnemonic, channel digit, three-digit raw
/// value. Anything that does not match yields `None`.
pub fn parse_reply(reply: &str) -> Option<u16> {
    let bytes = reply.as_bytes();
    if !reply.starts_with("RM") || bytes.len() < 6 {
        return None;
    }
    let raw = &bytes[3..6];
    if !raw.iter().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(raw.iter().fold(0u16, |acc, &b| acc * 10 + u16::from(b - b'0')))
}
