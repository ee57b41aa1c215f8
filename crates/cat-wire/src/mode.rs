//! Operating modes and the `MD` code table

use crate::error::ParseError;

/// Operating modes of the FT-991A, one per two-character `MD` code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OperatingMode {
    Lsb,
    Usb,
    Cw,
    CwR,
    Am,
    Fm,
    RttyL,
    RttyU,
    PktL,
    PktU,
    FmN,
    DataL,
    DataU,
    AmN,
    C4fm,
}

/// Every mode, in `MD` code order
pub const ALL_MODES: &[OperatingMode] = &[
    OperatingMode::Lsb,
    OperatingMode::Usb,
    OperatingMode::Cw,
    OperatingMode::CwR,
    OperatingMode::Am,
    OperatingMode::Fm,
    OperatingMode::RttyL,
    OperatingMode::RttyU,
    OperatingMode::PktL,
    OperatingMode::PktU,
    OperatingMode::FmN,
    OperatingMode::DataL,
    OperatingMode::DataU,
    OperatingMode::AmN,
    OperatingMode::C4fm,
];

impl OperatingMode {
    /// The two-character code this mode carries in `MD` commands/replies
    pub fn code(&self) -> &'static str {
        match self {
            OperatingMode::Lsb => "00",
            OperatingMode::Usb => "01",
            OperatingMode::Cw => "02",
            OperatingMode::CwR => "03",
            OperatingMode::Am => "04",
            OperatingMode::Fm => "05",
            OperatingMode::RttyL => "06",
            OperatingMode::RttyU => "07",
            OperatingMode::PktL => "08",
            OperatingMode::PktU => "09",
            OperatingMode::FmN => "0A",
            OperatingMode::DataL => "0B",
            OperatingMode::DataU => "0C",
            OperatingMode::AmN => "0D",
            OperatingMode::C4fm => "0E",
        }
    }

    /// Panel-style display name
    pub fn label(&self) -> &'static str {
        match self {
            OperatingMode::Lsb => "LSB",
            OperatingMode::Usb => "USB",
            OperatingMode::Cw => "CW",
            OperatingMode::CwR => "CW-R",
            OperatingMode::Am => "AM",
            OperatingMode::Fm => "FM",
            OperatingMode::RttyL => "RTTY-L",
            OperatingMode::RttyU => "RTTY-U",
            OperatingMode::PktL => "PKT-L",
            OperatingMode::PktU => "PKT-U",
            OperatingMode::FmN => "FM-N",
            OperatingMode::DataL => "DATA-L",
            OperatingMode::DataU => "DATA-U",
            OperatingMode::AmN => "AM-N",
            OperatingMode::C4fm => "C4FM",
        }
    }

    /// Look a mode up by its two-character code
    pub fn from_code(code: &str) -> Option<Self> {
        ALL_MODES.iter().copied().find(|m| m.code() == code)
    }

    /// Look a mode up by display name, case-insensitively
    pub fn from_label(label: &str) -> Result<Self, ParseError> {
        let wanted = label.trim().to_ascii_uppercase();
        ALL_MODES
            .iter()
            .copied()
            .find(|m| m.label() == wanted)
            .ok_or_else(|| ParseError::UnknownMode(label.to_string()))
    }

    /// Returns whether this is a voice mode
    pub fn is_voice(&self) -> bool {
        matches!(
            self,
            Self::Lsb | Self::Usb | Self::Am | Self::AmN | Self::Fm | Self::FmN | Self::C4fm
        )
    }

    /// Returns whether this is a digital/data mode
    pub fn is_digital(&self) -> bool {
        matches!(
            self,
            Self::RttyL | Self::RttyU | Self::PktL | Self::PktU | Self::DataL | Self::DataU
        )
    }

    /// Returns whether this is a CW mode
    pub fn is_cw(&self) -> bool {
        matches!(self, Self::Cw | Self::CwR)
    }
}

/// Pull the mode out of a (terminator-stripped) `MD` reply
///
/// Replies look like `MD0C`; the code is the two characters after the
/// mnemonic.
pub fn parse_reply(reply: &str) -> Option<OperatingMode> {
    let bytes = reply.as_bytes();
    if !reply.starts_with("MD") || bytes.len() < 4 {
        return None;
    }
    let code = std::str::from_utf8(&bytes[2..4]).ok()?;
    OperatingMode::from_code(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        for &mode in ALL_MODES {
            assert_eq!(OperatingMode::from_code(mode.code()), Some(mode));
        }
    }

    #[test]
    fn test_parse_reply() {
        assert_eq!(parse_reply("MD00"), Some(OperatingMode::Lsb));
        assert_eq!(parse_reply("MD0C"), Some(OperatingMode::DataU));
        assert_eq!(parse_reply("MD0E"), Some(OperatingMode::C4fm));
        assert_eq!(parse_reply("MD"), None);
        assert_eq!(parse_reply("MDZZ"), None);
        assert_eq!(parse_reply("FA0C"), None);
    }

    #[test]
    fn test_from_label() {
        assert_eq!(OperatingMode::from_label("usb"), Ok(OperatingMode::Usb));
        assert_eq!(OperatingMode::from_label("Data-U"), Ok(OperatingMode::DataU));
        assert_eq!(
            OperatingMode::from_label("ssb"),
            Err(ParseError::UnknownMode("ssb".to_string()))
        );
    }

    #[test]
    fn test_mode_families() {
        assert!(OperatingMode::Usb.is_voice());
        assert!(OperatingMode::DataU.is_digital());
        assert!(OperatingMode::CwR.is_cw());
        assert!(!OperatingMode::Cw.is_voice());
    }
}
