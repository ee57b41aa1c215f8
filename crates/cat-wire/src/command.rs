//! CAT command set of the FT-991A
//!
//! One variant per command the engine issues. Encoding follows the Yaesu
//! ASCII dialect exactly: mnemonic, zero-padded decimal arguments, `;`
//! terminator. Query variants know the reply prefix they expect back, which
//! is all the correlation this half-duplex protocol offers.

use crate::error::ParseError;
use crate::meter::MeterChannel;
use crate::mode::OperatingMode;
use crate::EncodeCommand;

/// A single CAT command, immutable once built
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatCommand {
    /// Query the VFO-A frequency (`FA;`)
    GetFrequency,

    /// Set the VFO-A frequency in Hz (`FA{hz:011};`)
    SetFrequency { hz: u64 },

    /// Query the current memory channel (`MC;`); channel 000 means VFO
    GetChannel,

    /// Select a memory channel (`MC{channel:03};`)
    SelectChannel { channel: u32 },

    /// Switch to VFO operation (`VM0;`)
    SelectVfo,

    /// Switch to memory operation (`VM1;`)
    SelectMemory,

    /// Query the operating mode (`MD;`)
    GetMode,

    /// Set the operating mode (`MD{code};`)
    SetMode { mode: OperatingMode },

    /// Query the tag text stored with a memory channel (`MT{channel:03};`)
    GetTag { channel: u32 },

    /// Leave the front-panel tag-edit state (`MT0;`)
    ClearTagEdit,

    /// Query the stored contents of a memory channel (`MR{channel:03};`)
    GetMemoryContents { channel: u32 },

    /// Read one meter channel (`RM1;` signal, `RM5;` power)
    ReadMeter { meter: MeterChannel },

    /// Query transmit/receive status (`TX;`)
    GetTxStatus,

    /// Query the composite status word (`IF;`)
    GetInfo,

    /// Query radio identification (`ID;`)
    Identify,

    /// Query a menu item (`EX{code};`)
    GetMenu { code: String },

    /// Set a menu item (`EX{code}{value};`); the value is opaque ASCII
    SetMenu { code: String, value: String },

    /// Raw passthrough of user-typed text; terminator appended when missing
    Raw { text: String },
}

impl CatCommand {
    /// Build a menu query, validating the three-digit code
    pub fn menu_query(code: &str) -> Result<Self, ParseError> {
        validate_menu_code(code)?;
        Ok(CatCommand::GetMenu {
            code: code.to_string(),
        })
    }

    /// Build a menu set, validating the three-digit code
    pub fn menu_set(code: &str, value: &str) -> Result<Self, ParseError> {
        validate_menu_code(code)?;
        Ok(CatCommand::SetMenu {
            code: code.to_string(),
            value: value.to_string(),
        })
    }

    /// Build a raw passthrough command from user-typed text
    pub fn raw(text: &str) -> Result<Self, ParseError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyCommand);
        }
        Ok(CatCommand::Raw {
            text: trimmed.to_string(),
        })
    }

    /// The reply prefix a response to this command must carry, or `None`
    /// for fire-and-forget commands that produce no reply
    pub fn reply_prefix(&self) -> Option<String> {
        let prefix = match self {
            CatCommand::GetFrequency => "FA",
            CatCommand::GetChannel => "MC",
            CatCommand::GetMode => "MD",
            CatCommand::GetTag { .. } => "MT",
            CatCommand::GetMemoryContents { .. } => "MR",
            CatCommand::ReadMeter { .. } => "RM",
            CatCommand::GetTxStatus => "TX",
            CatCommand::GetInfo => "IF",
            CatCommand::Identify => "ID",
            CatCommand::GetMenu { .. } => "EX",
            CatCommand::Raw { text } => return Some(text_prefix(text)),
            CatCommand::SetFrequency { .. }
            | CatCommand::SelectChannel { .. }
            | CatCommand::SelectVfo
            | CatCommand::SelectMemory
            | CatCommand::SetMode { .. }
            | CatCommand::ClearTagEdit
            | CatCommand::SetMenu { .. } => return None,
        };
        Some(prefix.to_string())
    }

    /// Returns true if this command expects a reply
    pub fn is_query(&self) -> bool {
        self.reply_prefix().is_some()
    }

    /// Returns true if this command mutates radio state
    pub fn is_set(&self) -> bool {
        matches!(
            self,
            CatCommand::SetFrequency { .. }
                | CatCommand::SelectChannel { .. }
                | CatCommand::SelectVfo
                | CatCommand::SelectMemory
                | CatCommand::SetMode { .. }
                | CatCommand::SetMenu { .. }
        )
    }
}

impl EncodeCommand for CatCommand {
    fn encode(&self) -> Vec<u8> {
        let cmd = match self {
            CatCommand::GetFrequency => "FA".to_string(),
            CatCommand::SetFrequency { hz } => format!("FA{:011}", hz),
            CatCommand::GetChannel => "MC".to_string(),
            CatCommand::SelectChannel { channel } => format!("MC{:03}", channel),
            CatCommand::SelectVfo => "VM0".to_string(),
            CatCommand::SelectMemory => "VM1".to_string(),
            CatCommand::GetMode => "MD".to_string(),
            CatCommand::SetMode { mode } => format!("MD{}", mode.code()),
            CatCommand::GetTag { channel } => format!("MT{:03}", channel),
            CatCommand::ClearTagEdit => "MT0".to_string(),
            CatCommand::GetMemoryContents { channel } => format!("MR{:03}", channel),
            CatCommand::ReadMeter { meter } => format!("RM{}", meter.arg()),
            CatCommand::GetTxStatus => "TX".to_string(),
            CatCommand::GetInfo => "IF".to_string(),
            CatCommand::Identify => "ID".to_string(),
            CatCommand::GetMenu { code } => format!("EX{}", code),
            CatCommand::SetMenu { code, value } => format!("EX{}{}", code, value),
            CatCommand::Raw { text } => {
                let mut bytes = text.clone().into_bytes();
                if bytes.last() != Some(&b';') {
                    bytes.push(b';');
                }
                return bytes;
            }
        };
        format!("{};", cmd).into_bytes()
    }
}

fn validate_menu_code(code: &str) -> Result<(), ParseError> {
    if code.len() == 3 && code.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ParseError::InvalidMenuCode(code.to_string()))
    }
}

/// Leading alphabetic mnemonic of free-form command text, uppercased
fn text_prefix(text: &str) -> String {
    text.chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .take(2)
        .collect::<String>()
        .to_ascii_uppercase()
}

/// Radio identification for the `ID;` probe
pub mod ident {
    /// CAT identity an FT-991A reports in its `ID;` reply
    pub const FT_991A: &str = "0670";

    /// Check a (terminator-stripped) `ID` reply against the FT-991A identity
    pub fn is_ft991a(reply: &str) -> bool {
        reply.strip_prefix("ID") == Some(FT_991A)
    }
}
