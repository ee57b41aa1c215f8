//! Wire-level CAT protocol for the Yaesu FT-991A
//!
//! The FT-991A speaks the classic Yaesu ASCII CAT dialect: a two-letter
//! mnemonic, optional fixed-width decimal arguments, and a `;` terminator,
//! half duplex over a serial link. A reply echoes the mnemonic of the query
//! it answers, so request/response correlation is purely positional.
//!
//! Everything in this crate is pure. Commands encode to bytes, replies parse
//! from captured text, and nothing here touches a serial port; the I/O half
//! lives in `cat-engine`.
//!
//! - [`CatCommand`] builds every command the engine issues
//! - [`ReplyFramer`] splits an incoming byte stream into `;`-terminated frames
//! - [`freq`], [`meter`], [`mode`], [`memory`], [`menu`], and [`status`]
//!   hold the per-concern parsing and arithmetic

pub mod command;
pub mod error;
pub mod frame;
pub mod freq;
pub mod memory;
pub mod menu;
pub mod menu_table;
pub mod meter;
pub mod mode;
pub mod status;

pub use command::{ident, CatCommand};
pub use error::ParseError;
pub use frame::ReplyFramer;
pub use freq::{MAX_HZ, MIN_HZ};
pub use memory::{ChannelReply, CHANNEL_MAX, CHANNEL_MIN};
pub use menu::{MenuReading, PresetRecord, MENU_SENTINEL};
pub use menu_table::MenuDescriptor;
pub use meter::MeterChannel;
pub use mode::OperatingMode;

/// Maximum sensible length of a single CAT frame, terminator included.
///
/// Nothing the FT-991A sends comes close; the framer uses this to discard
/// garbage when a terminator never arrives.
pub const MAX_FRAME_LEN: usize = 64;

/// Trait for encoding commands to wire bytes
pub trait EncodeCommand {
    /// Encode this command to bytes ready to write, terminator included
    fn encode(&self) -> Vec<u8>;
}
