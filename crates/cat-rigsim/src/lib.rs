//! Virtual FT-991A for testing the CAT engine without hardware
//!
//! This crate simulates the radio side of the serial conversation:
//!
//! - **VirtualRig**: answers CAT queries and applies CAT sets with the
//!   reply shapes the hardware produces, including its quirks (silent
//!   refusal of unprogrammed channel selections, `?;` for bad commands)
//! - **run_virtual_rig_task**: serves a rig over any async stream, so a
//!   `tokio::io::duplex` pair stands in for the serial port in tests
//!
//! # Example
//!
//! ```rust
//! use cat_rigsim::VirtualRig;
//! use cat_wire::OperatingMode;
//!
//! let mut rig = VirtualRig::new();
//! rig.program_channel(59, "FT8", 7_074_000, OperatingMode::DataU);
//!
//! // Commands arrive terminator-stripped; replies are complete frames
//! let out = rig.handle_command("FA");
//! assert_eq!(out.reply.as_deref(), Some("FA00014250000;"));
//!
//! // Selecting an unprogrammed channel is silently refused
//! let out = rig.handle_command("MC023");
//! assert_eq!(out.reply, None);
//! ```

pub mod rig;
pub mod task;

pub use rig::{CommandOutcome, MemoryChannel, VirtualRig, VirtualRigConfig};
pub use task::{run_virtual_rig_task, RigStateEvent, VirtualRigCommand};
