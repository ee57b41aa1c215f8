//! FT-991A Control Engine
//!
//! This crate drives a Yaesu FT-991A over its CAT serial interface. The
//! protocol is half-duplex ASCII with positional reply attribution, so the
//! whole engine is built around one rule: a single owner talks on the wire,
//! one command at a time.
//!
//! # Architecture
//!
//! - [`CatSession`] owns the transport and enforces the exchange discipline
//!   (drain stale input, write, wait out the reply deadline)
//! - [`run_engine_actor`] wraps a session in an actor task: foreground
//!   commands arrive on a channel, background polls (meters, frequency,
//!   transmit status) run on timers, and everything serializes through one
//!   select loop
//! - Foreground operations open *inhibit windows* during which poll ticks
//!   are skipped, keeping the rig's settle time free of traffic
//!
//! The transport is generic: real rigs come in through
//! [`transport::open_serial`], tests and simulators through
//! `tokio::io::duplex()`.
//!
//! # Example
//!
//! ```rust,no_run
//! use cat_engine::{run_engine_actor, transport, EngineConfig};
//! use tokio::sync::mpsc;
//!
//! # async fn demo() -> Result<(), cat_engine::EngineError> {
//! let config = EngineConfig::default();
//! let stream = transport::open_serial("/dev/ttyUSB0", config.baud_rate)?;
//!
//! let (cmd_tx, cmd_rx) = mpsc::channel(64);
//! let (event_tx, mut event_rx) = mpsc::channel(256);
//! tokio::spawn(run_engine_actor(stream, config, cmd_rx, event_tx));
//!
//! while let Some(event) = event_rx.recv().await {
//!     println!("{:?}", event);
//! }
//! # drop(cmd_tx);
//! # Ok(())
//! # }
//! ```

pub mod actor;
pub mod config;
pub mod error;
pub mod events;
pub mod memory;
pub mod preset;
pub mod session;
pub mod snapshot;
pub mod state;
pub mod transport;
pub mod tuning;

// Re-export actor types
pub use actor::{run_engine_actor, EngineCommand};

// Re-export the session and its configuration
pub use config::EngineConfig;
pub use session::CatSession;

// Re-export state and event types
pub use error::EngineError;
pub use events::EngineEvent;
pub use memory::MemoryHit;
pub use state::{RigState, TuningMode};
