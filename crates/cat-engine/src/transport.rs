//! Serial transport setup

use std::time::Duration;

use tokio_serial::{SerialPortBuilderExt, SerialStream};
use tracing::info;

use crate::error::EngineError;

/// Open the serial port the rig is attached to
///
/// The builder timeout only governs the open itself; reply deadlines are
/// the session's business.
pub fn open_serial(port: &str, baud_rate: u32) -> Result<SerialStream, EngineError> {
    let stream = tokio_serial::new(port, baud_rate)
        .timeout(Duration::from_millis(100))
        .open_native_async()?;
    info!("Opened {} at {} baud", port, baud_rate);
    Ok(stream)
}
