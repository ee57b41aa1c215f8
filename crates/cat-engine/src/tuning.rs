//! Frequency digit editing
//!
//! The frequency is edited one display digit at a time, the way the front
//! panel dial works on a selected digit: no carry into neighboring digits,
//! wrapping 9 to 0 and back. The rig's answer after the write is the
//! authoritative result; band limits can land it somewhere other than the
//! local computation.

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::time::sleep;
use tracing::debug;

use cat_wire::freq;

use crate::error::EngineError;
use crate::session::CatSession;

/// Nudge one editable frequency digit up or down
///
/// `digit_index` 0 is the most significant editable digit (hundreds of
/// MHz), 8 the least (single Hz). Polling stays inhibited across the edit
/// and its settle window.
pub async fn adjust_digit<T>(
    session: &mut CatSession<T>,
    digit_index: usize,
    direction: i32,
) -> Result<u64, EngineError>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    if digit_index >= freq::EDITABLE_DIGITS {
        return Err(EngineError::InvalidDigit {
            requested: digit_index,
        });
    }

    // A memory recall or stuck tag edit makes FA writes land nowhere
    if !session.ensure_vfo().await? {
        debug!("Editing frequency despite unclear VFO state");
    }

    session.set_inhibit(session.config().tune_inhibit());

    let current = session.require_frequency().await?;
    let target = freq::adjust_digit(current, digit_index, direction);
    let commanded = session.set_frequency(target).await?;

    sleep(session.config().set_settle()).await;

    let confirmed = session.require_frequency().await?;
    if confirmed != commanded {
        debug!("Rig settled on {} Hz after commanding {} Hz", confirmed, commanded);
    }

    session.set_inhibit(session.config().tune_inhibit());
    Ok(confirmed)
}
