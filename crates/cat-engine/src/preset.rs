//! Ordered menu preset application
//!
//! A preset file is a list of `(code, value)` records applied in file
//! order. The rig never acknowledges a menu write, so each record is
//! fire-and-forget with a pacing delay; the delay is a budget, not a
//! confirmation wait.

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio::time::sleep;
use tracing::{debug, warn};

use cat_wire::PresetRecord;

use crate::error::EngineError;
use crate::events::EngineEvent;
use crate::session::CatSession;

/// Apply a preset batch, returning the number of records actually written
///
/// Records with an empty code or value are skipped, not fatal; so are
/// records whose code the command builder rejects. Completion opens an
/// inhibit window so pollers stay off the wire while the rig digests the
/// batch.
pub async fn apply<T>(
    session: &mut CatSession<T>,
    records: &[PresetRecord],
    event_tx: &mpsc::Sender<EngineEvent>,
) -> Result<usize, EngineError>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    let total = records.len();
    let mut applied = 0usize;

    for (index, record) in records.iter().enumerate() {
        if record.is_well_formed() {
            match session.set_menu(&record.code, &record.value).await {
                Ok(()) => applied += 1,
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => warn!("Skipping preset {}: {}", record.code, e),
            }
            sleep(session.config().preset_pacing()).await;
        } else {
            debug!("Skipping incomplete preset record {:?}", record.code);
        }

        let _ = event_tx
            .send(EngineEvent::PresetProgress {
                index: index + 1,
                total,
                applied,
            })
            .await;
    }

    session.set_inhibit(session.config().preset_inhibit());
    Ok(applied)
}
